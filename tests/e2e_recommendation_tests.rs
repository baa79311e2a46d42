//! End-to-end tests for similarity lookups, best paths and recommendations

mod common;

use common::*;
use syncup_core::catalog_store::{Track, TrackId};

fn ids(tracks: &[Track]) -> Vec<TrackId> {
    tracks.iter().map(|t| t.id).collect()
}

// =============================================================================
// Similarity Tests
// =============================================================================

#[test]
fn test_similar_tracks_ranked_by_weight() {
    let env = TestEnv::seeded();
    let similar = env.state.similar(BOHEMIAN_RHAPSODY_ID, 3);
    assert_eq!(
        titles(&similar),
        vec!["We Will Rock You", "Another One Bites the Dust", "Hotel California"]
    );
}

#[test]
fn test_similar_unknown_or_isolated() {
    let env = TestEnv::seeded();
    assert!(env.state.similar(999, 5).is_empty());
    // No other folk rock track and none released in 1965.
    assert!(env.state.similar(LIKE_A_ROLLING_STONE_ID, 5).is_empty());
}

#[test]
fn test_best_path_prefers_strong_links() {
    let env = TestEnv::seeded();
    let path = env
        .state
        .best_path(ANOTHER_ONE_BITES_THE_DUST_ID, STAIRWAY_TO_HEAVEN_ID);
    assert_eq!(
        ids(&path),
        vec![
            ANOTHER_ONE_BITES_THE_DUST_ID,
            WE_WILL_ROCK_YOU_ID,
            BOHEMIAN_RHAPSODY_ID,
            STAIRWAY_TO_HEAVEN_ID
        ]
    );
}

#[test]
fn test_best_path_edge_cases() {
    let env = TestEnv::seeded();
    assert_eq!(
        ids(&env.state.best_path(THRILLER_ID, THRILLER_ID)),
        vec![THRILLER_ID]
    );
    // The pop tracks form their own component.
    assert!(env
        .state
        .best_path(BOHEMIAN_RHAPSODY_ID, BILLIE_JEAN_ID)
        .is_empty());
    assert!(env.state.best_path(BOHEMIAN_RHAPSODY_ID, 999).is_empty());
}

// =============================================================================
// Discovery Tests
// =============================================================================

#[test]
fn test_discover_from_demo_favorites() {
    let env = TestEnv::seeded();
    assert_eq!(
        titles(&env.state.favorites_of(JUAN)),
        vec![
            "Bohemian Rhapsody",
            "Hotel California",
            "Stairway to Heaven",
            "Like a Rolling Stone"
        ]
    );

    let discovered = ids(&env.state.discover(JUAN, None));
    assert_eq!(discovered, vec![3, 2, 8, 13, 16, 17]);
    for id in [BOHEMIAN_RHAPSODY_ID, HOTEL_CALIFORNIA_ID, STAIRWAY_TO_HEAVEN_ID] {
        assert!(!discovered.contains(&id));
    }
}

#[test]
fn test_discover_respects_cap() {
    let env = TestEnv::seeded();
    assert_eq!(ids(&env.state.discover(JUAN, Some(2))), vec![3, 2]);
    assert!(env.state.discover(JUAN, Some(0)).is_empty());
}

#[test]
fn test_discover_without_favorites() {
    let env = TestEnv::seeded();
    assert!(env.state.discover(ANA, None).is_empty());
    assert!(env.state.discover("nobody", None).is_empty());
}

#[test]
fn test_discover_follows_favorite_changes() {
    let env = TestEnv::seeded();
    assert!(env.state.add_favorite(ANA, THRILLER_ID).unwrap());
    assert_eq!(
        titles(&env.state.discover(ANA, None)),
        vec!["Billie Jean", "Beat It"]
    );

    assert!(env.state.add_favorite(ANA, BILLIE_JEAN_ID).unwrap());
    assert_eq!(titles(&env.state.discover(ANA, None)), vec!["Beat It"]);

    assert!(env.state.remove_favorite(ANA, THRILLER_ID));
    assert_eq!(
        titles(&env.state.discover(ANA, None)),
        vec!["Thriller", "Beat It"]
    );
}

// =============================================================================
// Radio Tests
// =============================================================================

#[test]
fn test_radio_starts_with_seed() {
    let env = TestEnv::seeded();
    let playlist = env.state.radio(BOHEMIAN_RHAPSODY_ID, Some(4));
    assert_eq!(ids(&playlist), vec![1, 3, 2, 7]);
}

#[test]
fn test_radio_edge_cases() {
    let env = TestEnv::seeded();
    assert!(env.state.radio(999, None).is_empty());
    assert!(env.state.radio(BOHEMIAN_RHAPSODY_ID, Some(0)).is_empty());
    assert_eq!(
        ids(&env.state.radio(LIKE_A_ROLLING_STONE_ID, None)),
        vec![LIKE_A_ROLLING_STONE_ID]
    );
    assert_eq!(
        ids(&env.state.radio(BEAT_IT_ID, None)),
        vec![BEAT_IT_ID, BILLIE_JEAN_ID, THRILLER_ID]
    );
}

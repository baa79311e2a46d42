//! Pairwise content similarity between tracks.

use crate::catalog_store::Track;

/// Edges below this score are never stored in the graph.
pub const SIMILARITY_THRESHOLD: f64 = 0.3;

const SAME_GENRE_SCORE: f64 = 0.5;
const SAME_ARTIST_SCORE: f64 = 0.4;
const YEAR_PROXIMITY_SCORE: f64 = 0.3;
const YEAR_PROXIMITY_WINDOW: i32 = 5;

fn same_text(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

/// Similarity in `[0, 1]`, symmetric and deterministic.
///
/// Same genre adds 0.5, same artist 0.4, and a release year within five
/// years adds up to 0.3, decreasing linearly with the distance. A track
/// compared with itself scores 1.0.
pub fn similarity(a: &Track, b: &Track) -> f64 {
    if a.id == b.id {
        return 1.0;
    }

    let mut score = 0.0;
    if same_text(&a.genre, &b.genre) {
        score += SAME_GENRE_SCORE;
    }
    if same_text(&a.artist, &b.artist) {
        score += SAME_ARTIST_SCORE;
    }
    let distance = (a.year - b.year).abs();
    if distance <= YEAR_PROXIMITY_WINDOW {
        score += YEAR_PROXIMITY_SCORE
            * (1.0 - distance as f64 / YEAR_PROXIMITY_WINDOW as f64);
    }
    score.min(1.0)
}

//! Demo dataset: a small catalog, a handful of accounts, their favorites
//! and a social network between them.
//!
//! Seeding can run on every start. Tracks are matched by title and artist,
//! accounts by handle, and only missing or stale fields are rewritten.

use crate::catalog_store::{CatalogStore, NewTrack, Track};
use crate::social::SocialService;
use crate::user::{Account, AccountRole, CredentialHasher, FavoritesStore, IdentityIndex, UserStore};
use anyhow::{Context, Result};
use tracing::{debug, info};

struct DemoTrack {
    title: &'static str,
    artist: &'static str,
    genre: &'static str,
    year: i32,
    duration_secs: u32,
    audio_ref: &'static str,
}

const fn demo(
    title: &'static str,
    artist: &'static str,
    genre: &'static str,
    year: i32,
    duration_secs: u32,
    audio_ref: &'static str,
) -> DemoTrack {
    DemoTrack {
        title,
        artist,
        genre,
        year,
        duration_secs,
        audio_ref,
    }
}

const DEMO_TRACKS: [DemoTrack; 20] = [
    demo("Bohemian Rhapsody", "Queen", "Rock", 1975, 355, "/audio/queen-bohemian-rhapsody.wav"),
    demo("Another One Bites the Dust", "Queen", "Rock", 1980, 216, "/audio/queen-another-one-bites-the-dust.wav"),
    demo("We Will Rock You", "Queen", "Rock", 1977, 122, "/audio/queen-we-will-rock-you.wav"),
    demo("Billie Jean", "Michael Jackson", "Pop", 1983, 294, "/audio/michael-jackson-billie-jean.wav"),
    demo("Thriller", "Michael Jackson", "Pop", 1982, 357, "/audio/michael-jackson-thriller.wav"),
    demo("Beat It", "Michael Jackson", "Pop", 1983, 258, "/audio/michael-jackson-beat-it.wav"),
    demo("Hotel California", "Eagles", "Rock", 1977, 391, "/audio/eagles-hotel-california.wav"),
    demo("Take It Easy", "Eagles", "Rock", 1972, 211, "/audio/eagles-take-it-easy.wav"),
    demo("Stairway to Heaven", "Led Zeppelin", "Rock", 1971, 482, "/audio/led-zeppelin-stairway-to-heaven.wav"),
    demo("Smells Like Teen Spirit", "Nirvana", "Grunge", 1991, 301, "/audio/nirvana-smells-like-teen-spirit.wav"),
    demo("Sweet Child O' Mine", "Guns N' Roses", "Rock", 1988, 356, "/audio/guns-n-roses-sweet-child-o-mine.wav"),
    demo("Like a Rolling Stone", "Bob Dylan", "Folk Rock", 1965, 366, "/audio/bob-dylan-like-a-rolling-stone.wav"),
    demo("Imagine", "John Lennon", "Rock", 1971, 183, "/audio/john-lennon-imagine.wav"),
    demo("Purple Rain", "Prince", "Pop Rock", 1984, 537, "/audio/prince-purple-rain.wav"),
    demo("Superstition", "Stevie Wonder", "Funk", 1972, 267, "/audio/superstition.wav"),
    demo("Gimme Shelter", "The Rolling Stones", "Rock", 1969, 271, "/audio/rolling-stones-gimme-shelter.wav"),
    demo("A Day in the Life", "The Beatles", "Rock", 1967, 335, "/audio/beatles-a-day-in-the-life.wav"),
    demo("Comfortably Numb", "Pink Floyd", "Progressive Rock", 1979, 384, "/audio/pink-floyd-comfortably-numb.wav"),
    demo("Paint It Black", "The Rolling Stones", "Rock", 1966, 203, "/audio/rolling-stones-paint-it-black.wav"),
    demo("Free Bird", "Lynyrd Skynyrd", "Southern Rock", 1974, 554, "/audio/lynyrd-skynyrd-free-bird.wav"),
];

/// (handle, password, display name, role)
const DEMO_ACCOUNTS: [(&str, &str, &str, AccountRole); 5] = [
    ("admin", "admin123", "Administrator", AccountRole::Admin),
    ("juan", "password123", "Juan Pérez", AccountRole::Regular),
    ("maria", "password123", "María García", AccountRole::Regular),
    ("carlos", "password123", "Carlos López", AccountRole::Regular),
    ("ana", "password123", "Ana Martínez", AccountRole::Regular),
];

/// Favorites as positions in `DEMO_TRACKS`.
const DEMO_FAVORITES: [(&str, &[usize]); 3] = [
    ("juan", &[0, 6, 8, 11]),
    ("maria", &[3, 4, 5, 13]),
    ("carlos", &[9, 17, 19]),
];

const DEMO_CONNECTIONS: [(&str, &str); 5] = [
    ("juan", "maria"),
    ("juan", "carlos"),
    ("maria", "carlos"),
    ("maria", "ana"),
    ("carlos", "ana"),
];

/// Audio references of the demo tracks, for setting up a media directory.
pub fn demo_audio_refs() -> impl Iterator<Item = &'static str> {
    DEMO_TRACKS.iter().map(|t| t.audio_ref)
}

/// What a seeding run produced.
#[derive(Debug, Default)]
pub struct SeedReport {
    pub tracks: Vec<Track>,
    pub accounts: Vec<Account>,
    pub favorites_added: usize,
    pub connections_added: usize,
}

/// Inserts the demo tracks that are missing and refreshes duration and
/// audio of the ones already there. Returns the tracks in demo order.
pub fn seed_tracks(catalog_store: &dyn CatalogStore) -> Result<Vec<Track>> {
    let mut tracks = Vec::with_capacity(DEMO_TRACKS.len());
    for demo in &DEMO_TRACKS {
        let existing = catalog_store
            .find_track_by_title_and_artist(demo.title, demo.artist)
            .with_context(|| format!("Failed to look up demo track '{}'", demo.title))?;

        let track = match existing {
            Some(mut track) => {
                let stale = track.duration_secs != demo.duration_secs
                    || track.audio_ref.as_deref() != Some(demo.audio_ref);
                if stale {
                    track.duration_secs = demo.duration_secs;
                    track.audio_ref = Some(demo.audio_ref.to_string());
                    catalog_store.save_track(track)?
                } else {
                    track
                }
            }
            None => catalog_store.save_track(
                NewTrack {
                    title: demo.title.to_string(),
                    artist: demo.artist.to_string(),
                    genre: demo.genre.to_string(),
                    year: demo.year,
                    duration_secs: demo.duration_secs,
                    audio_ref: Some(demo.audio_ref.to_string()),
                }
                .into_track(0),
            )?,
        };
        tracks.push(track);
    }
    debug!("Seeded {} demo tracks", tracks.len());
    Ok(tracks)
}

/// Creates the demo accounts, or fixes existing ones that lack a credential
/// hash or carry a different display name or role.
pub fn seed_accounts(user_store: &dyn UserStore, hasher: CredentialHasher) -> Result<Vec<Account>> {
    let mut accounts = Vec::with_capacity(DEMO_ACCOUNTS.len());
    for (handle, password, display_name, role) in DEMO_ACCOUNTS {
        let existing = user_store
            .find_account_by_handle(handle)
            .with_context(|| format!("Failed to look up demo account '{}'", handle))?;

        let account = match existing {
            Some(mut account) => {
                let mut stale = false;
                if !account.has_credentials() {
                    account.credential_hash = hasher.hash_new(password)?;
                    stale = true;
                }
                if account.display_name != display_name || account.role != role {
                    account.display_name = display_name.to_string();
                    account.role = role;
                    stale = true;
                }
                if stale {
                    info!("Demo account '{}' updated", handle);
                    user_store.save_account(account)?
                } else {
                    account
                }
            }
            None => user_store.save_account(
                Account::new(handle, display_name)
                    .with_role(role)
                    .with_credential_hash(hasher.hash_new(password)?),
            )?,
        };
        accounts.push(account);
    }
    Ok(accounts)
}

/// Seeds the stores, registers the accounts in the identity index, then
/// wires favorites and connections.
pub fn seed_demo_data(
    catalog_store: &dyn CatalogStore,
    user_store: &dyn UserStore,
    identities: &IdentityIndex,
    favorites: &FavoritesStore,
    social: &SocialService,
) -> Result<SeedReport> {
    let tracks = seed_tracks(catalog_store)?;
    let accounts = seed_accounts(user_store, CredentialHasher::Sha256)?;
    for account in &accounts {
        identities.put(account.clone());
    }

    let mut favorites_added = 0;
    for (handle, positions) in DEMO_FAVORITES {
        for position in positions {
            if let Some(track) = tracks.get(*position) {
                if favorites.add(handle, track) {
                    favorites_added += 1;
                }
            }
        }
    }

    let connections_added = DEMO_CONNECTIONS
        .iter()
        .filter(|(a, b)| social.follow(a, b))
        .count();

    info!(
        "Demo data seeded: {} tracks, {} accounts, {} favorites, {} connections",
        tracks.len(),
        accounts.len(),
        favorites_added,
        connections_added
    );
    Ok(SeedReport {
        tracks,
        accounts,
        favorites_added,
        connections_added,
    })
}

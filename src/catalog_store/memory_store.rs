//! In-memory catalog store.
//!
//! Backs the demo binary and the test suites. Behaves like a relational
//! backend would: ids are assigned on first save and never reused.

use super::models::{Track, TrackId};
use super::trait_def::CatalogStore;
use anyhow::Result;
use parking_lot::RwLock;
use std::collections::BTreeMap;

#[derive(Default)]
struct Tables {
    tracks: BTreeMap<TrackId, Track>,
    last_id: TrackId,
}

#[derive(Default)]
pub struct InMemoryCatalogStore {
    tables: RwLock<Tables>,
}

fn matches_ignoring_case(stored: &str, wanted: &str) -> bool {
    stored.trim().to_lowercase() == wanted.trim().to_lowercase()
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given tracks.
    ///
    /// Tracks with id `0` get a fresh id, the others keep theirs.
    pub fn with_tracks(tracks: impl IntoIterator<Item = Track>) -> Result<Self> {
        let store = Self::new();
        for track in tracks {
            store.save_track(track)?;
        }
        Ok(store)
    }

    fn filter_tracks<F>(&self, predicate: F) -> Vec<Track>
    where
        F: Fn(&Track) -> bool,
    {
        self.tables
            .read()
            .tracks
            .values()
            .filter(|t| predicate(t))
            .cloned()
            .collect()
    }
}

impl CatalogStore for InMemoryCatalogStore {
    fn load_all_tracks(&self) -> Result<Vec<Track>> {
        Ok(self.tables.read().tracks.values().cloned().collect())
    }

    fn count_tracks(&self) -> Result<usize> {
        Ok(self.tables.read().tracks.len())
    }

    fn get_track(&self, id: TrackId) -> Result<Option<Track>> {
        Ok(self.tables.read().tracks.get(&id).cloned())
    }

    fn find_track_by_title_and_artist(
        &self,
        title: &str,
        artist: &str,
    ) -> Result<Option<Track>> {
        Ok(self
            .tables
            .read()
            .tracks
            .values()
            .find(|t| t.title == title && t.artist == artist)
            .cloned())
    }

    fn find_tracks_by_artist(&self, artist: &str) -> Result<Vec<Track>> {
        Ok(self.filter_tracks(|t| matches_ignoring_case(&t.artist, artist)))
    }

    fn find_tracks_by_genre(&self, genre: &str) -> Result<Vec<Track>> {
        Ok(self.filter_tracks(|t| matches_ignoring_case(&t.genre, genre)))
    }

    fn find_tracks_by_year(&self, year: i32) -> Result<Vec<Track>> {
        Ok(self.filter_tracks(|t| t.year == year))
    }

    fn save_track(&self, mut track: Track) -> Result<Track> {
        let mut tables = self.tables.write();
        if track.id == 0 {
            tables.last_id += 1;
            track.id = tables.last_id;
        } else if track.id > tables.last_id {
            tables.last_id = track.id;
        }
        tables.tracks.insert(track.id, track.clone());
        Ok(track)
    }

    fn delete_track(&self, id: TrackId) -> Result<bool> {
        Ok(self.tables.write().tracks.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_store::NewTrack;

    fn new_track(title: &str, artist: &str, genre: &str, year: i32) -> Track {
        NewTrack {
            title: title.to_string(),
            artist: artist.to_string(),
            genre: genre.to_string(),
            year,
            duration_secs: 200,
            audio_ref: None,
        }
        .into_track(0)
    }

    #[test]
    fn test_save_assigns_increasing_ids() {
        let store = InMemoryCatalogStore::new();
        let a = store.save_track(new_track("A", "X", "Rock", 1970)).unwrap();
        let b = store.save_track(new_track("B", "X", "Rock", 1971)).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.count_tracks().unwrap(), 2);
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let store = InMemoryCatalogStore::new();
        let a = store.save_track(new_track("A", "X", "Rock", 1970)).unwrap();
        assert!(store.delete_track(a.id).unwrap());
        assert!(!store.delete_track(a.id).unwrap());
        let b = store.save_track(new_track("B", "X", "Rock", 1971)).unwrap();
        assert_eq!(b.id, 2);
    }

    #[test]
    fn test_save_with_id_replaces() {
        let store = InMemoryCatalogStore::new();
        let mut a = store.save_track(new_track("A", "X", "Rock", 1970)).unwrap();
        a.title = "A2".to_string();
        store.save_track(a.clone()).unwrap();
        assert_eq!(store.count_tracks().unwrap(), 1);
        assert_eq!(store.get_track(a.id).unwrap().unwrap().title, "A2");
    }

    #[test]
    fn test_attribute_lookups() {
        let store = InMemoryCatalogStore::with_tracks([
            new_track("Bohemian Rhapsody", "Queen", "Rock", 1975),
            new_track("Thriller", "Michael Jackson", "Pop", 1982),
            new_track("We Will Rock You", "Queen", "Rock", 1977),
        ])
        .unwrap();

        assert_eq!(store.find_tracks_by_artist(" queen ").unwrap().len(), 2);
        assert_eq!(store.find_tracks_by_genre("POP").unwrap().len(), 1);
        assert_eq!(store.find_tracks_by_year(1977).unwrap().len(), 1);
        assert!(store.find_tracks_by_year(2001).unwrap().is_empty());

        let found = store
            .find_track_by_title_and_artist("Thriller", "Michael Jackson")
            .unwrap();
        assert_eq!(found.map(|t| t.id), Some(2));
        assert!(store
            .find_track_by_title_and_artist("Thriller", "Queen")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_lookups_ignore_non_ascii_case() {
        let store = InMemoryCatalogStore::with_tracks([
            new_track("Halo", "Beyoncé", "Pop", 2008),
            new_track("Malamente", "Rosalía", "Flamenco", 2018),
        ])
        .unwrap();

        let found = store.find_tracks_by_artist("BEYONCÉ").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Halo");
        assert_eq!(store.find_tracks_by_artist("rosalía").unwrap().len(), 1);
        assert!(store.find_tracks_by_artist("beyonce").unwrap().is_empty());
    }
}

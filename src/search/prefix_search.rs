//! Prefix autocomplete over track titles and artists.
//!
//! Every track is indexed twice, once under its title and once under its
//! artist, so typing either finds it.

use super::prefix_index::PrefixIndex;
use super::search_vault::{SearchVault, SearchVaultStats};
use crate::catalog_store::Track;
use parking_lot::RwLock;
use tracing::{debug, info};

pub struct PrefixSearchVault {
    index: RwLock<PrefixIndex<Track>>,
}

fn index_track(index: &mut PrefixIndex<Track>, track: &Track) {
    index.insert(&track.title, track.clone());
    index.insert(&track.artist, track.clone());
}

fn unindex_track(index: &mut PrefixIndex<Track>, track: &Track) {
    index.remove(&track.title, track);
    index.remove(&track.artist, track);
}

impl PrefixSearchVault {
    pub fn new() -> Self {
        PrefixSearchVault {
            index: RwLock::new(PrefixIndex::new()),
        }
    }

    pub fn from_tracks(tracks: &[Track]) -> Self {
        let vault = Self::new();
        vault.rebuild_index(tracks);
        vault
    }
}

impl Default for PrefixSearchVault {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchVault for PrefixSearchVault {
    fn search(&self, query: &str, max_results: usize) -> Vec<Track> {
        let mut results = self.index.read().query(query);
        results.sort_by_key(|t| t.id);
        results.truncate(max_results);
        debug!("Prefix search '{}' -> {} results", query, results.len());
        results
    }

    fn rebuild_index(&self, tracks: &[Track]) {
        let mut fresh = PrefixIndex::new();
        for track in tracks {
            index_track(&mut fresh, track);
        }
        let entries = fresh.len();
        *self.index.write() = fresh;
        info!(
            "Prefix index rebuilt: {} tracks, {} entries",
            tracks.len(),
            entries
        );
    }

    fn upsert_track(&self, previous: Option<&Track>, current: &Track) {
        let mut index = self.index.write();
        if let Some(previous) = previous {
            unindex_track(&mut index, previous);
        }
        index_track(&mut index, current);
    }

    fn remove_track(&self, track: &Track) {
        unindex_track(&mut self.index.write(), track);
    }

    fn get_stats(&self) -> SearchVaultStats {
        SearchVaultStats {
            indexed_items: self.index.read().len(),
            index_type: "Prefix trie".to_string(),
        }
    }
}

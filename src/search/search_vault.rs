//! Search vault trait and result types

use crate::catalog_store::Track;
use serde::{Deserialize, Serialize};

pub trait SearchVault: Send + Sync {
    /// Autocomplete: tracks whose title or artist starts with `query`.
    ///
    /// Blank queries return nothing. Results are unique by track id.
    fn search(&self, query: &str, max_results: usize) -> Vec<Track>;

    /// Rebuild the entire index from the given tracks.
    ///
    /// Readers keep seeing the previous index until the new one is complete.
    fn rebuild_index(&self, tracks: &[Track]);

    /// Add or update a track.
    ///
    /// When `previous` is given its title and artist entries are removed
    /// first, so a renamed track stops matching its old title.
    fn upsert_track(&self, previous: Option<&Track>, current: &Track);

    /// Remove every entry of a track.
    fn remove_track(&self, track: &Track);

    /// Get statistics about the search index.
    fn get_stats(&self) -> SearchVaultStats;
}

/// Statistics about the search vault.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchVaultStats {
    /// Number of (text, track) entries in the index
    pub indexed_items: usize,
    /// Type of search index (e.g., "Prefix trie")
    pub index_type: String,
}

/// A no-op search vault that returns empty results.
/// Used when autocomplete is disabled.
pub struct NoopSearchVault;

impl SearchVault for NoopSearchVault {
    fn search(&self, _query: &str, _max_results: usize) -> Vec<Track> {
        Vec::new()
    }

    fn rebuild_index(&self, _tracks: &[Track]) {}

    fn upsert_track(&self, _previous: Option<&Track>, _current: &Track) {}

    fn remove_track(&self, _track: &Track) {}

    fn get_stats(&self) -> SearchVaultStats {
        SearchVaultStats {
            indexed_items: 0,
            index_type: "Noop (disabled)".to_string(),
        }
    }
}

/// Implement SearchVault for Arc<T> to allow shared ownership across services.
impl<T: SearchVault + ?Sized> SearchVault for std::sync::Arc<T> {
    fn search(&self, query: &str, max_results: usize) -> Vec<Track> {
        (**self).search(query, max_results)
    }

    fn rebuild_index(&self, tracks: &[Track]) {
        (**self).rebuild_index(tracks)
    }

    fn upsert_track(&self, previous: Option<&Track>, current: &Track) {
        (**self).upsert_track(previous, current)
    }

    fn remove_track(&self, track: &Track) {
        (**self).remove_track(track)
    }

    fn get_stats(&self) -> SearchVaultStats {
        (**self).get_stats()
    }
}

//! Factory function for creating search vault instances

use super::{NoopSearchVault, PrefixSearchVault, SearchVault};
use crate::catalog_store::Track;
use crate::config::SearchEngine;
use std::sync::Arc;
use tracing::info;

/// Create a search vault based on the configured search engine, indexing
/// the given tracks.
pub fn create_search_vault(engine: SearchEngine, tracks: &[Track]) -> Arc<dyn SearchVault> {
    match engine {
        SearchEngine::Prefix => {
            info!("Creating prefix search vault");
            Arc::new(PrefixSearchVault::from_tracks(tracks))
        }
        SearchEngine::Noop => {
            info!("Creating Noop search vault (autocomplete disabled)");
            Arc::new(NoopSearchVault)
        }
    }
}

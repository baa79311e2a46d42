//! Syncup core library
//!
//! In-memory engines of a music catalog: prefix autocomplete, a weighted
//! track similarity graph, a social graph between accounts, a handle index
//! with read-repair, favorites and the recommendations built on top of them.

pub mod catalog;
pub mod catalog_store;
pub mod cli_style;
pub mod config;
pub mod recommendation;
pub mod search;
pub mod seed;
pub mod similarity;
pub mod social;
pub mod state;
pub mod user;

// Re-export commonly used types for convenience
pub use catalog::{CatalogError, CatalogService};
pub use catalog_store::{CatalogStore, InMemoryCatalogStore, NewTrack, Track, TrackId};
pub use config::{AppConfig, CliConfig, FileConfig};
pub use recommendation::RecommendationEngine;
pub use search::{PrefixIndex, SearchVault};
pub use similarity::{SimilarityGraph, SimilarityService};
pub use social::{SocialGraph, SocialService};
pub use state::SyncupState;
pub use user::{Account, FavoritesStore, IdentityIndex, InMemoryUserStore, UserStore};

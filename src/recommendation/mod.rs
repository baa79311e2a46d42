//! Track recommendations built on favorites and the similarity graph.

use crate::catalog_store::{Track, TrackId};
use crate::similarity::SimilarityService;
use crate::user::FavoritesStore;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_NEIGHBORS_PER_FAVORITE: usize = 5;

pub struct RecommendationEngine {
    favorites: Arc<FavoritesStore>,
    similarity: Arc<SimilarityService>,
    neighbors_per_favorite: usize,
}

impl RecommendationEngine {
    pub fn new(favorites: Arc<FavoritesStore>, similarity: Arc<SimilarityService>) -> Self {
        Self::with_neighbors_per_favorite(favorites, similarity, DEFAULT_NEIGHBORS_PER_FAVORITE)
    }

    pub fn with_neighbors_per_favorite(
        favorites: Arc<FavoritesStore>,
        similarity: Arc<SimilarityService>,
        neighbors_per_favorite: usize,
    ) -> Self {
        RecommendationEngine {
            favorites,
            similarity,
            neighbors_per_favorite,
        }
    }

    /// Tracks close to the account's favorites that are not favorites
    /// already.
    ///
    /// Each favorite contributes its strongest direct neighbors, in favorite
    /// order. Duplicates keep their first position.
    pub fn discover(&self, handle: &str, max_items: usize) -> Vec<Track> {
        if max_items == 0 {
            return Vec::new();
        }
        let favorites = self.favorites.list(handle);
        let favorite_ids: HashSet<TrackId> = favorites.iter().map(|t| t.id).collect();

        let mut seen = HashSet::new();
        let mut discovered = Vec::new();
        'favorites: for favorite in &favorites {
            for candidate in self
                .similarity
                .similar(favorite.id, self.neighbors_per_favorite)
            {
                if favorite_ids.contains(&candidate.id) || !seen.insert(candidate.id) {
                    continue;
                }
                discovered.push(candidate);
                if discovered.len() >= max_items {
                    break 'favorites;
                }
            }
        }

        debug!(
            "Discovered {} tracks for '{}' from {} favorites",
            discovered.len(),
            handle,
            favorites.len()
        );
        discovered
    }

    /// A playlist starting with the seed track followed by its most similar
    /// direct neighbors. Empty if the seed is not in the graph.
    pub fn radio(&self, seed_id: TrackId, max_items: usize) -> Vec<Track> {
        if max_items == 0 {
            return Vec::new();
        }
        let Some((seed, neighbors)) = self.similarity.seed_with_neighbors(seed_id, max_items - 1)
        else {
            return Vec::new();
        };
        let mut playlist = vec![seed];
        playlist.extend(neighbors.into_iter().filter(|t| t.id != seed_id));
        playlist
    }
}

//! Composition root wiring stores, indexes and services together.

use crate::catalog::{CatalogResult, CatalogService};
use crate::catalog_store::{AudioAvailability, CatalogStore, Track, TrackId};
use crate::config::AppConfig;
use crate::recommendation::RecommendationEngine;
use crate::search::{create_search_vault, AdvancedSearch, SearchError, SearchRequest, SearchVault};
use crate::seed::{seed_demo_data, SeedReport};
use crate::similarity::SimilarityService;
use crate::social::SocialService;
use crate::user::{Account, CredentialHasher, FavoritesStore, IdentityIndex, UserStore};
use anyhow::{bail, Context, Result};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

pub struct SyncupState {
    pub config: AppConfig,
    pub catalog_store: Arc<dyn CatalogStore>,
    pub user_store: Arc<dyn UserStore>,
    pub identities: Arc<IdentityIndex>,
    pub favorites: Arc<FavoritesStore>,
    pub search_vault: Arc<dyn SearchVault>,
    pub similarity: Arc<SimilarityService>,
    pub social: Arc<SocialService>,
    pub catalog: CatalogService,
    pub recommendations: RecommendationEngine,
    advanced_search: AdvancedSearch,
    seed_report: Option<SeedReport>,
}

impl SyncupState {
    /// Loads accounts, optionally seeds the demo dataset, reconciles audio
    /// and builds the in-memory indexes from the catalog store.
    pub fn bootstrap(
        config: AppConfig,
        catalog_store: Arc<dyn CatalogStore>,
        user_store: Arc<dyn UserStore>,
        audio: Arc<dyn AudioAvailability>,
    ) -> Result<Self> {
        let start = Instant::now();

        let identities = Arc::new(IdentityIndex::new(user_store.clone()));
        identities
            .load_from_store()
            .context("Failed to load accounts")?;

        let favorites = Arc::new(FavoritesStore::new());
        let similarity = Arc::new(SimilarityService::new());
        let social = Arc::new(SocialService::new(
            identities.clone(),
            config.social.suggestion_depth,
        ));
        let search_vault = create_search_vault(config.search.engine, &[]);

        let seed_report = if config.seed_demo_data {
            Some(seed_demo_data(
                catalog_store.as_ref(),
                user_store.as_ref(),
                &identities,
                &favorites,
                &social,
            )?)
        } else {
            None
        };

        let catalog = CatalogService::new(
            catalog_store.clone(),
            search_vault.clone(),
            similarity.clone(),
            favorites.clone(),
            audio,
            config.default_audio_tracks.clone(),
            config.prune_tracks_without_audio,
        );
        catalog.reconcile_audio()?;

        let tracks = catalog_store
            .load_all_tracks()
            .context("Failed to load tracks for indexing")?;
        search_vault.rebuild_index(&tracks);
        similarity.build(&tracks);

        let recommendations = RecommendationEngine::with_neighbors_per_favorite(
            favorites.clone(),
            similarity.clone(),
            config.recommendation.discovery_neighbors_per_favorite,
        );
        let advanced_search = AdvancedSearch::new(catalog_store.clone());

        info!(
            "Syncup state ready in {:?}: {} tracks, {} accounts",
            start.elapsed(),
            tracks.len(),
            identities.len()
        );

        Ok(SyncupState {
            config,
            catalog_store,
            user_store,
            identities,
            favorites,
            search_vault,
            similarity,
            social,
            catalog,
            recommendations,
            advanced_search,
            seed_report,
        })
    }

    pub fn seed_report(&self) -> Option<&SeedReport> {
        self.seed_report.as_ref()
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Prefix autocomplete capped at the configured limit.
    pub fn autocomplete(&self, query: &str) -> Vec<Track> {
        self.search_vault
            .search(query, self.config.search.autocomplete_limit)
    }

    pub fn advanced_search(&self, request: &SearchRequest) -> Result<Vec<Track>, SearchError> {
        self.advanced_search.search(request)
    }

    // ========================================================================
    // Similarity and recommendations
    // ========================================================================

    pub fn similar(&self, id: TrackId, k: usize) -> Vec<Track> {
        self.similarity.similar(id, k)
    }

    pub fn best_path(&self, from: TrackId, to: TrackId) -> Vec<Track> {
        self.similarity.path(from, to)
    }

    pub fn discover(&self, handle: &str, max_items: Option<usize>) -> Vec<Track> {
        let max_items = max_items.unwrap_or(self.config.recommendation.default_discovery_size);
        self.recommendations.discover(handle, max_items)
    }

    pub fn radio(&self, seed_id: TrackId, max_items: Option<usize>) -> Vec<Track> {
        let max_items = max_items.unwrap_or(self.config.recommendation.default_radio_size);
        self.recommendations.radio(seed_id, max_items)
    }

    // ========================================================================
    // Social
    // ========================================================================

    pub fn follow(&self, follower: &str, followee: &str) -> bool {
        self.social.follow(follower, followee)
    }

    pub fn unfollow(&self, follower: &str, followee: &str) -> bool {
        self.social.unfollow(follower, followee)
    }

    pub fn following(&self, handle: &str) -> Vec<Account> {
        self.social.following(handle)
    }

    pub fn suggestions(&self, handle: &str, max_results: Option<usize>) -> Vec<Account> {
        let max_results = max_results.unwrap_or(self.config.social.default_suggestions);
        self.social.suggestions(handle, max_results)
    }

    /// Whether `b` is within the configured connection depth of `a`.
    pub fn are_connected(&self, a: &str, b: &str) -> bool {
        self.social
            .are_connected(a, b, self.config.social.connection_depth)
    }

    // ========================================================================
    // Favorites
    // ========================================================================

    /// Returns Ok(false) for unknown accounts or tracks and for duplicates.
    pub fn add_favorite(&self, handle: &str, track_id: TrackId) -> CatalogResult<bool> {
        if !self.identities.contains(handle) {
            debug!("Favorite rejected, unknown account '{}'", handle);
            return Ok(false);
        }
        let Some(track) = self.catalog.get(track_id)? else {
            return Ok(false);
        };
        Ok(self.favorites.add(handle, &track))
    }

    pub fn remove_favorite(&self, handle: &str, track_id: TrackId) -> bool {
        self.favorites.remove(handle, track_id)
    }

    pub fn favorites_of(&self, handle: &str) -> Vec<Track> {
        self.favorites.list(handle)
    }

    // ========================================================================
    // Accounts
    // ========================================================================

    pub fn account(&self, handle: &str) -> Option<Account> {
        self.identities.get(handle)
    }

    /// Stores a new account with a hashed credential and indexes it.
    pub fn register_account(
        &self,
        handle: &str,
        display_name: &str,
        password: &str,
    ) -> Result<Account> {
        let handle = handle.trim();
        if handle.is_empty() {
            bail!("Handle cannot be empty");
        }
        if self.identities.contains(handle) {
            bail!("Account '{}' already exists", handle);
        }
        let hash = CredentialHasher::Sha256.hash_new(password)?;
        let account = self
            .user_store
            .save_account(Account::new(handle, display_name).with_credential_hash(hash))
            .with_context(|| format!("Failed to save account '{}'", handle))?;
        self.identities.put(account.clone());
        info!("Registered account '{}'", handle);
        Ok(account)
    }

    /// Changes the display name and, for a non-empty password, the credential.
    /// Blank or absent fields keep their current value.
    pub fn update_account(
        &self,
        handle: &str,
        display_name: Option<&str>,
        password: Option<&str>,
    ) -> Result<Account> {
        let Some(mut account) = self.identities.get(handle) else {
            bail!("Account '{}' not found", handle.trim());
        };
        if let Some(name) = display_name.map(str::trim).filter(|n| !n.is_empty()) {
            account.display_name = name.to_string();
        }
        if let Some(password) = password.filter(|p| !p.is_empty()) {
            account.credential_hash = CredentialHasher::Sha256.hash_new(password)?;
        }
        let account = self
            .user_store
            .save_account(account)
            .with_context(|| format!("Failed to save account '{}'", handle.trim()))?;
        self.identities.update(account.clone());
        info!("Updated account '{}'", account.handle);
        Ok(account)
    }

    /// Removes the account from the store and the index, then drops its
    /// connections and favorites. Returns Ok(false) for unknown handles.
    pub fn delete_account(&self, handle: &str) -> Result<bool> {
        let handle = handle.trim();
        if !self.identities.contains(handle) {
            return Ok(false);
        }
        self.user_store
            .delete_account(handle)
            .with_context(|| format!("Failed to delete account '{}'", handle))?;
        self.identities.remove(handle);
        let connections = self.social.remove_account(handle);
        let favorites = self.favorites.remove_account(handle);
        info!(
            "Deleted account '{}' ({} connections, {} favorites dropped)",
            handle, connections, favorites
        );
        Ok(true)
    }

    /// Accounts whose handle or display name contains the query, ignoring
    /// case, ordered by handle. A blank query matches nothing.
    pub fn search_accounts(&self, query: &str) -> Vec<Account> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.identities
            .all()
            .into_iter()
            .filter(|a| {
                a.handle.to_lowercase().contains(&query)
                    || a.display_name.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Returns the account when the password matches its stored hash.
    pub fn authenticate(&self, handle: &str, password: &str) -> Result<Option<Account>> {
        let Some(account) = self.identities.get(handle) else {
            return Ok(None);
        };
        if !account.has_credentials() {
            return Ok(None);
        }
        let valid = CredentialHasher::verify(password, account.credential_hash.as_str())?;
        Ok(valid.then_some(account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_store::{AllAudioAvailable, InMemoryCatalogStore, StaticAudioAvailability};
    use crate::config::CliConfig;
    use crate::user::InMemoryUserStore;

    fn seeded_state() -> SyncupState {
        let config = AppConfig::resolve(
            &CliConfig {
                seed_demo_data: true,
                ..Default::default()
            },
            None,
        )
        .unwrap();
        SyncupState::bootstrap(
            config,
            Arc::new(InMemoryCatalogStore::new()),
            Arc::new(InMemoryUserStore::new()),
            Arc::new(AllAudioAvailable),
        )
        .unwrap()
    }

    #[test]
    fn test_bootstrap_with_demo_data() {
        let state = seeded_state();
        assert_eq!(state.seed_report().map(|r| r.tracks.len()), Some(20));
        assert_eq!(state.similarity.node_count(), 20);
        assert_eq!(state.autocomplete("queen").len(), 3);
        assert!(state.are_connected("juan", "ana"));
        assert_eq!(state.favorites_of("maria").len(), 4);
    }

    #[test]
    fn test_bootstrap_prunes_tracks_without_audio() {
        let config = AppConfig::resolve(
            &CliConfig {
                seed_demo_data: true,
                ..Default::default()
            },
            None,
        )
        .unwrap();
        // Only one demo track and no default audio is playable.
        let audio = StaticAudioAvailability::new(["/audio/superstition.wav"]);
        let state = SyncupState::bootstrap(
            config,
            Arc::new(InMemoryCatalogStore::new()),
            Arc::new(InMemoryUserStore::new()),
            Arc::new(audio),
        )
        .unwrap();

        let tracks = state.catalog.list().unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "Superstition");
        assert!(state.favorites_of("juan").is_empty());
        assert_eq!(state.autocomplete("s").len(), 1);
    }

    #[test]
    fn test_favorites_require_known_account_and_track() {
        let state = seeded_state();
        assert!(state.add_favorite("ana", 1).unwrap());
        assert!(!state.add_favorite("ana", 1).unwrap());
        assert!(!state.add_favorite("ghost", 1).unwrap());
        assert!(!state.add_favorite("ana", 999).unwrap());
        assert!(state.remove_favorite("ana", 1));
    }

    #[test]
    fn test_register_and_authenticate() {
        let state = seeded_state();
        assert!(state.authenticate("admin", "admin123").unwrap().is_some());
        assert!(state.authenticate("admin", "wrong").unwrap().is_none());

        state.register_account("lucia", "Lucía", "secret").unwrap();
        assert!(state.register_account("lucia", "Lucía", "secret").is_err());
        assert!(state.follow("lucia", "ana"));
        assert_eq!(
            state.authenticate("lucia", "secret").unwrap().map(|a| a.handle),
            Some("lucia".to_string())
        );
    }

    #[test]
    fn test_update_account() {
        let state = seeded_state();
        let updated = state
            .update_account("juan", Some("Juan P."), Some("new-pass"))
            .unwrap();
        assert_eq!(updated.display_name, "Juan P.");
        assert!(state.authenticate("juan", "new-pass").unwrap().is_some());
        assert!(state.authenticate("juan", "password123").unwrap().is_none());

        // Blank fields keep what is there.
        let kept = state.update_account("juan", Some("  "), Some("")).unwrap();
        assert_eq!(kept.display_name, "Juan P.");
        assert!(state.authenticate("juan", "new-pass").unwrap().is_some());

        assert!(state.update_account("ghost", Some("Ghost"), None).is_err());
    }

    #[test]
    fn test_delete_account() {
        let state = seeded_state();
        assert!(state.delete_account("juan").unwrap());
        assert!(state.account("juan").is_none());
        assert!(state.favorites_of("juan").is_empty());
        assert!(!state.are_connected("maria", "juan"));
        assert!(!state.delete_account("juan").unwrap());
    }

    #[test]
    fn test_search_accounts() {
        let state = seeded_state();
        let handles = |query: &str| -> Vec<String> {
            state
                .search_accounts(query)
                .into_iter()
                .map(|a| a.handle)
                .collect()
        };
        assert_eq!(handles("MAR"), vec!["ana", "maria"]);
        assert_eq!(handles("garcía"), vec!["maria"]);
        assert!(handles("  ").is_empty());
        assert!(handles("nobody").is_empty());
    }
}

//! Track lifecycle: every catalog write goes through here so the store, the
//! search vault, favorites and the similarity graph stay consistent.

use super::error::{CatalogError, CatalogResult};
use super::metrics::CatalogMetrics;
use crate::catalog_store::{
    validate_track, AudioAvailability, CatalogStore, NewTrack, Track, TrackId,
};
use crate::search::SearchVault;
use crate::similarity::SimilarityService;
use crate::user::FavoritesStore;
use anyhow::Context;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome of [`CatalogService::reconcile_audio`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Tracks that received a default audio reference.
    pub assigned: Vec<TrackId>,
    /// Tracks deleted because no playable audio could be found.
    pub pruned: Vec<TrackId>,
}

pub struct CatalogService {
    catalog_store: Arc<dyn CatalogStore>,
    search_vault: Arc<dyn SearchVault>,
    similarity: Arc<SimilarityService>,
    favorites: Arc<FavoritesStore>,
    audio: Arc<dyn AudioAvailability>,
    default_audio_tracks: Vec<String>,
    prune_tracks_without_audio: bool,
    /// Held by every mutation from the store write to the last index update.
    writes: Mutex<()>,
}

impl CatalogService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        catalog_store: Arc<dyn CatalogStore>,
        search_vault: Arc<dyn SearchVault>,
        similarity: Arc<SimilarityService>,
        favorites: Arc<FavoritesStore>,
        audio: Arc<dyn AudioAvailability>,
        default_audio_tracks: Vec<String>,
        prune_tracks_without_audio: bool,
    ) -> Self {
        CatalogService {
            catalog_store,
            search_vault,
            similarity,
            favorites,
            audio,
            default_audio_tracks,
            prune_tracks_without_audio,
            writes: Mutex::new(()),
        }
    }

    fn playable(&self, reference: Option<&str>) -> Option<String> {
        reference
            .map(str::trim)
            .filter(|r| self.audio.exists(r))
            .map(str::to_string)
    }

    /// First playable default, starting at `start` and wrapping around.
    fn rotating_default(&self, start: usize) -> Option<String> {
        let len = self.default_audio_tracks.len();
        (0..len)
            .map(|offset| &self.default_audio_tracks[(start + offset) % len])
            .find(|candidate| self.audio.exists(candidate))
            .cloned()
    }

    fn default_at(&self, index: usize) -> Option<String> {
        if self.default_audio_tracks.is_empty() {
            return None;
        }
        let len = self.default_audio_tracks.len();
        Some(self.default_audio_tracks[index % len].clone())
    }

    pub fn create(&self, new_track: NewTrack) -> CatalogResult<Track> {
        validate_track(&new_track)?;
        let _writes = self.writes.lock();

        let mut track = new_track.into_track(0);
        track.audio_ref = match self.playable(track.audio()) {
            Some(reference) => Some(reference),
            None => {
                let count = self.catalog_store.count_tracks()?;
                self.rotating_default(count)
            }
        };

        let saved = self
            .catalog_store
            .save_track(track)
            .context("Failed to save new track")?;
        self.search_vault.upsert_track(None, &saved);
        self.similarity.add_track(&saved);
        info!("Created track {} '{}'", saved.id, saved.display_name());
        Ok(saved)
    }

    pub fn update(&self, id: TrackId, changes: NewTrack) -> CatalogResult<Track> {
        let _writes = self.writes.lock();
        let existing = self
            .catalog_store
            .get_track(id)?
            .ok_or(CatalogError::NotFound(id))?;
        validate_track(&changes)?;

        let mut track = changes.into_track(id);
        track.audio_ref = self
            .playable(track.audio())
            .or_else(|| self.playable(existing.audio()))
            .or_else(|| self.rotating_default(id as usize));

        let saved = self
            .catalog_store
            .save_track(track)
            .with_context(|| format!("Failed to save track {}", id))?;
        self.search_vault.upsert_track(Some(&existing), &saved);
        self.favorites.refresh_track(&saved);
        self.similarity.rebuild_from(self.catalog_store.as_ref())?;
        info!("Updated track {} '{}'", saved.id, saved.display_name());
        Ok(saved)
    }

    pub fn delete(&self, id: TrackId) -> CatalogResult<Track> {
        let _writes = self.writes.lock();
        let existing = self
            .catalog_store
            .get_track(id)?
            .ok_or(CatalogError::NotFound(id))?;
        if !self.catalog_store.delete_track(id)? {
            return Err(CatalogError::NotFound(id));
        }
        self.search_vault.remove_track(&existing);
        let lists = self.favorites.remove_track_everywhere(id);
        self.similarity.rebuild_from(self.catalog_store.as_ref())?;
        info!(
            "Deleted track {} '{}', removed from {} favorites lists",
            id,
            existing.display_name(),
            lists
        );
        Ok(existing)
    }

    pub fn get(&self, id: TrackId) -> CatalogResult<Option<Track>> {
        Ok(self.catalog_store.get_track(id)?)
    }

    pub fn list(&self) -> CatalogResult<Vec<Track>> {
        Ok(self.catalog_store.load_all_tracks()?)
    }

    /// Gives every track without playable audio a default reference, then
    /// prunes the ones still unplayable when pruning is enabled.
    ///
    /// Defaults are picked by the track's position in id order. A default
    /// that is itself unplayable is not assigned. Indexes are not touched,
    /// callers rebuild them afterwards.
    pub fn reconcile_audio(&self) -> CatalogResult<ReconcileReport> {
        let _writes = self.writes.lock();
        let tracks = self
            .catalog_store
            .load_all_tracks()
            .context("Failed to load tracks for audio reconciliation")?;

        let mut report = ReconcileReport::default();
        for (position, mut track) in tracks.into_iter().enumerate() {
            if self.playable(track.audio()).is_some() {
                continue;
            }
            if let Some(default) = self.default_at(position).filter(|d| self.audio.exists(d)) {
                debug!("Assigning default audio '{}' to track {}", default, track.id);
                track.audio_ref = Some(default);
                let id = track.id;
                let saved = self
                    .catalog_store
                    .save_track(track)
                    .with_context(|| format!("Failed to assign default audio to track {}", id))?;
                self.favorites.refresh_track(&saved);
                report.assigned.push(id);
                continue;
            }
            if self.prune_tracks_without_audio {
                warn!(
                    "Pruning track {} '{}', no playable audio",
                    track.id,
                    track.display_name()
                );
                self.catalog_store.delete_track(track.id)?;
                self.favorites.remove_track_everywhere(track.id);
                report.pruned.push(track.id);
            }
        }

        info!(
            "Audio reconciliation: {} defaults assigned, {} tracks pruned",
            report.assigned.len(),
            report.pruned.len()
        );
        Ok(report)
    }

    pub fn metrics(&self) -> CatalogResult<CatalogMetrics> {
        Ok(CatalogMetrics::from_tracks(
            &self.catalog_store.load_all_tracks()?,
        ))
    }
}

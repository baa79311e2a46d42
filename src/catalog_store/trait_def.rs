//! CatalogStore trait definition.
//!
//! The in-memory engines never own track records, they are kept consistent
//! with whatever backend implements this trait.

use super::models::{Track, TrackId};
use anyhow::Result;

/// Trait for track persistence backends.
pub trait CatalogStore: Send + Sync {
    // =========================================================================
    // Bulk Access
    // =========================================================================

    /// Load every track, ordered by id.
    fn load_all_tracks(&self) -> Result<Vec<Track>>;

    /// Number of tracks currently stored.
    fn count_tracks(&self) -> Result<usize>;

    // =========================================================================
    // Single Entity Access
    // =========================================================================

    /// Get a track by id. Returns Ok(None) if the id is unknown.
    fn get_track(&self, id: TrackId) -> Result<Option<Track>>;

    /// Find a track by exact title and artist. Returns Ok(None) if absent.
    fn find_track_by_title_and_artist(&self, title: &str, artist: &str)
        -> Result<Option<Track>>;

    // =========================================================================
    // Attribute Lookups (advanced search sub-queries)
    // =========================================================================

    /// Tracks whose artist matches, ignoring case and surrounding whitespace.
    fn find_tracks_by_artist(&self, artist: &str) -> Result<Vec<Track>>;

    /// Tracks whose genre matches, ignoring case and surrounding whitespace.
    fn find_tracks_by_genre(&self, genre: &str) -> Result<Vec<Track>>;

    /// Tracks released in exactly the given year.
    fn find_tracks_by_year(&self, year: i32) -> Result<Vec<Track>>;

    // =========================================================================
    // Write Operations
    // =========================================================================

    /// Insert or replace a track.
    ///
    /// A track with id `0` is inserted under a freshly assigned id, any other
    /// id replaces the stored record. Returns the stored track.
    fn save_track(&self, track: Track) -> Result<Track>;

    /// Delete a track. Returns Ok(false) if the id was unknown.
    fn delete_track(&self, id: TrackId) -> Result<bool>;
}

impl<T: CatalogStore + ?Sized> CatalogStore for std::sync::Arc<T> {
    fn load_all_tracks(&self) -> Result<Vec<Track>> {
        (**self).load_all_tracks()
    }

    fn count_tracks(&self) -> Result<usize> {
        (**self).count_tracks()
    }

    fn get_track(&self, id: TrackId) -> Result<Option<Track>> {
        (**self).get_track(id)
    }

    fn find_track_by_title_and_artist(
        &self,
        title: &str,
        artist: &str,
    ) -> Result<Option<Track>> {
        (**self).find_track_by_title_and_artist(title, artist)
    }

    fn find_tracks_by_artist(&self, artist: &str) -> Result<Vec<Track>> {
        (**self).find_tracks_by_artist(artist)
    }

    fn find_tracks_by_genre(&self, genre: &str) -> Result<Vec<Track>> {
        (**self).find_tracks_by_genre(genre)
    }

    fn find_tracks_by_year(&self, year: i32) -> Result<Vec<Track>> {
        (**self).find_tracks_by_year(year)
    }

    fn save_track(&self, track: Track) -> Result<Track> {
        (**self).save_track(track)
    }

    fn delete_track(&self, id: TrackId) -> Result<bool> {
        (**self).delete_track(id)
    }
}

use crate::catalog_store::Track;
use serde::Serialize;
use std::collections::BTreeMap;

/// Counts over the current catalog.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogMetrics {
    pub track_count: usize,
    pub genre_counts: BTreeMap<String, usize>,
    pub artist_counts: BTreeMap<String, usize>,
}

impl CatalogMetrics {
    pub fn from_tracks(tracks: &[Track]) -> Self {
        let mut metrics = CatalogMetrics {
            track_count: tracks.len(),
            ..Default::default()
        };
        for track in tracks {
            *metrics
                .genre_counts
                .entry(track.genre.trim().to_string())
                .or_default() += 1;
            *metrics
                .artist_counts
                .entry(track.artist.trim().to_string())
                .or_default() += 1;
        }
        metrics
    }

    /// The `n` artists with most tracks, ties by name.
    pub fn top_artists(&self, n: usize) -> Vec<(String, usize)> {
        let mut artists: Vec<(String, usize)> = self
            .artist_counts
            .iter()
            .map(|(name, count)| (name.clone(), *count))
            .collect();
        artists.sort_by(|(a, ca), (b, cb)| cb.cmp(ca).then_with(|| a.cmp(b)));
        artists.truncate(n);
        artists
    }
}

//! Process-wide access to the similarity graph.
//!
//! Full rebuilds compute a new graph without holding the read/write lock and
//! then swap it in, so readers only ever see a complete graph. Writers
//! (rebuilds and incremental inserts) are serialized on a separate lane, so a
//! track inserted while a rebuild is loading the store is never lost.

use super::graph::SimilarityGraph;
use crate::catalog_store::{CatalogStore, Track, TrackId};
use anyhow::{Context, Result};
use parking_lot::{Mutex, RwLock};
use std::time::Instant;
use tracing::{debug, info};

#[derive(Default)]
pub struct SimilarityService {
    graph: RwLock<SimilarityGraph>,
    writer: Mutex<()>,
}

impl SimilarityService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tracks(tracks: &[Track]) -> Self {
        let service = Self::new();
        service.build(tracks);
        service
    }

    /// Replaces the graph with one built from `tracks`.
    pub fn build(&self, tracks: &[Track]) {
        let _writer = self.writer.lock();
        self.swap_in(tracks);
    }

    /// Rebuilds from the current content of the catalog store.
    ///
    /// Required after a track is updated or deleted: edges of the old record
    /// are not patched incrementally. The writer lane is held from the load
    /// to the swap.
    pub fn rebuild_from(&self, catalog_store: &dyn CatalogStore) -> Result<()> {
        let _writer = self.writer.lock();
        let tracks = catalog_store
            .load_all_tracks()
            .context("Failed to load tracks for similarity rebuild")?;
        self.swap_in(&tracks);
        Ok(())
    }

    fn swap_in(&self, tracks: &[Track]) {
        let start = Instant::now();
        let fresh = SimilarityGraph::from_tracks(tracks);
        let (nodes, edges) = (fresh.node_count(), fresh.edge_count());
        *self.graph.write() = fresh;
        info!(
            "Similarity graph built: {} nodes, {} edges in {:?}",
            nodes,
            edges,
            start.elapsed()
        );
    }

    /// Adds a newly created track and its edges to existing tracks.
    pub fn add_track(&self, track: &Track) {
        let _writer = self.writer.lock();
        let mut graph = self.graph.write();
        graph.insert_track(track);
        debug!(
            "Track {} added to similarity graph with {} edges",
            track.id,
            graph.neighbors(track.id).len()
        );
    }

    /// Local ranking: the `k` most similar direct neighbors.
    pub fn similar(&self, id: TrackId, k: usize) -> Vec<Track> {
        self.graph.read().top_direct_neighbors(id, k)
    }

    /// The seed track followed by its `k` most similar direct neighbors,
    /// read under a single guard. `None` if the seed is not in the graph.
    pub fn seed_with_neighbors(&self, seed: TrackId, k: usize) -> Option<(Track, Vec<Track>)> {
        let graph = self.graph.read();
        let track = graph.track(seed)?.clone();
        Some((track, graph.top_direct_neighbors(seed, k)))
    }

    /// Global search: the most similar chain from one track to another.
    pub fn path(&self, from: TrackId, to: TrackId) -> Vec<Track> {
        self.graph.read().best_path(from, to)
    }

    pub fn neighbors(&self, id: TrackId) -> Vec<(Track, f64)> {
        self.graph.read().neighbors(id)
    }

    pub fn weight(&self, a: TrackId, b: TrackId) -> Option<f64> {
        self.graph.read().weight(a, b)
    }

    pub fn node_count(&self) -> usize {
        self.graph.read().node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.read().edge_count()
    }

    #[cfg(test)]
    fn snapshot(&self) -> SimilarityGraph {
        self.graph.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_store::{InMemoryCatalogStore, NewTrack};
    use std::sync::Arc;
    use std::thread;

    fn new_track(artist: &str, genre: &str, year: i32) -> Track {
        NewTrack {
            title: format!("{} {}", artist, year),
            artist: artist.to_string(),
            genre: genre.to_string(),
            year,
            duration_secs: 200,
            audio_ref: None,
        }
        .into_track(0)
    }

    #[test]
    fn test_rebuild_from_store() {
        let store = InMemoryCatalogStore::with_tracks([
            new_track("Queen", "Rock", 1975),
            new_track("Queen", "Rock", 1977),
        ])
        .unwrap();
        let service = SimilarityService::new();
        service.rebuild_from(&store).unwrap();
        assert_eq!(service.node_count(), 2);
        assert_eq!(service.edge_count(), 1);

        store.delete_track(2).unwrap();
        service.rebuild_from(&store).unwrap();
        assert_eq!(service.node_count(), 1);
        assert_eq!(service.edge_count(), 0);
    }

    #[test]
    fn test_add_track_incrementally() {
        let store = InMemoryCatalogStore::with_tracks([new_track("Queen", "Rock", 1975)]).unwrap();
        let service = SimilarityService::from_tracks(&store.load_all_tracks().unwrap());

        let added = store.save_track(new_track("Queen", "Rock", 1976)).unwrap();
        service.add_track(&added);

        assert_eq!(service.similar(1, 5), vec![added.clone()]);
        assert_eq!(service.path(1, added.id).len(), 2);
    }

    #[test]
    fn test_seed_with_neighbors() {
        let store = InMemoryCatalogStore::with_tracks([
            new_track("Queen", "Rock", 1975),
            new_track("Queen", "Rock", 1977),
            new_track("ABBA", "Pop", 1960),
        ])
        .unwrap();
        let service = SimilarityService::from_tracks(&store.load_all_tracks().unwrap());

        let (seed, neighbors) = service.seed_with_neighbors(1, 5).unwrap();
        assert_eq!(seed.id, 1);
        assert_eq!(neighbors.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2]);
        assert!(service.seed_with_neighbors(3, 5).unwrap().1.is_empty());
        assert!(service.seed_with_neighbors(99, 5).is_none());
    }

    #[test]
    fn test_readers_never_see_partial_rebuild() {
        let small: Vec<Track> = (1..=3)
            .map(|i| new_track("Queen", "Rock", 1970).into_persisted(i))
            .collect();
        let large: Vec<Track> = (1..=60)
            .map(|i| new_track("Queen", "Rock", 1970).into_persisted(i))
            .collect();
        let service = Arc::new(SimilarityService::from_tracks(&small));

        let writer = {
            let service = service.clone();
            thread::spawn(move || {
                for round in 0..20 {
                    if round % 2 == 0 {
                        service.build(&large);
                    } else {
                        service.build(&small);
                    }
                }
            })
        };

        for _ in 0..200 {
            let graph = service.snapshot();
            let n = graph.node_count();
            assert!(n == 3 || n == 60);
            // Complete graph: every pair shares artist, genre and year.
            assert_eq!(graph.edge_count(), n * (n - 1) / 2);
        }
        writer.join().unwrap();
    }

    trait IntoPersisted {
        fn into_persisted(self, id: TrackId) -> Track;
    }

    impl IntoPersisted for Track {
        fn into_persisted(mut self, id: TrackId) -> Track {
            self.id = id;
            self
        }
    }
}

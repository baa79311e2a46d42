//! Weighted, undirected similarity graph over tracks.
//!
//! Every edge is stored in both directions with the same weight. Nodes are
//! keyed by track id and keep the latest copy of their track record.

use super::scoring::{similarity, SIMILARITY_THRESHOLD};
use crate::catalog_store::{Track, TrackId};
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct SimilarityGraph {
    pub(super) nodes: HashMap<TrackId, Track>,
    pub(super) adjacency: HashMap<TrackId, HashMap<TrackId, f64>>,
}

impl SimilarityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph with a node for every track and an edge for every
    /// pair scoring at least [`SIMILARITY_THRESHOLD`].
    pub fn from_tracks(tracks: &[Track]) -> Self {
        let mut graph = Self::new();
        graph.build(tracks);
        graph
    }

    /// Clears the graph and recomputes it from scratch. O(n²) comparisons.
    pub fn build(&mut self, tracks: &[Track]) {
        self.clear();
        for track in tracks {
            self.add_node(track);
        }
        for (i, a) in tracks.iter().enumerate() {
            for b in &tracks[i + 1..] {
                let score = similarity(a, b);
                if score >= SIMILARITY_THRESHOLD {
                    self.add_edge(a, b, score);
                }
            }
        }
    }

    /// Adds a node (or refreshes its record) without touching edges.
    pub fn add_node(&mut self, track: &Track) {
        if !track.is_persisted() {
            return;
        }
        self.nodes.insert(track.id, track.clone());
        self.adjacency.entry(track.id).or_default();
    }

    /// Adds `track` and connects it to every existing node it is similar
    /// enough to. Existing edges between other nodes are left untouched.
    pub fn insert_track(&mut self, track: &Track) {
        if !track.is_persisted() {
            return;
        }
        let others: Vec<Track> = self
            .nodes
            .values()
            .filter(|other| other.id != track.id)
            .cloned()
            .collect();
        self.add_node(track);
        for other in &others {
            let score = similarity(track, other);
            if score >= SIMILARITY_THRESHOLD {
                self.add_edge(track, other, score);
            }
        }
    }

    /// Sets the weight of the pair in both directions, overwriting any
    /// previous weight. Self pairs, unsaved tracks and NaN weights are ignored.
    pub fn add_edge(&mut self, a: &Track, b: &Track, weight: f64) {
        if a.id == b.id || !a.is_persisted() || !b.is_persisted() || weight.is_nan() {
            return;
        }
        let weight = weight.clamp(0.0, 1.0);
        self.add_node(a);
        self.add_node(b);
        self.adjacency.entry(a.id).or_default().insert(b.id, weight);
        self.adjacency.entry(b.id).or_default().insert(a.id, weight);
    }

    /// Direct neighbors with their weights, in no particular order.
    pub fn neighbors(&self, id: TrackId) -> Vec<(Track, f64)> {
        self.adjacency
            .get(&id)
            .map(|edges| {
                edges
                    .iter()
                    .filter_map(|(n, w)| self.nodes.get(n).map(|t| (t.clone(), *w)))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn weight(&self, a: TrackId, b: TrackId) -> Option<f64> {
        self.adjacency.get(&a).and_then(|edges| edges.get(&b)).copied()
    }

    pub fn has_edge(&self, a: TrackId, b: TrackId) -> bool {
        self.weight(a, b).is_some()
    }

    pub fn contains(&self, id: TrackId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn track(&self, id: TrackId) -> Option<&Track> {
        self.nodes.get(&id)
    }

    /// Every node, ordered by id.
    pub fn nodes(&self) -> Vec<Track> {
        let mut nodes: Vec<Track> = self.nodes.values().cloned().collect();
        nodes.sort_by_key(|t| t.id);
        nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(HashMap::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.adjacency.clear();
    }
}

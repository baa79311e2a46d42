//! The two ways of asking "what is similar to this track".
//!
//! [`SimilarityGraph::top_direct_neighbors`] is a local ranking of the
//! origin's own edges. [`SimilarityGraph::best_path`] is a global search that
//! connects two tracks through intermediate ones, treating `1 - weight` as
//! the cost of an edge so the cheapest path is the most similar chain.

use super::graph::SimilarityGraph;
use crate::catalog_store::{Track, TrackId};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

#[derive(Debug)]
struct FrontierEntry {
    cost: f64,
    discovered: u64,
    id: TrackId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    // BinaryHeap is a max-heap: lowest cost first, then earliest discovered.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.discovered.cmp(&self.discovered))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl SimilarityGraph {
    /// The `k` direct neighbors of `origin` with the highest edge weight.
    ///
    /// Equal weights are ordered by ascending track id. Never includes the
    /// origin itself and is empty for unknown tracks.
    pub fn top_direct_neighbors(&self, origin: TrackId, k: usize) -> Vec<Track> {
        let mut neighbors: Vec<(Track, f64)> = self
            .neighbors(origin)
            .into_iter()
            .filter(|(t, _)| t.id != origin)
            .collect();
        neighbors.sort_by(|(a, wa), (b, wb)| wb.total_cmp(wa).then_with(|| a.id.cmp(&b.id)));
        neighbors.into_iter().take(k).map(|(t, _)| t).collect()
    }

    /// The path from `origin` to `destination` maximizing cumulative
    /// similarity, both ends included.
    ///
    /// Empty if either end is unknown or no path exists. When several paths
    /// cost the same, the one settled first wins.
    pub fn best_path(&self, origin: TrackId, destination: TrackId) -> Vec<Track> {
        let (Some(origin_track), Some(_)) = (self.track(origin), self.track(destination)) else {
            return Vec::new();
        };
        if origin == destination {
            return vec![origin_track.clone()];
        }

        let mut best_cost: HashMap<TrackId, f64> = HashMap::from([(origin, 0.0)]);
        let mut previous: HashMap<TrackId, TrackId> = HashMap::new();
        let mut settled: HashSet<TrackId> = HashSet::new();
        let mut frontier = BinaryHeap::new();
        let mut discovered = 0u64;
        frontier.push(FrontierEntry {
            cost: 0.0,
            discovered,
            id: origin,
        });

        while let Some(FrontierEntry { cost, id, .. }) = frontier.pop() {
            if !settled.insert(id) {
                continue;
            }
            if id == destination {
                break;
            }
            let Some(edges) = self.adjacency.get(&id) else {
                continue;
            };
            let mut edges: Vec<(TrackId, f64)> =
                edges.iter().map(|(n, w)| (*n, *w)).collect();
            edges.sort_by_key(|(n, _)| *n);

            for (neighbor, weight) in edges {
                if settled.contains(&neighbor) {
                    continue;
                }
                let candidate = cost + (1.0 - weight);
                let improves = best_cost
                    .get(&neighbor)
                    .map_or(true, |known| candidate < *known);
                if improves {
                    best_cost.insert(neighbor, candidate);
                    previous.insert(neighbor, id);
                    discovered += 1;
                    frontier.push(FrontierEntry {
                        cost: candidate,
                        discovered,
                        id: neighbor,
                    });
                }
            }
        }

        if !settled.contains(&destination) {
            return Vec::new();
        }

        let mut path_ids = vec![destination];
        let mut current = destination;
        while let Some(&step) = previous.get(&current) {
            path_ids.push(step);
            current = step;
        }
        path_ids.reverse();
        path_ids
            .into_iter()
            .filter_map(|id| self.track(id).cloned())
            .collect()
    }
}

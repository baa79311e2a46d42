//! Breadth-first searches over the social graph.

use super::graph::SocialGraph;
use std::collections::{HashSet, VecDeque};
use tracing::debug;

impl SocialGraph {
    /// Accounts to suggest to `origin`: those first reached at depth 2 up
    /// to `max_depth`, in breadth-first discovery order, at most `max_results`.
    ///
    /// Direct connections sit at depth 1 and are never suggested, so a
    /// `max_depth` of 1 yields nothing. Empty when `max_depth < 1` or the
    /// origin is blank.
    pub fn suggest(&self, origin: &str, max_depth: usize, max_results: usize) -> Vec<String> {
        let origin = origin.trim();
        if origin.is_empty() || max_depth < 1 {
            return Vec::new();
        }

        let direct = self.sorted_connections(origin);
        let mut visited: HashSet<&str> = HashSet::from([origin]);
        visited.extend(direct.iter().copied());
        let mut queue: VecDeque<(&str, usize)> = direct.iter().map(|h| (*h, 1)).collect();

        let mut suggestions = Vec::new();
        while suggestions.len() < max_results {
            let Some((current, depth)) = queue.pop_front() else {
                break;
            };
            if depth > 1 {
                suggestions.push(current.to_string());
            }
            if depth < max_depth {
                for neighbor in self.sorted_connections(current) {
                    if visited.insert(neighbor) {
                        queue.push_back((neighbor, depth + 1));
                    }
                }
            }
        }

        debug!(
            "Found {} suggestions for '{}' up to depth {}",
            suggestions.len(),
            origin,
            max_depth
        );
        suggestions
    }

    /// Every account reachable from `origin` within `max_depth` hops,
    /// origin excluded.
    pub fn reachable(&self, origin: &str, max_depth: usize) -> HashSet<String> {
        let origin = origin.trim();
        let mut reached = HashSet::new();
        if origin.is_empty() {
            return reached;
        }

        let mut visited: HashSet<&str> = HashSet::from([origin]);
        let mut queue: VecDeque<(&str, usize)> = VecDeque::from([(origin, 0)]);
        while let Some((current, depth)) = queue.pop_front() {
            if depth > 0 {
                reached.insert(current.to_string());
            }
            if depth < max_depth {
                for neighbor in self.sorted_connections(current) {
                    if visited.insert(neighbor) {
                        queue.push_back((neighbor, depth + 1));
                    }
                }
            }
        }
        reached
    }

    /// True if `destination` is within `max_depth` hops of `origin`.
    pub fn are_connected(&self, origin: &str, destination: &str, max_depth: usize) -> bool {
        self.reachable(origin, max_depth)
            .contains(destination.trim())
    }
}

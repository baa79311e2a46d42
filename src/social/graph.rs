//! Undirected, unweighted connections between accounts, keyed by handle.
//!
//! Following is symmetric: connecting `a` to `b` also connects `b` to `a`,
//! so an account's followers and the accounts it follows are the same set.

use std::collections::{HashMap, HashSet};

#[derive(Debug, Default, Clone)]
pub struct SocialGraph {
    adjacency: HashMap<String, HashSet<String>>,
}

fn normalize(handle: &str) -> Option<&str> {
    let handle = handle.trim();
    (!handle.is_empty()).then_some(handle)
}

impl SocialGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false for blank handles, self pairs, or an existing connection.
    pub fn connect(&mut self, a: &str, b: &str) -> bool {
        let (Some(a), Some(b)) = (normalize(a), normalize(b)) else {
            return false;
        };
        if a == b {
            return false;
        }
        let added = self
            .adjacency
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string());
        self.adjacency
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string());
        added
    }

    /// Returns whether a connection was removed. Accounts left without
    /// connections are dropped from the graph.
    pub fn disconnect(&mut self, a: &str, b: &str) -> bool {
        let (Some(a), Some(b)) = (normalize(a), normalize(b)) else {
            return false;
        };
        if a == b {
            return false;
        }
        let removed = self.remove_half(a, b);
        self.remove_half(b, a);
        removed
    }

    fn remove_half(&mut self, from: &str, to: &str) -> bool {
        let Some(set) = self.adjacency.get_mut(from) else {
            return false;
        };
        let removed = set.remove(to);
        if set.is_empty() {
            self.adjacency.remove(from);
        }
        removed
    }

    /// Drops an account together with every connection it had. Returns
    /// whether the account was in the graph.
    pub fn remove_node(&mut self, handle: &str) -> bool {
        let Some(handle) = normalize(handle) else {
            return false;
        };
        let Some(connections) = self.adjacency.remove(handle) else {
            return false;
        };
        for other in &connections {
            self.remove_half(other, handle);
        }
        true
    }

    /// A copy of the account's connections, empty if unknown.
    pub fn connections(&self, handle: &str) -> HashSet<String> {
        normalize(handle)
            .and_then(|h| self.adjacency.get(h))
            .cloned()
            .unwrap_or_default()
    }

    /// Connections in handle order, used where traversal order must be stable.
    pub(super) fn sorted_connections(&self, handle: &str) -> Vec<&str> {
        let mut connections: Vec<&str> = self
            .adjacency
            .get(handle)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default();
        connections.sort_unstable();
        connections
    }

    pub fn is_connected(&self, a: &str, b: &str) -> bool {
        match (normalize(a), normalize(b)) {
            (Some(a), Some(b)) => self
                .adjacency
                .get(a)
                .map(|set| set.contains(b))
                .unwrap_or(false),
            _ => false,
        }
    }

    pub fn contains(&self, handle: &str) -> bool {
        normalize(handle)
            .map(|h| self.adjacency.contains_key(h))
            .unwrap_or(false)
    }

    pub fn degree(&self, handle: &str) -> usize {
        normalize(handle)
            .and_then(|h| self.adjacency.get(h))
            .map(HashSet::len)
            .unwrap_or(0)
    }

    /// Every account with at least one connection, sorted.
    pub fn nodes(&self) -> Vec<String> {
        let mut nodes: Vec<String> = self.adjacency.keys().cloned().collect();
        nodes.sort();
        nodes
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(HashSet::len).sum::<usize>() / 2
    }

    pub fn clear(&mut self) {
        self.adjacency.clear();
    }
}

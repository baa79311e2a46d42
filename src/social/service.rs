use super::graph::SocialGraph;
use crate::user::{Account, IdentityIndex};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info};

/// Follow relationships between known accounts.
///
/// Both ends are resolved through the [`IdentityIndex`], so operations on
/// unknown handles are rejected without touching the graph.
pub struct SocialService {
    graph: RwLock<SocialGraph>,
    identities: Arc<IdentityIndex>,
    suggestion_depth: usize,
}

impl SocialService {
    pub fn new(identities: Arc<IdentityIndex>, suggestion_depth: usize) -> Self {
        SocialService {
            graph: RwLock::new(SocialGraph::new()),
            identities,
            suggestion_depth,
        }
    }

    fn resolve_pair(&self, a: &str, b: &str) -> Option<(Account, Account)> {
        Some((self.identities.get(a)?, self.identities.get(b)?))
    }

    pub fn follow(&self, follower: &str, followee: &str) -> bool {
        let Some((a, b)) = self.resolve_pair(follower, followee) else {
            debug!("Follow rejected, unknown account in '{}' -> '{}'", follower, followee);
            return false;
        };
        if a.handle == b.handle {
            return false;
        }
        let added = self.graph.write().connect(&a.handle, &b.handle);
        if added {
            info!("'{}' now follows '{}'", a.handle, b.handle);
        }
        added
    }

    pub fn unfollow(&self, follower: &str, followee: &str) -> bool {
        let Some((a, b)) = self.resolve_pair(follower, followee) else {
            return false;
        };
        let removed = self.graph.write().disconnect(&a.handle, &b.handle);
        if removed {
            info!("'{}' no longer follows '{}'", a.handle, b.handle);
        }
        removed
    }

    pub fn following(&self, handle: &str) -> Vec<Account> {
        if !self.identities.contains(handle) {
            return Vec::new();
        }
        let connections = self.graph.read().connections(handle);
        let mut accounts: Vec<Account> = connections
            .iter()
            .filter_map(|h| self.identities.get(h))
            .collect();
        accounts.sort_by(|a, b| a.handle.cmp(&b.handle));
        accounts
    }

    /// Same set as [`SocialService::following`]: connections are symmetric.
    pub fn followers(&self, handle: &str) -> Vec<Account> {
        self.following(handle)
    }

    pub fn is_following(&self, follower: &str, followee: &str) -> bool {
        self.graph.read().is_connected(follower, followee)
    }

    pub fn suggestions(&self, handle: &str, max_results: usize) -> Vec<Account> {
        if !self.identities.contains(handle) {
            return Vec::new();
        }
        let handles = self
            .graph
            .read()
            .suggest(handle, self.suggestion_depth, max_results);
        handles
            .iter()
            .filter_map(|h| self.identities.get(h))
            .collect()
    }

    pub fn are_connected(&self, a: &str, b: &str, max_depth: usize) -> bool {
        self.graph.read().are_connected(a, b, max_depth)
    }

    /// Drops every connection of the account. Returns how many were removed.
    pub fn remove_account(&self, handle: &str) -> usize {
        let mut graph = self.graph.write();
        let removed = graph.degree(handle);
        if graph.remove_node(handle) {
            info!("Dropped {} connections of '{}'", removed, handle.trim());
        }
        removed
    }

    pub fn connection_count(&self) -> usize {
        self.graph.read().edge_count()
    }
}

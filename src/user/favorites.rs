//! Per-account favorite tracks.
//!
//! Lists keep insertion order and never hold the same track twice. An
//! account whose list becomes empty is dropped from the map entirely.

use crate::catalog_store::{Track, TrackId};
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Default)]
pub struct FavoritesStore {
    lists: RwLock<HashMap<String, Vec<Track>>>,
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the track unless it is already there. Returns whether it was added.
    pub fn add(&self, handle: &str, track: &Track) -> bool {
        let handle = handle.trim();
        if handle.is_empty() {
            return false;
        }
        let mut lists = self.lists.write();
        let list = lists.entry(handle.to_string()).or_default();
        if list.iter().any(|t| t.id == track.id) {
            return false;
        }
        list.push(track.clone());
        true
    }

    /// Returns whether the track was in the list.
    pub fn remove(&self, handle: &str, track_id: TrackId) -> bool {
        let handle = handle.trim();
        let mut lists = self.lists.write();
        let Some(list) = lists.get_mut(handle) else {
            return false;
        };
        let Some(position) = list.iter().position(|t| t.id == track_id) else {
            return false;
        };
        list.remove(position);
        if list.is_empty() {
            lists.remove(handle);
        }
        true
    }

    pub fn list(&self, handle: &str) -> Vec<Track> {
        self.lists
            .read()
            .get(handle.trim())
            .cloned()
            .unwrap_or_default()
    }

    pub fn contains(&self, handle: &str, track_id: TrackId) -> bool {
        self.lists
            .read()
            .get(handle.trim())
            .map(|list| list.iter().any(|t| t.id == track_id))
            .unwrap_or(false)
    }

    pub fn count(&self, handle: &str) -> usize {
        self.lists
            .read()
            .get(handle.trim())
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Replaces the stored copy of a track in every list, keeping positions.
    pub fn refresh_track(&self, track: &Track) {
        for list in self.lists.write().values_mut() {
            for slot in list.iter_mut().filter(|t| t.id == track.id) {
                *slot = track.clone();
            }
        }
    }

    /// Removes a track from every list. Returns how many lists contained it.
    pub fn remove_track_everywhere(&self, track_id: TrackId) -> usize {
        let mut lists = self.lists.write();
        let mut removed = 0;
        lists.retain(|_, list| {
            let before = list.len();
            list.retain(|t| t.id != track_id);
            if list.len() != before {
                removed += 1;
            }
            !list.is_empty()
        });
        removed
    }

    /// Drops the account's whole list. Returns how many tracks it held.
    pub fn remove_account(&self, handle: &str) -> usize {
        self.lists
            .write()
            .remove(handle.trim())
            .map(|list| list.len())
            .unwrap_or(0)
    }

    /// Number of accounts with at least one favorite.
    pub fn accounts_count(&self) -> usize {
        self.lists.read().len()
    }
}

//! Handle to account index with read-repair.
//!
//! The index is bulk-loaded at startup and patched per entry afterwards.
//! Because account writes can race with the initial load, an entry may land
//! in the index before its credential hash was stored. Such entries are
//! "incomplete": [`IdentityIndex::get`] detects them, refetches the single
//! handle from the [`UserStore`] and replaces the cached entry when the
//! store has a complete record. [`IdentityIndex::peek`] is the strict read
//! that never touches the store.

use super::user_models::Account;
use super::user_store::UserStore;
use anyhow::{Context, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub struct IdentityIndex {
    accounts: RwLock<HashMap<String, Account>>,
    user_store: Arc<dyn UserStore>,
}

fn normalize_handle(handle: &str) -> Option<&str> {
    let handle = handle.trim();
    if handle.is_empty() {
        None
    } else {
        Some(handle)
    }
}

impl IdentityIndex {
    pub fn new(user_store: Arc<dyn UserStore>) -> Self {
        IdentityIndex {
            accounts: RwLock::new(HashMap::new()),
            user_store,
        }
    }

    /// Replaces the whole index with the given accounts.
    ///
    /// Entries without a credential hash are kept, they are repaired lazily.
    pub fn load(&self, accounts: Vec<Account>) {
        let mut fresh = HashMap::with_capacity(accounts.len());
        for account in accounts {
            let Some(handle) = normalize_handle(&account.handle) else {
                continue;
            };
            if !account.has_credentials() {
                warn!("Account '{}' loaded without credential hash", handle);
            }
            fresh.insert(handle.to_string(), account);
        }
        let count = fresh.len();
        *self.accounts.write() = fresh;
        info!("Identity index loaded with {} accounts", count);
    }

    /// Loads every account from the backing store.
    pub fn load_from_store(&self) -> Result<usize> {
        let accounts = self
            .user_store
            .load_all_accounts()
            .context("Failed to load accounts for identity index")?;
        self.load(accounts);
        Ok(self.len())
    }

    /// Looks up an account, repairing it first if it is incomplete.
    ///
    /// If the repair fails the cached (incomplete) entry is returned as is.
    pub fn get(&self, handle: &str) -> Option<Account> {
        let handle = normalize_handle(handle)?;
        let cached = self.accounts.read().get(handle).cloned()?;
        if cached.has_credentials() {
            return Some(cached);
        }
        debug!("Account '{}' is incomplete, refetching", handle);
        Some(self.repair(handle).unwrap_or(cached))
    }

    /// Looks up an account without ever consulting the backing store.
    pub fn peek(&self, handle: &str) -> Option<Account> {
        let handle = normalize_handle(handle)?;
        self.accounts.read().get(handle).cloned()
    }

    /// Inserts an account. An incomplete account is refetched first and the
    /// stored copy wins if it carries a credential hash.
    pub fn put(&self, account: Account) {
        let Some(handle) = normalize_handle(&account.handle).map(str::to_string) else {
            return;
        };
        let account = if account.has_credentials() {
            account
        } else {
            match self.user_store.find_account_by_handle(&handle) {
                Ok(Some(stored)) if stored.has_credentials() => {
                    info!("Account '{}' repaired from store before indexing", handle);
                    stored
                }
                Ok(_) => {
                    warn!("Account '{}' indexed without credential hash", handle);
                    account
                }
                Err(err) => {
                    error!("Failed to refetch account '{}': {:#}", handle, err);
                    account
                }
            }
        };
        self.accounts.write().insert(handle, account);
    }

    /// Replaces an entry as given, without any repair.
    pub fn update(&self, account: Account) {
        let Some(handle) = normalize_handle(&account.handle).map(str::to_string) else {
            return;
        };
        self.accounts.write().insert(handle, account);
    }

    pub fn remove(&self, handle: &str) -> Option<Account> {
        let handle = normalize_handle(handle)?;
        self.accounts.write().remove(handle)
    }

    pub fn contains(&self, handle: &str) -> bool {
        normalize_handle(handle)
            .map(|h| self.accounts.read().contains_key(h))
            .unwrap_or(false)
    }

    /// Snapshot of every indexed account, ordered by handle.
    pub fn all(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self.accounts.read().values().cloned().collect();
        accounts.sort_by(|a, b| a.handle.cmp(&b.handle));
        accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }

    /// Handles of entries currently missing a credential hash, sorted.
    pub fn incomplete_handles(&self) -> Vec<String> {
        let mut handles: Vec<String> = self
            .accounts
            .read()
            .values()
            .filter(|a| !a.has_credentials())
            .map(|a| a.handle.clone())
            .collect();
        handles.sort();
        handles
    }

    /// Runs read-repair on every incomplete entry. Returns how many were fixed.
    pub fn reconcile_all(&self) -> usize {
        let incomplete = self.incomplete_handles();
        let repaired = incomplete
            .iter()
            .filter(|handle| self.repair(handle).is_some())
            .count();
        if !incomplete.is_empty() {
            info!(
                "Reconciled {} of {} incomplete accounts",
                repaired,
                incomplete.len()
            );
        }
        repaired
    }

    fn repair(&self, handle: &str) -> Option<Account> {
        let fresh = match self.user_store.find_account_by_handle(handle) {
            Ok(Some(fresh)) if fresh.has_credentials() => fresh,
            Ok(Some(_)) => {
                error!("Account '{}' is still incomplete in the store", handle);
                return None;
            }
            Ok(None) => {
                error!("Account '{}' is indexed but missing from the store", handle);
                return None;
            }
            Err(err) => {
                error!("Failed to refetch account '{}': {:#}", handle, err);
                return None;
            }
        };

        let mut accounts = self.accounts.write();
        match accounts.get(handle) {
            // Removed or completed concurrently, leave it alone.
            None => None,
            Some(current) if current.has_credentials() => Some(current.clone()),
            Some(_) => {
                accounts.insert(handle.to_string(), fresh.clone());
                info!("Account '{}' repaired from store", handle);
                Some(fresh)
            }
        }
    }
}

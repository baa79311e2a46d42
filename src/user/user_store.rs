use super::user_models::Account;
use anyhow::Result;
use parking_lot::RwLock;
use std::collections::BTreeMap;

pub trait UserStore: Send + Sync {
    /// Returns all accounts, ordered by handle.
    /// Returns Err if there is a storage error.
    fn load_all_accounts(&self) -> Result<Vec<Account>>;

    /// Returns the account with the given handle.
    /// Returns Ok(None) if the account does not exist.
    /// Returns Err if there is a storage error.
    fn find_account_by_handle(&self, handle: &str) -> Result<Option<Account>>;

    /// Inserts or replaces the account with the same handle and returns the
    /// stored record, with its id assigned.
    fn save_account(&self, account: Account) -> Result<Account>;

    /// Deletes the account with the given handle.
    /// Returns Ok(false) if the account does not exist.
    fn delete_account(&self, handle: &str) -> Result<bool>;
}

impl<T: UserStore + ?Sized> UserStore for std::sync::Arc<T> {
    fn load_all_accounts(&self) -> Result<Vec<Account>> {
        (**self).load_all_accounts()
    }

    fn find_account_by_handle(&self, handle: &str) -> Result<Option<Account>> {
        (**self).find_account_by_handle(handle)
    }

    fn save_account(&self, account: Account) -> Result<Account> {
        (**self).save_account(account)
    }

    fn delete_account(&self, handle: &str) -> Result<bool> {
        (**self).delete_account(handle)
    }
}

#[derive(Default)]
struct AccountTable {
    by_handle: BTreeMap<String, Account>,
    last_id: u64,
}

/// In-memory account storage keyed by handle.
#[derive(Default)]
pub struct InMemoryUserStore {
    table: RwLock<AccountTable>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for InMemoryUserStore {
    fn load_all_accounts(&self) -> Result<Vec<Account>> {
        Ok(self.table.read().by_handle.values().cloned().collect())
    }

    fn find_account_by_handle(&self, handle: &str) -> Result<Option<Account>> {
        Ok(self.table.read().by_handle.get(handle.trim()).cloned())
    }

    fn save_account(&self, mut account: Account) -> Result<Account> {
        account.handle = account.handle.trim().to_string();
        anyhow::ensure!(!account.handle.is_empty(), "Account handle cannot be empty");

        let mut table = self.table.write();
        if let Some(existing) = table.by_handle.get(&account.handle) {
            account.id = existing.id;
        } else if account.id == 0 {
            table.last_id += 1;
            account.id = table.last_id;
        } else if account.id > table.last_id {
            table.last_id = account.id;
        }
        table
            .by_handle
            .insert(account.handle.clone(), account.clone());
        Ok(account)
    }

    fn delete_account(&self, handle: &str) -> Result<bool> {
        Ok(self.table.write().by_handle.remove(handle.trim()).is_some())
    }
}

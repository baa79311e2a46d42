//! Account models

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

pub type AccountId = u64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountRole {
    #[default]
    Regular,
    Admin,
}

impl AccountRole {
    pub fn as_str(self) -> &'static str {
        match self {
            AccountRole::Admin => "Admin",
            AccountRole::Regular => "Regular",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Some(AccountRole::Admin),
            "regular" | "user" => Some(AccountRole::Regular),
            _ => None,
        }
    }
}

/// An account record. Identity is by handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Assigned by the user store, `0` until first saved.
    pub id: AccountId,
    pub handle: String,
    /// Empty when the record is incomplete and needs reconciliation.
    pub credential_hash: String,
    pub display_name: String,
    pub role: AccountRole,
}

impl Account {
    pub fn new<H: Into<String>, N: Into<String>>(handle: H, display_name: N) -> Self {
        Account {
            id: 0,
            handle: handle.into(),
            credential_hash: String::new(),
            display_name: display_name.into(),
            role: AccountRole::Regular,
        }
    }

    pub fn with_role(mut self, role: AccountRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_credential_hash<S: Into<String>>(mut self, hash: S) -> Self {
        self.credential_hash = hash.into();
        self
    }

    pub fn has_credentials(&self) -> bool {
        !self.credential_hash.trim().is_empty()
    }

    pub fn is_admin(&self) -> bool {
        self.role == AccountRole::Admin
    }
}

impl PartialEq for Account {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl Eq for Account {}

impl Hash for Account {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.handle.hash(state);
    }
}

//! Credential hashing.
//!
//! Accounts only carry an opaque credential hash, this module produces and
//! checks them. Stored hashes look like `sha256$<salt>$<hex digest>`.

use anyhow::{bail, Context, Result};
use rand::distr::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::str::FromStr;

const SALT_LEN: usize = 16;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum CredentialHasher {
    Sha256,
}

impl FromStr for CredentialHasher {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sha256" => Ok(CredentialHasher::Sha256),
            _ => bail!("Unknown hasher {}", s),
        }
    }
}

impl std::fmt::Display for CredentialHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialHasher::Sha256 => write!(f, "sha256"),
        }
    }
}

impl CredentialHasher {
    pub fn generate_salt(&self) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(SALT_LEN)
            .map(char::from)
            .collect()
    }

    /// Hashes `plain` with the given salt into the storable format.
    pub fn hash<T: AsRef<str>>(&self, plain: &[u8], salt: T) -> Result<String> {
        let salt = salt.as_ref();
        if salt.contains('$') {
            bail!("Salt cannot contain '$'");
        }
        match self {
            CredentialHasher::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(salt.as_bytes());
                hasher.update(plain);
                Ok(format!("{}${}${:x}", self, salt, hasher.finalize()))
            }
        }
    }

    /// Hashes `plain` with a freshly generated salt.
    pub fn hash_new<T: AsRef<str>>(&self, plain: T) -> Result<String> {
        self.hash(plain.as_ref().as_bytes(), self.generate_salt())
    }

    /// Checks `plain` against a stored hash produced by [`CredentialHasher::hash`].
    pub fn verify<T: AsRef<str>>(plain: T, stored_hash: T) -> Result<bool> {
        let mut parts = stored_hash.as_ref().splitn(3, '$');
        let (hasher, salt) = match (parts.next(), parts.next(), parts.next()) {
            (Some(hasher), Some(salt), Some(_)) => (hasher, salt),
            _ => bail!("Malformed credential hash"),
        };
        let hasher = CredentialHasher::from_str(hasher).context("Unsupported credential hash")?;
        let recomputed = hasher.hash(plain.as_ref().as_bytes(), salt)?;
        Ok(recomputed == stored_hash.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_hash() {
        let salt = CredentialHasher::Sha256.generate_salt();
        assert_eq!(salt.len(), SALT_LEN);

        let hash1 = CredentialHasher::Sha256
            .hash(b"password123", &salt)
            .unwrap();
        let hash2 = CredentialHasher::Sha256
            .hash(b"password123", &salt)
            .unwrap();
        assert_eq!(hash1, hash2);
        assert!(hash1.starts_with("sha256$"));

        assert!(CredentialHasher::verify("password123", hash1.as_str()).unwrap());
        assert!(!CredentialHasher::verify("not the pw", hash1.as_str()).unwrap());
    }

    #[test]
    fn different_salts_give_different_hashes() {
        let a = CredentialHasher::Sha256.hash_new("admin123").unwrap();
        let b = CredentialHasher::Sha256.hash_new("admin123").unwrap();
        assert_ne!(a, b);
        assert!(CredentialHasher::verify("admin123", a.as_str()).unwrap());
        assert!(CredentialHasher::verify("admin123", b.as_str()).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(CredentialHasher::verify("x", "garbage").is_err());
        assert!(CredentialHasher::verify("x", "md5$salt$abc").is_err());
    }
}

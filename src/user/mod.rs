pub mod auth;
mod favorites;
mod identity_index;
pub mod user_models;
mod user_store;

pub use auth::CredentialHasher;
pub use favorites::FavoritesStore;
pub use identity_index::IdentityIndex;
pub use user_models::{Account, AccountId, AccountRole};
pub use user_store::{InMemoryUserStore, UserStore};

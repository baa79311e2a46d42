mod audio;
mod memory_store;
mod models;
mod trait_def;
mod validation;

pub use audio::{
    AllAudioAvailable, AudioAvailability, MediaDirAudioAvailability, StaticAudioAvailability,
};
pub use memory_store::InMemoryCatalogStore;
pub use models::*;
pub use trait_def::CatalogStore;
pub use validation::{validate_track, ValidationError, ValidationResult};

use crate::catalog_store::{TrackId, ValidationError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Track {0} not found")]
    NotFound(TrackId),

    #[error("Invalid track: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Catalog store error: {0:#}")]
    Store(#[from] anyhow::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

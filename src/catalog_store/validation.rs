//! Validation for catalog entities.
//!
//! Runs before a track reaches the store, so that the indexes never see a
//! record with a blank title or artist.

use super::models::NewTrack;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' is required but was empty")]
    EmptyField { field: &'static str },

    #[error("Field '{field}' must be positive, got {value}")]
    NonPositiveValue { field: &'static str, value: i64 },
}

pub type ValidationResult<T> = Result<T, ValidationError>;

pub fn validate_track(track: &NewTrack) -> ValidationResult<()> {
    if track.title.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "title" });
    }
    if track.artist.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "artist" });
    }
    if track.genre.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "genre" });
    }
    if track.year <= 0 {
        return Err(ValidationError::NonPositiveValue {
            field: "year",
            value: track.year as i64,
        });
    }
    Ok(())
}

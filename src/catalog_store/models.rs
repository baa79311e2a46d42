//! Catalog models.
//!
//! A [`Track`] is identified by its numeric id only: two values with the same
//! id are the same track for every index and graph in this crate, even if the
//! other fields differ (for example before and after an update).

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

pub type TrackId = u64;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Track {
    /// Assigned by the catalog store, `0` until the track is first saved.
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub year: i32,
    /// Duration in seconds.
    pub duration_secs: u32,
    /// Reference to the audio file, resolved by an `AudioAvailability`.
    pub audio_ref: Option<String>,
}

impl Track {
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    /// Returns the audio reference if it is present and not blank.
    pub fn audio(&self) -> Option<&str> {
        self.audio_ref
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn display_name(&self) -> String {
        format!("{} - {}", self.artist, self.title)
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Track {}

impl Hash for Track {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Input for creating or updating a track. The id is owned by the store.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NewTrack {
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub year: i32,
    pub duration_secs: u32,
    pub audio_ref: Option<String>,
}

impl NewTrack {
    pub fn into_track(self, id: TrackId) -> Track {
        Track {
            id,
            title: self.title,
            artist: self.artist,
            genre: self.genre,
            year: self.year,
            duration_secs: self.duration_secs,
            audio_ref: self.audio_ref,
        }
    }
}

impl From<&Track> for NewTrack {
    fn from(track: &Track) -> Self {
        NewTrack {
            title: track.title.clone(),
            artist: track.artist.clone(),
            genre: track.genre.clone(),
            year: track.year,
            duration_secs: track.duration_secs,
            audio_ref: track.audio_ref.clone(),
        }
    }
}

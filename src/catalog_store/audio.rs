//! Audio availability checks.
//!
//! Tracks carry an opaque audio reference such as `/audio/intro.wav`. Whether
//! that reference can actually be played is answered by an [`AudioAvailability`]
//! implementation, which decides if a track keeps its audio, gets a default
//! one, or is pruned at startup.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub trait AudioAvailability: Send + Sync {
    /// Returns true if the reference points at playable audio.
    /// Blank references never exist.
    fn exists(&self, reference: &str) -> bool;
}

impl<T: AudioAvailability + ?Sized> AudioAvailability for std::sync::Arc<T> {
    fn exists(&self, reference: &str) -> bool {
        (**self).exists(reference)
    }
}

/// Resolves references relative to a media directory on disk.
pub struct MediaDirAudioAvailability {
    media_base_path: PathBuf,
}

impl MediaDirAudioAvailability {
    pub fn new<P: AsRef<Path>>(media_base_path: P) -> Self {
        Self {
            media_base_path: media_base_path.as_ref().to_path_buf(),
        }
    }

    pub fn resolve(&self, reference: &str) -> Option<PathBuf> {
        let relative = reference.trim().trim_start_matches('/');
        if relative.is_empty() {
            return None;
        }
        Some(self.media_base_path.join(relative))
    }
}

impl AudioAvailability for MediaDirAudioAvailability {
    fn exists(&self, reference: &str) -> bool {
        self.resolve(reference)
            .map(|path| path.is_file())
            .unwrap_or(false)
    }
}

/// Answers from a fixed set of references.
#[derive(Debug, Default, Clone)]
pub struct StaticAudioAvailability {
    available: HashSet<String>,
}

impl StaticAudioAvailability {
    pub fn new<I, S>(references: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            available: references.into_iter().map(Into::into).collect(),
        }
    }

    /// Every non-blank reference exists.
    pub fn everything() -> AllAudioAvailable {
        AllAudioAvailable
    }
}

impl AudioAvailability for StaticAudioAvailability {
    fn exists(&self, reference: &str) -> bool {
        let reference = reference.trim();
        !reference.is_empty() && self.available.contains(reference)
    }
}

/// Treats every non-blank reference as playable.
#[derive(Debug, Default, Clone, Copy)]
pub struct AllAudioAvailable;

impl AudioAvailability for AllAudioAvailable {
    fn exists(&self, reference: &str) -> bool {
        !reference.trim().is_empty()
    }
}

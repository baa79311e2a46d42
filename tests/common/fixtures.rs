//! Test environment creation
#![allow(dead_code)]

use super::constants::DEFAULT_AUDIO;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use syncup_core::catalog_store::{InMemoryCatalogStore, MediaDirAudioAvailability, Track};
use syncup_core::config::{AppConfig, CliConfig};
use syncup_core::seed::demo_audio_refs;
use syncup_core::user::InMemoryUserStore;
use syncup_core::SyncupState;
use tempfile::TempDir;

/// A bootstrapped state backed by in-memory stores and a temporary media
/// directory. The directory lives as long as the environment.
pub struct TestEnv {
    pub state: SyncupState,
    pub catalog_store: Arc<InMemoryCatalogStore>,
    pub user_store: Arc<InMemoryUserStore>,
    pub media_dir: TempDir,
}

fn write_audio(media: &Path, reference: &str) {
    let path = media.join(reference.trim_start_matches('/'));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, b"RIFF").unwrap();
}

impl TestEnv {
    /// Demo data seeded, every demo and default audio file present.
    pub fn seeded() -> Self {
        Self::build(true, true, |media| {
            for reference in demo_audio_refs().chain(DEFAULT_AUDIO) {
                write_audio(media, reference);
            }
        })
    }

    /// Demo data seeded, only the given audio files present.
    pub fn seeded_with_audio(references: &[&str], prune: bool) -> Self {
        let references: Vec<String> = references.iter().map(|r| r.to_string()).collect();
        Self::build(true, prune, move |media| {
            for reference in &references {
                write_audio(media, reference);
            }
        })
    }

    /// No demo data, default audio present.
    pub fn empty() -> Self {
        Self::build(false, true, |media| {
            for reference in DEFAULT_AUDIO {
                write_audio(media, reference);
            }
        })
    }

    fn build(seed: bool, prune: bool, prepare_media: impl FnOnce(&Path)) -> Self {
        let media_dir = TempDir::new().unwrap();
        prepare_media(media_dir.path());

        let cli = CliConfig {
            media_path: Some(media_dir.path().to_path_buf()),
            prune_tracks_without_audio: prune,
            seed_demo_data: seed,
        };
        let config = AppConfig::resolve(&cli, None).unwrap();

        let catalog_store = Arc::new(InMemoryCatalogStore::new());
        let user_store = Arc::new(InMemoryUserStore::new());
        let state = SyncupState::bootstrap(
            config,
            catalog_store.clone(),
            user_store.clone(),
            Arc::new(MediaDirAudioAvailability::new(media_dir.path())),
        )
        .unwrap();

        TestEnv {
            state,
            catalog_store,
            user_store,
            media_dir,
        }
    }

    pub fn add_audio(&self, reference: &str) {
        write_audio(self.media_dir.path(), reference);
    }
}

pub fn titles(tracks: &[Track]) -> Vec<&str> {
    tracks.iter().map(|t| t.title.as_str()).collect()
}

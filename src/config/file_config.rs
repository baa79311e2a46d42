use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub media_path: Option<String>,
    pub default_audio_tracks: Option<Vec<String>>,
    pub prune_tracks_without_audio: Option<bool>,
    pub seed_demo_data: Option<bool>,

    // Feature configs
    pub recommendation: Option<RecommendationConfig>,
    pub social: Option<SocialConfig>,
    pub search: Option<SearchConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct RecommendationConfig {
    pub discovery_neighbors_per_favorite: Option<usize>,
    pub default_discovery_size: Option<usize>,
    pub default_radio_size: Option<usize>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct SocialConfig {
    pub suggestion_depth: Option<usize>,
    pub default_suggestions: Option<usize>,
    pub connection_depth: Option<usize>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct SearchConfig {
    /// Search engine to use: "prefix", "noop"
    pub engine: Option<String>,
    pub autocomplete_limit: Option<usize>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

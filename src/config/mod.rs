mod file_config;

pub use file_config::{FileConfig, RecommendationConfig, SearchConfig, SocialConfig};

use anyhow::{bail, Result};
use std::path::PathBuf;

pub const DEFAULT_AUDIO_TRACKS: [&str; 3] = [
    "/audio/syncup_intro.wav",
    "/audio/syncup_groove.wav",
    "/audio/syncup_chill.wav",
];

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub media_path: Option<PathBuf>,
    pub prune_tracks_without_audio: bool,
    pub seed_demo_data: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            media_path: None,
            prune_tracks_without_audio: true,
            seed_demo_data: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchEngine {
    #[default]
    Prefix,
    Noop,
}

impl SearchEngine {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "prefix" => Some(SearchEngine::Prefix),
            "noop" => Some(SearchEngine::Noop),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    // Core settings
    /// Directory audio references resolve against. `None` treats every
    /// non-blank reference as available.
    pub media_path: Option<PathBuf>,
    pub default_audio_tracks: Vec<String>,
    pub prune_tracks_without_audio: bool,
    pub seed_demo_data: bool,

    // Feature configs (with defaults)
    pub recommendation: RecommendationSettings,
    pub social: SocialSettings,
    pub search: SearchSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            media_path: None,
            default_audio_tracks: DEFAULT_AUDIO_TRACKS.iter().map(|s| s.to_string()).collect(),
            prune_tracks_without_audio: true,
            seed_demo_data: false,
            recommendation: RecommendationSettings::default(),
            social: SocialSettings::default(),
            search: SearchSettings::default(),
        }
    }
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();
        let defaults = AppConfig::default();

        let media_path = file
            .media_path
            .map(PathBuf::from)
            .or_else(|| cli.media_path.clone());
        if let Some(path) = &media_path {
            if !path.exists() {
                bail!("Media directory does not exist: {:?}", path);
            }
            if !path.is_dir() {
                bail!("media_path is not a directory: {:?}", path);
            }
        }

        let default_audio_tracks: Vec<String> = file
            .default_audio_tracks
            .unwrap_or(defaults.default_audio_tracks)
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        if default_audio_tracks.is_empty() {
            bail!("default_audio_tracks must contain at least one reference");
        }

        let prune_tracks_without_audio = file
            .prune_tracks_without_audio
            .unwrap_or(cli.prune_tracks_without_audio);
        let seed_demo_data = file.seed_demo_data.unwrap_or(cli.seed_demo_data);

        let rec_file = file.recommendation.unwrap_or_default();
        let rec_defaults = RecommendationSettings::default();
        let recommendation = RecommendationSettings {
            discovery_neighbors_per_favorite: rec_file
                .discovery_neighbors_per_favorite
                .unwrap_or(rec_defaults.discovery_neighbors_per_favorite),
            default_discovery_size: rec_file
                .default_discovery_size
                .unwrap_or(rec_defaults.default_discovery_size),
            default_radio_size: rec_file
                .default_radio_size
                .unwrap_or(rec_defaults.default_radio_size),
        };
        if recommendation.discovery_neighbors_per_favorite == 0 {
            bail!("recommendation.discovery_neighbors_per_favorite must be greater than 0");
        }

        let social_file = file.social.unwrap_or_default();
        let social_defaults = SocialSettings::default();
        let social = SocialSettings {
            suggestion_depth: social_file
                .suggestion_depth
                .unwrap_or(social_defaults.suggestion_depth),
            default_suggestions: social_file
                .default_suggestions
                .unwrap_or(social_defaults.default_suggestions),
            connection_depth: social_file
                .connection_depth
                .unwrap_or(social_defaults.connection_depth),
        };
        if social.suggestion_depth == 0 {
            bail!("social.suggestion_depth must be greater than 0");
        }
        if social.connection_depth == 0 {
            bail!("social.connection_depth must be greater than 0");
        }

        let search_file = file.search.unwrap_or_default();
        let engine = match search_file.engine {
            Some(name) => match SearchEngine::from_str(&name) {
                Some(engine) => engine,
                None => bail!("Unknown search engine: {:?}", name),
            },
            None => SearchEngine::default(),
        };
        let search = SearchSettings {
            engine,
            autocomplete_limit: search_file
                .autocomplete_limit
                .unwrap_or(SearchSettings::default().autocomplete_limit),
        };

        Ok(Self {
            media_path,
            default_audio_tracks,
            prune_tracks_without_audio,
            seed_demo_data,
            recommendation,
            social,
            search,
        })
    }
}

#[derive(Debug, Clone)]
pub struct RecommendationSettings {
    pub discovery_neighbors_per_favorite: usize,
    pub default_discovery_size: usize,
    pub default_radio_size: usize,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            discovery_neighbors_per_favorite: 5,
            default_discovery_size: 20,
            default_radio_size: 20,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SocialSettings {
    pub suggestion_depth: usize,
    pub default_suggestions: usize,
    pub connection_depth: usize,
}

impl Default for SocialSettings {
    fn default() -> Self {
        Self {
            suggestion_depth: 2,
            default_suggestions: 10,
            connection_depth: 3,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub engine: SearchEngine,
    pub autocomplete_limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            engine: SearchEngine::Prefix,
            autocomplete_limit: 10,
        }
    }
}

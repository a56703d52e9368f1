//! Configuration model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default video extensions accepted from the incoming directory.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "mkv", "mp4", "avi", "m4v", "mov", "wmv", "ts", "webm", "mpg", "mpeg",
];

/// Application configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TMDB configuration.
    pub tmdb: TmdbConfig,
    /// Library locations.
    pub library: LibraryConfig,
}

/// TMDB configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TmdbConfig {
    /// API key.
    pub api_key: Option<String>,
    /// Language for responses.
    pub language: String,
}

/// Library locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    pub movies_dir: Option<PathBuf>,
    pub series_dir: Option<PathBuf>,
    /// Extension allow-list, without dots.
    pub extensions: Vec<String>,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            language: "en-US".to_string(),
        }
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            movies_dir: None,
            series_dir: None,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

/// How files reach the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferMode {
    Move,
    Link,
}

impl std::fmt::Display for TransferMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransferMode::Move => write!(f, "MOVE"),
            TransferMode::Link => write!(f, "LINK"),
        }
    }
}

/// Validated settings for one run. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub incoming: PathBuf,
    pub movies_dir: PathBuf,
    pub series_dir: PathBuf,
    /// Lowercase extensions without dots.
    pub extensions: Vec<String>,
    pub mode: TransferMode,
    /// Prefer the episode title found in the file name over TMDB's.
    pub keep_file_episode_title: bool,
    pub dry_run: bool,
}

/// Get the configuration directory path.
pub fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("move2jelly")
}

/// Load configuration from file, falling back to defaults when absent.
pub fn load_config() -> crate::Result<Config> {
    let config_path = dirs_config_path().join("config.toml");

    if !config_path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(&config_path)?;
    let config = toml::from_str(&content)?;
    tracing::debug!("Loaded config from {}", config_path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [library]
            movies_dir = "/srv/movies"
            "#,
        )
        .unwrap();

        assert_eq!(config.library.movies_dir, Some(PathBuf::from("/srv/movies")));
        assert!(config.library.series_dir.is_none());
        assert!(config.library.extensions.contains(&"mkv".to_string()));
        assert_eq!(config.tmdb.language, "en-US");
    }
}

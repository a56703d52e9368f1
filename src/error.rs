//! Error types for move2jelly.

use crate::models::media::Candidate;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for move2jelly.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("TMDB API key not configured. Set TMDB_API_KEY environment variable")]
    TmdbApiKeyMissing,

    #[error("Path not found: {0}")]
    PathNotFound(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Preflight checks failed. Fix the issues above and try again.")]
    PreflightFailed,

    #[error("Invalid series override table: {0}")]
    InvalidOverrides(String),

    // Parse errors
    #[error("No file extension: {0}")]
    NoExtension(String),

    #[error("No year found in movie filename: {0}")]
    NoYearFound(String),

    #[error("No season/episode number found: {0}")]
    NoSeasonEpisode(String),

    #[error("Nothing left to search for in: {0}")]
    EmptyTitle(String),

    // Resolution errors
    #[error("Not found on TMDB: {0}")]
    NotFound(String),

    #[error("Ambiguous match for '{query}' ({} candidates)", candidates.len())]
    Ambiguous {
        query: String,
        candidates: Vec<Candidate>,
    },

    #[error("TV show has no first air date on TMDB: {0}")]
    MissingAirDate(String),

    #[error("Movie has no release date on TMDB: {0}")]
    MissingReleaseDate(String),

    // Transfer errors
    #[error("File already exists: {0}")]
    FileAlreadyExists(String),

    #[error("Checksum mismatch after copy: {0}")]
    ChecksumMismatch(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // JSON errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config file error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Whether this error is an expected outcome of heuristic parsing or
    /// catalog lookup, as opposed to a failure while touching the item.
    pub fn is_skip(&self) -> bool {
        matches!(
            self,
            Error::NoExtension(_)
                | Error::NoYearFound(_)
                | Error::NoSeasonEpisode(_)
                | Error::EmptyTitle(_)
                | Error::NotFound(_)
                | Error::Ambiguous { .. }
                | Error::MissingAirDate(_)
                | Error::MissingReleaseDate(_)
        )
    }
}

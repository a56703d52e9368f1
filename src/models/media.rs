//! Media-related data models.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Kind of item found in the incoming directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Episode,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "movie"),
            MediaKind::Episode => write!(f, "episode"),
        }
    }
}

/// One video file discovered in the incoming directory.
#[derive(Debug, Clone)]
pub struct RawItem {
    /// Full path as found on disk (used for every filesystem call).
    pub path: PathBuf,
    /// Decoded and re-normalized file name (used for parsing and display).
    pub filename: String,
}

/// Identification fields extracted from a movie filename.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieQuery {
    /// Id from a `[tmdbid-N]` tag; bypasses search when present.
    pub explicit_id: Option<u64>,
    pub title: String,
    pub year: Option<u16>,
    /// Text after the year (or id tag), e.g. release edition or quality.
    pub remainder: String,
    pub extension: String,
}

/// Identification fields extracted from an episode filename.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeQuery {
    /// Id from a `[tmdbid-N]` tag or the series override table.
    pub explicit_id: Option<u64>,
    pub title: String,
    /// Year hint taken from a bracketed year in the show title.
    pub year: Option<u16>,
    pub season: u16,
    pub episode: u16,
    pub episode_title_guess: String,
    pub remainder: String,
    pub extension: String,
}

/// Parsed filename, by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseResult {
    Movie(MovieQuery),
    Episode(EpisodeQuery),
}

/// A movie matched to exactly one catalog record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMovie {
    pub id: u64,
    pub title: String,
    pub year: u16,
}

/// An episode matched to exactly one show and episode record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEpisode {
    pub show_id: u64,
    pub show_name: String,
    pub show_first_year: u16,
    /// Episode title as it will appear in the file name.
    pub episode_name: String,
    pub episode_year: u16,
    pub season: u16,
    pub episode: u16,
}

/// A catalog record offered to the operator when narrowing fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub id: u64,
    pub title: String,
    /// Release or first-air date as reported by the catalog (may be empty).
    pub date: String,
    pub overview: Option<String>,
    pub url: String,
}

impl Candidate {
    /// Synopsis trimmed for a one-line listing.
    pub fn overview_snippet(&self, max_chars: usize) -> String {
        let overview = self.overview.as_deref().unwrap_or("").trim();
        if overview.chars().count() <= max_chars {
            return overview.to_string();
        }
        let cut: String = overview.chars().take(max_chars).collect();
        format!("{}...", cut.trim_end())
    }
}

/// Where a resolved item will be placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedVideo {
    pub kind: MediaKind,
    /// Source path of the primary video file.
    pub source: PathBuf,
    /// Normalized source file name.
    pub source_filename: String,
    pub destination_folder: PathBuf,
    pub destination_filename: String,
}

impl ParsedVideo {
    /// Full destination path of the primary file.
    pub fn destination(&self) -> PathBuf {
        self.destination_folder.join(&self.destination_filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overview_snippet() {
        let candidate = Candidate {
            id: 1,
            title: "Dune".to_string(),
            date: "1984-12-14".to_string(),
            overview: Some("A duke's son leads desert warriors.".to_string()),
            url: String::new(),
        };
        assert_eq!(candidate.overview_snippet(200), "A duke's son leads desert warriors.");
        assert_eq!(candidate.overview_snippet(6), "A duke...");

        let empty = Candidate { overview: None, ..candidate };
        assert_eq!(empty.overview_snippet(10), "");
    }
}

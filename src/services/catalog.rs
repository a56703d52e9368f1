//! Metadata catalog interface.
//!
//! The resolver only talks to the catalog through this trait, so tests can
//! substitute an in-memory catalog for TMDB.

use crate::models::media::Candidate;
use crate::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// Movie record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MovieRecord {
    pub id: u64,
    pub title: String,
    /// `YYYY-MM-DD`; TMDB sends an empty string or omits it for unreleased titles.
    #[serde(default)]
    pub release_date: String,
    pub overview: Option<String>,
}

/// TV show record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ShowRecord {
    pub id: u64,
    pub name: String,
    pub first_air_date: Option<String>,
    pub overview: Option<String>,
}

/// TV episode record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EpisodeRecord {
    pub name: String,
    pub air_date: Option<String>,
}

/// Query interface of a movie/TV metadata catalog.
///
/// Lookups by id return `Ok(None)` when the catalog has no such record;
/// `Err` is reserved for transport failures.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn movie_by_id(&self, id: u64) -> Result<Option<MovieRecord>>;

    async fn search_movies(&self, title: &str, year: Option<u16>) -> Result<Vec<MovieRecord>>;

    async fn show_by_id(&self, id: u64) -> Result<Option<ShowRecord>>;

    async fn search_shows(&self, title: &str, year: Option<u16>) -> Result<Vec<ShowRecord>>;

    async fn episode(&self, show_id: u64, season: u16, episode: u16) -> Result<Option<EpisodeRecord>>;

    /// Public page of a movie, shown to the operator.
    fn movie_url(&self, id: u64) -> String;

    /// Public page of a TV show, shown to the operator.
    fn show_url(&self, id: u64) -> String;
}

/// Year part of a catalog date (`"1999-03-30"` -> `1999`).
pub fn year_of(date: &str) -> Option<u16> {
    use chrono::Datelike;

    let date = date.trim();
    if let Ok(parsed) = chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return u16::try_from(parsed.year()).ok();
    }
    date.get(..4).and_then(|y| y.parse().ok())
}

impl MovieRecord {
    pub fn to_candidate(&self, catalog: &dyn Catalog) -> Candidate {
        Candidate {
            id: self.id,
            title: self.title.clone(),
            date: self.release_date.clone(),
            overview: self.overview.clone(),
            url: catalog.movie_url(self.id),
        }
    }
}

impl ShowRecord {
    pub fn to_candidate(&self, catalog: &dyn Catalog) -> Candidate {
        Candidate {
            id: self.id,
            title: self.name.clone(),
            date: self.first_air_date.clone().unwrap_or_default(),
            overview: self.overview.clone(),
            url: catalog.show_url(self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_of() {
        assert_eq!(year_of("1999-03-30"), Some(1999));
        assert_eq!(year_of("2021"), Some(2021));
        assert_eq!(year_of(""), None);
        assert_eq!(year_of("soon"), None);
    }

    #[test]
    fn test_movie_record_missing_fields() {
        let record: MovieRecord =
            serde_json::from_str(r#"{"id": 603, "title": "The Matrix"}"#).unwrap();
        assert_eq!(record.release_date, "");
        assert!(record.overview.is_none());
    }
}

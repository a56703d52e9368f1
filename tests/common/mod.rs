//! Shared test helpers: an in-memory catalog that records its calls.

#![allow(dead_code)]

use async_trait::async_trait;
use move2jelly::services::catalog::{Catalog, EpisodeRecord, MovieRecord, ShowRecord};
use move2jelly::Result;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct MockCatalog {
    pub movies: Vec<MovieRecord>,
    pub shows: Vec<ShowRecord>,
    pub episodes: HashMap<(u64, u16, u16), EpisodeRecord>,
    calls: Mutex<Vec<String>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movie(mut self, id: u64, title: &str, date: &str, overview: Option<&str>) -> Self {
        self.movies.push(MovieRecord {
            id,
            title: title.to_string(),
            release_date: date.to_string(),
            overview: overview.map(str::to_string),
        });
        self
    }

    pub fn with_show(mut self, id: u64, name: &str, first_air_date: Option<&str>) -> Self {
        self.shows.push(ShowRecord {
            id,
            name: name.to_string(),
            first_air_date: first_air_date.map(str::to_string),
            overview: None,
        });
        self
    }

    pub fn with_episode(mut self, show_id: u64, season: u16, episode: u16, name: &str, air_date: Option<&str>) -> Self {
        self.episodes.insert(
            (show_id, season, episode),
            EpisodeRecord {
                name: name.to_string(),
                air_date: air_date.map(str::to_string),
            },
        );
        self
    }

    /// Endpoints called so far, e.g. `search_movies:The Matrix`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Catalog for MockCatalog {
    async fn movie_by_id(&self, id: u64) -> Result<Option<MovieRecord>> {
        self.record(format!("movie_by_id:{}", id));
        Ok(self.movies.iter().find(|m| m.id == id).cloned())
    }

    async fn search_movies(&self, title: &str, _year: Option<u16>) -> Result<Vec<MovieRecord>> {
        self.record(format!("search_movies:{}", title));
        let needle = title.to_lowercase();
        Ok(self
            .movies
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn show_by_id(&self, id: u64) -> Result<Option<ShowRecord>> {
        self.record(format!("show_by_id:{}", id));
        Ok(self.shows.iter().find(|s| s.id == id).cloned())
    }

    async fn search_shows(&self, title: &str, _year: Option<u16>) -> Result<Vec<ShowRecord>> {
        self.record(format!("search_shows:{}", title));
        let needle = title.to_lowercase();
        Ok(self
            .shows
            .iter()
            .filter(|s| s.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn episode(&self, show_id: u64, season: u16, episode: u16) -> Result<Option<EpisodeRecord>> {
        self.record(format!("episode:{}:{}:{}", show_id, season, episode));
        Ok(self.episodes.get(&(show_id, season, episode)).cloned())
    }

    fn movie_url(&self, id: u64) -> String {
        format!("https://catalog.test/movie/{}", id)
    }

    fn show_url(&self, id: u64) -> String {
        format!("https://catalog.test/tv/{}", id)
    }
}

//! TMDB API client.

use crate::services::catalog::{Catalog, EpisodeRecord, MovieRecord, ShowRecord};
use crate::Result;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
const TMDB_SITE_URL: &str = "https://www.themoviedb.org";

/// TMDB client configuration.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    /// API key or Bearer token (JWT)
    pub api_key: String,
    pub language: String,
    /// Whether to use Bearer token authentication (API v4 style)
    pub use_bearer: bool,
}

impl TmdbConfig {
    /// Create config from an API key.
    /// Supports both API key (v3) and Bearer token (v4) formats.
    pub fn new(api_key: impl Into<String>, language: impl Into<String>) -> Self {
        let api_key = api_key.into();
        // Bearer tokens start with "eyJ" (base64 encoded JWT header)
        let use_bearer = api_key.starts_with("eyJ");

        Self {
            api_key,
            language: language.into(),
            use_bearer,
        }
    }
}

/// TMDB API client.
pub struct TmdbClient {
    config: TmdbConfig,
    client: reqwest::Client,
}

/// Paged search response.
#[derive(Debug, Deserialize)]
struct SearchResponse<T> {
    results: Vec<T>,
}

impl TmdbClient {
    /// Create a new TMDB client.
    pub fn new(config: TmdbConfig) -> Self {
        let client = reqwest::Client::new();
        Self { config, client }
    }

    /// Build a request with proper authentication.
    fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(url);
        if self.config.use_bearer {
            request.header("Authorization", format!("Bearer {}", self.config.api_key))
        } else {
            request
        }
    }

    /// Build URL with optional api_key parameter (only for v3 style).
    fn build_url(&self, path: &str, extra_params: &str) -> String {
        let language = urlencoding::encode(&self.config.language);
        if self.config.use_bearer {
            format!("{}/{}?language={}{}", TMDB_BASE_URL, path, language, extra_params)
        } else {
            format!(
                "{}/{}?api_key={}&language={}{}",
                TMDB_BASE_URL,
                path,
                urlencoding::encode(&self.config.api_key),
                language,
                extra_params
            )
        }
    }

    /// GET a resource, mapping 404 to `None`.
    async fn get_optional<T: DeserializeOwned>(&self, url: &str) -> Result<Option<T>> {
        let resp = self.build_request(url).send().await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body = resp.error_for_status()?.json().await?;
        Ok(Some(body))
    }

    /// Verify API key is valid.
    pub async fn verify_api_key(&self) -> Result<bool> {
        let url = if self.config.use_bearer {
            format!("{}/authentication", TMDB_BASE_URL)
        } else {
            format!(
                "{}/authentication?api_key={}",
                TMDB_BASE_URL,
                urlencoding::encode(&self.config.api_key)
            )
        };

        let resp = self.build_request(&url).send().await?;
        Ok(resp.status().is_success())
    }
}

#[async_trait]
impl Catalog for TmdbClient {
    async fn movie_by_id(&self, id: u64) -> Result<Option<MovieRecord>> {
        let url = self.build_url(&format!("movie/{}", id), "");
        self.get_optional(&url).await
    }

    async fn search_movies(&self, title: &str, year: Option<u16>) -> Result<Vec<MovieRecord>> {
        let year_param = year.map(|y| format!("&year={}", y)).unwrap_or_default();
        let url = self.build_url(
            "search/movie",
            &format!("&query={}{}", urlencoding::encode(title), year_param),
        );

        let resp: SearchResponse<MovieRecord> =
            self.build_request(&url).send().await?.error_for_status()?.json().await?;
        tracing::debug!("search/movie '{}' ({:?}): {} results", title, year, resp.results.len());
        Ok(resp.results)
    }

    async fn show_by_id(&self, id: u64) -> Result<Option<ShowRecord>> {
        let url = self.build_url(&format!("tv/{}", id), "");
        self.get_optional(&url).await
    }

    async fn search_shows(&self, title: &str, year: Option<u16>) -> Result<Vec<ShowRecord>> {
        let year_param = year
            .map(|y| format!("&first_air_date_year={}", y))
            .unwrap_or_default();
        let url = self.build_url(
            "search/tv",
            &format!("&query={}{}", urlencoding::encode(title), year_param),
        );

        let resp: SearchResponse<ShowRecord> =
            self.build_request(&url).send().await?.error_for_status()?.json().await?;
        tracing::debug!("search/tv '{}' ({:?}): {} results", title, year, resp.results.len());
        Ok(resp.results)
    }

    async fn episode(&self, show_id: u64, season: u16, episode: u16) -> Result<Option<EpisodeRecord>> {
        let url = self.build_url(
            &format!("tv/{}/season/{}/episode/{}", show_id, season, episode),
            "",
        );
        self.get_optional(&url).await
    }

    fn movie_url(&self, id: u64) -> String {
        format!("{}/movie/{}", TMDB_SITE_URL, id)
    }

    fn show_url(&self, id: u64) -> String {
        format!("{}/tv/{}", TMDB_SITE_URL, id)
    }
}

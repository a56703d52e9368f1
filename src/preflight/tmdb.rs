//! TMDB API preflight check.

use super::CheckResult;
use crate::services::tmdb::TmdbClient;

/// Check if TMDB API is accessible with the configured key.
pub async fn check(client: &TmdbClient) -> CheckResult {
    match client.verify_api_key().await {
        Ok(true) => CheckResult::passed("TMDB API", "connected"),
        Ok(false) => CheckResult::failed(
            "TMDB API",
            "invalid API key",
            "Check your TMDB_API_KEY environment variable or config.toml",
        ),
        Err(e) => CheckResult::failed(
            "TMDB API",
            format!("connection failed: {}", e),
            "Check your network connection",
        ),
    }
}

//! Folder name generator.

use crate::core::normalizer::sanitize_for_filesystem;
use crate::models::media::{ResolvedEpisode, ResolvedMovie};
use std::path::PathBuf;

/// Movie title as used in names: a `" - "` inside the title would read as
/// the separator before the remainder, so it becomes `". "`.
pub(crate) fn movie_title(movie: &ResolvedMovie) -> String {
    sanitize_for_filesystem(&movie.title.replace(" - ", ". "))
}

/// Generate movie folder name.
///
/// Format: `${title} (${year}) [tmdbid-${id}]`
pub fn generate_movie_folder(movie: &ResolvedMovie) -> String {
    format!("{} ({}) [tmdbid-{}]", movie_title(movie), movie.year, movie.id)
}

/// Generate TV show folder name.
///
/// Format: `${showName} (${firstAirYear}) [tmdbid-${showId}]`
pub fn generate_show_folder(episode: &ResolvedEpisode) -> String {
    format!(
        "{} ({}) [tmdbid-{}]",
        sanitize_for_filesystem(&episode.show_name),
        episode.show_first_year,
        episode.show_id
    )
}

/// Generate season folder name.
///
/// Format: `Season ${seasonNr2}`
pub fn generate_season_folder(season_number: u16) -> String {
    format!("Season {:02}", season_number)
}

/// Relative folder of an episode: show folder, then season folder.
pub fn generate_episode_folder(episode: &ResolvedEpisode) -> PathBuf {
    PathBuf::from(generate_show_folder(episode)).join(generate_season_folder(episode.season))
}

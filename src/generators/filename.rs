//! Filename generator.

use crate::core::normalizer::sanitize_for_filesystem;
use crate::generators::folder::movie_title;
use crate::models::media::{ResolvedEpisode, ResolvedMovie};

/// Generate movie filename.
///
/// Format: `${title} (${year}) [tmdbid-${id}] - ${remainder}.${ext}`
///
/// The separator is written even when the remainder is empty.
pub fn generate_movie_filename(movie: &ResolvedMovie, remainder: &str, extension: &str) -> String {
    format!(
        "{} ({}) [tmdbid-{}] - {}.{}",
        movie_title(movie),
        movie.year,
        movie.id,
        sanitize_for_filesystem(remainder),
        extension
    )
}

/// Generate TV episode filename.
///
/// Format: `${showName} (${episodeYear}) S${seasonNr2}E${episodeNr2} ${title}( - ${remainder}).${ext}`
pub fn generate_episode_filename(episode: &ResolvedEpisode, remainder: &str, extension: &str) -> String {
    let mut name = format!(
        "{} ({}) S{:02}E{:02}",
        sanitize_for_filesystem(&episode.show_name),
        episode.episode_year,
        episode.season,
        episode.episode
    );

    if !episode.episode_name.is_empty() {
        name.push(' ');
        name.push_str(&sanitize_for_filesystem(&episode.episode_name));
    }

    if !remainder.is_empty() {
        name.push_str(&sanitize_for_filesystem(&format!(" - {}", remainder)));
    }

    format!("{}.{}", name, extension)
}

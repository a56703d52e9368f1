//! Filename parser module.
//!
//! Turns a cleaned video filename into the fields needed to query TMDB.
//! Rules are tried in a fixed order and the first match wins, so the order
//! of the patterns below is part of the behaviour.

use crate::core::normalizer::{clean_title, simplify, RE_EXTENSION};
use crate::models::media::{EpisodeQuery, MediaKind, MovieQuery, ParseResult};
use crate::models::overrides::SeriesOverrides;
use crate::Result;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static RE_TMDB_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[tmdbid-(\d+)\]").expect("tmdbid regex"));

// Whole-word episode markers used for classification only.
static RE_EPISODE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:\d{1,2}x\d{1,3}|s\d{1,2}e\d{1,3})\b").expect("episode marker regex")
});

static RE_SXXEYY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bs(\d{1,2})e(\d{1,3})").expect("SxxEyy regex"));

static RE_NXM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,2})x(\d{1,3})\b").expect("NxM regex"));

// Year alone in brackets: "(2010)" or "[2010]".
static RE_YEAR_BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\(\[]((?:19|20)\d{2})[\)\]]").expect("bracketed year regex"));

// Year after other text in brackets: "(Director Name, 2010)".
static RE_YEAR_ANNOTATED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\(\[][^\(\)\[\]]*?\D((?:19|20)\d{2})[\)\]]").expect("annotated year regex")
});

static RE_YEAR_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b((?:19|20)\d{2})\b").expect("bare year regex"));

/// Decide whether a filename names a movie or a TV episode.
pub fn classify(filename: &str) -> MediaKind {
    let spaced = filename.replace('_', " ");
    if RE_EPISODE_MARKER.is_match(&spaced) {
        MediaKind::Episode
    } else {
        MediaKind::Movie
    }
}

/// Classify and run the matching parser.
pub fn parse(filename: &str, overrides: &SeriesOverrides) -> Result<ParseResult> {
    match classify(filename) {
        MediaKind::Movie => parse_movie(filename).map(ParseResult::Movie),
        MediaKind::Episode => parse_episode(filename, overrides).map(ParseResult::Episode),
    }
}

fn extension_of(filename: &str) -> Result<String> {
    RE_EXTENSION
        .captures(filename)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| crate::Error::NoExtension(filename.to_string()))
}

fn capture_u16(caps: &Captures<'_>, idx: usize) -> Option<u16> {
    caps.get(idx).and_then(|m| m.as_str().parse().ok())
}

/// Parse a movie filename.
pub fn parse_movie(filename: &str) -> Result<MovieQuery> {
    let extension = extension_of(filename)?;
    let cleaned = clean_title(filename);

    if let Some(caps) = RE_TMDB_ID.captures(&cleaned) {
        let tag = caps.get(0).map(|m| m.range()).unwrap_or_default();
        return Ok(MovieQuery {
            explicit_id: caps[1].parse().ok(),
            title: cleaned[..tag.start].trim().to_string(),
            year: None,
            remainder: cleaned[tag.end..].trim().to_string(),
            extension,
        });
    }

    // Priority: bracketed year, annotated bracketed year, bare year.
    let found = [&*RE_YEAR_BRACKETED, &*RE_YEAR_ANNOTATED, &*RE_YEAR_BARE]
        .iter()
        .find_map(|re| re.captures(&cleaned))
        .ok_or_else(|| crate::Error::NoYearFound(filename.to_string()))?;

    let whole = found.get(0).map(|m| m.range()).unwrap_or_default();
    let title = cleaned[..whole.start].trim().to_string();
    if title.is_empty() {
        return Err(crate::Error::EmptyTitle(filename.to_string()));
    }

    Ok(MovieQuery {
        explicit_id: None,
        title,
        year: capture_u16(&found, 1),
        remainder: cleaned[whole.end..].trim().to_string(),
        extension,
    })
}

/// Parse a TV episode filename.
///
/// The show title is looked up in `overrides` when the filename carries no
/// `[tmdbid-N]` tag.
pub fn parse_episode(filename: &str, overrides: &SeriesOverrides) -> Result<EpisodeQuery> {
    let extension = extension_of(filename)?;

    let mut explicit_id = RE_TMDB_ID
        .captures(filename)
        .and_then(|caps| caps[1].parse::<u64>().ok());
    let working = RE_TMDB_ID.replace(filename, "");
    let cleaned = clean_title(&working);

    let caps = RE_SXXEYY
        .captures(&cleaned)
        .or_else(|| RE_NXM.captures(&cleaned))
        .ok_or_else(|| crate::Error::NoSeasonEpisode(filename.to_string()))?;

    let token = caps.get(0).map(|m| m.range()).unwrap_or_default();
    let (Some(season), Some(episode)) = (capture_u16(&caps, 1), capture_u16(&caps, 2)) else {
        return Err(crate::Error::NoSeasonEpisode(filename.to_string()));
    };

    let mut title = cleaned[..token.start].trim().to_string();
    let mut remainder = cleaned[token.end..].trim().to_string();
    if title.is_empty() && explicit_id.is_none() {
        return Err(crate::Error::EmptyTitle(filename.to_string()));
    }

    if explicit_id.is_none() {
        explicit_id = overrides.get(&title);
        if let Some(id) = explicit_id {
            tracing::debug!("Series override for '{}' ({}): tmdbid {}", title, simplify(&title), id);
        }
    }

    let guess_end = remainder.find(['(', '[']).unwrap_or(remainder.len());
    let episode_title_guess = remainder[..guess_end].trim().to_string();
    if !episode_title_guess.is_empty() {
        remainder = remainder[guess_end..].trim().to_string();
    }

    let mut year = None;
    if let Some(found) = RE_YEAR_BRACKETED.captures(&title) {
        year = capture_u16(&found, 1);
        title = RE_YEAR_BRACKETED.replace(&title, "").trim().to_string();
    }

    Ok(EpisodeQuery {
        explicit_id,
        title,
        year,
        season,
        episode,
        episode_title_guess,
        remainder,
        extension,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify("Show.Name.S01E02.Episode.Title.mkv"), MediaKind::Episode);
        assert_eq!(classify("Show Name 1x2 Episode Title.mkv"), MediaKind::Episode);
        assert_eq!(classify("show_s02e113_finale.mkv"), MediaKind::Episode);
        assert_eq!(classify("Inception (2010) BluRay.mkv"), MediaKind::Movie);
        assert_eq!(classify("Movie 1920x1080 (2010).mkv"), MediaKind::Movie);
        assert_eq!(classify("Movie.2010.x264.mkv"), MediaKind::Movie);
    }

    #[test]
    fn test_extension_required() {
        assert!(matches!(parse_movie("Inception (2010)"), Err(crate::Error::NoExtension(_))));
        assert!(matches!(
            parse_episode("Show S01E01", &SeriesOverrides::default()),
            Err(crate::Error::NoExtension(_))
        ));
    }

    #[test]
    fn test_long_extension_stays_out_of_remainder() {
        let query = parse_movie("Heat (1995) Remux.divxhd").unwrap();
        assert_eq!(query.remainder, "Remux");
        assert_eq!(query.extension, "divxhd");
    }

    #[test]
    fn test_year_rule_priority() {
        // Bracketed year beats an earlier bare year.
        let query = parse_movie("2001 A Space Odyssey (1968).mkv").unwrap();
        assert_eq!(query.title, "2001 A Space Odyssey");
        assert_eq!(query.year, Some(1968));

        let query = parse_movie("Heat (Michael Mann, 1995) Remux.mkv").unwrap();
        assert_eq!(query.title, "Heat");
        assert_eq!(query.year, Some(1995));
        assert_eq!(query.remainder, "Remux");

        let query = parse_movie("Alien.1979.Directors.Cut.mkv").unwrap();
        assert_eq!(query.title, "Alien");
        assert_eq!(query.year, Some(1979));
        assert_eq!(query.remainder, "Directors Cut");
    }

    #[test]
    fn test_no_year() {
        assert!(matches!(parse_movie("Some Movie.mkv"), Err(crate::Error::NoYearFound(_))));
        assert!(matches!(parse_movie("2012.mkv"), Err(crate::Error::EmptyTitle(_))));
    }

    #[test]
    fn test_movie_explicit_id() {
        let query = parse_movie("Movie [tmdbid-27205] extra.mkv").unwrap();
        assert_eq!(query.explicit_id, Some(27205));
        assert_eq!(query.title, "Movie");
        assert_eq!(query.remainder, "extra");
        assert_eq!(query.year, None);
    }

    #[test]
    fn test_episode_title_guess_stops_at_bracket() {
        let query = parse_episode(
            "Show.Name.(2019).S02E05.The.Return.[1080p].mkv",
            &SeriesOverrides::default(),
        )
        .unwrap();
        assert_eq!(query.title, "Show Name");
        assert_eq!(query.year, Some(2019));
        assert_eq!(query.season, 2);
        assert_eq!(query.episode, 5);
        assert_eq!(query.episode_title_guess, "The Return");
        assert_eq!(query.remainder, "[1080p]");
    }
}

//! Candidate resolver.
//!
//! Queries the catalog for a parsed filename and narrows the results down to
//! exactly one record. Anything else is reported as `NotFound` or
//! `Ambiguous` so the operator can tag the file with an explicit id.

use crate::core::normalizer::simplify;
use crate::models::media::{EpisodeQuery, MovieQuery, ResolvedEpisode, ResolvedMovie};
use crate::services::catalog::{year_of, Catalog, MovieRecord, ShowRecord};
use crate::Result;
use colored::Colorize;

/// Resolves parsed queries against a catalog.
pub struct Resolver<'a, C: Catalog> {
    catalog: &'a C,
    keep_file_episode_title: bool,
}

impl<'a, C: Catalog> Resolver<'a, C> {
    pub fn new(catalog: &'a C, keep_file_episode_title: bool) -> Self {
        Self {
            catalog,
            keep_file_episode_title,
        }
    }

    /// Resolve a movie query to one catalog record.
    pub async fn resolve_movie(&self, query: &MovieQuery) -> Result<ResolvedMovie> {
        if let Some(id) = query.explicit_id {
            let record = self
                .catalog
                .movie_by_id(id)
                .await?
                .ok_or_else(|| crate::Error::NotFound(format!("movie tmdbid-{}", id)))?;
            return self.to_resolved_movie(record, query.year);
        }

        let results = self.catalog.search_movies(&query.title, query.year).await?;
        let described = describe(&query.title, query.year);

        match narrow_movies(&results, &query.title, query.year) {
            Narrowed::One(record) => self.to_resolved_movie(record.clone(), query.year),
            Narrowed::None => Err(crate::Error::NotFound(format!("movie {}", described))),
            Narrowed::Many(remaining) => {
                // An over-eager filter must not hide what the search returned.
                let listed = if remaining.is_empty() { results.iter().collect() } else { remaining };
                Err(crate::Error::Ambiguous {
                    query: described,
                    candidates: listed.iter().map(|m| m.to_candidate(self.catalog)).collect(),
                })
            }
        }
    }

    fn to_resolved_movie(&self, record: MovieRecord, parsed_year: Option<u16>) -> Result<ResolvedMovie> {
        let year = year_of(&record.release_date)
            .or(parsed_year)
            .ok_or_else(|| crate::Error::MissingReleaseDate(format!("{} ({})", record.title, record.id)))?;

        Ok(ResolvedMovie {
            id: record.id,
            title: record.title,
            year,
        })
    }

    /// Resolve an episode query to one show and one episode record.
    pub async fn resolve_episode(&self, query: &EpisodeQuery) -> Result<ResolvedEpisode> {
        let show = self.resolve_show(query).await?;

        let show_first_year = show
            .first_air_date
            .as_deref()
            .and_then(year_of)
            .ok_or_else(|| crate::Error::MissingAirDate(format!("{} ({})", show.name, show.id)))?;

        let record = self
            .catalog
            .episode(show.id, query.season, query.episode)
            .await?
            .ok_or_else(|| {
                crate::Error::NotFound(format!(
                    "{} S{:02}E{:02} (tmdbid-{})",
                    show.name, query.season, query.episode, show.id
                ))
            })?;

        let guess = query.episode_title_guess.as_str();
        if !guess.is_empty() && simplify(guess) != simplify(&record.name) {
            let winner = if self.keep_file_episode_title { "file" } else { "TMDB" };
            tracing::warn!(
                "Episode title mismatch: file '{}' vs TMDB '{}' (using {} title)",
                guess,
                record.name,
                winner
            );
            println!(
                "  {} episode title differs: file '{}' / TMDB '{}' -> using {} title",
                "[WARN]".yellow(),
                guess,
                record.name,
                winner
            );
        }

        let episode_name = choose_episode_title(guess, &record.name, self.keep_file_episode_title);
        let episode_year = record
            .air_date
            .as_deref()
            .and_then(year_of)
            .or(query.year)
            .unwrap_or(show_first_year);

        Ok(ResolvedEpisode {
            show_id: show.id,
            show_name: show.name,
            show_first_year,
            episode_name: episode_name.to_string(),
            episode_year,
            season: query.season,
            episode: query.episode,
        })
    }

    async fn resolve_show(&self, query: &EpisodeQuery) -> Result<ShowRecord> {
        if let Some(id) = query.explicit_id {
            return self
                .catalog
                .show_by_id(id)
                .await?
                .ok_or_else(|| crate::Error::NotFound(format!("TV show tmdbid-{}", id)));
        }

        let mut results = self.catalog.search_shows(&query.title, query.year).await?;
        let described = describe(&query.title, query.year);

        match results.len() {
            0 => Err(crate::Error::NotFound(format!("TV show {}", described))),
            1 => Ok(results.swap_remove(0)),
            _ => {
                let target = simplify(&query.title);
                let mut exact: Vec<&ShowRecord> =
                    results.iter().filter(|s| simplify(&s.name) == target).collect();
                if exact.len() == 1 {
                    return Ok(exact.remove(0).clone());
                }
                Err(crate::Error::Ambiguous {
                    query: described,
                    candidates: results.iter().map(|s| s.to_candidate(self.catalog)).collect(),
                })
            }
        }
    }
}

/// Outcome of narrowing a candidate list.
#[derive(Debug, PartialEq, Eq)]
pub enum Narrowed<'a, T> {
    None,
    One(&'a T),
    /// Still ambiguous; holds the narrowed set, which may be empty when the
    /// filters rejected every candidate.
    Many(Vec<&'a T>),
}

/// Narrow movie search results.
///
/// With several results, keep exact title matches released in the parsed
/// year; if that does not leave exactly one, keep those of the survivors
/// that have a synopsis.
pub fn narrow_movies<'a>(
    results: &'a [MovieRecord],
    title: &str,
    year: Option<u16>,
) -> Narrowed<'a, MovieRecord> {
    match results {
        [] => return Narrowed::None,
        [only] => return Narrowed::One(only),
        _ => {}
    }

    let target = simplify(title);
    let year_prefix = year.map(|y| y.to_string()).unwrap_or_default();

    let mut movies: Vec<&MovieRecord> = results
        .iter()
        .filter(|m| simplify(&m.title) == target && m.release_date.starts_with(&year_prefix))
        .collect();

    if movies.len() != 1 {
        movies.retain(|m| m.overview.as_deref().is_some_and(|o| !o.trim().is_empty()));
    }

    if movies.len() == 1 {
        Narrowed::One(movies[0])
    } else {
        Narrowed::Many(movies)
    }
}

/// Pick the episode title used in the file name.
pub fn choose_episode_title<'t>(file_title: &'t str, catalog_title: &'t str, keep_file: bool) -> &'t str {
    if keep_file && !file_title.is_empty() {
        file_title
    } else {
        catalog_title
    }
}

fn describe(title: &str, year: Option<u16>) -> String {
    match year {
        Some(y) => format!("'{}' ({})", title, y),
        None => format!("'{}'", title),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64, title: &str, date: &str, overview: Option<&str>) -> MovieRecord {
        MovieRecord {
            id,
            title: title.to_string(),
            release_date: date.to_string(),
            overview: overview.map(str::to_string),
        }
    }

    #[test]
    fn test_narrow_by_year() {
        let results = vec![
            movie(841, "Dune", "1984-12-14", Some("Paul Atreides...")),
            movie(438631, "Dune", "2021-10-22", Some("Paul Atreides...")),
        ];
        assert_eq!(narrow_movies(&results, "Dune", Some(1984)), Narrowed::One(&results[0]));
    }

    #[test]
    fn test_narrow_by_overview() {
        let results = vec![
            movie(1, "Solaris", "1972-03-20", None),
            movie(2, "Solaris", "1972-01-01", Some("A psychologist travels to a space station.")),
            movie(3, "Solaris", "2002-11-27", Some("Remake.")),
        ];
        assert_eq!(narrow_movies(&results, "Solaris", Some(1972)), Narrowed::One(&results[1]));
    }

    #[test]
    fn test_narrow_stays_ambiguous_without_overview() {
        let results = vec![
            movie(1, "Twin Film", "2005-01-01", None),
            movie(2, "Twin Film", "2005-06-01", Some("  ")),
        ];
        assert_eq!(narrow_movies(&results, "Twin Film", Some(2005)), Narrowed::Many(vec![]));
    }

    #[test]
    fn test_narrow_filters_survivors_not_originals() {
        // The only movie with an overview has the wrong year, so the second
        // filter must not bring it back.
        let results = vec![
            movie(1, "Heist", "2001-01-01", None),
            movie(2, "Heist", "2001-05-01", None),
            movie(3, "Heist", "2015-05-01", Some("Different film.")),
        ];
        assert_eq!(narrow_movies(&results, "Heist", Some(2001)), Narrowed::Many(vec![]));
    }

    #[test]
    fn test_narrow_single_and_empty() {
        let results = vec![movie(603, "The Matrix", "1999-03-30", None)];
        assert_eq!(narrow_movies(&results, "Matrix", Some(1999)), Narrowed::One(&results[0]));
        assert_eq!(narrow_movies(&[], "Matrix", Some(1999)), Narrowed::None);
    }

    #[test]
    fn test_choose_episode_title() {
        assert_eq!(choose_episode_title("Pilot", "Pilot Episode", true), "Pilot");
        assert_eq!(choose_episode_title("Pilot", "Pilot Episode", false), "Pilot Episode");
        assert_eq!(choose_episode_title("", "Pilot Episode", true), "Pilot Episode");
    }
}

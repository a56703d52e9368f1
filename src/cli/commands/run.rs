//! Run command implementation.
//!
//! Validates the configuration, then resolves and places every video found
//! in the incoming directory.

use crate::cli::args::RunArgs;
use crate::core::placement::PlacementEngine;
use crate::core::scanner;
use crate::models::config::{Config, RunConfig, TransferMode};
use crate::models::overrides::SeriesOverrides;
use crate::preflight;
use crate::services::tmdb::{TmdbClient, TmdbConfig};
use crate::Result;
use colored::Colorize;
use std::path::PathBuf;

/// Merge CLI flags over the config file and validate the result.
///
/// `env_api_key` takes precedence over the key in the config file.
pub fn build_run_config(
    args: &RunArgs,
    config: &Config,
    env_api_key: Option<String>,
) -> Result<(RunConfig, TmdbConfig)> {
    let api_key = env_api_key
        .or_else(|| config.tmdb.api_key.clone())
        .filter(|k| !k.trim().is_empty())
        .ok_or(crate::Error::TmdbApiKeyMissing)?;

    let language = args
        .language
        .clone()
        .unwrap_or_else(|| config.tmdb.language.clone());

    let movies_dir = require_dir(args.movies.as_ref().or(config.library.movies_dir.as_ref()), "movies")?;
    let series_dir = require_dir(args.series.as_ref().or(config.library.series_dir.as_ref()), "series")?;
    crate::utils::fs::ensure_directory(&args.incoming)?;

    let extensions = if args.extensions.is_empty() {
        config.library.extensions.clone()
    } else {
        args.extensions.clone()
    }
    .into_iter()
    .map(|e| e.trim_start_matches('.').to_lowercase())
    .collect();

    let run = RunConfig {
        incoming: args.incoming.clone(),
        movies_dir,
        series_dir,
        extensions,
        mode: if args.link { TransferMode::Link } else { TransferMode::Move },
        keep_file_episode_title: args.keep_episode_title,
        dry_run: args.dry_run,
    };

    Ok((run, TmdbConfig::new(api_key, language)))
}

fn require_dir(path: Option<&PathBuf>, label: &str) -> Result<PathBuf> {
    let path = path.ok_or_else(|| {
        crate::Error::PathNotFound(format!("no {} directory configured (use --{})", label, label))
    })?;
    crate::utils::fs::ensure_directory(path)?;
    Ok(path.clone())
}

/// Execute the run command.
pub async fn run(args: &RunArgs, skip_preflight: bool) -> Result<()> {
    let config = crate::models::config::load_config()?;
    let (run_config, tmdb_config) =
        build_run_config(args, &config, std::env::var("TMDB_API_KEY").ok())?;
    let client = TmdbClient::new(tmdb_config);

    if !skip_preflight {
        println!("{}", "Running preflight checks...".bold());
        let report = preflight::run_preflight_checks(&run_config, &client).await;
        report.print();
        println!();
        report.into_result()?;
    }

    let overrides = SeriesOverrides::load(&run_config.incoming)?;
    let items = scanner::scan_incoming(&run_config.incoming, &run_config.extensions)?;

    // Print configuration
    println!("  {} {}", "Incoming:".bold(), run_config.incoming.display());
    println!("  {} {}", "Movies:".bold(), run_config.movies_dir.display());
    println!("  {} {}", "Series:".bold(), run_config.series_dir.display());
    println!("  {} {}", "Mode:".bold(), run_config.mode);
    if run_config.dry_run {
        println!("  {}", "Dry run: nothing will be changed".yellow());
    }
    println!();

    if items.is_empty() {
        println!("{}", "Nothing to do.".green());
        return Ok(());
    }

    let mut engine = PlacementEngine::new(&run_config, &client, &overrides);
    let summary = engine.run(&items).await;

    // Print summary
    println!("{}", "Summary".bold().green());
    println!("  {} {}", "Placed:".bold(), summary.placed());
    println!("  {} {}", "Skipped:".bold(), summary.skipped());
    println!("  {} {}", "Failed:".bold(), summary.failed());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(incoming: PathBuf, movies: Option<PathBuf>, series: Option<PathBuf>) -> RunArgs {
        RunArgs {
            incoming,
            extensions: vec![".MKV".to_string()],
            movies,
            series,
            link: true,
            keep_episode_title: false,
            dry_run: false,
            language: None,
        }
    }

    #[test]
    fn test_build_run_config() {
        let dir = TempDir::new().unwrap();
        let args = args(
            dir.path().to_path_buf(),
            Some(dir.path().to_path_buf()),
            Some(dir.path().to_path_buf()),
        );

        let (run, tmdb) = build_run_config(&args, &Config::default(), Some("key".into())).unwrap();
        assert_eq!(run.mode, TransferMode::Link);
        assert_eq!(run.extensions, vec!["mkv"]);
        assert_eq!(tmdb.api_key, "key");
        assert_eq!(tmdb.language, "en-US");
    }

    #[test]
    fn test_missing_api_key() {
        let dir = TempDir::new().unwrap();
        let args = args(
            dir.path().to_path_buf(),
            Some(dir.path().to_path_buf()),
            Some(dir.path().to_path_buf()),
        );
        assert!(matches!(
            build_run_config(&args, &Config::default(), None),
            Err(crate::Error::TmdbApiKeyMissing)
        ));
    }

    #[test]
    fn test_missing_destination() {
        let dir = TempDir::new().unwrap();
        let args = args(
            dir.path().to_path_buf(),
            Some(dir.path().join("nope")),
            Some(dir.path().to_path_buf()),
        );
        assert!(matches!(
            build_run_config(&args, &Config::default(), Some("key".into())),
            Err(crate::Error::PathNotFound(_))
        ));

        let args = args_without_series(dir.path().to_path_buf());
        assert!(build_run_config(&args, &Config::default(), Some("key".into())).is_err());
    }

    fn args_without_series(dir: PathBuf) -> RunArgs {
        args(dir.clone(), Some(dir), None)
    }
}

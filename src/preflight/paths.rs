//! Library path preflight check.

use super::CheckResult;
use crate::models::config::RunConfig;

/// Check that the incoming and library directories are usable.
pub fn check(config: &RunConfig) -> CheckResult {
    let dirs = [
        ("incoming", &config.incoming),
        ("movies", &config.movies_dir),
        ("series", &config.series_dir),
    ];

    for (label, dir) in dirs {
        if let Err(e) = crate::utils::fs::ensure_directory(dir) {
            return CheckResult::failed(
                "Directories",
                format!("{} directory: {}", label, e),
                "Create the directory or pass a different path",
            );
        }
        let readonly = std::fs::metadata(dir)
            .map(|m| m.permissions().readonly())
            .unwrap_or(true);
        if readonly && !config.dry_run {
            return CheckResult::failed(
                "Directories",
                format!("{} directory is read-only: {}", label, dir.display()),
                "Fix permissions or use --dry-run",
            );
        }
    }

    CheckResult::passed("Directories", "incoming and library directories are writable")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::TransferMode;
    use crate::preflight::CheckOutcome;
    use std::path::PathBuf;

    fn config(root: PathBuf, series: PathBuf) -> RunConfig {
        RunConfig {
            incoming: root.clone(),
            movies_dir: root,
            series_dir: series,
            extensions: vec!["mkv".to_string()],
            mode: TransferMode::Move,
            keep_file_episode_title: false,
            dry_run: false,
        }
    }

    #[test]
    fn test_paths_check() {
        let dir = tempfile::TempDir::new().unwrap();
        let ok = check(&config(dir.path().to_path_buf(), dir.path().to_path_buf()));
        assert!(ok.is_ok());

        let missing = check(&config(dir.path().to_path_buf(), dir.path().join("missing")));
        match missing.outcome {
            CheckOutcome::Failed { reason, .. } => assert!(reason.contains("series")),
            other => panic!("expected failure, got {:?}", other),
        }
    }
}

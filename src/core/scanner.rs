//! Incoming directory scanner.
//!
//! Lists the video files waiting in the incoming directory and finds the
//! sidecar files that travel with each of them.

use crate::core::normalizer::normalize_os;
use crate::generators::sidecar::{match_sidecar, SidecarKind};
use crate::models::media::RawItem;
use crate::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A sidecar file found next to a primary video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sidecar {
    pub path: PathBuf,
    pub kind: SidecarKind,
    /// Name part following the primary's base name, e.g. `.en.srt`.
    pub suffix: String,
}

/// Check if a file name is hidden or marked as a sample.
///
/// A sample is `sample.<ext>` or carries a `.sample`/`-sample` marker right
/// before the extension; titles that merely contain the word are kept.
fn is_ignored_filename(filename: &str) -> bool {
    let lower = filename.to_lowercase();
    if lower.starts_with('.') || lower.ends_with(".part") {
        return true;
    }

    let stem = lower.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(&lower);
    stem == "sample" || stem.ends_with(".sample") || stem.ends_with("-sample")
}

/// List video files directly inside `incoming`, sorted by file name.
pub fn scan_incoming(incoming: &Path, extensions: &[String]) -> Result<Vec<RawItem>> {
    crate::utils::fs::ensure_directory(incoming)?;

    let mut items: Vec<RawItem> = WalkDir::new(incoming)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            crate::utils::fs::get_extension(e.path())
                .map(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(&ext)))
                .unwrap_or(false)
        })
        .map(|e| RawItem {
            filename: normalize_os(e.file_name()),
            path: e.into_path(),
        })
        .filter(|item| {
            let ignored = is_ignored_filename(&item.filename);
            if ignored {
                tracing::debug!("Ignoring {}", item.filename);
            }
            !ignored
        })
        .collect();

    items.sort_by(|a, b| a.filename.cmp(&b.filename));
    tracing::info!("Found {} video files in {}", items.len(), incoming.display());
    Ok(items)
}

/// Find sidecars of `primary` in its directory, sorted by file name.
pub fn find_sidecars(primary: &Path) -> Vec<Sidecar> {
    let Some(dir) = primary.parent() else {
        return Vec::new();
    };
    let Some(stem) = primary.file_stem().map(normalize_os) else {
        return Vec::new();
    };

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("Could not read {} for sidecars: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut sidecars: Vec<Sidecar> = entries
        .flatten()
        .filter(|entry| entry.path() != primary)
        .filter_map(|entry| {
            let name = normalize_os(&entry.file_name());
            let (kind, suffix) = match_sidecar(&stem, &name)?;
            // Only trickplay data comes as a directory.
            if entry.path().is_dir() && kind != SidecarKind::Trickplay {
                return None;
            }
            Some(Sidecar {
                kind,
                suffix: suffix.to_string(),
                path: entry.path(),
            })
        })
        .collect();

    sidecars.sort_by(|a, b| a.path.cmp(&b.path));
    sidecars
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_ignored_filename() {
        assert!(is_ignored_filename(".hidden.mkv"));
        assert!(is_ignored_filename("movie.sample.mkv"));
        assert!(is_ignored_filename("movie.mkv.part"));
        assert!(is_ignored_filename("Heat (1995)-SAMPLE.mkv"));
        assert!(is_ignored_filename("sample.mkv"));
        assert!(!is_ignored_filename("The Sampler (2020).mkv"));
        assert!(!is_ignored_filename("Free Samples (2012).mkv"));
        assert!(!is_ignored_filename("The Sample Man (1999).mkv"));
        assert!(!is_ignored_filename("movie.mkv"));
    }

    // Integration tests for scan_incoming() and find_sidecars() live in tests/scanner_tests.rs
}

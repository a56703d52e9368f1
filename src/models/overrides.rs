//! Series override table.
//!
//! Maps known show titles to fixed TMDB ids so that shows with ambiguous or
//! unsearchable names resolve without a `[tmdbid-N]` tag on every file.

use crate::core::normalizer::simplify;
use crate::Result;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// File name of the override table inside the incoming directory.
pub const OVERRIDES_FILE: &str = "series_ids.json";

/// One entry of the on-disk table.
#[derive(Debug, Deserialize)]
struct OverrideEntry {
    tmdbid: Option<String>,
}

/// Read-only lookup from simplified show title to TMDB id.
#[derive(Debug, Clone, Default)]
pub struct SeriesOverrides {
    ids: HashMap<String, u64>,
}

impl SeriesOverrides {
    /// Load the table from the incoming directory. A missing file is an
    /// empty table; an unreadable or malformed one is an error.
    pub fn load(incoming: &Path) -> Result<Self> {
        let path = incoming.join(OVERRIDES_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let table = Self::from_json(&content)
            .map_err(|e| crate::Error::InvalidOverrides(format!("{}: {}", path.display(), e)))?;
        tracing::info!("Loaded {} series overrides from {}", table.len(), path.display());
        Ok(table)
    }

    /// Parse the table from JSON text.
    pub fn from_json(content: &str) -> std::result::Result<Self, serde_json::Error> {
        let raw: HashMap<String, OverrideEntry> = serde_json::from_str(content)?;
        let mut ids = HashMap::new();

        for (title, entry) in raw {
            let Some(id) = entry.tmdbid else { continue };
            match id.trim().parse::<u64>() {
                Ok(id) => {
                    ids.insert(simplify(&title), id);
                }
                Err(_) => tracing::warn!("Ignoring override for '{}': bad tmdbid '{}'", title, id),
            }
        }

        Ok(Self { ids })
    }

    /// Look up a show title (any spelling that simplifies to the same key).
    pub fn get(&self, title: &str) -> Option<u64> {
        self.ids.get(&simplify(title)).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let table = SeriesOverrides::from_json(
            r#"{
                "The Office (US)": {"tmdbid": "2316"},
                "Broken": {"tmdbid": "abc"},
                "No Id": {}
            }"#,
        )
        .unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("the office us"), Some(2316));
        assert_eq!(table.get("The.Office.(US)"), Some(2316));
        assert_eq!(table.get("Broken"), None);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let table = SeriesOverrides::load(dir.path()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_load_invalid_json_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join(OVERRIDES_FILE), "{not json").unwrap();
        assert!(matches!(
            SeriesOverrides::load(dir.path()),
            Err(crate::Error::InvalidOverrides(_))
        ));
    }
}

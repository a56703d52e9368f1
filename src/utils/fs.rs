//! File system utilities.

use crate::utils::hash::sha256_file;
use crate::Result;
use std::collections::HashSet;
use std::path::Path;
use walkdir::WalkDir;

/// Device and inode of a file; equal identities mean the same file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileIdentity {
    pub device: u64,
    pub inode: u64,
}

/// Check if a path exists and is a directory.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(crate::Error::NotADirectory(path.display().to_string()));
    }
    Ok(())
}

/// Create a directory and all parent directories.
pub fn create_dir_all(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Move a file or directory from one location to another.
pub fn move_file(from: &Path, to: &Path) -> Result<()> {
    // Try rename first (fast, same filesystem)
    let rename_err = match std::fs::rename(from, to) {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };

    if rename_err.kind() != std::io::ErrorKind::CrossesDevices || from.is_dir() {
        return Err(rename_err.into());
    }

    // Fall back to copy + verify + delete (cross filesystem)
    tracing::debug!("rename failed ({}), copying {} instead", rename_err, from.display());
    if let Err(e) = copy_verified(from, to) {
        let _ = std::fs::remove_file(to);
        return Err(e);
    }
    std::fs::remove_file(from)?;
    Ok(())
}

/// Copy a file and compare checksums of both ends.
fn copy_verified(from: &Path, to: &Path) -> Result<()> {
    std::fs::copy(from, to)?;
    if sha256_file(from)? != sha256_file(to)? {
        return Err(crate::Error::ChecksumMismatch(to.display().to_string()));
    }
    Ok(())
}

/// Hard-link a file, or recreate a directory and hard-link every file in it.
pub fn link_file(from: &Path, to: &Path) -> Result<()> {
    if !from.is_dir() {
        std::fs::hard_link(from, to)?;
        return Ok(());
    }

    for entry in WalkDir::new(from).follow_links(false) {
        let entry = entry.map_err(|e| std::io::Error::other(e.to_string()))?;
        let relative = entry.path().strip_prefix(from).unwrap_or(entry.path());
        let target = to.join(relative);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
        } else {
            std::fs::hard_link(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Identity of a file, if the platform exposes one.
#[cfg(unix)]
pub fn file_identity(path: &Path) -> Option<FileIdentity> {
    use std::os::unix::fs::MetadataExt;

    let metadata = std::fs::metadata(path).ok()?;
    Some(FileIdentity {
        device: metadata.dev(),
        inode: metadata.ino(),
    })
}

#[cfg(not(unix))]
pub fn file_identity(_path: &Path) -> Option<FileIdentity> {
    None
}

/// Number of hard links pointing at a file.
#[cfg(unix)]
pub fn link_count(path: &Path) -> u64 {
    use std::os::unix::fs::MetadataExt;

    std::fs::metadata(path).map(|m| m.nlink()).unwrap_or(1)
}

#[cfg(not(unix))]
pub fn link_count(_path: &Path) -> u64 {
    1
}

/// Whether two paths are the same file.
pub fn same_file(a: &Path, b: &Path) -> bool {
    match (file_identity(a), file_identity(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Identities of every regular file below the given roots.
pub fn collect_identities(roots: &[&Path]) -> HashSet<FileIdentity> {
    let mut identities = HashSet::new();

    for root in roots {
        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            if let Some(identity) = file_identity(entry.path()) {
                identities.insert(identity);
            }
        }
    }

    tracing::debug!("Indexed {} files in destination trees", identities.len());
    identities
}

/// Get file extension in lowercase.
pub fn get_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_get_extension() {
        assert_eq!(get_extension(&PathBuf::from("movie.MKV")), Some("mkv".to_string()));
        assert_eq!(get_extension(&PathBuf::from("movie")), None);
    }

    #[test]
    fn test_ensure_directory() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("f.txt");
        std::fs::write(&file, "x").unwrap();

        assert!(ensure_directory(dir.path()).is_ok());
        assert!(matches!(ensure_directory(&file), Err(crate::Error::NotADirectory(_))));
        assert!(matches!(
            ensure_directory(&dir.path().join("missing")),
            Err(crate::Error::PathNotFound(_))
        ));
    }

    #[test]
    fn test_move_file() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("a.mkv");
        let to = dir.path().join("b.mkv");
        std::fs::write(&from, "video").unwrap();

        move_file(&from, &to).unwrap();
        assert!(!from.exists());
        assert_eq!(std::fs::read_to_string(&to).unwrap(), "video");
    }

    #[test]
    fn test_move_file_failed_rename_does_not_copy() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("a.mkv");
        let to = dir.path().join("missing").join("b.mkv");
        std::fs::write(&from, "video").unwrap();

        assert!(matches!(move_file(&from, &to), Err(crate::Error::Io(_))));
        assert!(from.exists());
        assert!(!to.exists());
    }

    #[test]
    fn test_copy_verified() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("a.mkv");
        let to = dir.path().join("b.mkv");
        std::fs::write(&from, "video").unwrap();

        copy_verified(&from, &to).unwrap();
        assert_eq!(std::fs::read_to_string(&to).unwrap(), "video");
        assert!(from.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_link_file_and_identity() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("a.mkv");
        let to = dir.path().join("b.mkv");
        std::fs::write(&from, "video").unwrap();

        link_file(&from, &to).unwrap();
        assert!(from.exists());
        assert!(same_file(&from, &to));
        assert_eq!(link_count(&from), 2);

        let identities = collect_identities(&[dir.path()]);
        assert_eq!(identities.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_link_directory() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("a.trickplay");
        std::fs::create_dir_all(from.join("320")).unwrap();
        std::fs::write(from.join("320").join("0.jpg"), "img").unwrap();

        let to = dir.path().join("b.trickplay");
        link_file(&from, &to).unwrap();
        assert!(same_file(&from.join("320").join("0.jpg"), &to.join("320").join("0.jpg")));
    }
}

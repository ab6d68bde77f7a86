//! Filesystem utilities.
//!
//! Everything here is read-only: listing snapshot directories must never
//! touch the tree it inspects.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::glob;

/// Find files matching glob patterns relative to a base directory.
///
/// Results are sorted and deduplicated so repeated calls agree. A path that
/// cannot be read while walking fails the whole listing.
pub fn glob_files(base: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut results = Vec::new();

    for pattern in patterns {
        let full_pattern = base.join(pattern);
        let pattern_str = full_pattern.to_string_lossy();

        let entries = glob(&pattern_str)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?;
        results.extend(collect_files(entries)?);
    }

    results.sort();
    results.dedup();
    Ok(results)
}

/// Keep the regular files of a directory walk, stopping at the first error.
fn collect_files<E>(entries: impl IntoIterator<Item = Result<PathBuf, E>>) -> Result<Vec<PathBuf>>
where
    E: std::error::Error + Send + Sync + 'static,
{
    let mut files = Vec::new();
    for entry in entries {
        let path = entry.context("failed to read directory entry")?;
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

/// Get the relative path from `base` to `path`.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

/// Render a path with forward slashes, as build definitions expect.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_glob_files_recursive() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("api/foo/1/a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("IFoo.aidl"), "interface IFoo {}").unwrap();
        fs::write(tmp.path().join("api/foo/1/Top.aidl"), "parcelable Top;").unwrap();
        fs::write(tmp.path().join("api/foo/1/readme.txt"), "readme").unwrap();

        let files = glob_files(tmp.path(), &["api/foo/1/**/*.aidl".to_string()]).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_glob_files_invalid_pattern() {
        let tmp = TempDir::new().unwrap();
        let err = glob_files(tmp.path(), &["api/[".to_string()]).unwrap_err();
        assert!(format!("{:#}", err).contains("invalid glob pattern: api/["));
    }

    #[test]
    fn test_unreadable_entry_fails_listing() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("IFoo.aidl");
        fs::write(&file, "interface IFoo {}").unwrap();

        let entries = vec![
            Ok(file),
            Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "permission denied",
            )),
        ];
        let err = collect_files(entries).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("failed to read directory entry"));
        assert!(message.contains("permission denied"));
    }

    #[test]
    fn test_relative_and_slash() {
        let rel = relative_path(Path::new("/src/foo"), Path::new("/src/foo/api/1/IFoo.aidl"));
        assert_eq!(to_slash(&rel), "api/1/IFoo.aidl");
    }
}

//! Filesystem helpers.

use crate::error::CoreError;
use std::fs;
use std::path::Path;

/// Ensures that a directory exists at the given path, creating it (and any
/// missing parents) when absent.
///
/// # Errors
///
/// Returns [`CoreError::Filesystem`] when the path exists but is not a
/// directory, or when creation fails.
pub fn ensure_dir_exists(path: &Path) -> Result<(), CoreError> {
    if path.exists() {
        if path.is_dir() {
            Ok(())
        } else {
            Err(CoreError::Filesystem {
                message: "path exists but is not a directory".to_string(),
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::AlreadyExists,
                    "path exists but is not a directory",
                ),
            })
        }
    } else {
        fs::create_dir_all(path).map_err(|source| CoreError::Filesystem {
            message: "failed to create directory".to_string(),
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_missing_nested_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a/b/c");
        ensure_dir_exists(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn existing_directory_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        ensure_dir_exists(temp_dir.path()).unwrap();
    }

    #[test]
    fn file_in_place_of_directory_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("occupied");
        fs::write(&file_path, b"x").unwrap();
        let result = ensure_dir_exists(&file_path);
        assert!(matches!(result, Err(CoreError::Filesystem { .. })));
    }
}

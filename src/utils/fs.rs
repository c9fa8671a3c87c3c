//! File system utilities.

use crate::Result;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

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

/// Validate a directory argument and return its absolute form.
pub fn absolute_directory(path: &Path) -> Result<PathBuf> {
    ensure_directory(path)?;
    Ok(std::fs::canonicalize(path)?)
}

/// Get file extension in lowercase.
pub fn get_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Check a file extension, ignoring case and a leading dot in `expected`.
pub fn has_extension(path: &Path, expected: &str) -> bool {
    let expected = expected.trim_start_matches('.').to_lowercase();
    get_extension(path)
        .map(|ext| ext == expected)
        .unwrap_or(false)
}

/// Check if a file name starts with a dot.
pub fn is_hidden(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

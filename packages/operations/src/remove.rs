//! Entry removal.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::Path;

use crate::error::OperationError;

/// Remove a file, symlink or directory tree.
///
/// Symlinks are removed themselves; their targets are left alone.
///
/// # Errors
///
/// * If `path` does not exist
/// * If removal fails
pub fn remove_path(path: &Path) -> Result<(), OperationError> {
    log::debug!("Removing {}", path.display());

    let metadata =
        fs::symlink_metadata(path).map_err(|_| OperationError::MissingSource(path.to_path_buf()))?;

    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };

    result.map_err(|e| OperationError::IoError {
        path: path.to_path_buf(),
        source: e,
    })
}

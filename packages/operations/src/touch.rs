//! Creating new, empty entries.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs::{self, OpenOptions};
use std::path::Path;

use crate::OperationResult;
use crate::error::OperationError;

/// Create an empty file, or a directory when `is_dir` is set.
///
/// Anything already at `path` is left untouched.
///
/// # Errors
///
/// * If parent directories cannot be created
/// * If the file or directory cannot be created
pub fn touch(path: &Path, is_dir: bool) -> Result<OperationResult, OperationError> {
    if fs::symlink_metadata(path).is_ok() {
        log::debug!("Already exists: {}", path.display());
        return Ok(OperationResult::Exists);
    }

    let to_error = |e| OperationError::IoError {
        path: path.to_path_buf(),
        source: e,
    };

    if is_dir {
        log::debug!("Creating directory {}", path.display());
        fs::create_dir_all(path).map_err(to_error)?;
        return Ok(OperationResult::Created);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| OperationError::IoError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    log::debug!("Creating file {}", path.display());
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(to_error)?;

    Ok(OperationResult::Created)
}

//! Archiving entries into the trash directory.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::{Path, PathBuf};

use crate::copy::copy_path;
use crate::error::OperationError;

/// Pick a free name in `trash_dir` for `path`: the file name itself, then
/// `name~1`, `name~2`, and so on.
#[must_use]
pub fn unique_trash_path(trash_dir: &Path, path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map_or_else(|| "unnamed".to_string(), |n| n.to_string_lossy().into_owned());

    let mut candidate = trash_dir.join(&name);
    let mut counter = 1u32;
    while fs::symlink_metadata(&candidate).is_ok() {
        candidate = trash_dir.join(format!("{name}~{counter}"));
        counter += 1;
    }
    candidate
}

/// Copy `path` into the trash, leaving the original in place.
///
/// # Returns
///
/// Where the archived copy was written.
///
/// # Errors
///
/// * If the trash directory cannot be created
/// * If the copy fails
pub fn trash_copy(path: &Path, trash_dir: &Path) -> Result<PathBuf, OperationError> {
    fs::create_dir_all(trash_dir).map_err(|e| OperationError::IoError {
        path: trash_dir.to_path_buf(),
        source: e,
    })?;

    let destination = unique_trash_path(trash_dir, path);
    copy_path(path, &destination)?;

    log::info!("Archived {} to {}", path.display(), destination.display());

    Ok(destination)
}

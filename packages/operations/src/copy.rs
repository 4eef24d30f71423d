//! File, directory and symlink copying.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::error::OperationError;
use crate::remove::remove_path;

/// Entry collected during directory enumeration.
#[derive(Debug, Clone)]
struct FileEntry {
    /// Source path.
    source: PathBuf,
    /// Target path.
    target: PathBuf,
    /// Whether this is a symlink.
    is_symlink: bool,
}

/// Copy `source` to `target`, replacing whatever is at `target`.
///
/// Files are reflinked where the filesystem supports it. Directories are
/// copied recursively in parallel. Symlinks are recreated, not followed.
///
/// # Arguments
///
/// * `source` - Path to copy from
/// * `target` - Path to copy to
///
/// # Returns
///
/// Number of files copied.
///
/// # Errors
///
/// * If `source` does not exist
/// * If an existing `target` cannot be removed
/// * If any copy fails (fail-fast)
pub fn copy_path(source: &Path, target: &Path) -> Result<u64, OperationError> {
    log::debug!("Copying {} -> {}", source.display(), target.display());

    let metadata = fs::symlink_metadata(source)
        .map_err(|_| OperationError::MissingSource(source.to_path_buf()))?;

    if fs::symlink_metadata(target).is_ok() {
        log::debug!("Replacing existing {}", target.display());
        remove_path(target)?;
    }

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| OperationError::IoError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    if metadata.is_symlink() {
        copy_symlink(source, target)?;
        Ok(1)
    } else if metadata.is_dir() {
        copy_directory(source, target)
    } else {
        copy_file_with_reflink(source, target)?;
        Ok(1)
    }
}

/// Copy a directory with parallel enumeration and copying.
fn copy_directory(source: &Path, target: &Path) -> Result<u64, OperationError> {
    // Phase 1: Enumerate everything using jwalk (parallel)
    let (dirs, entries) = enumerate_directory(source, target)?;
    let total_files = entries.len() as u64;

    log::debug!("Found {total_files} files to copy");

    // Phase 2: Create every directory, including empty ones
    for dir in &dirs {
        fs::create_dir_all(dir).map_err(|e| OperationError::IoError {
            path: dir.clone(),
            source: e,
        })?;
    }

    // Phase 3: Copy files in parallel using rayon
    entries
        .par_iter()
        .try_for_each(|entry| -> Result<(), OperationError> {
            if entry.is_symlink {
                copy_symlink(&entry.source, &entry.target)
            } else {
                copy_file_with_reflink(&entry.source, &entry.target)
            }
        })?;

    Ok(total_files)
}

/// Enumerate a directory tree, returning target directories and file entries.
fn enumerate_directory(
    source: &Path,
    target: &Path,
) -> Result<(BTreeSet<PathBuf>, Vec<FileEntry>), OperationError> {
    let mut dirs = BTreeSet::new();
    let mut entries = Vec::new();

    for entry in jwalk::WalkDir::new(source)
        .skip_hidden(false)
        .follow_links(false)
    {
        let entry = entry.map_err(|e| OperationError::EnumerationError {
            path: source.to_path_buf(),
            message: e.to_string(),
        })?;

        let source_path = entry.path();
        let rel_path =
            source_path
                .strip_prefix(source)
                .map_err(|_| OperationError::EnumerationError {
                    path: source_path.clone(),
                    message: "Failed to strip prefix".to_string(),
                })?;
        let target_path = target.join(rel_path);

        let file_type = entry.file_type();
        if file_type.is_dir() {
            dirs.insert(target_path);
        } else {
            entries.push(FileEntry {
                source: source_path.clone(),
                target: target_path,
                is_symlink: file_type.is_symlink(),
            });
        }
    }

    Ok((dirs, entries))
}

/// Copy a single file, trying reflink first then falling back to regular copy.
fn copy_file_with_reflink(source: &Path, target: &Path) -> Result<(), OperationError> {
    // Try reflink first (copy-on-write, instant on APFS/Btrfs/ReFS)
    if reflink_copy::reflink(source, target).is_ok() {
        log::trace!("Reflinked {} -> {}", source.display(), target.display());
        return Ok(());
    }

    fs::copy(source, target).map_err(|e| OperationError::CopyError {
        from: source.to_path_buf(),
        to: target.to_path_buf(),
        source: e,
    })?;
    log::trace!("Copied {} -> {}", source.display(), target.display());
    Ok(())
}

/// Copy a symlink, preserving it as a symlink.
fn copy_symlink(source: &Path, target: &Path) -> Result<(), OperationError> {
    let link_target = fs::read_link(source).map_err(|e| OperationError::IoError {
        path: source.to_path_buf(),
        source: e,
    })?;

    let to_error = |e| OperationError::SymlinkError {
        from: source.to_path_buf(),
        to: target.to_path_buf(),
        source: e,
    };

    #[cfg(unix)]
    std::os::unix::fs::symlink(&link_target, target).map_err(to_error)?;

    #[cfg(windows)]
    {
        // On Windows, we need to determine if it's a file or directory symlink
        let resolved = source.parent().map_or_else(|| link_target.clone(), |p| p.join(&link_target));
        if resolved.is_dir() {
            std::os::windows::fs::symlink_dir(&link_target, target).map_err(to_error)?;
        } else {
            std::os::windows::fs::symlink_file(&link_target, target).map_err(to_error)?;
        }
    }

    log::trace!(
        "Symlinked {} -> {} (target: {})",
        source.display(),
        target.display(),
        link_target.display()
    );

    Ok(())
}

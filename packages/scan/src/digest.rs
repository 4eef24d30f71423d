//! Content digests using SHA-256.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use roamer_core::Digest;
use sha2::{Digest as _, Sha256};

use crate::error::ScanError;

/// Shortest digest accepted, in hex characters.
pub const MIN_DIGEST_LENGTH: usize = 8;
/// Longest digest (a full SHA-256), in hex characters.
pub const MAX_DIGEST_LENGTH: usize = 64;
/// Digest length used when none is configured.
pub const DEFAULT_DIGEST_LENGTH: usize = 12;

/// Compute the digest of a file, directory or symlink.
///
/// * Files hash their content
/// * Directories hash their sorted recursive listing and file contents
/// * Symlinks hash their target, without following it
///
/// `length` is clamped to `MIN_DIGEST_LENGTH..=MAX_DIGEST_LENGTH`.
///
/// # Errors
///
/// * If the path or anything under it cannot be read
pub fn digest_path(path: &Path, length: usize) -> Result<Digest, ScanError> {
    let metadata = fs::symlink_metadata(path).map_err(|e| ScanError::ReadFileError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut hasher = Sha256::new();
    if metadata.is_symlink() {
        hash_symlink(path, &mut hasher)?;
    } else if metadata.is_dir() {
        hash_directory(path, &mut hasher)?;
    } else {
        hash_file(path, &mut hasher)?;
    }

    let hex = hex::encode(hasher.finalize());
    let length = length.clamp(MIN_DIGEST_LENGTH, MAX_DIGEST_LENGTH);
    Ok(Digest::new(&hex[..length]))
}

fn hash_file(path: &Path, hasher: &mut Sha256) -> Result<(), ScanError> {
    let to_error = |e| ScanError::ReadFileError {
        path: path.to_path_buf(),
        source: e,
    };

    let mut file = File::open(path).map_err(to_error)?;
    let mut buffer = [0u8; 64 * 1024];
    loop {
        let bytes_read = file.read(&mut buffer).map_err(to_error)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    log::trace!("Hashed {}", path.display());
    Ok(())
}

fn hash_symlink(path: &Path, hasher: &mut Sha256) -> Result<(), ScanError> {
    let target = fs::read_link(path).map_err(|e| ScanError::ReadFileError {
        path: path.to_path_buf(),
        source: e,
    })?;
    hasher.update(b"symlink:");
    hasher.update(target.to_string_lossy().as_bytes());
    Ok(())
}

fn hash_directory(path: &Path, hasher: &mut Sha256) -> Result<(), ScanError> {
    // Keeps an empty directory distinct from an empty file.
    hasher.update(b"dir\0");

    // Runs inside the scan's rayon pool, so the walk must not queue work on it.
    for entry in jwalk::WalkDir::new(path)
        .parallelism(jwalk::Parallelism::Serial)
        .skip_hidden(false)
        .follow_links(false)
        .sort(true)
    {
        let entry = entry.map_err(|e| ScanError::EnumerationError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let entry_path = entry.path();
        let Ok(rel_path) = entry_path.strip_prefix(path) else {
            continue;
        };
        if rel_path.as_os_str().is_empty() {
            continue;
        }
        let rel = rel_path.to_string_lossy();

        let file_type = entry.file_type();
        if file_type.is_symlink() {
            hasher.update(b"l:");
            hasher.update(rel.as_bytes());
            hasher.update(b"\0");
            hash_symlink(&entry_path, hasher)?;
        } else if file_type.is_dir() {
            hasher.update(b"d:");
            hasher.update(rel.as_bytes());
            hasher.update(b"\0");
        } else {
            hasher.update(b"f:");
            hasher.update(rel.as_bytes());
            hasher.update(b"\0");
            let mut file_hasher = Sha256::new();
            hash_file(&entry_path, &mut file_hasher)?;
            hasher.update(file_hasher.finalize());
        }
    }

    Ok(())
}

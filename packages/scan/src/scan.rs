//! Directory snapshots with parallel digesting.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use rayon::prelude::*;
use roamer_core::{BaseDir, Digest, DirRole, DirectorySnapshot};

use crate::digest::{DEFAULT_DIGEST_LENGTH, digest_path};
use crate::error::ScanError;

/// Options controlling which entries are scanned and how they are digested.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Include entries whose name starts with `.`.
    pub show_hidden: bool,
    /// Glob patterns matched against entry names; matches are skipped.
    pub ignore: Vec<String>,
    /// Digest length in hex characters.
    pub digest_length: usize,
    /// Number of threads used for digesting.
    pub jobs: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            show_hidden: false,
            ignore: Vec::new(),
            digest_length: DEFAULT_DIGEST_LENGTH,
            jobs: num_cpus::get(),
        }
    }
}

/// Entry collected during enumeration.
#[derive(Debug)]
struct Child {
    /// Name as shown in a listing (directories end with `/`).
    name: String,
    /// Absolute path.
    path: PathBuf,
}

/// Snapshot the immediate entries of `dir`.
///
/// # Arguments
///
/// * `dir` - Directory to scan
/// * `role` - Role recorded on every entry
/// * `options` - Hidden/ignore filtering, digest length and thread count
///
/// # Errors
///
/// * If `dir` is missing or not a directory
/// * If an ignore pattern is invalid
/// * If any entry cannot be digested
pub fn scan_directory(
    dir: &Path,
    role: DirRole,
    options: &ScanOptions,
) -> Result<DirectorySnapshot, ScanError> {
    log::debug!("Scanning {} ({role})", dir.display());

    let metadata = fs::metadata(dir).map_err(|e| ScanError::ReadDirError {
        path: dir.to_path_buf(),
        source: e,
    })?;
    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory(dir.to_path_buf()));
    }

    let ignore = build_ignore_set(&options.ignore)?;
    let children = enumerate_children(dir, options.show_hidden, &ignore)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs)
        .build()?;
    let digested: Vec<(Digest, String)> = pool.install(|| {
        children
            .into_par_iter()
            .map(|child| {
                digest_path(&child.path, options.digest_length).map(|digest| (digest, child.name))
            })
            .collect::<Result<_, _>>()
    })?;

    let mut snapshot = DirectorySnapshot::new(BaseDir::new(role, dir));
    for (digest, name) in digested {
        snapshot.insert(Some(digest), name)?;
    }

    log::debug!("Found {} entries in {}", snapshot.len(), dir.display());

    Ok(snapshot)
}

fn build_ignore_set(patterns: &[String]) -> Result<GlobSet, ScanError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| ScanError::InvalidPattern {
            pattern: pattern.clone(),
            source: e,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| ScanError::InvalidPattern {
        pattern: patterns.join(", "),
        source: e,
    })
}

/// List the immediate children of `dir`, sorted by name.
fn enumerate_children(
    dir: &Path,
    show_hidden: bool,
    ignore: &GlobSet,
) -> Result<Vec<Child>, ScanError> {
    let mut children = Vec::new();

    for entry in jwalk::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .skip_hidden(!show_hidden)
        .follow_links(false)
        .sort(true)
    {
        let entry = entry.map_err(|e| ScanError::EnumerationError {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;

        let file_name = entry.file_name();
        let Some(name) = file_name.to_str() else {
            log::warn!("Skipping non UTF-8 name in {}: {:?}", dir.display(), file_name);
            continue;
        };

        if ignore.is_match(name) {
            log::trace!("Ignoring {name}");
            continue;
        }

        let name = if entry.file_type().is_dir() {
            format!("{name}/")
        } else {
            name.to_string()
        };

        children.push(Child {
            name,
            path: entry.path(),
        });
    }

    Ok(children)
}

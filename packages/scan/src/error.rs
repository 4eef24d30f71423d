//! Error types for scanning.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while scanning a directory.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Failed to read a directory.
    #[error("Failed to read directory {}: {source}", path.display())]
    ReadDirError {
        /// The directory path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The scanned path is not a directory.
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Failed to read a file or link while digesting it.
    #[error("Failed to read {}: {source}", path.display())]
    ReadFileError {
        /// The file path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Directory enumeration failed.
    #[error("Failed to enumerate directory {}: {message}", path.display())]
    EnumerationError {
        /// The directory path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// An ignore pattern is not a valid glob.
    #[error("Invalid ignore pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The pattern as configured.
        pattern: String,
        /// The underlying glob error.
        #[source]
        source: globset::Error,
    },

    /// The digest thread pool could not be started.
    #[error("Failed to start digest thread pool: {0}")]
    ThreadPoolError(#[from] rayon::ThreadPoolBuildError),

    /// Two entries with the same name were found.
    #[error("Snapshot error: {0}")]
    SnapshotError(#[from] roamer_core::SnapshotError),
}

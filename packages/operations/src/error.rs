//! Error types for file operations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during file operations.
#[derive(Debug, Error)]
pub enum OperationError {
    /// IO error during file operation.
    #[error("IO error at {}: {source}", path.display())]
    IoError {
        /// Path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to copy file.
    #[error("Failed to copy from {} to {}: {source}", from.display(), to.display())]
    CopyError {
        /// Source path.
        from: PathBuf,
        /// Target path.
        to: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to recreate a symlink.
    #[error("Failed to create symlink from {} to {}: {source}", from.display(), to.display())]
    SymlinkError {
        /// Source symlink path.
        from: PathBuf,
        /// Target path.
        to: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The entry a command operates on does not exist.
    #[error("No such file or directory: {}", .0.display())]
    MissingSource(PathBuf),

    /// Directory enumeration failed.
    #[error("Failed to enumerate directory {}: {message}", path.display())]
    EnumerationError {
        /// The directory path.
        path: PathBuf,
        /// Error message.
        message: String,
    },
}

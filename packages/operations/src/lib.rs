//! Filesystem command execution for roamer.
//!
//! This crate carries out the commands compiled by `roamer_core`:
//!
//! * `cp` - copy files, directories and symlinks (reflink when possible)
//! * `roamer-trash-copy` - archive an entry into the trash directory
//! * `rm` - delete an entry
//! * `touch` - create an empty file or directory
//!
//! # Example
//!
//! ```rust,ignore
//! use roamer_operations::FsExecutor;
//!
//! let mut executor = FsExecutor::new(trash_dir);
//! for result in engine.run_commands(&mut executor)? {
//!     println!("{result}");
//! }
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod copy;
mod error;
mod executor;
mod remove;
mod touch;
mod trash;

use std::path::PathBuf;

pub use copy::copy_path;
pub use error::OperationError;
pub use executor::FsExecutor;
pub use remove::remove_path;
pub use touch::touch;
pub use trash::{trash_copy, unique_trash_path};

/// Result of a single command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    /// Content was copied to a free name.
    Copied,
    /// Content replaced an existing entry, which was archived first.
    Overwritten {
        /// Where the replaced entry was archived.
        archived: PathBuf,
    },
    /// The entry was archived into the trash.
    Trashed(PathBuf),
    /// The entry was deleted.
    Removed,
    /// A new entry was created.
    Created,
    /// The entry to create already existed and was left alone.
    Exists,
}

impl std::fmt::Display for OperationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Copied => write!(f, "copied"),
            Self::Overwritten { archived } => {
                write!(f, "overwritten (previous saved to {})", archived.display())
            }
            Self::Trashed(path) => write!(f, "trashed to {}", path.display()),
            Self::Removed => write!(f, "removed"),
            Self::Created => write!(f, "created"),
            Self::Exists => write!(f, "exists"),
        }
    }
}

//! Error types for the reconciliation engine.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error;

use crate::entry::Digest;

/// Errors that can occur while compiling a command plan.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A digest in the edit snapshot is unknown to the original directory,
    /// the record and the trash.
    #[error("digest {digest} not found")]
    UnresolvedDigest {
        /// The digest that could not be resolved.
        digest: Digest,
    },

    /// The record could not be loaded.
    #[error("Failed to load record: {source}")]
    RecordLoad {
        /// The underlying error from the record source.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Errors that can occur while building a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The same name was inserted twice.
    #[error("Duplicate entry name: {name}")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },
}

/// Errors that can occur while parsing an edit listing.
#[derive(Debug, Error)]
pub enum ListingError {
    /// A name is empty, absolute or escapes the directory.
    #[error("Line {line}: invalid name {name:?}")]
    InvalidName {
        /// 1-based line number.
        line: usize,
        /// The offending name.
        name: String,
    },

    /// A digest contains whitespace or `|`.
    #[error("Line {line}: invalid digest {digest:?}")]
    InvalidDigest {
        /// 1-based line number.
        line: usize,
        /// The offending digest.
        digest: String,
    },

    /// The same name appears on two lines.
    #[error("Line {line}: duplicate name {name:?}")]
    DuplicateName {
        /// 1-based line number of the second occurrence.
        line: usize,
        /// The repeated name.
        name: String,
    },
}

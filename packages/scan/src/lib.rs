//! Directory scanning for roamer.
//!
//! This crate builds the inputs the reconciliation engine compares:
//!
//! * Content digests for files, directories and symlinks (SHA-256, hex)
//! * Snapshots of a directory's immediate entries, digested in parallel
//! * A record source indexing archive directories and the trash
//!
//! # Example
//!
//! ```rust,ignore
//! use roamer_core::DirRole;
//! use roamer_scan::{ScanOptions, scan_directory};
//!
//! let options = ScanOptions::default();
//! let snapshot = scan_directory(&dir, DirRole::Original, &options)?;
//! println!("{} entries", snapshot.len());
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod digest;
mod error;
mod record;
mod scan;

pub use digest::{DEFAULT_DIGEST_LENGTH, MAX_DIGEST_LENGTH, MIN_DIGEST_LENGTH, digest_path};
pub use error::ScanError;
pub use record::ArchiveRecordSource;
pub use scan::{ScanOptions, scan_directory};

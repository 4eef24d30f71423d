//! Record source backed by archive directories and the trash.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use roamer_core::{Digest, DirRole, DirectorySnapshot, Entry, Record, RecordSource};

use crate::error::ScanError;
use crate::scan::{ScanOptions, scan_directory};

/// Indexes every archive root and the trash directory when loaded.
///
/// Nothing is scanned until [`RecordSource::load`] is called. Roots that do not
/// exist are skipped.
#[derive(Debug, Clone)]
pub struct ArchiveRecordSource {
    /// Directories whose entries make up the record index, in priority order.
    pub archive_roots: Vec<PathBuf>,
    /// Trash directory, if any.
    pub trash_dir: Option<PathBuf>,
    /// Scan options shared with the original directory scan.
    pub options: ScanOptions,
}

impl ArchiveRecordSource {
    /// Create a record source.
    #[must_use]
    pub const fn new(
        archive_roots: Vec<PathBuf>,
        trash_dir: Option<PathBuf>,
        options: ScanOptions,
    ) -> Self {
        Self {
            archive_roots,
            trash_dir,
            options,
        }
    }
}

impl RecordSource for ArchiveRecordSource {
    type Error = ScanError;

    fn load(&self) -> Result<Record, Self::Error> {
        let mut record = Record::new();

        for root in &self.archive_roots {
            if !root.is_dir() {
                log::debug!("Skipping missing archive root {}", root.display());
                continue;
            }
            let snapshot = scan_directory(root, DirRole::Record, &self.options)?;
            for_each_digested(&snapshot, |digest, entry| record.insert_entry(digest, entry));
        }

        if let Some(trash_dir) = self.trash_dir.as_ref().filter(|dir| dir.is_dir()) {
            let options = ScanOptions {
                show_hidden: true,
                ..self.options.clone()
            };
            let snapshot = scan_directory(trash_dir, DirRole::Trash, &options)?;
            for_each_digested(&snapshot, |digest, entry| {
                record.insert_trash_entry(digest, entry);
            });
        }

        log::debug!(
            "Loaded record with {} archive and {} trash digests",
            record.entries().len(),
            record.trash_entries().len()
        );

        Ok(record)
    }
}

fn for_each_digested(
    snapshot: &DirectorySnapshot,
    mut f: impl FnMut(Digest, Entry),
) {
    for (digest, entries) in snapshot.entries() {
        let Some(digest) = digest else {
            continue;
        };
        for entry in entries {
            f(digest.clone(), entry.clone());
        }
    }
}

//! Record: a digest index over the whole archive and the trash.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::convert::Infallible;

use crate::entry::{Digest, Entry};

/// A populated digest index used to resolve digests the original directory
/// does not know about.
///
/// The first entry inserted for a digest wins.
#[derive(Debug, Clone, Default)]
pub struct Record {
    entries: BTreeMap<Digest, Entry>,
    trash_entries: BTreeMap<Digest, Entry>,
}

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index an archive entry.
    pub fn insert_entry(&mut self, digest: Digest, entry: Entry) {
        self.entries.entry(digest).or_insert(entry);
    }

    /// Index a trash entry.
    pub fn insert_trash_entry(&mut self, digest: Digest, entry: Entry) {
        self.trash_entries.entry(digest).or_insert(entry);
    }

    /// Archive index.
    #[must_use]
    pub const fn entries(&self) -> &BTreeMap<Digest, Entry> {
        &self.entries
    }

    /// Trash index.
    #[must_use]
    pub const fn trash_entries(&self) -> &BTreeMap<Digest, Entry> {
        &self.trash_entries
    }

    /// Resolve a digest, checking the archive before the trash.
    #[must_use]
    pub fn resolve(&self, digest: &Digest) -> Option<&Entry> {
        self.entries
            .get(digest)
            .or_else(|| self.trash_entries.get(digest))
    }
}

/// An unpopulated record. Loading it produces a [`Record`].
///
/// The engine loads a source at most once per compile, and only when the edit
/// snapshot references digests the original directory lacks.
pub trait RecordSource {
    /// Error produced while loading.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Populate the record.
    ///
    /// # Errors
    ///
    /// * If the underlying index cannot be read
    fn load(&self) -> Result<Record, Self::Error>;
}

impl RecordSource for Record {
    type Error = Infallible;

    fn load(&self) -> Result<Record, Self::Error> {
        Ok(self.clone())
    }
}

//! Snapshot: the entries of one directory grouped by digest.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::{BTreeMap, BTreeSet};

use crate::entry::{BaseDir, Digest, Entry};
use crate::error::SnapshotError;

/// A point-in-time listing of named entries within a directory, keyed by digest.
///
/// Several entries may share a digest (duplicate content under several names),
/// but a path appears at most once, so `notes` and `notes/` cannot both be
/// present. Entries without a digest are blank entries
/// newly typed into an edit listing.
#[derive(Debug, Clone)]
pub struct DirectorySnapshot {
    base: BaseDir,
    digested: BTreeMap<Digest, Vec<Entry>>,
    blank: Vec<Entry>,
    names: BTreeSet<String>,
}

impl DirectorySnapshot {
    /// Create an empty snapshot of `base`.
    #[must_use]
    pub const fn new(base: BaseDir) -> Self {
        Self {
            base,
            digested: BTreeMap::new(),
            blank: Vec::new(),
            names: BTreeSet::new(),
        }
    }

    /// Add an entry named `name` under `digest`.
    ///
    /// # Errors
    ///
    /// * If an entry with the same path already exists
    pub fn insert(
        &mut self,
        digest: Option<Digest>,
        name: impl Into<String>,
    ) -> Result<&Entry, SnapshotError> {
        let entry = Entry::new(name, self.base.clone());
        if !self.names.insert(entry.key().to_string()) {
            return Err(SnapshotError::DuplicateName {
                name: entry.name().to_string(),
            });
        }

        let bucket = match digest {
            Some(digest) => self.digested.entry(digest).or_default(),
            None => &mut self.blank,
        };
        bucket.push(entry);

        Ok(&bucket[bucket.len() - 1])
    }

    /// All entries sharing `digest`, or `None` when there are none.
    ///
    /// `find(None)` returns the blank entries.
    #[must_use]
    pub fn find(&self, digest: Option<&Digest>) -> Option<&[Entry]> {
        let entries = match digest {
            Some(digest) => self.digested.get(digest).map(Vec::as_slice),
            None => Some(self.blank.as_slice()),
        }?;
        (!entries.is_empty()).then_some(entries)
    }

    /// Whether any entry carries `digest`.
    #[must_use]
    pub fn contains_digest(&self, digest: &Digest) -> bool {
        self.digested.contains_key(digest)
    }

    /// Iterate over every digest, in order.
    pub fn digests(&self) -> impl Iterator<Item = &Digest> {
        self.digested.keys()
    }

    /// Iterate over every group of entries, blank entries first.
    pub fn entries(&self) -> impl Iterator<Item = (Option<&Digest>, &[Entry])> {
        let blank = (!self.blank.is_empty()).then_some((None, self.blank.as_slice()));
        blank.into_iter().chain(
            self.digested
                .iter()
                .map(|(digest, entries)| (Some(digest), entries.as_slice())),
        )
    }

    /// The directory this snapshot describes.
    #[must_use]
    pub const fn base(&self) -> &BaseDir {
        &self.base
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

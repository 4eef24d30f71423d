//! Entry and digest value types.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ListingError;

/// A content fingerprint identifying "the same file content" across snapshots.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    /// Create a digest from an already validated token.
    ///
    /// Prefer [`str::parse`] for user-supplied text.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The digest as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Digest {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.chars().any(|c| c.is_whitespace() || c == '|') {
            return Err(ListingError::InvalidDigest {
                line: 0,
                digest: s.to_string(),
            });
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which base directory an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DirRole {
    /// The directory being edited, as it is on disk.
    Original,
    /// The user's edited listing of the original directory.
    Edit,
    /// The archive of every known directory.
    Record,
    /// The trash archive.
    Trash,
}

impl fmt::Display for DirRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original => write!(f, "original"),
            Self::Edit => write!(f, "edit"),
            Self::Record => write!(f, "record"),
            Self::Trash => write!(f, "trash"),
        }
    }
}

/// A base directory together with its role.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct BaseDir {
    /// Role of the directory.
    pub role: DirRole,
    /// Filesystem location of the directory.
    pub path: PathBuf,
}

impl BaseDir {
    /// Create a new base directory.
    #[must_use]
    pub fn new(role: DirRole, path: impl Into<PathBuf>) -> Self {
        Self {
            role,
            path: path.into(),
        }
    }
}

/// One named filesystem object inside a base directory.
///
/// Entries are immutable once built. Directory names end with `/`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Entry {
    name: String,
    base: BaseDir,
}

impl Entry {
    /// Create a new entry.
    #[must_use]
    pub fn new(name: impl Into<String>, base: BaseDir) -> Self {
        Self {
            name: name.into(),
            base,
        }
    }

    /// Name of the entry, relative to its base directory.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The base directory this entry belongs to.
    #[must_use]
    pub const fn base(&self) -> &BaseDir {
        &self.base
    }

    /// Name without the directory marker.
    ///
    /// `notes` and `notes/` share a key because they share a path.
    #[must_use]
    pub fn key(&self) -> &str {
        self.name.trim_end_matches('/')
    }

    /// Whether the entry names a directory.
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.name.ends_with('/')
    }

    /// Absolute location of the entry.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.base.path.join(self.key())
    }

    /// The same name placed inside another base directory.
    #[must_use]
    pub fn rebased(&self, base: &BaseDir) -> Self {
        Self::new(self.name.clone(), base.clone())
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path().display())?;
        if self.is_dir() {
            write!(f, "/")?;
        }
        Ok(())
    }
}

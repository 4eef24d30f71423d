//! Planned filesystem commands and their execution order.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fmt;

use serde::Serialize;

use crate::entry::Entry;

/// A single planned operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "cmd")]
pub enum Command {
    /// Copy `source` to `target` inside the original directory.
    #[serde(rename = "cp")]
    Copy {
        /// Where the content currently lives.
        source: Entry,
        /// Destination name in the original directory.
        target: Entry,
    },
    /// Create a new, empty entry.
    #[serde(rename = "touch")]
    Touch {
        /// Entry to create.
        entry: Entry,
    },
    /// Delete an original entry outright.
    #[serde(rename = "rm")]
    Remove {
        /// Entry to delete.
        entry: Entry,
    },
    /// Archive an original entry into the trash.
    #[serde(rename = "roamer-trash-copy")]
    TrashCopy {
        /// Entry to archive.
        entry: Entry,
    },
}

/// The kind of a [`Command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// `cp`
    Copy,
    /// `roamer-trash-copy`
    TrashCopy,
    /// `rm`
    Remove,
    /// `touch`
    Touch,
}

impl CommandKind {
    /// Position of this kind in a plan's execution order.
    ///
    /// Copies come first: their sources are the untouched original tree.
    /// An entry is archived before it is removed, and a new entry is created
    /// only after any removal that frees its name.
    #[must_use]
    pub const fn execution_rank(self) -> u8 {
        match self {
            Self::Copy => 0,
            Self::TrashCopy => 1,
            Self::Remove => 2,
            Self::Touch => 3,
        }
    }

    /// Command name as rendered in a plan.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Copy => "cp",
            Self::TrashCopy => "roamer-trash-copy",
            Self::Remove => "rm",
            Self::Touch => "touch",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Command {
    /// The kind of this command.
    #[must_use]
    pub const fn kind(&self) -> CommandKind {
        match self {
            Self::Copy { .. } => CommandKind::Copy,
            Self::Touch { .. } => CommandKind::Touch,
            Self::Remove { .. } => CommandKind::Remove,
            Self::TrashCopy { .. } => CommandKind::TrashCopy,
        }
    }

    /// The first operand, present for every kind.
    #[must_use]
    pub const fn first_entry(&self) -> &Entry {
        match self {
            Self::Copy { source, .. } => source,
            Self::Touch { entry } | Self::Remove { entry } | Self::TrashCopy { entry } => entry,
        }
    }

    /// The second operand, present only for copies.
    #[must_use]
    pub const fn second_entry(&self) -> Option<&Entry> {
        match self {
            Self::Copy { target, .. } => Some(target),
            Self::Touch { .. } | Self::Remove { .. } | Self::TrashCopy { .. } => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())?;
        write!(f, " {}", shell_quote(&self.first_entry().to_string()))?;
        if let Some(second) = self.second_entry() {
            write!(f, " {}", shell_quote(&second.to_string()))?;
        }
        Ok(())
    }
}

/// Quote `value` for display in a shell-like plan line.
fn shell_quote(value: &str) -> String {
    let is_plain = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "/._-+,:@%~=".contains(c));
    if is_plain {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', r"'\''"))
    }
}

/// Performs planned commands against a real filesystem (or anything else).
pub trait CommandExecutor {
    /// Per-command result.
    type Output;
    /// Failure of a single command.
    type Error;

    /// Perform one command.
    ///
    /// # Errors
    ///
    /// * If the command could not be carried out
    fn execute(&mut self, command: &Command) -> Result<Self::Output, Self::Error>;
}

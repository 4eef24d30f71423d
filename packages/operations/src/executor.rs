//! Command execution against the filesystem.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use roamer_core::{Command, CommandExecutor};

use crate::OperationResult;
use crate::copy::copy_path;
use crate::error::OperationError;
use crate::remove::remove_path;
use crate::touch::touch;
use crate::trash::trash_copy;

/// Executes commands on the real filesystem.
///
/// Copies run before trash copies in a plan, so a copy may overwrite an entry
/// that is still due to be archived, or that a later copy reads from. Before a
/// copy replaces an existing path, that path is archived into the trash. Later
/// copies read the archived content instead, and the trash copy for that path
/// reports the archive instead of copying again.
#[derive(Debug)]
pub struct FsExecutor {
    trash_dir: PathBuf,
    /// Original path -> archived copy in the trash.
    preserved: HashMap<PathBuf, PathBuf>,
}

impl FsExecutor {
    /// Create an executor archiving into `trash_dir`.
    #[must_use]
    pub fn new(trash_dir: impl Into<PathBuf>) -> Self {
        Self {
            trash_dir: trash_dir.into(),
            preserved: HashMap::new(),
        }
    }

    /// The trash directory.
    #[must_use]
    pub fn trash_dir(&self) -> &Path {
        &self.trash_dir
    }

    fn copy(&mut self, source: &Path, target: &Path) -> Result<OperationResult, OperationError> {
        let read_from = self
            .preserved
            .get(source)
            .cloned()
            .unwrap_or_else(|| source.to_path_buf());

        let mut archived = None;
        if fs::symlink_metadata(target).is_ok() && !self.preserved.contains_key(target) {
            let saved = trash_copy(target, &self.trash_dir)?;
            self.preserved.insert(target.to_path_buf(), saved.clone());
            archived = Some(saved);
        }

        copy_path(&read_from, target)?;

        Ok(match archived {
            Some(archived) => OperationResult::Overwritten { archived },
            None => OperationResult::Copied,
        })
    }

    fn trash(&mut self, path: &Path) -> Result<OperationResult, OperationError> {
        if let Some(archived) = self.preserved.get(path) {
            log::debug!("{} already archived at {}", path.display(), archived.display());
            return Ok(OperationResult::Trashed(archived.clone()));
        }

        let archived = trash_copy(path, &self.trash_dir)?;
        self.preserved.insert(path.to_path_buf(), archived.clone());
        Ok(OperationResult::Trashed(archived))
    }
}

impl CommandExecutor for FsExecutor {
    type Output = OperationResult;
    type Error = OperationError;

    fn execute(&mut self, command: &Command) -> Result<Self::Output, Self::Error> {
        log::debug!("Executing {command}");

        match command {
            Command::Copy { source, target } => self.copy(&source.path(), &target.path()),
            Command::TrashCopy { entry } => self.trash(&entry.path()),
            Command::Remove { entry } => {
                remove_path(&entry.path())?;
                Ok(OperationResult::Removed)
            }
            Command::Touch { entry } => touch(&entry.path(), entry.is_dir()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roamer_core::{BaseDir, DirRole, Entry};
    use tempfile::TempDir;

    fn entry(dir: &Path, name: &str) -> Entry {
        Entry::new(name, BaseDir::new(DirRole::Original, dir))
    }

    #[test]
    fn test_copy_into_free_name() {
        let dir = TempDir::new().unwrap();
        let trash = dir.path().join("trash");
        fs::write(dir.path().join("a.txt"), "a").unwrap();

        let mut executor = FsExecutor::new(&trash);
        let result = executor
            .execute(&Command::Copy {
                source: entry(dir.path(), "a.txt"),
                target: entry(dir.path(), "b.txt"),
            })
            .unwrap();

        assert_eq!(result, OperationResult::Copied);
        assert_eq!(fs::read_to_string(dir.path().join("b.txt")).unwrap(), "a");
        assert!(!trash.exists());
    }

    #[test]
    fn test_overwrite_archives_first() {
        let dir = TempDir::new().unwrap();
        let trash = dir.path().join("trash");
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();

        let mut executor = FsExecutor::new(&trash);
        let result = executor
            .execute(&Command::Copy {
                source: entry(dir.path(), "a.txt"),
                target: entry(dir.path(), "b.txt"),
            })
            .unwrap();
        assert_eq!(
            result,
            OperationResult::Overwritten {
                archived: trash.join("b.txt")
            }
        );

        let trashed = executor
            .execute(&Command::TrashCopy {
                entry: entry(dir.path(), "b.txt"),
            })
            .unwrap();
        assert_eq!(trashed, OperationResult::Trashed(trash.join("b.txt")));
        assert_eq!(fs::read_to_string(trash.join("b.txt")).unwrap(), "b");
        assert!(fs::symlink_metadata(trash.join("b.txt~1")).is_err());
    }

    #[test]
    fn test_remove_and_touch() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("old.txt"), "old").unwrap();

        let mut executor = FsExecutor::new(dir.path().join("trash"));
        assert_eq!(
            executor
                .execute(&Command::Remove {
                    entry: entry(dir.path(), "old.txt")
                })
                .unwrap(),
            OperationResult::Removed
        );
        assert_eq!(
            executor
                .execute(&Command::Touch {
                    entry: entry(dir.path(), "new/")
                })
                .unwrap(),
            OperationResult::Created
        );

        assert!(!dir.path().join("old.txt").exists());
        assert!(dir.path().join("new").is_dir());
    }

    #[test]
    fn test_remove_missing_fails() {
        let dir = TempDir::new().unwrap();
        let mut executor = FsExecutor::new(dir.path().join("trash"));

        let err = executor
            .execute(&Command::Remove {
                entry: entry(dir.path(), "ghost.txt"),
            })
            .unwrap_err();
        assert!(matches!(err, OperationError::MissingSource(_)));
    }
}

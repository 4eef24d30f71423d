//! Plan compilation - compare two snapshots and emit ordered commands.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeSet;

use crate::command::{Command, CommandExecutor};
use crate::entry::{Digest, Entry};
use crate::error::EngineError;
use crate::record::RecordSource;
use crate::snapshot::DirectorySnapshot;

/// Compiles the commands that turn the original directory into the edit.
#[derive(Debug)]
pub struct Engine<'a> {
    original_dir: &'a DirectorySnapshot,
    edit_dir: &'a DirectorySnapshot,
    commands: Vec<Command>,
}

impl<'a> Engine<'a> {
    /// Create an engine over two snapshots of the same directory.
    #[must_use]
    pub const fn new(original_dir: &'a DirectorySnapshot, edit_dir: &'a DirectorySnapshot) -> Self {
        Self {
            original_dir,
            edit_dir,
            commands: Vec::new(),
        }
    }

    /// Run the four comparison passes, replacing any previous plan.
    ///
    /// `record` is loaded only if the edit references digests the original
    /// directory does not contain.
    ///
    /// # Errors
    ///
    /// * If an unknown digest is found in neither the record nor the trash
    /// * If the record fails to load
    pub fn compile_commands<R: RecordSource>(&mut self, record: &R) -> Result<(), EngineError> {
        self.commands.clear();

        self.compare_dirs();
        self.new_entries();
        if let Err(e) = self.handle_unknown_digests(record) {
            self.commands.clear();
            return Err(e);
        }
        self.save_copy_over_files_to_trash();

        log::info!(
            "Compiled {} commands for {}",
            self.commands.len(),
            self.original_dir.base().path.display()
        );

        Ok(())
    }

    /// Emit copies for content under new names and trash candidates for
    /// content that left its name.
    fn compare_dirs(&mut self) {
        for digest in self.original_dir.digests() {
            let Some(original_entries) = self.original_dir.find(Some(digest)) else {
                continue;
            };

            let Some(new_entries) = self.edit_dir.find(Some(digest)) else {
                log::debug!("Digest {digest} gone from edit");
                for original_entry in original_entries {
                    self.commands.push(Command::TrashCopy {
                        entry: original_entry.clone(),
                    });
                }
                continue;
            };

            let original_keys: BTreeSet<&str> =
                original_entries.iter().map(Entry::key).collect();

            // Each new name is copied once, from the first original entry.
            let source = &original_entries[0];
            for new_entry in new_entries {
                if !original_keys.contains(new_entry.key()) {
                    log::debug!("Copy {} -> {}", source.name(), new_entry.name());
                    self.commands.push(Command::Copy {
                        source: source.clone(),
                        target: new_entry.rebased(self.original_dir.base()),
                    });
                }
            }

            for original_entry in original_entries {
                let found_original = new_entries
                    .iter()
                    .any(|new_entry| new_entry.key() == original_entry.key());
                if !found_original {
                    self.commands.push(Command::TrashCopy {
                        entry: original_entry.clone(),
                    });
                }
            }
        }
    }

    /// Emit a touch for every blank entry in the edit.
    fn new_entries(&mut self) {
        let Some(blank_entries) = self.edit_dir.find(None) else {
            return;
        };

        for entry in blank_entries {
            self.commands.push(Command::Touch {
                entry: entry.rebased(self.original_dir.base()),
            });
        }
    }

    /// Pull in content the original directory does not have, from the record
    /// or the trash.
    fn handle_unknown_digests<R: RecordSource>(&mut self, source: &R) -> Result<(), EngineError> {
        let unknown_digests: Vec<&Digest> = self
            .edit_dir
            .digests()
            .filter(|digest| !self.original_dir.contains_digest(digest))
            .collect();

        if unknown_digests.is_empty() {
            return Ok(());
        }

        log::debug!("Resolving {} unknown digests", unknown_digests.len());
        let record = source.load().map_err(|e| EngineError::RecordLoad {
            source: Box::new(e),
        })?;

        for digest in unknown_digests {
            let outside_entry =
                record
                    .resolve(digest)
                    .ok_or_else(|| EngineError::UnresolvedDigest {
                        digest: digest.clone(),
                    })?;

            for entry in self.edit_dir.find(Some(digest)).unwrap_or_default() {
                self.commands.push(Command::Copy {
                    source: outside_entry.clone(),
                    target: entry.rebased(self.original_dir.base()),
                });
            }
        }

        Ok(())
    }

    /// Remove trash candidates outright unless a copy is about to overwrite
    /// their name.
    fn save_copy_over_files_to_trash(&mut self) {
        let copy_over_keys: BTreeSet<&str> = self
            .commands
            .iter()
            .filter_map(Command::second_entry)
            .map(Entry::key)
            .collect();

        let removals: Vec<Command> = self
            .commands
            .iter()
            .filter_map(|command| match command {
                Command::TrashCopy { entry } if !copy_over_keys.contains(entry.key()) => {
                    Some(Command::Remove {
                        entry: entry.clone(),
                    })
                }
                _ => None,
            })
            .collect();

        self.commands.extend(removals);
    }

    /// The plan in execution order.
    ///
    /// Copies run first, then trash copies, removals and touches. The sort is
    /// stable, so commands of the same kind keep the order they were compiled in.
    #[must_use]
    pub fn sorted_commands(&self) -> Vec<&Command> {
        let mut commands: Vec<&Command> = self.commands.iter().collect();
        commands.sort_by_key(|command| command.kind().execution_rank());
        commands
    }

    /// Render the plan, one command per line, in execution order.
    #[must_use]
    pub fn commands_to_str(&self) -> String {
        self.sorted_commands()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Execute the plan in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// * If any command fails; later commands are not run
    pub fn run_commands<E: CommandExecutor>(
        &self,
        executor: &mut E,
    ) -> Result<Vec<E::Output>, E::Error> {
        self.sorted_commands()
            .into_iter()
            .map(|command| executor.execute(command))
            .collect()
    }

    /// Whether the plan is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandKind;
    use crate::entry::{BaseDir, DirRole};
    use crate::record::Record;

    const DIR: &str = "/home/user/docs";

    fn original(entries: &[(&str, &str)]) -> DirectorySnapshot {
        let mut snap = DirectorySnapshot::new(BaseDir::new(DirRole::Original, DIR));
        for (digest, name) in entries {
            snap.insert(Some(Digest::new(*digest)), *name).unwrap();
        }
        snap
    }

    fn edit(entries: &[(Option<&str>, &str)]) -> DirectorySnapshot {
        let mut snap = DirectorySnapshot::new(BaseDir::new(DirRole::Edit, DIR));
        for (digest, name) in entries {
            snap.insert(digest.map(Digest::new), *name).unwrap();
        }
        snap
    }

    fn plan(original: &DirectorySnapshot, edit: &DirectorySnapshot) -> Vec<(CommandKind, String)> {
        plan_with(original, edit, &Record::new())
    }

    fn plan_with(
        original: &DirectorySnapshot,
        edit: &DirectorySnapshot,
        record: &Record,
    ) -> Vec<(CommandKind, String)> {
        let mut engine = Engine::new(original, edit);
        engine.compile_commands(record).unwrap();
        engine
            .sorted_commands()
            .into_iter()
            .map(|command| {
                let names = match command.second_entry() {
                    Some(second) => format!("{}->{}", command.first_entry().name(), second.name()),
                    None => command.first_entry().name().to_string(),
                };
                (command.kind(), names)
            })
            .collect()
    }

    #[test]
    fn test_unchanged_directory_has_empty_plan() {
        let original = original(&[("x", "a.txt")]);
        let edit = edit(&[(Some("x"), "a.txt")]);

        assert!(plan(&original, &edit).is_empty());
    }

    #[test]
    fn test_directory_marker_toggle_is_not_a_rename() {
        let original = original(&[("x", "notes")]);
        let edit = edit(&[(Some("x"), "notes/")]);

        assert!(plan(&original, &edit).is_empty());
    }

    #[test]
    fn test_copy_onto_marked_name_keeps_trashed_entry() {
        let original = original(&[("x", "a.txt"), ("y", "notes")]);
        let edit = edit(&[(Some("x"), "a.txt"), (Some("x"), "notes/")]);

        assert_eq!(
            plan(&original, &edit),
            vec![
                (CommandKind::Copy, "a.txt->notes/".to_string()),
                (CommandKind::TrashCopy, "notes".to_string()),
            ]
        );
    }

    #[test]
    fn test_rename_copies_then_trashes_and_removes() {
        let original = original(&[("x", "a.txt")]);
        let edit = edit(&[(Some("x"), "b.txt")]);

        assert_eq!(
            plan(&original, &edit),
            vec![
                (CommandKind::Copy, "a.txt->b.txt".to_string()),
                (CommandKind::TrashCopy, "a.txt".to_string()),
                (CommandKind::Remove, "a.txt".to_string()),
            ]
        );
    }

    #[test]
    fn test_duplicate_keeps_original() {
        let original = original(&[("x", "a.txt")]);
        let edit = edit(&[(Some("x"), "a.txt"), (Some("x"), "b.txt")]);

        assert_eq!(
            plan(&original, &edit),
            vec![(CommandKind::Copy, "a.txt->b.txt".to_string())]
        );
    }

    #[test]
    fn test_blank_entry_is_touched() {
        let original = original(&[]);
        let edit = edit(&[(None, "new.txt"), (None, "other/")]);

        assert_eq!(
            plan(&original, &edit),
            vec![
                (CommandKind::Touch, "new.txt".to_string()),
                (CommandKind::Touch, "other/".to_string()),
            ]
        );
    }

    #[test]
    fn test_unknown_digest_resolved_from_record() {
        let original = original(&[("x", "a.txt")]);
        let edit = edit(&[(Some("y"), "c.txt")]);
        let mut record = Record::new();
        record.insert_entry(
            Digest::new("y"),
            Entry::new("archived.dat", BaseDir::new(DirRole::Record, "/archive")),
        );

        assert_eq!(
            plan_with(&original, &edit, &record),
            vec![
                (CommandKind::Copy, "archived.dat->c.txt".to_string()),
                (CommandKind::TrashCopy, "a.txt".to_string()),
                (CommandKind::Remove, "a.txt".to_string()),
            ]
        );
    }

    #[test]
    fn test_unknown_digest_resolved_from_trash() {
        let original = original(&[]);
        let edit = edit(&[(Some("y"), "back.txt")]);
        let mut record = Record::new();
        record.insert_trash_entry(
            Digest::new("y"),
            Entry::new("gone.txt", BaseDir::new(DirRole::Trash, "/trash")),
        );

        let mut engine = Engine::new(&original, &edit);
        engine.compile_commands(&record).unwrap();
        let commands = engine.sorted_commands();

        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].first_entry().base().role, DirRole::Trash);
        assert_eq!(commands[0].second_entry().unwrap().base().role, DirRole::Original);
    }

    #[test]
    fn test_unresolved_digest_is_fatal() {
        let original = original(&[("x", "a.txt")]);
        let edit = edit(&[(Some("x"), "b.txt"), (Some("nowhere"), "c.txt")]);

        let mut engine = Engine::new(&original, &edit);
        let err = engine.compile_commands(&Record::new()).unwrap_err();

        assert!(matches!(err, EngineError::UnresolvedDigest { digest } if digest.as_str() == "nowhere"));
        assert!(engine.is_empty());
    }

    #[test]
    fn test_record_not_loaded_without_unknown_digests() {
        #[derive(Debug, thiserror::Error)]
        #[error("should not load")]
        struct Unreachable;

        struct FailingSource;

        impl RecordSource for FailingSource {
            type Error = Unreachable;

            fn load(&self) -> Result<Record, Self::Error> {
                Err(Unreachable)
            }
        }

        let original = original(&[("x", "a.txt")]);
        let edit = edit(&[(Some("x"), "b.txt")]);
        let mut engine = Engine::new(&original, &edit);

        assert!(engine.compile_commands(&FailingSource).is_ok());

        let edit = self::edit(&[(Some("y"), "b.txt")]);
        let mut engine = Engine::new(&original, &edit);
        assert!(matches!(
            engine.compile_commands(&FailingSource),
            Err(EngineError::RecordLoad { .. })
        ));
    }

    #[test]
    fn test_overwritten_name_is_trashed_not_removed() {
        // a.txt's content moves to b.txt, and b.txt's old content disappears.
        let original = original(&[("x", "a.txt"), ("y", "b.txt")]);
        let edit = edit(&[(Some("x"), "b.txt")]);

        assert_eq!(
            plan(&original, &edit),
            vec![
                (CommandKind::Copy, "a.txt->b.txt".to_string()),
                (CommandKind::TrashCopy, "a.txt".to_string()),
                (CommandKind::TrashCopy, "b.txt".to_string()),
                (CommandKind::Remove, "a.txt".to_string()),
            ]
        );
    }

    #[test]
    fn test_swap_names() {
        let original = original(&[("x", "a.txt"), ("y", "b.txt")]);
        let edit = edit(&[(Some("x"), "b.txt"), (Some("y"), "a.txt")]);

        assert_eq!(
            plan(&original, &edit),
            vec![
                (CommandKind::Copy, "a.txt->b.txt".to_string()),
                (CommandKind::Copy, "b.txt->a.txt".to_string()),
                (CommandKind::TrashCopy, "a.txt".to_string()),
                (CommandKind::TrashCopy, "b.txt".to_string()),
            ]
        );
    }

    #[test]
    fn test_multi_copy_without_keeping_original() {
        let original = original(&[("x", "a.txt")]);
        let edit = edit(&[(Some("x"), "b.txt"), (Some("x"), "c.txt")]);

        assert_eq!(
            plan(&original, &edit),
            vec![
                (CommandKind::Copy, "a.txt->b.txt".to_string()),
                (CommandKind::Copy, "a.txt->c.txt".to_string()),
                (CommandKind::TrashCopy, "a.txt".to_string()),
                (CommandKind::Remove, "a.txt".to_string()),
            ]
        );
    }

    #[test]
    fn test_duplicate_content_in_original_is_stable() {
        let original = original(&[("x", "a.txt"), ("x", "b.txt")]);
        let unchanged = edit(&[(Some("x"), "a.txt"), (Some("x"), "b.txt")]);
        assert!(plan(&original, &unchanged).is_empty());

        let dropped = edit(&[(Some("x"), "a.txt")]);
        assert_eq!(
            plan(&original, &dropped),
            vec![
                (CommandKind::TrashCopy, "b.txt".to_string()),
                (CommandKind::Remove, "b.txt".to_string()),
            ]
        );
    }

    #[test]
    fn test_deleted_entry_trashed_exactly_once() {
        let original = original(&[("x", "a.txt"), ("y", "keep.txt")]);
        let edit = edit(&[(Some("y"), "keep.txt")]);

        let plan = plan(&original, &edit);
        let trash_count = plan
            .iter()
            .filter(|(kind, name)| *kind == CommandKind::TrashCopy && name == "a.txt")
            .count();
        assert_eq!(trash_count, 1);
        assert!(plan.contains(&(CommandKind::Remove, "a.txt".to_string())));
    }

    #[test]
    fn test_commands_to_str_puts_copies_first() {
        let original = original(&[("x", "a.txt"), ("y", "b.txt")]);
        let edit = edit(&[(None, "new.txt"), (Some("y"), "c.txt"), (Some("x"), "d.txt")]);

        let mut engine = Engine::new(&original, &edit);
        engine.compile_commands(&Record::new()).unwrap();
        let output = engine.commands_to_str();
        let lines: Vec<&str> = output.lines().collect();

        let first_non_copy = lines.iter().position(|l| !l.starts_with("cp ")).unwrap();
        assert_eq!(first_non_copy, 2);
        assert!(lines[first_non_copy..].iter().all(|l| !l.starts_with("cp ")));
        assert_eq!(lines.last().unwrap(), &"touch /home/user/docs/new.txt");
    }

    #[test]
    fn test_recompile_replaces_plan() {
        let original = original(&[("x", "a.txt")]);
        let edit = edit(&[(Some("x"), "b.txt")]);
        let mut engine = Engine::new(&original, &edit);

        engine.compile_commands(&Record::new()).unwrap();
        engine.compile_commands(&Record::new()).unwrap();

        assert_eq!(engine.sorted_commands().len(), 3);
    }

    #[test]
    fn test_run_commands_in_order_and_stops_on_error() {
        struct Collect {
            seen: Vec<CommandKind>,
            fail_on: Option<CommandKind>,
        }

        impl CommandExecutor for Collect {
            type Output = String;
            type Error = String;

            fn execute(&mut self, command: &Command) -> Result<String, String> {
                if self.fail_on == Some(command.kind()) {
                    return Err(format!("failed {command}"));
                }
                self.seen.push(command.kind());
                Ok(command.to_string())
            }
        }

        let original = original(&[("x", "a.txt")]);
        let edit = edit(&[(Some("x"), "b.txt"), (None, "new.txt")]);
        let mut engine = Engine::new(&original, &edit);
        engine.compile_commands(&Record::new()).unwrap();

        let mut executor = Collect {
            seen: Vec::new(),
            fail_on: None,
        };
        let results = engine.run_commands(&mut executor).unwrap();
        assert_eq!(results.len(), 4);
        assert_eq!(
            executor.seen,
            vec![
                CommandKind::Copy,
                CommandKind::TrashCopy,
                CommandKind::Remove,
                CommandKind::Touch,
            ]
        );

        let mut failing = Collect {
            seen: Vec::new(),
            fail_on: Some(CommandKind::Remove),
        };
        assert!(engine.run_commands(&mut failing).is_err());
        assert_eq!(failing.seen, vec![CommandKind::Copy, CommandKind::TrashCopy]);
    }

    #[test]
    fn test_applying_plan_reaches_fixed_point() {
        let original_snap = original(&[("x", "a.txt"), ("y", "b.txt")]);
        let edit_snap = edit(&[(Some("x"), "a.txt"), (Some("x"), "c.txt"), (Some("y"), "d.txt")]);
        assert!(!plan(&original_snap, &edit_snap).is_empty());

        // After applying, the original directory looks exactly like the edit.
        let applied = original(&[("x", "a.txt"), ("x", "c.txt"), ("y", "d.txt")]);
        assert!(plan(&applied, &edit_snap).is_empty());
    }
}

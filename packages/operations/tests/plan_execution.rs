//! End-to-end: scan a directory, edit its listing, compile and execute the plan.

use std::fs;
use std::path::Path;

use roamer_core::{DirRole, Engine, listing};
use roamer_operations::{FsExecutor, OperationResult};
use roamer_scan::{ArchiveRecordSource, ScanOptions, scan_directory};
use tempfile::TempDir;

struct Workspace {
    _root: TempDir,
    dir: std::path::PathBuf,
    trash: std::path::PathBuf,
}

impl Workspace {
    fn new(files: &[(&str, &str)]) -> Self {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("docs");
        let trash = root.path().join("trash");
        fs::create_dir_all(&dir).unwrap();
        for (name, content) in files {
            fs::write(dir.join(name), content).unwrap();
        }
        Self {
            _root: root,
            dir,
            trash,
        }
    }

    fn record_source(&self) -> ArchiveRecordSource {
        ArchiveRecordSource::new(Vec::new(), Some(self.trash.clone()), ScanOptions::default())
    }

    /// Apply `edit` (a function from the rendered listing to the edited one).
    fn apply(&self, edit: impl Fn(&str) -> String) -> Vec<OperationResult> {
        let original = scan_directory(&self.dir, DirRole::Original, &ScanOptions::default()).unwrap();
        let edited = edit(&listing::render(&original));
        let edit_snapshot = listing::parse(&edited, self.dir.clone()).unwrap();

        let mut engine = Engine::new(&original, &edit_snapshot);
        engine.compile_commands(&self.record_source()).unwrap();

        let mut executor = FsExecutor::new(&self.trash);
        engine.run_commands(&mut executor).unwrap()
    }

    fn plan_after(&self, edited: &str) -> String {
        let original = scan_directory(&self.dir, DirRole::Original, &ScanOptions::default()).unwrap();
        let edit_snapshot = listing::parse(edited, self.dir.clone()).unwrap();
        let mut engine = Engine::new(&original, &edit_snapshot);
        engine.compile_commands(&self.record_source()).unwrap();
        engine.commands_to_str()
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    fn read(&self, name: &str) -> String {
        fs::read_to_string(self.dir.join(name)).unwrap()
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_rename_moves_content_and_archives_old_name() {
    let ws = Workspace::new(&[("a.txt", "alpha")]);

    ws.apply(|text| text.replace("a.txt ", "b.txt "));

    assert_eq!(ws.names(), vec!["b.txt"]);
    assert_eq!(ws.read("b.txt"), "alpha");
    assert_eq!(read(&ws.trash.join("a.txt")), "alpha");
}

#[test]
fn test_swap_is_lossless() {
    let ws = Workspace::new(&[("a.txt", "alpha"), ("b.txt", "beta")]);

    ws.apply(|text| {
        text.replace("a.txt ", "tmp.txt ")
            .replace("b.txt ", "a.txt ")
            .replace("tmp.txt ", "b.txt ")
    });

    assert_eq!(ws.names(), vec!["a.txt", "b.txt"]);
    assert_eq!(ws.read("a.txt"), "beta");
    assert_eq!(ws.read("b.txt"), "alpha");
}

#[test]
fn test_delete_duplicate_and_create() {
    let ws = Workspace::new(&[("keep.txt", "keep"), ("drop.txt", "drop")]);

    ws.apply(|text| {
        let mut lines: Vec<String> = text
            .lines()
            .filter(|line| !line.starts_with("drop.txt"))
            .map(str::to_string)
            .collect();
        let keep_line = lines.iter().find(|l| l.starts_with("keep.txt")).unwrap().clone();
        lines.push(keep_line.replace("keep.txt", "copy.txt"));
        lines.push("fresh.txt".to_string());
        lines.push("folder/".to_string());
        lines.join("\n")
    });

    assert_eq!(ws.names(), vec!["copy.txt", "folder", "fresh.txt", "keep.txt"]);
    assert_eq!(ws.read("copy.txt"), "keep");
    assert_eq!(ws.read("fresh.txt"), "");
    assert!(ws.dir.join("folder").is_dir());
    assert_eq!(read(&ws.trash.join("drop.txt")), "drop");
}

#[test]
fn test_resurrect_from_trash_by_digest() {
    let ws = Workspace::new(&[("a.txt", "alpha"), ("b.txt", "beta")]);
    let original = scan_directory(&ws.dir, DirRole::Original, &ScanOptions::default()).unwrap();
    let listing_text = listing::render(&original);
    let a_line = listing_text
        .lines()
        .find(|l| l.starts_with("a.txt"))
        .unwrap()
        .to_string();

    ws.apply(|text| {
        text.lines()
            .filter(|line| !line.starts_with("a.txt"))
            .collect::<Vec<_>>()
            .join("\n")
    });
    assert_eq!(ws.names(), vec!["b.txt"]);

    ws.apply(|text| format!("{text}\n{}", a_line.replace("a.txt", "back.txt")));
    assert_eq!(ws.names(), vec!["b.txt", "back.txt"]);
    assert_eq!(ws.read("back.txt"), "alpha");
}

#[test]
fn test_applied_plan_reaches_fixed_point() {
    let ws = Workspace::new(&[("a.txt", "alpha"), ("b.txt", "beta"), ("c.txt", "gamma")]);

    ws.apply(|text| {
        text.replace("a.txt ", "z.txt ")
            .lines()
            .filter(|line| !line.starts_with("c.txt"))
            .collect::<Vec<_>>()
            .join("\n")
    });

    let original = scan_directory(&ws.dir, DirRole::Original, &ScanOptions::default()).unwrap();
    assert_eq!(ws.plan_after(&listing::render(&original)), "");
}

#[test]
fn test_rename_directory_copies_tree() {
    let ws = Workspace::new(&[("top.txt", "top")]);
    fs::create_dir_all(ws.dir.join("photos/2024")).unwrap();
    fs::write(ws.dir.join("photos/2024/cat.jpg"), "meow").unwrap();

    ws.apply(|text| text.replace("photos/ ", "pictures/ "));

    assert_eq!(ws.names(), vec!["pictures", "top.txt"]);
    assert_eq!(ws.read("pictures/2024/cat.jpg"), "meow");
    assert_eq!(read(&ws.trash.join("photos/2024/cat.jpg")), "meow");

    let original = scan_directory(&ws.dir, DirRole::Original, &ScanOptions::default()).unwrap();
    assert_eq!(ws.plan_after(&listing::render(&original)), "");
}

#[test]
fn test_trailing_slash_toggle_keeps_entry() {
    let ws = Workspace::new(&[("notes", "remember")]);

    let results = ws.apply(|text| text.replace("notes |", "notes/|"));

    assert!(results.is_empty());
    assert_eq!(ws.read("notes"), "remember");
}

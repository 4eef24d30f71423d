//! Editing the listing in the user's text editor.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::Command;

/// Write `initial` to a temporary file, open it in `editor` and return what
/// the user saved.
///
/// `editor` may carry arguments (`code --wait`); the file path is appended.
///
/// # Errors
///
/// * If the temporary file cannot be written or read back
/// * If the editor cannot be started or exits unsuccessfully
pub fn edit_listing(initial: &str, editor: &str) -> io::Result<String> {
    let mut file = tempfile::Builder::new()
        .prefix("roamer-")
        .suffix(".txt")
        .tempfile()?;
    file.write_all(initial.as_bytes())?;
    file.flush()?;

    run_editor(editor, file.path())?;

    fs::read_to_string(file.path())
}

fn run_editor(editor: &str, path: &Path) -> io::Result<()> {
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "Editor command is empty"))?;

    log::debug!("Launching editor: {editor} {}", path.display());

    let status = Command::new(program).args(parts).arg(path).status()?;
    if !status.success() {
        return Err(io::Error::other(format!("Editor '{editor}' exited with {status}")));
    }

    Ok(())
}

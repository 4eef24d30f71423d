//! Edit listing: the text a user edits to describe the desired directory.
//!
//! Each line is `name | digest`. A line without a digest is a new, blank entry.
//! Lines starting with `#` are comments. Only a `|` next to whitespace or at the
//! end of the line separates the digest, so `odd|name` is a plain name.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Component, Path, PathBuf};

use crate::entry::{BaseDir, Digest, DirRole};
use crate::error::{ListingError, SnapshotError};
use crate::snapshot::DirectorySnapshot;

/// Render a snapshot as an editable listing, sorted by name.
#[must_use]
pub fn render(snapshot: &DirectorySnapshot) -> String {
    let mut rows: Vec<(&str, Option<&Digest>)> = snapshot
        .entries()
        .flat_map(|(digest, entries)| entries.iter().map(move |e| (e.name(), digest)))
        .collect();
    rows.sort_unstable_by(|a, b| a.0.cmp(b.0));

    let width = rows.iter().map(|(name, _)| name.chars().count()).max().unwrap_or(0);

    let mut out = format!(
        "# {}\n\
         # Edit names to rename, duplicate lines to copy, delete lines to trash.\n\
         # Add a name without a digest to create an empty file (end with / for a directory).\n",
        snapshot.base().path.display()
    );
    for (name, digest) in rows {
        let row = match digest {
            Some(digest) => format!("{name:<width$} | {digest}\n"),
            None => format!("{name}\n"),
        };
        out.push_str(&row);
    }
    out
}

/// Parse an edited listing into an edit snapshot of `dir`.
///
/// # Errors
///
/// * If a name is empty, absolute or escapes `dir`
/// * If a digest is malformed
/// * If a name appears twice
pub fn parse(text: &str, dir: impl Into<PathBuf>) -> Result<DirectorySnapshot, ListingError> {
    let mut snapshot = DirectorySnapshot::new(BaseDir::new(DirRole::Edit, dir));

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let (name, digest) = split_digest(trimmed);

        let name = normalize_name(name).ok_or_else(|| ListingError::InvalidName {
            line,
            name: name.to_string(),
        })?;

        let digest = if digest.is_empty() {
            None
        } else {
            Some(
                digest
                    .parse::<Digest>()
                    .map_err(|_| ListingError::InvalidDigest {
                        line,
                        digest: digest.to_string(),
                    })?,
            )
        };

        snapshot
            .insert(digest, name)
            .map_err(|SnapshotError::DuplicateName { name }| ListingError::DuplicateName {
                line,
                name,
            })?;
    }

    log::debug!("Parsed {} entries from listing", snapshot.len());

    Ok(snapshot)
}

/// Split a line at its last `|` that touches whitespace or the end of the line.
fn split_digest(line: &str) -> (&str, &str) {
    let separator = line.rmatch_indices('|').map(|(i, _)| i).find(|&i| {
        let before = line[..i].chars().next_back().is_none_or(char::is_whitespace);
        let after = line[i + 1..].chars().next().is_none_or(char::is_whitespace);
        before || after
    });

    match separator {
        Some(i) => (line[..i].trim(), line[i + 1..].trim()),
        None => (line, ""),
    }
}

/// Clean a name and make sure it stays inside its directory.
///
/// Returns `None` for empty, absolute or escaping names. A trailing `/` is kept.
fn normalize_name(name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }

    let is_dir = name.ends_with('/');
    let cleaned = path_clean::clean(Path::new(name));

    let stays_inside = cleaned
        .components()
        .all(|component| matches!(component, Component::Normal(_)));
    if !stays_inside || cleaned.as_os_str().is_empty() {
        return None;
    }

    let mut cleaned = cleaned.to_string_lossy().into_owned();
    if is_dir {
        cleaned.push('/');
    }
    Some(cleaned)
}

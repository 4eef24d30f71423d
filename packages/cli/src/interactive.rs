//! Interactive prompts using dialoguer.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::io;

use dialoguer::Confirm;

/// Ask whether to execute a plan of `count` commands.
///
/// # Errors
///
/// * If the prompt cannot be shown
pub fn confirm_plan(count: usize) -> io::Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(format!(
            "Execute {count} command{}?",
            if count == 1 { "" } else { "s" }
        ))
        .default(true)
        .interact()?;

    Ok(confirmed)
}

/// Ask whether to reopen the editor after the listing failed to parse.
///
/// # Errors
///
/// * If the prompt cannot be shown
pub fn confirm_reedit() -> io::Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt("Edit the listing again?")
        .default(true)
        .interact()?;

    Ok(confirmed)
}

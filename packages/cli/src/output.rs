//! Terminal output formatting.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use colored::Colorize;
use roamer_core::{Command, CommandKind};

/// Print the plan, one command per line, with the command name colored.
pub fn print_plan(commands: &[&Command]) {
    println!(
        "Plan ({} command{}):",
        commands.len(),
        if commands.len() == 1 { "" } else { "s" }
    );
    for command in commands {
        let line = command.to_string();
        let kind = command.kind();
        let rest = line.strip_prefix(kind.as_str()).unwrap_or(&line);
        let name = match kind {
            CommandKind::Copy => kind.as_str().green(),
            CommandKind::TrashCopy => kind.as_str().yellow(),
            CommandKind::Remove => kind.as_str().red(),
            CommandKind::Touch => kind.as_str().cyan(),
        };
        println!("  {name}{rest}");
    }
    println!();
}

/// Print that the edit matches the directory.
pub fn print_no_changes() {
    println!("{} No changes.", "•".dimmed());
}

/// Print success message.
pub fn print_success(count: usize) {
    println!(
        "{} Done: {count} command{} executed.",
        "✓".green(),
        if count == 1 { "" } else { "s" }
    );
}

/// Print error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", "Warning:".yellow().bold(), message);
}

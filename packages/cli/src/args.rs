//! CLI argument definitions.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// How the plan is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One colored command per line.
    Text,
    /// A JSON array of commands.
    Json,
}

/// CLI arguments for roamer.
#[derive(Debug, Parser)]
#[command(
    name = "roamer",
    about = "Rename, copy and delete files by editing a listing in your text editor",
    version
)]
pub struct Args {
    /// Directory to edit.
    #[arg(index = 1, default_value = ".")]
    pub directory: PathBuf,

    /// Read the edited listing from this file instead of opening an editor.
    #[arg(long)]
    pub edit_file: Option<PathBuf>,

    /// Print the plan without executing it.
    #[arg(long, short = 'n')]
    pub dry_run: bool,

    /// Execute the plan without asking for confirmation.
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Output format for the plan.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Configuration file to use instead of the discovered one.
    #[arg(long = "config", short = 'c')]
    pub config: Option<PathBuf>,

    /// Include entries whose name starts with `.`.
    #[arg(long, short = 'a')]
    pub show_hidden: bool,

    /// Disable progress bars (useful for CI environments).
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Enable verbose output.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Args {
    /// Whether the user should be asked before executing.
    #[must_use]
    pub const fn should_confirm(&self) -> bool {
        !self.yes
    }

    /// Determine if we should show progress bars.
    #[must_use]
    pub const fn should_show_progress(&self) -> bool {
        !self.no_progress
    }
}

//! Progress reporting while a plan executes.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::io::Write;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use roamer_core::{Command, CommandExecutor};
use roamer_operations::{OperationError, OperationResult};

/// Progress bar manager for plan execution.
pub struct ProgressManager {
    enabled: bool,
}

impl ProgressManager {
    /// Create a new progress manager.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Create a progress bar counting executed commands.
    ///
    /// If progress is disabled, returns a hidden progress bar.
    #[must_use]
    pub fn create_plan_bar(&self, total: u64) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  [{bar:25.green/dim}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("━━─"),
        );
        pb
    }
}

/// Print a completed command line.
///
/// Shows a checkmark when something changed, a bullet otherwise.
pub fn print_result(label: &str, result: &OperationResult) {
    let text = result.to_string();
    if matches!(result, OperationResult::Exists) {
        println!("{} {:<40} {}", "•".dimmed(), label, text.dimmed());
    } else {
        println!("{} {:<40} {}", "✓".green(), label, text.dimmed());
    }
    let _ = std::io::stdout().flush();
}

/// Executor wrapper that advances a progress bar and reports each result.
pub struct ProgressExecutor<E> {
    inner: E,
    bar: ProgressBar,
}

impl<E> ProgressExecutor<E> {
    /// Wrap `inner`, reporting on `bar`.
    pub const fn new(inner: E, bar: ProgressBar) -> Self {
        Self { inner, bar }
    }

    /// Clear the bar once execution is over.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl<E> CommandExecutor for ProgressExecutor<E>
where
    E: CommandExecutor<Output = OperationResult, Error = OperationError>,
{
    type Output = OperationResult;
    type Error = OperationError;

    fn execute(&mut self, command: &Command) -> Result<Self::Output, Self::Error> {
        let label = command.to_string();
        self.bar.set_message(label.clone());

        let result = self.inner.execute(command)?;

        self.bar.suspend(|| print_result(&label, &result));
        self.bar.inc(1);
        Ok(result)
    }
}

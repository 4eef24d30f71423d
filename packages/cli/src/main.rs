//! roamer CLI entry point.
//!
//! Edit a directory as a text listing: rename, copy, create and delete entries
//! by changing lines, then apply the difference.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod args;
mod editor;
mod interactive;
mod output;
mod progress;

use std::env;
use std::fs;
use std::path::Path;

use clap::Parser;

use args::{Args, OutputFormat};
use progress::{ProgressExecutor, ProgressManager};
use roamer_config::{Config, load_config};
use roamer_core::{DirRole, DirectorySnapshot, Engine, listing};
use roamer_operations::FsExecutor;
use roamer_scan::{
    ArchiveRecordSource, MAX_DIGEST_LENGTH, MIN_DIGEST_LENGTH, ScanOptions, scan_directory,
};

fn main() {
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        // SAFETY: We're setting this before any other threads are spawned
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    pretty_env_logger::init();

    if let Err(e) = run(&args) {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Main application logic.
fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let loaded = load_config(args.config.as_deref())?;
    if let Some(path) = &loaded.config_path {
        log::debug!("Using config {}", path.display());
    }
    let config = loaded.config;

    let directory = fs::canonicalize(&args.directory)
        .map_err(|e| format!("Cannot open {}: {e}", args.directory.display()))?;

    if let Some(length) = config
        .digest_length
        .filter(|length| !(MIN_DIGEST_LENGTH..=MAX_DIGEST_LENGTH).contains(length))
    {
        output::print_warning(&format!(
            "digestLength {length} is outside {MIN_DIGEST_LENGTH}..={MAX_DIGEST_LENGTH}, clamping"
        ));
    }
    let options = scan_options(&config, args);

    let original = scan_directory(&directory, DirRole::Original, &options)?;
    let edited = read_edit_snapshot(args, &config, &original, &directory)?;
    let Some(edited) = edited else {
        println!("Aborted.");
        return Ok(());
    };

    let trash_dir = config.resolve_trash_dir()?;
    let record = ArchiveRecordSource::new(
        config.archive_roots.clone(),
        Some(trash_dir.clone()),
        options,
    );

    let mut engine = Engine::new(&original, &edited);
    engine.compile_commands(&record)?;
    let commands = engine.sorted_commands();

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&commands)?),
        OutputFormat::Text if commands.is_empty() => output::print_no_changes(),
        OutputFormat::Text => output::print_plan(&commands),
    }

    if args.dry_run || commands.is_empty() {
        return Ok(());
    }

    if args.should_confirm() && !interactive::confirm_plan(commands.len())? {
        println!("Aborted.");
        return Ok(());
    }

    let manager = ProgressManager::new(args.should_show_progress());
    let bar = manager.create_plan_bar(commands.len() as u64);
    let mut executor = ProgressExecutor::new(FsExecutor::new(trash_dir), bar);
    let result = engine.run_commands(&mut executor);
    executor.finish();

    let results = result?;
    output::print_success(results.len());

    Ok(())
}

/// Build scan options from the config, with command line overrides.
fn scan_options(config: &Config, args: &Args) -> ScanOptions {
    let mut options = ScanOptions {
        show_hidden: config.show_hidden || args.show_hidden,
        ignore: config.ignore.clone(),
        ..ScanOptions::default()
    };
    if let Some(length) = config.digest_length {
        options.digest_length = length;
    }
    if let Some(jobs) = config.jobs.filter(|jobs| *jobs > 0) {
        options.jobs = jobs;
    }
    options
}

/// Obtain and parse the edited listing.
///
/// Returns `None` when the user gives up after a listing fails to parse.
fn read_edit_snapshot(
    args: &Args,
    config: &Config,
    original: &DirectorySnapshot,
    directory: &Path,
) -> Result<Option<DirectorySnapshot>, Box<dyn std::error::Error>> {
    if let Some(path) = &args.edit_file {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("Cannot read {}: {e}", path.display()))?;
        return Ok(Some(listing::parse(&text, directory)?));
    }

    let editor = config.resolve_editor();
    let mut text = listing::render(original);

    loop {
        text = editor::edit_listing(&text, &editor)?;
        match listing::parse(&text, directory) {
            Ok(snapshot) => return Ok(Some(snapshot)),
            Err(e) => {
                output::print_error(&e.to_string());
                if !interactive::confirm_reedit()? {
                    return Ok(None);
                }
            }
        }
    }
}

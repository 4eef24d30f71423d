//! Configuration types for roamer.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use serde::Deserialize;

/// roamer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    /// Directory where trashed entries are archived.
    #[serde(default)]
    pub trash_dir: Option<PathBuf>,

    /// Directories searched, in order, for digests the edited directory lacks.
    #[serde(default)]
    pub archive_roots: Vec<PathBuf>,

    /// Editor command used for the listing (may include arguments).
    #[serde(default)]
    pub editor: Option<String>,

    /// Digest length in hex characters.
    #[serde(default)]
    pub digest_length: Option<usize>,

    /// Include entries whose name starts with `.`.
    #[serde(default)]
    pub show_hidden: bool,

    /// Glob patterns for entry names to leave out of listings.
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Threads used for digesting (0 or unset means one per CPU).
    #[serde(default)]
    pub jobs: Option<usize>,
}

/// A loaded configuration with metadata.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The parsed configuration.
    pub config: Config,
    /// Path of the configuration file, if one was found.
    pub config_path: Option<PathBuf>,
}

//! Configuration file discovery.
//!
//! The configuration file is looked up in order: an explicit path, the
//! `ROAMER_CONFIG` environment variable, then `roamer/config.toml` under the
//! platform configuration directory.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::env;
use std::path::{Path, PathBuf};

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "ROAMER_CONFIG";

/// File name of the default configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Find the configuration file to load, if any.
///
/// An explicit path or `ROAMER_CONFIG` is returned even if it does not exist, so
/// that loading reports the missing file. The default location is only
/// returned when the file exists.
#[must_use]
pub fn discover_config(explicit: Option<&Path>) -> Option<PathBuf> {
    discover_config_in(
        explicit,
        env::var_os(CONFIG_ENV_VAR).map(PathBuf::from),
        dirs::config_dir(),
    )
}

fn discover_config_in(
    explicit: Option<&Path>,
    from_env: Option<PathBuf>,
    config_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        log::debug!("Using config from command line: {}", path.display());
        return Some(path.to_path_buf());
    }

    if let Some(path) = from_env.filter(|p| !p.as_os_str().is_empty()) {
        log::debug!("Using config from {CONFIG_ENV_VAR}: {}", path.display());
        return Some(path);
    }

    let default = config_dir?.join("roamer").join(CONFIG_FILE_NAME);
    if default.is_file() {
        log::debug!("Using default config: {}", default.display());
        Some(default)
    } else {
        log::debug!("No config file at {}", default.display());
        None
    }
}

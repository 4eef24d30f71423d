//! Configuration loading for roamer.
//!
//! This crate provides the configuration types and loading functionality for
//! the roamer CLI. Configuration is a single optional TOML file; every setting
//! has a default.
//!
//! # Example
//!
//! ```rust,ignore
//! use roamer_config::load_config;
//!
//! let loaded = load_config(None)?;
//! let trash = loaded.config.resolve_trash_dir()?;
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod discovery;
mod error;
mod toml_loader;
mod types;

pub use discovery::{CONFIG_ENV_VAR, CONFIG_FILE_NAME, discover_config};
pub use error::ConfigError;
pub use toml_loader::load_toml_config;
pub use types::{Config, LoadedConfig};

use std::env;
use std::path::{Path, PathBuf};

/// Editor used when neither the config nor the environment names one.
pub const FALLBACK_EDITOR: &str = "vi";

/// Discover and load the configuration.
///
/// Falls back to the default configuration when no file is found.
///
/// # Arguments
///
/// * `explicit` - Path given on the command line, if any
///
/// # Errors
///
/// * If a discovered file cannot be read
/// * If a discovered file cannot be parsed
pub fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
    let Some(path) = discover_config(explicit) else {
        return Ok(LoadedConfig {
            config: Config::default(),
            config_path: None,
        });
    };

    let config = load_toml_config(&path)?;
    Ok(LoadedConfig {
        config,
        config_path: Some(path),
    })
}

impl Config {
    /// The trash directory, defaulting to `roamer/trash` in the platform data
    /// directory.
    ///
    /// # Errors
    ///
    /// * If no trash directory is configured and no data directory exists
    pub fn resolve_trash_dir(&self) -> Result<PathBuf, ConfigError> {
        self.resolve_trash_dir_with(dirs::data_dir())
    }

    fn resolve_trash_dir_with(&self, data_dir: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
        if let Some(dir) = &self.trash_dir {
            return Ok(dir.clone());
        }
        data_dir
            .map(|dir| dir.join("roamer").join("trash"))
            .ok_or(ConfigError::NoDataDir)
    }

    /// The editor command: the config, then `$VISUAL`, then `$EDITOR`, then `vi`.
    #[must_use]
    pub fn resolve_editor(&self) -> String {
        self.resolve_editor_with(|key| env::var(key).ok())
    }

    fn resolve_editor_with(&self, var: impl Fn(&str) -> Option<String>) -> String {
        let non_empty = |editor: Option<String>| editor.filter(|e| !e.trim().is_empty());

        non_empty(self.editor.clone())
            .or_else(|| non_empty(var("VISUAL")))
            .or_else(|| non_empty(var("EDITOR")))
            .unwrap_or_else(|| FALLBACK_EDITOR.to_string())
    }
}

// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file, and resolving them into the
//! per-run [`RunContext`].
//!
//! # Examples
//!
//! ```no_run
//! use dji_photo_coords::config::{self, Config, RunContext};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.recursive = Some(true);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // Resolve the settings for one run over a folder of photos
//! let context = RunContext::resolve(PathBuf::from("./flight"), None, &config);
//! assert!(context.scan_options.recursive);
//! ```

pub mod defaults;

use crate::directory_scanner::{ExtensionMatch, ScanOptions};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub use defaults::{
    APP_NAME, CONFIG_FILE, DEFAULT_MATCH_ANY_CASE, DEFAULT_OUTPUT_FILE, DEFAULT_RECURSIVE,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output_file: Option<String>,
    #[serde(default)]
    pub recursive: Option<bool>,
    #[serde(default)]
    pub match_any_case: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_file: Some(DEFAULT_OUTPUT_FILE.to_string()),
            recursive: Some(DEFAULT_RECURSIVE),
            match_any_case: Some(DEFAULT_MATCH_ANY_CASE),
        }
    }
}

impl Config {
    /// Scan options described by this configuration.
    #[must_use]
    pub fn scan_options(&self) -> ScanOptions {
        let extension_match = if self.match_any_case.unwrap_or(DEFAULT_MATCH_ANY_CASE) {
            ExtensionMatch::AnyCase
        } else {
            ExtensionMatch::Strict
        };
        ScanOptions {
            recursive: self.recursive.unwrap_or(DEFAULT_RECURSIVE),
            extension_match,
        }
    }
}

/// Returns the platform-specific settings file location, if one exists.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Reads settings from `path`; a file that is not valid TOML yields defaults
/// and a warning naming the file.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match parse_settings(&content) {
        Ok(config) => Ok(config),
        Err(error) => {
            warn!(path = %path.display(), %error, "Ignoring invalid settings file, using defaults");
            Ok(Config::default())
        }
    }
}

/// Parses settings text without any fallback.
pub fn parse_settings(content: &str) -> Result<Config> {
    Ok(toml::from_str(content)?)
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

// ==========================================================================
// Run Context
// ==========================================================================

/// Everything one batch run needs, resolved once and passed by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct RunContext {
    pub input_dir: PathBuf,
    pub output_path: PathBuf,
    pub scan_options: ScanOptions,
}

impl RunContext {
    /// Resolves a run from the input folder, an optional output path given on
    /// the command line, and the loaded settings.
    ///
    /// Output precedence: explicit override, then the settings file, then
    /// [`DEFAULT_OUTPUT_FILE`].
    #[must_use]
    pub fn resolve(input_dir: PathBuf, output_override: Option<PathBuf>, config: &Config) -> Self {
        let output_path = output_override
            .or_else(|| config.output_file.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE));

        Self {
            input_dir,
            output_path,
            scan_options: config.scan_options(),
        }
    }
}

//! Configuration module for promgrep
//!
//! This module provides configuration structures and loading mechanisms for
//! the scanner. Configuration can be loaded from TOML files and/or environment
//! variables, and is finally overridden by command-line flags.

mod defaults;
mod loading;

#[cfg(test)]
mod tests;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use strum_macros::{Display, EnumString};

pub use defaults::DEFAULT_LIBRARY_IMPORT;

use defaults::*;

/// Returns the path to the global configuration file
///
/// The global config is stored at `~/.promgrep/config.toml`.
pub fn global_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| Error::config("Unable to determine home directory".to_string()))?;
    Ok(home_dir.join(".promgrep").join("config.toml"))
}

/// Main configuration structure for promgrep
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Scan configuration
    #[serde(default)]
    pub scan: ScanConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Which files are scanned and which make a file relevant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Import paths of the metric library; a file importing none of them is skipped
    #[serde(default = "default_library_imports")]
    pub library_imports: Vec<String>,

    /// Source file extensions to consider (without the dot)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// File name suffixes excluded from the scan
    #[serde(default = "default_skip_suffixes")]
    pub skip_suffixes: Vec<String>,

    /// Glob patterns excluded from the scan
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Directory names never descended into
    #[serde(default)]
    pub ignored_dirs: Vec<String>,

    /// Honour .gitignore and friends while walking
    #[serde(default)]
    pub respect_gitignore: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            library_imports: default_library_imports(),
            extensions: default_extensions(),
            skip_suffixes: default_skip_suffixes(),
            ignore_patterns: Vec::new(),
            ignored_dirs: Vec::new(),
            respect_gitignore: false,
        }
    }
}

/// Result presentation format
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    /// One line per hit
    #[default]
    Text,
    /// A JSON array of hits
    Json,
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.scan.library_imports.is_empty() {
            return Err(Error::config(
                "scan.library_imports must name at least one import path".to_string(),
            ));
        }
        if let Some(empty) = self.scan.library_imports.iter().find(|p| p.trim().is_empty()) {
            return Err(Error::config(format!(
                "Invalid library import '{empty}': import paths must not be blank"
            )));
        }

        if self.scan.extensions.is_empty() {
            return Err(Error::config(
                "scan.extensions must name at least one extension".to_string(),
            ));
        }
        if let Some(dotted) = self.scan.extensions.iter().find(|e| e.starts_with('.')) {
            return Err(Error::config(format!(
                "Invalid extension '{dotted}': list extensions without the leading dot"
            )));
        }

        for pattern in &self.scan.ignore_patterns {
            glob::Pattern::new(pattern).map_err(|e| {
                Error::config(format!("Invalid ignore pattern '{pattern}': {e}"))
            })?;
        }

        Ok(())
    }
}

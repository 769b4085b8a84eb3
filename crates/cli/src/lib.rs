//! Library interface for the promgrep CLI
//!
//! This module exposes configuration resolution and output formatting for
//! integration testing while keeping the main binary logic in main.rs.

pub mod output;

use anyhow::{Context, Result};
use promgrep_core::config::{Config, OutputFormat};
use std::path::Path;

/// Load configuration and apply command-line overrides
///
/// Flags take precedence over environment variables, which take precedence
/// over the config file.
pub fn resolve_config(config_path: Option<&Path>, format: Option<OutputFormat>) -> Result<Config> {
    let mut config = Config::load(config_path).context("Failed to load configuration")?;
    if let Some(format) = format {
        config.output.format = format;
    }
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

//! Configuration loading from files and environment variables

use crate::error::{Error, Result};
use config::{Config as ConfigLib, Environment, File, FileFormat};
use std::path::Path;
use tracing::debug;

use super::{global_config_path, Config};

/// Keys whose environment values are comma-separated lists
const LIST_KEYS: &[&str] = &[
    "scan.library_imports",
    "scan.extensions",
    "scan.skip_suffixes",
    "scan.ignore_patterns",
    "scan.ignored_dirs",
];

impl Config {
    /// Loads configuration from a TOML file with environment variable overrides
    ///
    /// Environment variables are prefixed with `PROMGREP_` and use double underscores
    /// for nested values. For example:
    /// - `PROMGREP_OUTPUT__FORMAT=json`
    /// - `PROMGREP_SCAN__LIBRARY_IMPORTS=example.com/a,example.com/b`
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut builder = ConfigLib::builder();

        // Add the config file if it exists
        if path.exists() {
            debug!("Loading configuration from {}", path.display());
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }

        let mut environment = Environment::with_prefix("PROMGREP")
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .try_parsing(true);
        for key in LIST_KEYS {
            environment = environment.with_list_parse_key(key);
        }
        builder = builder.add_source(environment);

        let config = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| Error::config(format!("Failed to deserialize config: {e}")))
    }

    /// Creates a config from a TOML string (useful for testing)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration
    ///
    /// Precedence (lowest to highest):
    /// 1. Hardcoded defaults
    /// 2. Config file (~/.promgrep/config.toml or custom --config path)
    /// 3. Environment variables (PROMGREP_*)
    ///
    /// An explicitly requested file must exist; the global file is optional.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = match config_path {
            Some(p) => {
                if !p.exists() {
                    return Err(Error::config(format!(
                        "Config file not found: {}",
                        p.display()
                    )));
                }
                p.to_path_buf()
            }
            None => global_config_path()?,
        };
        Self::from_file(&path)
    }
}

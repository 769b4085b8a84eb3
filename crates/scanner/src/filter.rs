//! Path filtering for source discovery
//!
//! [`IgnoreFilter`] prunes directories and files by name or glob pattern.
//! [`SourceFilter`] decides which of the remaining files are Go sources.

use glob::Pattern;
use promgrep_core::error::{Error, Result};
use promgrep_core::ScanConfig;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, trace};

/// Excludes paths by directory name or glob pattern
///
/// Patterns are matched against paths relative to the scan root.
/// By default, ignores nothing.
#[derive(Clone, Default)]
pub struct IgnoreFilter {
    patterns: Arc<Vec<Pattern>>,
    ignored_dirs: Arc<HashSet<String>>,
}

impl std::fmt::Debug for IgnoreFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IgnoreFilter")
            .field(
                "patterns",
                &self.patterns.iter().map(Pattern::as_str).collect::<Vec<_>>(),
            )
            .field("ignored_dirs", &self.ignored_dirs)
            .finish()
    }
}

impl IgnoreFilter {
    pub fn builder() -> IgnoreFilterBuilder {
        IgnoreFilterBuilder::default()
    }

    pub fn from_config(config: &ScanConfig) -> Result<Self> {
        Self::builder()
            .patterns(config.ignore_patterns.iter().cloned())
            .ignored_dirs(config.ignored_dirs.iter().cloned())
            .build()
    }

    /// Check if a path should be ignored
    pub fn should_ignore(&self, path: &Path) -> bool {
        if let Some(file_name) = path.file_name() {
            let name = file_name.to_string_lossy();
            if self.ignored_dirs.contains(name.as_ref()) {
                trace!("Ignoring directory: {:?}", path);
                return true;
            }
        }

        let path_str = path.to_string_lossy();
        if self.patterns.iter().any(|p| p.matches(&path_str)) {
            debug!("Path {:?} matches ignore pattern", path);
            return true;
        }

        false
    }
}

/// Builder for IgnoreFilter
#[derive(Debug, Default)]
pub struct IgnoreFilterBuilder {
    patterns: Vec<String>,
    ignored_dirs: HashSet<String>,
}

impl IgnoreFilterBuilder {
    pub fn add_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    pub fn patterns(mut self, patterns: impl IntoIterator<Item = String>) -> Self {
        self.patterns.extend(patterns);
        self
    }

    pub fn ignored_dirs(mut self, dirs: impl IntoIterator<Item = String>) -> Self {
        self.ignored_dirs.extend(dirs);
        self
    }

    pub fn build(self) -> Result<IgnoreFilter> {
        let patterns = self
            .patterns
            .iter()
            .map(|p| {
                Pattern::new(p)
                    .map_err(|e| Error::config(format!("Invalid ignore pattern '{p}': {e}")))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(IgnoreFilter {
            patterns: Arc::new(patterns),
            ignored_dirs: Arc::new(self.ignored_dirs),
        })
    }
}

/// Accepts files by extension, rejecting configured suffixes
#[derive(Debug, Clone)]
pub struct SourceFilter {
    extensions: Vec<String>,
    skip_suffixes: Vec<String>,
}

impl SourceFilter {
    pub fn new(extensions: Vec<String>, skip_suffixes: Vec<String>) -> Self {
        Self {
            extensions,
            skip_suffixes,
        }
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(config.extensions.clone(), config.skip_suffixes.clone())
    }

    pub fn accepts(&self, path: &Path) -> bool {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };

        self.extensions.iter().any(|ext| ext == extension)
            && !self
                .skip_suffixes
                .iter()
                .any(|suffix| file_name.ends_with(suffix.as_str()))
    }
}

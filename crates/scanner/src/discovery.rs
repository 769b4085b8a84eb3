//! Source file discovery

use crate::filter::{IgnoreFilter, SourceFilter};
use ignore::WalkBuilder;
use promgrep_core::error::{Error, Result};
use promgrep_core::ScanConfig;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Collect the source files under `root`, sorted by path
///
/// Hidden entries are visited. Ignore files are honoured only when
/// `respect_gitignore` is set. Any walk error (a missing root, an unreadable
/// directory) aborts discovery.
pub fn discover_source_files(root: &Path, config: &ScanConfig) -> Result<Vec<PathBuf>> {
    let ignore_filter = IgnoreFilter::from_config(config)?;
    let source_filter = SourceFilter::from_config(config);
    let walk_root = root.to_path_buf();

    let walker = WalkBuilder::new(root)
        .standard_filters(config.respect_gitignore)
        .hidden(false)
        .require_git(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            let relative = entry
                .path()
                .strip_prefix(&walk_root)
                .unwrap_or_else(|_| entry.path());
            relative.as_os_str().is_empty() || !ignore_filter.should_ignore(relative)
        })
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry
            .map_err(|e| Error::discovery(format!("Failed to walk {}: {e}", root.display())))?;

        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        if source_filter.accepts(entry.path()) {
            files.push(entry.into_path());
        }
    }

    debug!("Discovered {} source files under {}", files.len(), root.display());
    Ok(files)
}

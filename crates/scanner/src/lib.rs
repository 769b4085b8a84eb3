//! Metric declaration scanning for promgrep
//!
//! Walks a directory tree, keeps the Go files that import the metric
//! library, recognizes constructor calls in them and ranks the declarations
//! against an optional name query.

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

pub mod discovery;
pub mod driver;
pub mod filter;
pub mod matcher;
pub mod ranking;

pub use discovery::discover_source_files;
pub use driver::{FileScan, ScanReport, Scanner};
pub use filter::{IgnoreFilter, IgnoreFilterBuilder, SourceFilter};
pub use matcher::{select_matcher, MatchAll, MatchName, Matcher};
pub use ranking::rank_hits;

use promgrep_core::error::Result;
use promgrep_core::ScanConfig;
use std::path::Path;

/// Scan `root` for declarations matching `query`, or all of them when `None`
pub fn scan(root: &Path, config: &ScanConfig, query: Option<&str>) -> Result<ScanReport> {
    Scanner::new(config, select_matcher(query))?.scan_root(root, config)
}

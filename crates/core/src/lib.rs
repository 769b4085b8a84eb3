//! Core types for the promgrep metric declaration finder
//!
//! This crate provides the foundational abstractions used throughout
//! promgrep, including:
//!
//! - **Metrics**: metric kinds, literal options, scores and match hits
//! - **Qualified names**: the client library's name synthesis rule
//! - **Configuration**: scan and output settings
//! - **Error handling**: Unified error types
//!

pub mod config;
pub mod error;
pub mod metrics;
pub mod qualified_name;

// Re-export main types for convenience
pub use config::{Config, OutputConfig, OutputFormat, ScanConfig};
pub use error::{Error, Result, ResultExt};
pub use metrics::{Declaration, MatchHit, MetricKind, MetricOpts, Score, SourcePosition};
pub use qualified_name::qualified_metric_name;

/// Version of the core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Result, ResultExt};
    pub use crate::metrics::{MatchHit, MetricKind, MetricOpts};
}

//! promgrep - find Prometheus metric declarations in Go source trees
//!
//! This binary provides the command-line interface for the scanner.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::{Context, Result};
use clap::Parser;
use promgrep::output::write_hits;
use promgrep::resolve_config;
use promgrep_core::config::OutputFormat;
use promgrep_scanner::scan;
use std::io;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "promgrep")]
#[command(about = "Find Prometheus metric declarations in Go source code")]
#[command(version)]
struct Cli {
    /// Metric name to search for; lists every declaration when omitted
    query: Option<String>,

    /// Directory to scan
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    root: PathBuf,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(short, long, value_name = "FORMAT")]
    format: Option<OutputFormat>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let config = resolve_config(cli.config.as_deref(), cli.format)?;
    debug!("Scanning {} with {:?}", cli.root.display(), config.scan);

    let report = scan(&cli.root, &config.scan, cli.query.as_deref())
        .with_context(|| format!("Failed to scan {}", cli.root.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_hits(&mut out, &report.hits, config.output.format)
}

/// Initialize logging system
///
/// Logs go to stderr so stdout carries only results. `RUST_LOG` wins over
/// the level chosen by `--verbose`.
fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{}={level},promgrep_core={level},promgrep_languages={level},promgrep_scanner={level}",
            env!("CARGO_CRATE_NAME")
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

    Ok(())
}

//! Result formatting for stdout
//!
//! Text output prints one line per hit. Unscored hits (list-all mode) show
//! their help text, scored hits show the score instead. JSON output is an
//! array of flat hit objects.

use anyhow::{Context, Result};
use promgrep_core::{MatchHit, OutputFormat};
use serde::Serialize;
use std::io::Write;

/// Separator between the location and the metric in text output
const LOCATION_GAP: &str = "    ";

/// One hit as written in JSON output
#[derive(Debug, Serialize)]
pub struct FormattedHit<'a> {
    /// Similarity score, `-1` when unscored
    pub score: i32,
    /// File path relative to the scan root
    pub path: String,
    pub line: usize,
    pub qualified_name: &'a str,
    pub help: &'a str,
    /// Kind label (`Counter`, `Gauge`, `Histogram`)
    pub kind: String,
}

impl<'a> From<&'a MatchHit> for FormattedHit<'a> {
    fn from(hit: &'a MatchHit) -> Self {
        Self {
            score: hit.score.value(),
            path: hit.path.display().to_string(),
            line: hit.line,
            qualified_name: &hit.qualified_name,
            help: &hit.help,
            kind: hit.kind.to_string(),
        }
    }
}

/// Format a hit as a single text line
pub fn format_text_line(hit: &MatchHit) -> String {
    let location = format!("{}:{}", hit.path.display(), hit.line);
    if hit.score.is_scored() {
        format!(
            "{location}{LOCATION_GAP}{} {} score:{}",
            hit.qualified_name, hit.kind, hit.score
        )
    } else {
        format!(
            "{location}{LOCATION_GAP}{} {}: {}",
            hit.qualified_name, hit.kind, hit.help
        )
    }
}

/// Write hits in the requested format
pub fn write_hits<W: Write>(writer: &mut W, hits: &[MatchHit], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for hit in hits {
                writeln!(writer, "{}", format_text_line(hit)).context("Failed to write output")?;
            }
        }
        OutputFormat::Json => {
            let formatted: Vec<FormattedHit<'_>> = hits.iter().map(FormattedHit::from).collect();
            serde_json::to_writer_pretty(&mut *writer, &formatted)
                .context("Failed to serialize hits")?;
            writeln!(writer).context("Failed to write output")?;
        }
    }
    writer.flush().context("Failed to flush output")
}

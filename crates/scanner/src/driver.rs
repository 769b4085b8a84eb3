//! Scan driver
//!
//! Runs every discovered file through the two parse tiers, recognizes
//! constructor calls, applies the run's matcher and ranks the result.

use crate::discovery::discover_source_files;
use crate::matcher::Matcher;
use crate::ranking::rank_hits;
use promgrep_core::error::{Error, Result};
use promgrep_core::{MatchHit, ScanConfig};
use promgrep_languages::{declaration_for_call, GoParser};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};

/// Outcome of scanning a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileScan {
    /// The file does not import the metric library
    Irrelevant,
    /// Hits found in an importing file, in document order
    Scanned(Vec<MatchHit>),
}

/// Ranked hits and per-run counters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Hits ranked by descending score
    pub hits: Vec<MatchHit>,
    /// Files whose headers were parsed
    pub files_scanned: usize,
    /// Files importing the metric library
    pub files_relevant: usize,
    /// Files skipped because they failed to parse
    pub files_failed: usize,
}

/// Scans Go sources for metric declarations
pub struct Scanner {
    parser: GoParser,
    matcher: Box<dyn Matcher>,
    library_imports: Vec<String>,
}

impl std::fmt::Debug for Scanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("library_imports", &self.library_imports)
            .finish_non_exhaustive()
    }
}

impl Scanner {
    pub fn new(config: &ScanConfig, matcher: Box<dyn Matcher>) -> Result<Self> {
        Ok(Self {
            parser: GoParser::new()?,
            matcher,
            library_imports: config.library_imports.clone(),
        })
    }

    /// Scan one file's source
    ///
    /// `path` is recorded in the hits as given. Parse failures are returned
    /// as errors; matcher failures are logged and the declaration dropped.
    pub fn scan_source(&mut self, path: &Path, source: &str) -> Result<FileScan> {
        let header = self.parser.parse_imports(path, source)?;

        let Some(import) = header.find_import(&self.library_imports) else {
            trace!("{}: metric library not imported", path.display());
            return Ok(FileScan::Irrelevant);
        };
        if let Some(alias) = import.alias.as_deref() {
            if !import.path.ends_with(&format!("/{alias}")) {
                debug!(
                    "{}: {} imported as '{alias}'; calls through the alias are not recognized",
                    path.display(),
                    import.path
                );
            }
        }

        let file = header.into_full()?;
        let mut hits = Vec::new();
        for call in file.call_sites()? {
            let Some(declaration) = declaration_for_call(&call, &file) else {
                continue;
            };
            match self.matcher.match_declaration(&declaration) {
                Ok(Some(hit)) => hits.push(hit),
                Ok(None) => {}
                Err(e) => warn!(
                    "{}:{}: skipping {}: {e}",
                    path.display(),
                    declaration.position.line,
                    call.spelling()
                ),
            }
        }

        debug!("{}: {} hits", path.display(), hits.len());
        Ok(FileScan::Scanned(hits))
    }

    /// Scan the given files, reporting paths relative to `root`
    ///
    /// A file that fails to parse is logged and counted; a file that cannot
    /// be read aborts the scan.
    pub fn scan_files(&mut self, root: &Path, files: &[PathBuf]) -> Result<ScanReport> {
        let mut report = ScanReport::default();

        for file in files {
            let display_path = file.strip_prefix(root).unwrap_or(file);
            let bytes = fs::read(file)
                .map_err(|e| Error::with_context(format!("Failed to read {}", file.display()), e))?;

            let outcome = match String::from_utf8(bytes) {
                Ok(source) => self.scan_source(display_path, &source),
                Err(_) => Err(Error::parse(
                    display_path.display().to_string(),
                    "invalid UTF-8 encoding",
                )),
            };

            match outcome {
                Ok(FileScan::Irrelevant) => report.files_scanned += 1,
                Ok(FileScan::Scanned(hits)) => {
                    report.files_scanned += 1;
                    report.files_relevant += 1;
                    report.hits.extend(hits);
                }
                Err(e) if e.is_file_scoped() => {
                    warn!("Skipping file: {e}");
                    report.files_failed += 1;
                }
                Err(e) => return Err(e),
            }
        }

        rank_hits(&mut report.hits);
        info!(
            "Scanned {} files ({} import the metric library, {} failed), {} hits",
            report.files_scanned,
            report.files_relevant,
            report.files_failed,
            report.hits.len()
        );
        Ok(report)
    }

    /// Discover and scan every source file under `root`
    pub fn scan_root(&mut self, root: &Path, config: &ScanConfig) -> Result<ScanReport> {
        let files = discover_source_files(root, config)?;
        self.scan_files(root, &files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{MatchAll, MatchName};
    use pretty_assertions::assert_eq;
    use promgrep_core::{MetricKind, Score};

    fn scanner(matcher: Box<dyn Matcher>) -> Scanner {
        Scanner::new(&ScanConfig::default(), matcher).unwrap()
    }

    const IMPORTING: &str = r#"package db

import "github.com/prometheus/client_golang/prometheus"

var (
	queries = prometheus.NewCounterVec(prometheus.CounterOpts{
		Namespace: "app",
		Subsystem: "db",
		Name:      "queries_total",
		Help:      "Queries executed.",
	}, []string{"table"})

	latency = prometheus.NewHistogram(prometheus.HistogramOpts{
		Name: "query_seconds",
		Help: "Query latency.",
	})

	pool = prometheus.NewGaugeFunc(prometheus.GaugeOpts{Name: "pool_size"}, poolSize)
)
"#;

    #[test]
    fn test_scan_source_lists_declarations_in_order() {
        let mut scanner = scanner(Box::new(MatchAll));
        let FileScan::Scanned(hits) = scanner
            .scan_source(Path::new("db/metrics.go"), IMPORTING)
            .unwrap()
        else {
            panic!("file imports the library");
        };

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].qualified_name, "app_db_queries_total");
        assert_eq!(hits[0].kind, MetricKind::Counter);
        assert_eq!(hits[0].line, 6);
        assert_eq!(hits[0].path, PathBuf::from("db/metrics.go"));
        assert_eq!(hits[1].qualified_name, "query_seconds");
        assert_eq!(hits[1].kind, MetricKind::Histogram);
        assert_eq!(hits[1].help, "Query latency.");
    }

    #[test]
    fn test_scan_source_without_import_is_irrelevant() {
        let source = "package util\n\nimport \"fmt\"\n\nvar c = prometheus.NewCounter(prometheus.CounterOpts{Name: \"x\"})\n";
        let mut scanner = scanner(Box::new(MatchAll));
        assert_eq!(
            scanner.scan_source(Path::new("util.go"), source).unwrap(),
            FileScan::Irrelevant
        );
    }

    #[test]
    fn test_irrelevant_file_with_body_error_is_not_a_failure() {
        let source = "package util\n\nimport \"fmt\"\n\nfunc f() {\n\tfmt.Println(\"x\"\n}\n";
        let mut scanner = scanner(Box::new(MatchAll));
        assert_eq!(
            scanner.scan_source(Path::new("util.go"), source).unwrap(),
            FileScan::Irrelevant
        );
    }

    #[test]
    fn test_aliased_import_is_relevant_but_calls_are_not_recognized() {
        let source = r#"package a

import prom "github.com/prometheus/client_golang/prometheus"

var c = prom.NewCounter(prom.CounterOpts{Name: "aliased_total"})
"#;
        let mut scanner = scanner(Box::new(MatchAll));
        assert_eq!(
            scanner.scan_source(Path::new("a.go"), source).unwrap(),
            FileScan::Scanned(Vec::new())
        );
    }

    #[test]
    fn test_query_filters_and_scores() {
        let mut scanner = scanner(Box::new(MatchName::new("query_seconds")));
        let FileScan::Scanned(hits) = scanner
            .scan_source(Path::new("db/metrics.go"), IMPORTING)
            .unwrap()
        else {
            panic!("file imports the library");
        };
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].score, Score::Similarity(100));
    }

    #[test]
    fn test_matcher_failure_drops_declaration() {
        let source = r#"package a

import "github.com/prometheus/client_golang/prometheus"

var (
	a = prometheus.NewGauge(prometheus.GaugeOpts{})
	b = prometheus.NewGauge(prometheus.GaugeOpts{Name: "up"})
)
"#;
        let mut scanner = scanner(Box::new(MatchName::new("")));
        let FileScan::Scanned(hits) = scanner.scan_source(Path::new("a.go"), source).unwrap()
        else {
            panic!("file imports the library");
        };
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].qualified_name, "up");
        assert_eq!(hits[0].score, Score::Similarity(0));
    }

    #[test]
    fn test_parse_failure_is_file_scoped() {
        let source = r#"package a

import "github.com/prometheus/client_golang/prometheus"

var c = prometheus.NewCounter(prometheus.CounterOpts{Name: "x"}
"#;
        let mut scanner = scanner(Box::new(MatchAll));
        let err = scanner.scan_source(Path::new("a.go"), source).unwrap_err();
        assert!(err.is_file_scoped());
    }
}

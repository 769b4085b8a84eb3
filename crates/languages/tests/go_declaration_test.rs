//! Declaration extraction over realistic Go files

use pretty_assertions::assert_eq;
use promgrep_core::{Declaration, MetricKind};
use promgrep_languages::{declaration_for_call, GoParser};
use std::path::Path;

const LIBRARY: &str = "github.com/prometheus/client_golang/prometheus";

fn declarations(source: &str) -> Vec<Declaration> {
    let mut parser = GoParser::new().unwrap();
    let file = parser
        .parse_imports(Path::new("svc/metrics.go"), source)
        .unwrap()
        .into_full()
        .unwrap();
    file.call_sites()
        .unwrap()
        .iter()
        .filter_map(|call| declaration_for_call(call, &file))
        .collect()
}

#[test]
fn test_mixed_constructors() {
    let source = r#"package svc

import (
	"github.com/prometheus/client_golang/prometheus"
	"github.com/prometheus/client_golang/prometheus/promauto"
)

const subsystem = "cache"

var (
	hits = promauto.NewCounter(prometheus.CounterOpts{
		Namespace: "svc",
		Subsystem: subsystem,
		Name:      "hits_total",
		Help:      "Cache hits.",
	})

	size = prometheus.NewGaugeVec(prometheus.GaugeOpts{
		Subsystem: "cache",
		Name:      "entries",
	}, []string{"shard"})

	summary = prometheus.NewSummary(prometheus.SummaryOpts{Name: "ignored"})
)

func init() {
	prometheus.MustRegister(size)
}

func observe() {
	h := prometheus.NewHistogram(prometheus.HistogramOpts{
		Name: "observe_seconds",
	})
	_ = h
}
"#;

    let found: Vec<(MetricKind, String, usize)> = declarations(source)
        .into_iter()
        .map(|d| (d.kind, d.qualified_name(), d.position.line))
        .collect();

    assert_eq!(
        found,
        vec![
            // Subsystem is not a literal, so only the name is emitted
            (MetricKind::Counter, "hits_total".to_string(), 11),
            (MetricKind::Gauge, "cache_entries".to_string(), 18),
            (MetricKind::Histogram, "observe_seconds".to_string(), 31),
        ]
    );
}

#[test]
fn test_declaration_fields() {
    let source = r#"package svc

import "github.com/prometheus/client_golang/prometheus"

var errs = prometheus.NewCounterVec(
	prometheus.CounterOpts{
		Name: "errors_total",
		Help: `Errors by "kind".`,
	},
	[]string{"kind"},
)
"#;

    let decls = declarations(source);
    assert_eq!(decls.len(), 1);
    let decl = &decls[0];
    assert_eq!(decl.position.path, Path::new("svc/metrics.go"));
    assert_eq!(decl.position.line, 5);
    assert_eq!(decl.opts.name(), "errors_total");
    // raw strings keep their backquotes
    assert_eq!(decl.opts.help(), "`Errors by \"kind\".`");
}

#[test]
fn test_relevance_check_reads_import_block() {
    let source = r#"package svc

import (
	"context"
	_ "embed"
	. "strings"
	prom "github.com/prometheus/client_golang/prometheus"
)
"#;
    let mut parser = GoParser::new().unwrap();
    let header = parser.parse_imports(Path::new("x.go"), source).unwrap();

    let import = header.find_import(&[LIBRARY]).expect("library imported");
    assert_eq!(import.alias.as_deref(), Some("prom"));
    let aliases: Vec<Option<&str>> = header.imports().iter().map(|i| i.alias.as_deref()).collect();
    assert_eq!(aliases, vec![None, Some("_"), Some("."), Some("prom")]);
}

#[test]
fn test_multiple_import_declarations() {
    let source = "package svc\n\nimport \"fmt\"\nimport \"github.com/prometheus/client_golang/prometheus\"\n\nvar _ = fmt.Sprint\n";
    let mut parser = GoParser::new().unwrap();
    let header = parser.parse_imports(Path::new("x.go"), source).unwrap();
    assert_eq!(header.imports().len(), 2);
    assert!(header.find_import(&[LIBRARY]).is_some());
}

//! Metric declaration data model
//!
//! Types shared between the Go extraction layer and the scanner: the kind of
//! instrument a constructor builds, the literal options recovered from its
//! call site, and the hit records a matcher emits.

use crate::error::{Error, Result};
use crate::qualified_name::qualified_metric_name;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use strum_macros::{Display, EnumString};

/// Option key holding the metric namespace
pub const OPT_NAMESPACE: &str = "Namespace";
/// Option key holding the metric subsystem
pub const OPT_SUBSYSTEM: &str = "Subsystem";
/// Option key holding the bare metric name
pub const OPT_NAME: &str = "Name";
/// Option key holding the help text
pub const OPT_HELP: &str = "Help";

/// Kind of metric instrument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum MetricKind {
    Gauge,
    Histogram,
    Counter,
}

/// Literal-valued options recovered from a constructor call
///
/// An absent key reads as the empty string; nothing downstream distinguishes
/// an omitted field from one set to `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricOpts {
    fields: BTreeMap<String, String>,
}

impl MetricOpts {
    /// Create an empty option set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a field value, replacing any earlier value for the same key
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Value of a field, or `""` when absent
    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn namespace(&self) -> &str {
        self.get(OPT_NAMESPACE)
    }

    pub fn subsystem(&self) -> &str {
        self.get(OPT_SUBSYSTEM)
    }

    pub fn name(&self) -> &str {
        self.get(OPT_NAME)
    }

    pub fn help(&self) -> &str {
        self.get(OPT_HELP)
    }

    /// Number of recovered fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over recovered fields in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for MetricOpts
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut opts = Self::new();
        for (key, value) in iter {
            opts.insert(key, value);
        }
        opts
    }
}

/// Similarity of a declaration to the query
///
/// `Unscored` is emitted in list-all mode and renders as `-1`. It orders
/// below every similarity value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum Score {
    Unscored,
    Similarity(u8),
}

impl Score {
    /// Highest similarity value
    pub const MAX: u8 = 100;

    /// Build a similarity score, rejecting values outside `0..=100`
    pub fn similarity(value: i64) -> Result<Self> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= Self::MAX)
            .map(Self::Similarity)
            .ok_or_else(|| Error::matching(format!("score {value} is outside 0..=100")))
    }

    /// Integer form, `-1` for unscored
    pub fn value(self) -> i32 {
        match self {
            Self::Unscored => -1,
            Self::Similarity(v) => i32::from(v),
        }
    }

    pub fn is_scored(self) -> bool {
        matches!(self, Self::Similarity(_))
    }
}

impl From<Score> for i32 {
    fn from(score: Score) -> Self {
        score.value()
    }
}

impl TryFrom<i32> for Score {
    type Error = String;

    fn try_from(value: i32) -> std::result::Result<Self, Self::Error> {
        if value == -1 {
            return Ok(Self::Unscored);
        }
        Self::similarity(i64::from(value)).map_err(|e| e.to_string())
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Where a declaration starts in its file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcePosition {
    pub path: PathBuf,
    /// 1-based line
    pub line: usize,
    /// 0-based byte column
    pub column: usize,
}

impl SourcePosition {
    pub fn new(path: impl Into<PathBuf>, line: usize, column: usize) -> Self {
        Self {
            path: path.into(),
            line,
            column,
        }
    }

    /// Create a SourcePosition from the start of a tree-sitter node
    pub fn from_tree_sitter_node(path: &Path, node: tree_sitter::Node) -> Self {
        let start = node.start_position();
        Self {
            path: path.to_path_buf(),
            line: start.row + 1,
            column: start.column,
        }
    }
}

/// A recognized constructor call, ready to be matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: MetricKind,
    pub opts: MetricOpts,
    pub position: SourcePosition,
}

impl Declaration {
    /// Name the metric library would emit for this declaration
    pub fn qualified_name(&self) -> String {
        qualified_metric_name(&self.opts)
    }
}

/// One matched declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchHit {
    pub score: Score,
    pub path: PathBuf,
    pub line: usize,
    pub qualified_name: String,
    pub help: String,
    pub kind: MetricKind,
}

impl MatchHit {
    /// Build the hit for a declaration with the given score
    pub fn from_declaration(declaration: &Declaration, score: Score) -> Self {
        Self {
            score,
            path: declaration.position.path.clone(),
            line: declaration.position.line,
            qualified_name: declaration.qualified_name(),
            help: declaration.opts.help().to_string(),
            kind: declaration.kind,
        }
    }
}

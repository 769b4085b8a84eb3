//! Declaration matchers
//!
//! A matcher decides whether a recognized declaration is a hit and how well
//! it scores. One matcher is selected per run: [`MatchAll`] when no query was
//! given, [`MatchName`] otherwise.

use promgrep_core::error::{Error, Result};
use promgrep_core::{qualified_metric_name, Declaration, MatchHit, MetricOpts, Score};

/// Decides whether a declaration is a hit
pub trait Matcher: Send + Sync {
    /// Returns the hit for `declaration`, or `None` when it does not match
    fn match_declaration(&self, declaration: &Declaration) -> Result<Option<MatchHit>>;
}

/// Select the matcher for a run
pub fn select_matcher(query: Option<&str>) -> Box<dyn Matcher> {
    match query {
        Some(query) => Box::new(MatchName::new(query)),
        None => Box::new(MatchAll),
    }
}

/// Lists every declaration, unscored
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchAll;

impl Matcher for MatchAll {
    fn match_declaration(&self, declaration: &Declaration) -> Result<Option<MatchHit>> {
        Ok(Some(MatchHit::from_declaration(
            declaration,
            Score::Unscored,
        )))
    }
}

/// Fuzzy match against a metric name query
#[derive(Debug, Clone)]
pub struct MatchName {
    query: String,
}

impl MatchName {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Score a set of options against the query
    ///
    /// A declaration with a namespace but no subsystem emits just its name,
    /// so a query longer than namespace and name combined is read as
    /// `<namespace>...<name>` and scored by how much of it sits between the
    /// two. Every other shape is scored by containment against the
    /// synthesized name, normalized by the longer of the two strings.
    pub fn score(&self, opts: &MetricOpts) -> Result<Option<Score>> {
        let query = self.query.as_str();
        let namespace = opts.namespace();
        let name = opts.name();

        if !namespace.is_empty()
            && opts.subsystem().is_empty()
            && query.len() > namespace.len() + name.len()
        {
            if !query.starts_with(namespace) || !query.ends_with(name) {
                return Ok(None);
            }
            let delta = query.len() - namespace.len() - name.len();
            return similarity(delta, query.len()).map(Some);
        }

        let qualified = qualified_metric_name(opts);
        if !query.contains(qualified.as_str()) && !qualified.contains(query) {
            return Ok(None);
        }

        let (delta, denominator) = if query.len() >= qualified.len() {
            (query.len() - qualified.len(), query.len())
        } else {
            (qualified.len() - query.len(), qualified.len())
        };
        similarity(delta, denominator).map(Some)
    }
}

impl Matcher for MatchName {
    fn match_declaration(&self, declaration: &Declaration) -> Result<Option<MatchHit>> {
        Ok(self
            .score(&declaration.opts)?
            .map(|score| MatchHit::from_declaration(declaration, score)))
    }
}

/// `100 - delta * 100 / denominator`, truncating
fn similarity(delta: usize, denominator: usize) -> Result<Score> {
    if denominator == 0 {
        return Err(Error::matching(
            "cannot score an empty query against an empty metric name",
        ));
    }
    let penalty = delta.saturating_mul(100) / denominator;
    let value = 100_i64 - i64::try_from(penalty).unwrap_or(i64::MAX);
    Score::similarity(value)
}

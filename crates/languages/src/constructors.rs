//! Metric constructor recognition
//!
//! Calls are recognized purely by their spelling at the call site
//! (`package.Member`), without type resolution. Vector and scalar
//! constructors of the same kind map to the same [`MetricKind`].

use promgrep_core::MetricKind;

/// A recognized constructor spelling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstructorDef {
    /// Call-site spelling, e.g. `prometheus.NewCounter`
    pub spelling: &'static str,
    /// Kind of instrument the constructor builds
    pub kind: MetricKind,
}

const fn ctor(spelling: &'static str, kind: MetricKind) -> ConstructorDef {
    ConstructorDef { spelling, kind }
}

/// Every constructor spelling promgrep recognizes
pub const CONSTRUCTORS: &[ConstructorDef] = &[
    ctor("prometheus.NewCounterVec", MetricKind::Counter),
    ctor("prometheus.NewCounter", MetricKind::Counter),
    ctor("prometheus.NewHistogramVec", MetricKind::Histogram),
    ctor("prometheus.NewHistogram", MetricKind::Histogram),
    ctor("prometheus.NewGaugeVec", MetricKind::Gauge),
    ctor("prometheus.NewGauge", MetricKind::Gauge),
    // promauto registers with the default registry as a side effect
    ctor("promauto.NewCounterVec", MetricKind::Counter),
    ctor("promauto.NewCounter", MetricKind::Counter),
    ctor("promauto.NewHistogramVec", MetricKind::Histogram),
    ctor("promauto.NewHistogram", MetricKind::Histogram),
    ctor("promauto.NewGaugeVec", MetricKind::Gauge),
    ctor("promauto.NewGauge", MetricKind::Gauge),
];

/// Look up the metric kind built by a call-site spelling
///
/// Only exact spellings are recognized.
pub fn recognize_constructor(spelling: &str) -> Option<MetricKind> {
    CONSTRUCTORS
        .iter()
        .find(|def| def.spelling == spelling)
        .map(|def| def.kind)
}

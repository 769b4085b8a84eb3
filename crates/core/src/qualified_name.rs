//! Qualified metric name synthesis.
//!
//! Reproduces the client library's own naming rule: the subsystem is joined
//! in front of the name with `_`, and the namespace is joined in front of
//! that, but only when a subsystem is also present. A namespace without a
//! subsystem contributes nothing to the emitted name.

use crate::metrics::MetricOpts;

/// Separator the client library puts between name components.
pub const NAME_SEPARATOR: char = '_';

/// Compute the fully qualified name a declaration is emitted under.
pub fn qualified_metric_name(opts: &MetricOpts) -> String {
    let namespace = opts.namespace();
    let subsystem = opts.subsystem();
    let name = opts.name();

    let mut qualified = String::with_capacity(namespace.len() + subsystem.len() + name.len() + 2);
    if !subsystem.is_empty() {
        if !namespace.is_empty() {
            qualified.push_str(namespace);
            qualified.push(NAME_SEPARATOR);
        }
        qualified.push_str(subsystem);
        qualified.push(NAME_SEPARATOR);
    }
    qualified.push_str(name);
    qualified
}

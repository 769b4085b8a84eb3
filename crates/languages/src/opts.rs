//! Metric option extraction from constructor calls
//!
//! Only keyed elements of a composite literal passed as the first argument
//! are considered, and only when the key is a plain identifier and the value
//! is a basic literal token. Everything else (constants, concatenations,
//! function calls, nested literals) is skipped, so names assembled at runtime
//! come back with missing fields.

use crate::common::{node_text, significant_children};
use crate::literal::unquote;
use promgrep_core::MetricOpts;
use tree_sitter::Node;

/// Node kinds tree-sitter-go uses for basic literal tokens
const BASIC_LITERAL_KINDS: &[&str] = &[
    "interpreted_string_literal",
    "raw_string_literal",
    "int_literal",
    "float_literal",
    "imaginary_literal",
    "rune_literal",
];

/// Node kinds a composite-literal key can take when it is a bare identifier
const IDENTIFIER_KEY_KINDS: &[&str] = &["identifier", "field_identifier"];

/// Extract literal-valued options from a `call_expression` node
///
/// Returns an empty option set when the call has no arguments or its first
/// argument is not a composite literal.
pub fn extract_opts(call: Node, source: &str) -> MetricOpts {
    let mut opts = MetricOpts::new();

    let Some(arguments) = call.child_by_field_name("arguments") else {
        return opts;
    };
    let Some(first) = significant_children(arguments).into_iter().next() else {
        return opts;
    };
    if first.kind() != "composite_literal" {
        return opts;
    }
    let Some(body) = first.child_by_field_name("body") else {
        return opts;
    };

    for element in significant_children(body) {
        if element.kind() != "keyed_element" {
            continue;
        }
        if let Some((key, value)) = keyed_literal(element, source) {
            opts.insert(key, unquote(value));
        }
    }

    opts
}

/// Split a keyed element into `(identifier, literal token)`
fn keyed_literal<'s>(element: Node, source: &'s str) -> Option<(&'s str, &'s str)> {
    let parts = significant_children(element);
    let [key, value] = parts.as_slice() else {
        return None;
    };
    let key = unwrap_literal_element(*key);
    let value = unwrap_literal_element(*value);

    if !IDENTIFIER_KEY_KINDS.contains(&key.kind()) || !BASIC_LITERAL_KINDS.contains(&value.kind())
    {
        return None;
    }

    Some((node_text(key, source).ok()?, node_text(value, source).ok()?))
}

/// Newer grammars wrap both sides of a keyed element in `literal_element`
fn unwrap_literal_element(node: Node) -> Node {
    if node.kind() == "literal_element" {
        if let Some(inner) = significant_children(node).into_iter().next() {
            return inner;
        }
    }
    node
}

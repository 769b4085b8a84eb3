//! Tree-sitter helpers shared by the Go extraction modules

use promgrep_core::error::{Error, Result};
use tree_sitter::{Node, Point, Query, QueryMatch};

/// Find a capture node by name in a query match
pub fn find_capture_node<'a>(
    query_match: &QueryMatch<'_, 'a>,
    query: &Query,
    name: &str,
) -> Option<Node<'a>> {
    query_match.captures.iter().find_map(|capture| {
        let capture_name = query.capture_names().get(capture.index as usize)?;
        if *capture_name == name {
            Some(capture.node)
        } else {
            None
        }
    })
}

/// Borrow the source text of a node
pub fn node_text<'s>(node: Node, source: &'s str) -> Result<&'s str> {
    node.utf8_text(source.as_bytes())
        .map_err(|e| Error::extraction(format!("Failed to convert node to text: {e}")))
}

/// Named children of a node, skipping comments
pub fn significant_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect()
}

/// Position of the first error or missing node under `node`, in document order
pub fn first_error_position(node: Node) -> Option<Point> {
    if !node.has_error() {
        return None;
    }
    if node.is_error() || node.is_missing() {
        return Some(node.start_position());
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .find_map(first_error_position)
        .or_else(|| Some(node.start_position()))
}

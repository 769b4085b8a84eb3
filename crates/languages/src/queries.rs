//! Query definitions for Go call-site extraction
//!
//! This module defines tree-sitter queries as Rust constants, providing
//! type-safe query definitions with associated metadata.

/// Definition of a tree-sitter query with its primary capture
#[derive(Debug, Clone, Copy)]
pub struct QueryDef {
    /// Query name used in diagnostics
    pub name: &'static str,
    /// Primary capture name in the query
    pub capture: &'static str,
    /// The tree-sitter query string
    pub query: &'static str,
}

/// Calls through a package selector, e.g. `prometheus.NewCounter(...)`
///
/// Only a plain identifier operand qualifies; `a.b.NewCounter(...)` and
/// method calls on expressions never produce a spelling.
pub const SELECTOR_CALL: QueryDef = QueryDef {
    name: "go::selector_call",
    capture: "call",
    query: r#"
        (call_expression
          function: (selector_expression
            operand: (identifier) @package
            field: (field_identifier) @member)
          arguments: (argument_list)) @call
    "#,
};

/// Capture holding the package (or alias) identifier of [`SELECTOR_CALL`]
pub const PACKAGE_CAPTURE: &str = "package";
/// Capture holding the selected member of [`SELECTOR_CALL`]
pub const MEMBER_CAPTURE: &str = "member";

/// All Go query definitions
pub const ALL: &[&QueryDef] = &[&SELECTOR_CALL];

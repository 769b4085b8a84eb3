//! Go source support for promgrep
//!
//! Wraps tree-sitter-go behind a two-tier parse (imports first, then the
//! full structural walk) and turns constructor call sites of the Prometheus
//! client library into [`Declaration`]s.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use promgrep_core::{Declaration, SourcePosition};

pub mod common;
pub mod constructors;
pub mod literal;
pub mod opts;
pub mod parser;
pub mod queries;

pub use constructors::{recognize_constructor, ConstructorDef, CONSTRUCTORS};
pub use literal::unquote;
pub use opts::extract_opts;
pub use parser::{CallSite, GoFile, GoParser, ImportSpec, ImportsOnly};

/// Recognize a call site and, if it builds a metric, extract its declaration
///
/// Returns `None` for calls whose spelling is not in the constructor table.
pub fn declaration_for_call(call: &CallSite<'_>, file: &GoFile<'_>) -> Option<Declaration> {
    let kind = recognize_constructor(call.spelling())?;
    Some(Declaration {
        kind,
        opts: call.opts(),
        position: SourcePosition::from_tree_sitter_node(file.path(), call.node()),
    })
}

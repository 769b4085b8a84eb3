//! Two-tier Go source parsing
//!
//! Tier one ([`GoParser::parse_imports`]) parses a file and validates only
//! its header: the package clause and the import declarations. Tier two
//! ([`ImportsOnly::into_full`]) validates the whole syntax tree and exposes
//! the call sites. A file whose imports make it irrelevant never pays for
//! tier two.

use crate::common::{find_capture_node, first_error_position, node_text, significant_children};
use crate::literal::unquote;
use crate::opts::extract_opts;
use crate::queries::{self, QueryDef};
use promgrep_core::error::{Error, Result};
use promgrep_core::MetricOpts;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use streaming_iterator::StreamingIterator;
use tracing::trace;
use tree_sitter::{Node, Parser, Query, QueryCursor, Tree};

/// Cached compiled selector-call query
static SELECTOR_CALL_QUERY: OnceLock<std::result::Result<Query, String>> = OnceLock::new();

fn selector_call_query() -> Result<&'static Query> {
    SELECTOR_CALL_QUERY
        .get_or_init(|| compile(&queries::SELECTOR_CALL))
        .as_ref()
        .map_err(|e| Error::extraction(e.clone()))
}

fn compile(query_def: &QueryDef) -> std::result::Result<Query, String> {
    let language: tree_sitter::Language = tree_sitter_go::LANGUAGE.into();
    Query::new(&language, query_def.query)
        .map_err(|e| format!("Failed to compile query '{}': {e}", query_def.name))
}

/// One import of a Go file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    /// Local name (`prom`, `_`, `.`), if the import renames the package
    pub alias: Option<String>,
    /// Import path with the quotes removed
    pub path: String,
}

/// Go parser wrapping a tree-sitter parser
pub struct GoParser {
    parser: Parser,
}

impl std::fmt::Debug for GoParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoParser").finish_non_exhaustive()
    }
}

impl GoParser {
    /// Create a parser for Go sources
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| Error::extraction(format!("Failed to set language: {e}")))?;
        Ok(Self { parser })
    }

    /// Tier one: parse a file and read its import list
    ///
    /// Fails when the package clause is missing or the header itself is
    /// malformed. Syntax errors after the imports are not reported here.
    pub fn parse_imports<'s>(&mut self, path: &Path, source: &'s str) -> Result<ImportsOnly<'s>> {
        let file = path.display().to_string();
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| Error::parse(&file, "parser produced no syntax tree"))?;

        let imports = read_header(tree.root_node(), source, &file)?;
        trace!("{file}: {} imports", imports.len());

        Ok(ImportsOnly {
            path: path.to_path_buf(),
            source,
            tree,
            imports,
        })
    }
}

/// Walk the top-level nodes up to the first declaration
fn read_header(root: Node, source: &str, file: &str) -> Result<Vec<ImportSpec>> {
    let mut saw_package = false;
    let mut imports = Vec::new();

    for child in significant_children(root) {
        match child.kind() {
            "package_clause" if !saw_package => {
                reject_errors(child, file)?;
                saw_package = true;
            }
            "import_declaration" if saw_package => {
                reject_errors(child, file)?;
                collect_import_specs(child, source, &mut imports)?;
            }
            "ERROR" if !saw_package || starts_with_import(child) => reject_errors(child, file)?,
            _ => break,
        }
    }

    if !saw_package {
        return Err(Error::parse(file, "expected 'package' clause"));
    }
    Ok(imports)
}

/// Whether an error node is a damaged import declaration
fn starts_with_import(node: Node) -> bool {
    node.child(0).is_some_and(|first| first.kind() == "import")
}

fn collect_import_specs(node: Node, source: &str, imports: &mut Vec<ImportSpec>) -> Result<()> {
    for child in significant_children(node) {
        match child.kind() {
            "import_spec" => {
                let Some(path) = child.child_by_field_name("path") else {
                    continue;
                };
                let alias = child
                    .child_by_field_name("name")
                    .map(|name| node_text(name, source).map(str::to_string))
                    .transpose()?;
                imports.push(ImportSpec {
                    alias,
                    path: unquote(node_text(path, source)?).to_string(),
                });
            }
            "import_spec_list" => collect_import_specs(child, source, imports)?,
            _ => {}
        }
    }
    Ok(())
}

fn reject_errors(node: Node, file: &str) -> Result<()> {
    match first_error_position(node) {
        Some(point) => Err(Error::parse(
            file,
            format!("syntax error at line {}, column {}", point.row + 1, point.column + 1),
        )),
        None => Ok(()),
    }
}

/// A Go file whose header has been parsed
#[derive(Debug)]
pub struct ImportsOnly<'s> {
    path: PathBuf,
    source: &'s str,
    tree: Tree,
    imports: Vec<ImportSpec>,
}

impl<'s> ImportsOnly<'s> {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Imports in declaration order
    pub fn imports(&self) -> &[ImportSpec] {
        &self.imports
    }

    /// First import whose path is one of `library_paths`
    pub fn find_import<S: AsRef<str>>(&self, library_paths: &[S]) -> Option<&ImportSpec> {
        self.imports
            .iter()
            .find(|spec| library_paths.iter().any(|p| p.as_ref() == spec.path))
    }

    /// Tier two: validate the full syntax tree
    pub fn into_full(self) -> Result<GoFile<'s>> {
        reject_errors(self.tree.root_node(), &self.path.display().to_string())?;
        Ok(GoFile {
            path: self.path,
            source: self.source,
            tree: self.tree,
        })
    }
}

/// A fully parsed, syntactically valid Go file
#[derive(Debug)]
pub struct GoFile<'s> {
    path: PathBuf,
    source: &'s str,
    tree: Tree,
}

impl<'s> GoFile<'s> {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> &'s str {
        self.source
    }

    /// Every `package.Member(...)` call in the file, in document order
    pub fn call_sites(&self) -> Result<Vec<CallSite<'_>>> {
        let query = selector_call_query()?;
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(query, self.tree.root_node(), self.source.as_bytes());

        let mut calls = Vec::new();
        while let Some(query_match) = matches.next() {
            let (Some(call), Some(package), Some(member)) = (
                find_capture_node(query_match, query, queries::SELECTOR_CALL.capture),
                find_capture_node(query_match, query, queries::PACKAGE_CAPTURE),
                find_capture_node(query_match, query, queries::MEMBER_CAPTURE),
            ) else {
                continue;
            };

            calls.push(CallSite {
                spelling: format!(
                    "{}.{}",
                    node_text(package, self.source)?,
                    node_text(member, self.source)?
                ),
                node: call,
                source: self.source,
            });
        }

        calls.sort_by_key(|call| call.node.start_byte());
        Ok(calls)
    }
}

/// A `package.Member(...)` call expression
#[derive(Debug, Clone)]
pub struct CallSite<'t> {
    spelling: String,
    node: Node<'t>,
    source: &'t str,
}

impl<'t> CallSite<'t> {
    /// Call-site spelling, e.g. `prometheus.NewCounter`
    pub fn spelling(&self) -> &str {
        &self.spelling
    }

    /// The `call_expression` node
    pub fn node(&self) -> Node<'t> {
        self.node
    }

    /// 1-based line of the call
    pub fn line(&self) -> usize {
        self.node.start_position().row + 1
    }

    /// Literal options passed in the first argument
    pub fn opts(&self) -> MetricOpts {
        extract_opts(self.node, self.source)
    }
}

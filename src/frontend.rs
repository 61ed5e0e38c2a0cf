#![forbid(unsafe_code)]

//! Source front-ends that supply annotated symbols to the engine
//!
//! A front-end parses one source unit with tree-sitter and returns every
//! declaration carrying the marker attribute, with the kind, type, modifier
//! and constant-value information the checks need.

#[cfg(feature = "lang-java")]
pub mod java;
#[cfg(feature = "lang-rust")]
pub mod rust;

use crate::error::FrontendError;
use crate::symbol::{Location, Symbol};
use crate::types::Language;
use std::collections::HashMap;
use std::path::Path;
use tree_sitter::{Node, Parser, Tree};

/// One compilation unit handed to a front-end
#[derive(Debug, Clone, Copy)]
pub struct SourceUnit<'a> {
    /// Path used for diagnostic locations
    pub path: &'a Path,

    /// Full text content of the unit
    pub content: &'a str,
}

impl<'a> SourceUnit<'a> {
    pub fn new(path: &'a Path, content: &'a str) -> Self {
        Self { path, content }
    }
}

/// Host symbol-table collaborator for one language
///
/// The trait is `Send + Sync` so one instance can serve parallel rounds.
pub trait Frontend: Send + Sync {
    /// Language this front-end understands
    fn language(&self) -> Language;

    /// Returns every declaration in `unit` carrying `marker`
    ///
    /// `marker` is the bare attribute name (`regex`, `Regex`); qualified uses
    /// match on their last path segment.
    fn annotated_symbols(
        &self,
        unit: &SourceUnit,
        marker: &str,
    ) -> Result<Vec<Symbol>, FrontendError>;
}

/// Creates the front-end for `language`
///
/// # Errors
///
/// Returns `FrontendError::Unsupported` if the language's grammar feature
/// is disabled in this build.
#[allow(unreachable_patterns)]
pub fn frontend_for(language: Language) -> Result<Box<dyn Frontend>, FrontendError> {
    match language {
        #[cfg(feature = "lang-rust")]
        Language::Rust => Ok(Box::new(rust::RustFrontend::new()?)),
        #[cfg(feature = "lang-java")]
        Language::Java => Ok(Box::new(java::JavaFrontend::new()?)),
        other => Err(FrontendError::Unsupported(other)),
    }
}

/// Cache of loaded tree-sitter grammars
///
/// Grammars are loaded once; `tree_sitter::Parser` is not `Sync`, so a fresh
/// parser is configured per request.
#[derive(Debug, Clone)]
pub struct ParserCache {
    grammars: HashMap<Language, tree_sitter::Language>,
}

impl ParserCache {
    /// Loads every grammar compiled into this build
    pub fn new() -> Self {
        let grammars = Language::enabled()
            .into_iter()
            .filter_map(|language| grammar(language).map(|g| (language, g)))
            .collect();
        Self { grammars }
    }

    /// Returns a parser configured for `language`
    ///
    /// # Errors
    ///
    /// Returns `FrontendError::Unsupported` if the grammar is not available
    /// and `FrontendError::Grammar` if tree-sitter rejects it.
    pub fn get_parser(&self, language: Language) -> Result<Parser, FrontendError> {
        let grammar = self
            .grammars
            .get(&language)
            .ok_or(FrontendError::Unsupported(language))?;

        let mut parser = Parser::new();
        parser
            .set_language(grammar)
            .map_err(|e| FrontendError::Grammar {
                language,
                message: e.to_string(),
            })?;
        Ok(parser)
    }

    /// Parses `unit`, logging a warning when the tree contains syntax errors
    pub fn parse(&self, language: Language, unit: &SourceUnit) -> Result<Tree, FrontendError> {
        let mut parser = self.get_parser(language)?;
        let tree = parser
            .parse(unit.content, None)
            .ok_or_else(|| FrontendError::Parse {
                file: unit.path.to_path_buf(),
            })?;

        if tree.root_node().has_error() {
            tracing::warn!(
                file = %unit.path.display(),
                "source contains syntax errors; results may be incomplete"
            );
        }

        Ok(tree)
    }
}

impl Default for ParserCache {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(unreachable_patterns)]
fn grammar(language: Language) -> Option<tree_sitter::Language> {
    match language {
        #[cfg(feature = "lang-rust")]
        Language::Rust => Some(tree_sitter_rust::language()),
        #[cfg(feature = "lang-java")]
        Language::Java => Some(tree_sitter_java::language()),
        _ => None,
    }
}

/// Named children of `node`, detached from the cursor borrow
pub(crate) fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

pub(crate) fn has_child_kind(node: Node, kind: &str) -> bool {
    named_children(node).iter().any(|child| child.kind() == kind)
}

/// Source text covered by `node`
pub(crate) fn node_text<'s>(node: Node, source: &'s str) -> &'s str {
    &source[node.byte_range()]
}

/// 1-indexed location of the start of `node`
pub(crate) fn node_location(node: Node, path: &Path) -> Location {
    let start = node.start_position();
    Location::new(path, start.row as u32 + 1, start.column as u32 + 1)
}

/// Last segment of a qualified path, for either `::` or `.` separators
pub(crate) fn last_segment(path: &str) -> &str {
    let after_colons = path.rsplit("::").next().unwrap_or(path);
    after_colons.rsplit('.').next().unwrap_or(after_colons).trim()
}

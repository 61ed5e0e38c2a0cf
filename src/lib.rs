#![forbid(unsafe_code)]

//! regexcheck: compile-time validation of regular-expression constants
//!
//! Declarations marked with `#[regex]` (Rust) or `@Regex` (Java) must be
//! final string constants whose value is a syntactically valid regular
//! expression. Source front-ends extract the marked declarations, and
//! [`RegexChecker`] validates them and reports [`Diagnostic`]s.

pub mod checker;
pub mod cli;
pub mod config;
pub mod diagnostic;
pub mod engine;
pub mod error;
pub mod frontend;
pub mod output;
pub mod symbol;
pub mod types;

pub use checker::{RegexChecker, ScanSummary, StringType};
pub use diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSink};
pub use error::{CheckerError, ConfigError, FrontendError, RegexCheckError};
pub use symbol::{ConstantValue, FieldDecl, Location, Modifier, Modifiers, Symbol, SymbolKind, TypeRef};
pub use types::{GlobPattern, Language, MarkerName, Severity};

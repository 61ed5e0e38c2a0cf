#![forbid(unsafe_code)]

//! Diagnostics and the reporter seam
//!
//! The engine hands every [`Diagnostic`] to a [`DiagnosticSink`] the moment
//! it is produced. Sinks decide how to surface them; the engine never
//! buffers, deduplicates or decides whether a diagnostic fails the build.

use crate::symbol::{Location, Symbol};
use crate::types::Severity;
use std::fmt;

/// Prefix of every invalid-regex message, followed by the parser's own text
pub const INVALID_REGEX_PREFIX: &str = "Invalid regular expression: ";

/// The finding a diagnostic reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Marker applied to something other than a field
    WrongTarget,
    /// Field is not of the built-in string type
    WrongType,
    /// String field is not final
    WrongModifier,
    /// Initializer is not a compile-time constant
    NonConstant,
    /// Constant resolved to a non-string value
    UnexpectedConstantType,
    /// Constant does not parse under the regex grammar
    InvalidRegexSyntax,
}

impl DiagnosticKind {
    pub fn severity(&self) -> Severity {
        match self {
            DiagnosticKind::UnexpectedConstantType => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Stable identifier used in output
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticKind::WrongTarget => "wrong-target",
            DiagnosticKind::WrongType => "wrong-type",
            DiagnosticKind::WrongModifier => "wrong-modifier",
            DiagnosticKind::NonConstant => "non-constant",
            DiagnosticKind::UnexpectedConstantType => "unexpected-constant-type",
            DiagnosticKind::InvalidRegexSyntax => "invalid-regex-syntax",
        }
    }

    /// Message for the structural kinds, `marker` rendered as written in source
    ///
    /// `InvalidRegexSyntax` carries the parser's detail and is built by
    /// [`Diagnostic::invalid_regex`] instead.
    pub fn message(&self, marker: &str) -> String {
        match self {
            DiagnosticKind::WrongTarget => {
                format!("{} can only be applied to a field declaration", marker)
            }
            DiagnosticKind::WrongType => format!("{} can only be used on a string", marker),
            DiagnosticKind::WrongModifier => {
                format!("{} can only be used on a final string", marker)
            }
            DiagnosticKind::NonConstant => {
                format!("{} can only be used with a constant expression", marker)
            }
            DiagnosticKind::UnexpectedConstantType => "Unexpected constant type".to_string(),
            DiagnosticKind::InvalidRegexSyntax => INVALID_REGEX_PREFIX.trim_end().to_string(),
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A finding attributed to one annotated declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
    /// Name of the declaration the diagnostic is about
    pub symbol: String,
    pub location: Location,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>, symbol: &Symbol) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            message: message.into(),
            symbol: symbol.name.clone(),
            location: symbol.location.clone(),
        }
    }

    /// Builds an `InvalidRegexSyntax` diagnostic, passing `detail` through verbatim
    pub fn invalid_regex(detail: &str, symbol: &Symbol) -> Self {
        Self::new(
            DiagnosticKind::InvalidRegexSyntax,
            format!("{}{}", INVALID_REGEX_PREFIX, detail),
            symbol,
        )
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {}: {} [{}]",
            self.location, self.severity, self.message, self.kind
        )
    }
}

/// Host-provided destination for diagnostics
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Counts of reported diagnostics by severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagnosticCounts {
    pub errors: usize,
    pub warnings: usize,
}

impl DiagnosticCounts {
    pub fn tally<'a>(diagnostics: impl IntoIterator<Item = &'a Diagnostic>) -> Self {
        let mut counts = Self::default();
        for diagnostic in diagnostics {
            match diagnostic.severity {
                Severity::Error => counts.errors += 1,
                Severity::Warning => counts.warnings += 1,
            }
        }
        counts
    }
}

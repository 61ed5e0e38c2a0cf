#![forbid(unsafe_code)]

//! Ordered structural checks on one annotated symbol
//!
//! The checks run in a fixed order and stop at the first failure:
//!
//! 1. the symbol is a field
//! 2. its declared type is the built-in string type
//! 3. it is final
//! 4. its initializer is a compile-time constant
//! 5. the constant is a string (a non-string is only a warning)
//!
//! Only when all of them pass is the constant handed to the syntax validator.

use super::LanguageProfile;
use super::syntax;
use crate::diagnostic::{Diagnostic, DiagnosticKind, DiagnosticSink};
use crate::symbol::{ConstantValue, Symbol, SymbolKind, TypeRef};
use crate::types::Language;

/// Canonical identity of a language's built-in string type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringType {
    /// `&str` with any lifetime
    BorrowedStr,
    /// `String` / `java.lang.String`
    JavaLangString,
}

impl StringType {
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::Rust => StringType::BorrowedStr,
            Language::Java => StringType::JavaLangString,
        }
    }

    /// Nominal match: aliases, wrappers and owned strings do not count
    pub fn matches(&self, ty: &TypeRef) -> bool {
        match (self, ty) {
            (
                StringType::BorrowedStr,
                TypeRef::Reference {
                    mutable: false,
                    referent,
                },
            ) => matches!(
                referent.as_ref(),
                TypeRef::Primitive(name) if name == "str"
            ) || matches!(
                referent.as_ref(),
                TypeRef::Named(name) if name == "std::primitive::str" || name == "core::primitive::str"
            ),
            (StringType::JavaLangString, TypeRef::Named(name)) => {
                name == "String" || name == "java.lang.String"
            }
            _ => false,
        }
    }
}

/// Runs the ordered checks and returns the pattern to validate
///
/// On failure returns the one diagnostic to report for this symbol.
pub(crate) fn check<'s>(
    symbol: &'s Symbol,
    profile: &LanguageProfile,
) -> Result<&'s str, Diagnostic> {
    let fail = |kind: DiagnosticKind| Diagnostic::new(kind, kind.message(&profile.marker), symbol);

    let SymbolKind::Field(field) = &symbol.kind else {
        return Err(fail(DiagnosticKind::WrongTarget));
    };

    if !profile.string_type.matches(&field.declared_type) {
        return Err(fail(DiagnosticKind::WrongType));
    }

    if !field.modifiers.is_final() {
        return Err(fail(DiagnosticKind::WrongModifier));
    }

    match &field.constant_value {
        None => Err(fail(DiagnosticKind::NonConstant)),
        Some(ConstantValue::Str(pattern)) => Ok(pattern),
        Some(other) => {
            tracing::debug!(
                symbol = %symbol.name,
                found = other.type_name(),
                "constant resolved to a non-string value"
            );
            Err(fail(DiagnosticKind::UnexpectedConstantType))
        }
    }
}

/// Validates one symbol end to end, reporting at most one diagnostic
pub(crate) fn validate_symbol<S>(symbol: &Symbol, profile: &LanguageProfile, sink: &mut S)
where
    S: DiagnosticSink + ?Sized,
{
    match check(symbol, profile) {
        Ok(pattern) => {
            if let Err(e) = syntax::validate_pattern(pattern, profile.dialect) {
                sink.report(Diagnostic::invalid_regex(&e.to_string(), symbol));
            }
        }
        Err(diagnostic) => sink.report(diagnostic),
    }
}

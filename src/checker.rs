#![forbid(unsafe_code)]

//! Validation engine for marked regular-expression constants
//!
//! [`RegexChecker`] is used in two phases: [`RegexChecker::initialize`] runs
//! once and resolves the per-language lookups (canonical string type, regex
//! dialect and the rendered marker), then [`RegexChecker::scan`] runs once per compilation
//! round over the symbols carrying the marker. A scan holds no state of its
//! own, so rounds are independent and the checker can be shared across
//! threads.

mod constraints;
mod scanner;
mod syntax;

pub use constraints::StringType;
pub use scanner::ScanSummary;
pub use syntax::{Dialect, PatternError, syntax_error, validate_pattern};

use crate::diagnostic::{Diagnostic, DiagnosticSink};
use crate::error::CheckerError;
use crate::symbol::Symbol;
use crate::types::Language;
use std::collections::HashMap;

/// Lookups resolved once per language at initialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LanguageProfile {
    pub(crate) string_type: StringType,
    pub(crate) dialect: Dialect,
    /// Marker as written in source, e.g. `@Regex`
    pub(crate) marker: String,
}

/// The validation engine
#[derive(Debug, Clone)]
pub struct RegexChecker {
    profiles: HashMap<Language, LanguageProfile>,
}

impl RegexChecker {
    /// Initializes the checker for `languages` with their default marker names
    pub fn initialize(languages: &[Language]) -> Self {
        Self::initialize_with_markers(
            languages
                .iter()
                .map(|&language| (language, language.default_marker())),
        )
    }

    /// Initializes the checker with an explicit marker name per language
    pub fn initialize_with_markers<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = (Language, S)>,
        S: AsRef<str>,
    {
        let profiles = markers
            .into_iter()
            .map(|(language, marker)| {
                let profile = LanguageProfile {
                    string_type: StringType::for_language(language),
                    dialect: Dialect::for_language(language),
                    marker: language.render_marker(marker.as_ref()),
                };
                (language, profile)
            })
            .collect();

        Self { profiles }
    }

    /// Languages this checker was initialized for
    pub fn languages(&self) -> Vec<Language> {
        let mut languages: Vec<Language> = self.profiles.keys().copied().collect();
        languages.sort();
        languages
    }

    /// Checks one round of annotated symbols and returns the diagnostics
    ///
    /// # Errors
    ///
    /// Returns `CheckerError::UninitializedLanguage` if any symbol belongs to
    /// a language the checker was not initialized for. No diagnostic is
    /// produced in that case.
    pub fn scan(&self, symbols: &[Symbol]) -> Result<Vec<Diagnostic>, CheckerError> {
        let mut diagnostics = Vec::new();
        self.scan_into(symbols, &mut diagnostics)?;
        Ok(diagnostics)
    }

    /// Checks one round of annotated symbols, reporting into `sink` as it goes
    ///
    /// # Errors
    ///
    /// Same as [`RegexChecker::scan`].
    pub fn scan_into<S>(&self, symbols: &[Symbol], sink: &mut S) -> Result<ScanSummary, CheckerError>
    where
        S: DiagnosticSink + ?Sized,
    {
        scanner::scan(symbols, &self.profiles, sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticKind;
    use crate::symbol::{ConstantValue, FieldDecl, Location, Modifier, Modifiers, SymbolKind, TypeRef};

    fn java_constant(name: &str, value: &str) -> Symbol {
        Symbol::new(
            name,
            Language::Java,
            SymbolKind::Field(FieldDecl {
                declared_type: TypeRef::Named("String".to_string()),
                modifiers: Modifiers::from([Modifier::Static, Modifier::Final]),
                constant_value: Some(ConstantValue::Str(value.to_string())),
            }),
            Location::new("HelloWorld.java", 3, 30),
        )
    }

    #[test]
    fn test_initialize_records_languages() {
        let checker = RegexChecker::initialize(&[Language::Java, Language::Rust]);
        assert_eq!(checker.languages(), vec![Language::Rust, Language::Java]);
    }

    #[test]
    fn test_custom_marker_is_rendered_in_messages() {
        let checker = RegexChecker::initialize_with_markers([(Language::Java, "Pattern")]);
        let symbol = Symbol::new(
            "foo",
            Language::Java,
            SymbolKind::Method,
            Location::new("A.java", 1, 1),
        );
        let diagnostics = checker.scan(&[symbol]).unwrap();
        assert_eq!(
            diagnostics[0].message,
            "@Pattern can only be applied to a field declaration"
        );
    }

    #[test]
    fn test_uninitialized_language_fails_fast() {
        let checker = RegexChecker::initialize(&[Language::Rust]);
        let result = checker.scan(&[java_constant("GOOD", "abc")]);
        assert_eq!(
            result,
            Err(CheckerError::UninitializedLanguage(Language::Java))
        );
    }

    #[test]
    fn test_scan_is_repeatable() {
        let checker = RegexChecker::initialize(&[Language::Java]);
        let symbols = vec![java_constant("BAD", "abc["), java_constant("GOOD", "abc[a-z]+")];

        let first = checker.scan(&symbols).unwrap();
        let second = checker.scan(&symbols).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].kind, DiagnosticKind::InvalidRegexSyntax);
    }

    #[test]
    fn test_checker_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RegexChecker>();
    }
}

//! Error types for regexcheck
//!
//! This module defines the error types used throughout regexcheck, following
//! a hierarchical structure with specific error variants for different
//! error categories. User-facing findings are never errors: they are
//! [`Diagnostic`](crate::diagnostic::Diagnostic)s reported through a sink.

use crate::types::Language;
use std::path::PathBuf;

/// Configuration-related errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid TOML syntax or shape
    #[error("Invalid configuration syntax: {0}")]
    Parse(#[from] toml::de::Error),

    /// Syntactically valid configuration with invalid values
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Errors raised by source front-ends while building symbols
#[derive(Debug, thiserror::Error)]
pub enum FrontendError {
    /// The grammar for a language is not compiled into this build
    #[error("No front-end available for {0} (enable the lang-{0} feature)")]
    Unsupported(Language),

    /// The tree-sitter grammar could not be loaded into a parser
    #[error("Failed to load {language} grammar: {message}")]
    Grammar { language: Language, message: String },

    /// tree-sitter returned no tree for the input
    #[error("Failed to parse {}", file.display())]
    Parse { file: PathBuf },
}

/// Internal invariant violations inside the validation engine
///
/// These signal programming errors in the host integration and are never
/// reported as user diagnostics.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CheckerError {
    /// A symbol arrived for a language the checker was not initialized with
    #[error("internal error: checker was not initialized for {0} symbols")]
    UninitializedLanguage(Language),
}

/// Top-level error type for regexcheck
#[derive(Debug, thiserror::Error)]
pub enum RegexCheckError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Front-end error
    #[error("Front-end error: {0}")]
    Frontend(#[from] FrontendError),

    /// Engine invariant violation
    #[error(transparent)]
    Checker(#[from] CheckerError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_message_names_feature() {
        let err = FrontendError::Unsupported(Language::Java);
        assert_eq!(
            err.to_string(),
            "No front-end available for java (enable the lang-java feature)"
        );
    }

    #[test]
    fn test_checker_error_is_transparent() {
        let err: RegexCheckError = CheckerError::UninitializedLanguage(Language::Rust).into();
        assert_eq!(
            err.to_string(),
            "internal error: checker was not initialized for rust symbols"
        );
    }

    #[test]
    fn test_config_validation_display() {
        let err: RegexCheckError = ConfigError::Validation("bad".to_string()).into();
        assert_eq!(err.to_string(), "Configuration error: Invalid configuration: bad");
    }
}

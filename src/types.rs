#![forbid(unsafe_code)]

//! Core domain types for regexcheck
//!
//! This module defines the small value types shared by the engine, the
//! front-ends and the host layers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source languages regexcheck can extract annotated symbols from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Rust,
    Java,
}

impl Language {
    /// All languages known to regexcheck, compiled in or not
    pub fn all() -> [Language; 2] {
        [Language::Rust, Language::Java]
    }

    /// Languages whose front-end is compiled into this build
    pub fn enabled() -> Vec<Language> {
        Self::all()
            .into_iter()
            .filter(|lang| lang.is_compiled_in())
            .collect()
    }

    /// Whether the grammar for this language was enabled at build time
    pub fn is_compiled_in(&self) -> bool {
        match self {
            Language::Rust => cfg!(feature = "lang-rust"),
            Language::Java => cfg!(feature = "lang-java"),
        }
    }

    /// Marker attribute name used when the configuration does not override it
    pub fn default_marker(&self) -> &'static str {
        match self {
            Language::Rust => "regex",
            Language::Java => "Regex",
        }
    }

    /// Renders a marker name the way it is written in source
    pub fn render_marker(&self, marker: &str) -> String {
        match self {
            Language::Rust => format!("#[{}]", marker),
            Language::Java => format!("@{}", marker),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Rust => "rust",
            Language::Java => "java",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostic severity levels
///
/// The host decides what a severity means for the build; the CLI fails on
/// any `Error` and never on a `Warning`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A glob pattern for file matching
///
/// This is a simple wrapper around a string that will be used with the `globset` crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlobPattern(String);

impl GlobPattern {
    /// Creates a new GlobPattern
    pub fn new(pattern: impl Into<String>) -> Self {
        GlobPattern(pattern.into())
    }

    /// Returns the pattern as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GlobPattern {
    fn from(pattern: &str) -> Self {
        GlobPattern(pattern.to_string())
    }
}

/// A validated marker attribute name
///
/// Marker names must be non-empty identifiers: an ASCII letter or underscore
/// followed by ASCII alphanumerics or underscores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MarkerName(String);

impl MarkerName {
    /// Creates a new MarkerName, returning None for invalid identifiers
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        let mut chars = name.chars();
        let first = chars.next()?;
        if !(first.is_ascii_alphabetic() || first == '_') {
            return None;
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return None;
        }
        Some(MarkerName(name))
    }

    /// The built-in marker for `language`
    pub fn default_for(language: Language) -> Self {
        MarkerName(language.default_marker().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MarkerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for MarkerName {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        MarkerName::new(value.clone()).ok_or_else(|| format!("Invalid marker name '{}'", value))
    }
}

impl From<MarkerName> for String {
    fn from(marker: MarkerName) -> Self {
        marker.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_name_validation() {
        assert!(MarkerName::new("regex").is_some());
        assert!(MarkerName::new("Regex").is_some());
        assert!(MarkerName::new("_checked_regex2").is_some());
        assert!(MarkerName::new("").is_none());
        assert!(MarkerName::new("2regex").is_none());
        assert!(MarkerName::new("my-regex").is_none());
        assert!(MarkerName::new("a::regex").is_none());
    }

    #[test]
    fn test_render_marker() {
        assert_eq!(Language::Rust.render_marker("regex"), "#[regex]");
        assert_eq!(Language::Java.render_marker("Regex"), "@Regex");
    }

    #[test]
    fn test_language_serde_names() {
        let langs: Vec<Language> = serde_json::from_str(r#"["rust", "java"]"#).unwrap();
        assert_eq!(langs, vec![Language::Rust, Language::Java]);
        assert_eq!(Language::Java.to_string(), "java");
    }

    #[test]
    fn test_marker_name_deserialize_rejects_invalid() {
        let ok: Result<MarkerName, _> = serde_json::from_str(r#""Pattern""#);
        assert!(ok.is_ok());
        let bad: Result<MarkerName, _> = serde_json::from_str(r#""not valid""#);
        assert!(bad.is_err());
    }
}

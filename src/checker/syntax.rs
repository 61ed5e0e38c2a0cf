#![forbid(unsafe_code)]

//! Regex syntax validation
//!
//! Each language is checked against the grammar its own runtime accepts:
//!
//! - Rust constants use the `regex` crate grammar. Backreferences and
//!   look-around are not part of it and are rejected.
//! - Java constants use a backtracking grammar (`fancy-regex`) that adds
//!   backreferences, look-ahead, look-behind and atomic groups on top of the
//!   `regex` syntax, with `\Q...\E` quoting resolved first.

use crate::types::Language;

/// Regex grammar a pattern is validated against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `regex` crate grammar
    Rust,
    /// `java.util.regex` style backtracking grammar
    Java,
}

impl Dialect {
    pub fn for_language(language: Language) -> Self {
        match language {
            Language::Rust => Dialect::Rust,
            Language::Java => Dialect::Java,
        }
    }
}

/// A grammar error, displayed as the underlying parser reports it
#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error(transparent)]
    Regex(#[from] regex::Error),

    #[error(transparent)]
    Backtracking(#[from] fancy_regex::Error),
}

/// Compiles `pattern` under `dialect`, returning the parser's error on failure
pub fn validate_pattern(pattern: &str, dialect: Dialect) -> Result<(), PatternError> {
    match dialect {
        Dialect::Rust => {
            regex::Regex::new(pattern)?;
        }
        Dialect::Java => {
            fancy_regex::Regex::new(&unquote(pattern))?;
        }
    }
    Ok(())
}

/// Returns the parser's error text for an invalid `pattern`, verbatim
pub fn syntax_error(pattern: &str, dialect: Dialect) -> Option<String> {
    validate_pattern(pattern, dialect).err().map(|e| e.to_string())
}

/// Rewrites `\Q...\E` spans as escaped literals
///
/// A span without a closing `\E` runs to the end of the pattern. Escapes
/// outside a span are copied through untouched.
fn unquote(pattern: &str) -> String {
    if !pattern.contains(r"\Q") {
        return pattern.to_string();
    }

    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;
    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let escaped = &rest[pos + 1..];
        let mut chars = escaped.chars();
        match chars.next() {
            Some('Q') => {
                let quoted = &escaped[1..];
                let (literal, after) = match quoted.find(r"\E") {
                    Some(end) => (&quoted[..end], &quoted[end + 2..]),
                    None => (quoted, ""),
                };
                out.push_str(&regex::escape(literal));
                rest = after;
            }
            Some(c) => {
                out.push('\\');
                out.push(c);
                rest = chars.as_str();
            }
            None => {
                out.push('\\');
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

//! Test utilities for regexcheck integration tests

#![allow(dead_code)]

use regexcheck::frontend::{SourceUnit, frontend_for};
use regexcheck::{Diagnostic, Language, RegexChecker, Symbol};
use std::path::Path;

/// Result type alias for tests
pub type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Extract Ok value or panic with context
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("assertion failed: expected Ok, got Err({:?})", e),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Extract Some value or panic with context
#[macro_export]
macro_rules! assert_some {
    ($expr:expr) => {
        match $expr {
            Some(v) => v,
            None => panic!("assertion failed: expected Some, got None"),
        }
    };
    ($expr:expr, $msg:literal) => {
        match $expr {
            Some(v) => v,
            None => panic!("{}: got None", $msg),
        }
    };
}

/// Marked symbols of one in-memory source unit, default marker
pub fn symbols(language: Language, file: &str, source: &str) -> Vec<Symbol> {
    let frontend = assert_ok!(frontend_for(language));
    let unit = SourceUnit::new(Path::new(file), source);
    assert_ok!(frontend.annotated_symbols(&unit, language.default_marker()))
}

/// Runs one full round (front-end plus checker) over an in-memory unit
pub fn round(language: Language, file: &str, source: &str) -> Vec<Diagnostic> {
    let checker = RegexChecker::initialize(&[language]);
    assert_ok!(checker.scan(&symbols(language, file, source)))
}

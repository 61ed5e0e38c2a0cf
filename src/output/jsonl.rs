#![forbid(unsafe_code)]

//! JSONL output formatter for machine-readable output
//!
//! Outputs one JSON object per line in a deterministic order:
//! 1. All diagnostic records (sorted by file, line, column)
//! 2. One status record

use crate::diagnostic::{Diagnostic, DiagnosticCounts};
use crate::engine::ExecutionResult;
use crate::types::Severity;
use serde::Serialize;
use std::path::Path;

/// JSONL output formatter
pub struct JsonlFormatter;

impl JsonlFormatter {
    pub fn new() -> Self {
        JsonlFormatter
    }

    /// Formats the execution result, one record per line
    pub fn format(&self, result: &ExecutionResult) -> String {
        let mut output = String::new();

        for diagnostic in &result.diagnostics {
            push_record(&mut output, &DiagnosticRecord::from(diagnostic));
        }

        let counts = DiagnosticCounts::tally(&result.diagnostics);
        let status = StatusRecord {
            record_type: "status",
            passed: counts.errors == 0,
            files_checked: result.files_checked,
            files_skipped: result.files_skipped,
            symbols_checked: result.symbols_checked,
            errors: counts.errors,
            warnings: counts.warnings,
        };
        push_record(&mut output, &status);

        output
    }
}

impl Default for JsonlFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn push_record<T: Serialize>(output: &mut String, record: &T) {
    match serde_json::to_string(record) {
        Ok(json) => {
            output.push_str(&json);
            output.push('\n');
        }
        Err(e) => tracing::error!(error = %e, "failed to serialize output record"),
    }
}

/// Diagnostic record for JSONL output
#[derive(Debug, Serialize)]
struct DiagnosticRecord<'a> {
    #[serde(rename = "type")]
    record_type: &'static str,
    code: &'static str,
    severity: Severity,
    message: &'a str,
    symbol: &'a str,
    file: &'a Path,
    line: u32,
    column: u32,
}

impl<'a> From<&'a Diagnostic> for DiagnosticRecord<'a> {
    fn from(diagnostic: &'a Diagnostic) -> Self {
        Self {
            record_type: "diagnostic",
            code: diagnostic.kind.code(),
            severity: diagnostic.severity,
            message: &diagnostic.message,
            symbol: &diagnostic.symbol,
            file: &diagnostic.location.file,
            line: diagnostic.location.line,
            column: diagnostic.location.column,
        }
    }
}

/// Status record for JSONL output
#[derive(Debug, Serialize)]
struct StatusRecord {
    #[serde(rename = "type")]
    record_type: &'static str,
    passed: bool,
    files_checked: usize,
    files_skipped: usize,
    symbols_checked: usize,
    errors: usize,
    warnings: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticKind;
    use crate::symbol::{
        ConstantValue, FieldDecl, Location, Modifier, Modifiers, Symbol, SymbolKind, TypeRef,
    };
    use crate::types::Language;
    use serde_json::Value;

    fn warning() -> Diagnostic {
        let symbol = Symbol::new(
            "COUNT",
            Language::Rust,
            SymbolKind::Field(FieldDecl {
                declared_type: TypeRef::Primitive("i32".into()),
                modifiers: Modifiers::from([Modifier::Final]),
                constant_value: Some(ConstantValue::Int(3)),
            }),
            Location::new("src/lib.rs", 7, 7),
        );
        Diagnostic::new(
            DiagnosticKind::UnexpectedConstantType,
            DiagnosticKind::UnexpectedConstantType.message("#[regex]"),
            &symbol,
        )
    }

    fn lines(output: &str) -> Vec<Value> {
        output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_empty_result_has_only_status() {
        let output = JsonlFormatter::new().format(&ExecutionResult::default());
        let records = lines(&output);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["type"], "status");
        assert_eq!(records[0]["passed"], true);
    }

    #[test]
    fn test_diagnostic_record_fields() {
        let result = ExecutionResult {
            diagnostics: vec![warning()],
            files_checked: 1,
            files_skipped: 0,
            symbols_checked: 1,
        };
        let records = lines(&JsonlFormatter::new().format(&result));

        assert_eq!(records.len(), 2);
        let diagnostic = &records[0];
        assert_eq!(diagnostic["type"], "diagnostic");
        assert_eq!(diagnostic["code"], "unexpected-constant-type");
        assert_eq!(diagnostic["severity"], "warning");
        assert_eq!(diagnostic["message"], "Unexpected constant type");
        assert_eq!(diagnostic["symbol"], "COUNT");
        assert_eq!(diagnostic["file"], "src/lib.rs");
        assert_eq!(diagnostic["line"], 7);

        let status = &records[1];
        assert_eq!(status["passed"], true);
        assert_eq!(status["warnings"], 1);
        assert_eq!(status["errors"], 0);
    }
}

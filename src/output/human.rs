#![forbid(unsafe_code)]

//! Human-readable output with optional color
//!
//! ```text
//! error[invalid-regex-syntax]: Invalid regular expression: ...
//!   --> src/Patterns.java:3:30
//! ```

use crate::diagnostic::{Diagnostic, DiagnosticCounts};
use crate::engine::ExecutionResult;
use crate::types::Severity;
use std::io;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Human formatter writing diagnostics and a summary line
pub struct HumanFormatter {
    color: ColorChoice,
}

impl HumanFormatter {
    pub fn new(color: ColorChoice) -> Self {
        Self { color }
    }

    /// Writes the report to stderr
    pub fn print(&self, result: &ExecutionResult) -> io::Result<()> {
        let mut stream = StandardStream::stderr(self.color);
        self.write(&mut stream, result)
    }

    /// Writes the report to any color-capable writer
    pub fn write<W: WriteColor>(&self, out: &mut W, result: &ExecutionResult) -> io::Result<()> {
        for diagnostic in &result.diagnostics {
            write_diagnostic(out, diagnostic)?;
        }

        let counts = DiagnosticCounts::tally(&result.diagnostics);
        write_summary(out, result, counts)
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
    }
}

fn write_diagnostic<W: WriteColor>(out: &mut W, diagnostic: &Diagnostic) -> io::Result<()> {
    out.set_color(
        ColorSpec::new()
            .set_fg(Some(severity_color(diagnostic.severity)))
            .set_bold(true),
    )?;
    write!(out, "{}[{}]", diagnostic.severity, diagnostic.kind)?;
    out.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(out, ": {}", diagnostic.message)?;

    out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
    write!(out, "  --> ")?;
    out.reset()?;
    writeln!(out, "{}", diagnostic.location)?;
    writeln!(out)
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

fn write_summary<W: WriteColor>(
    out: &mut W,
    result: &ExecutionResult,
    counts: DiagnosticCounts,
) -> io::Result<()> {
    let (color, verdict) = if counts.errors > 0 {
        (Color::Red, "Check FAILED")
    } else {
        (Color::Green, "Check PASSED")
    };

    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(out, "{}", verdict)?;
    out.reset()?;
    writeln!(
        out,
        ": {}, {} in {} ({})",
        plural(counts.errors, "error"),
        plural(counts.warnings, "warning"),
        plural(result.files_checked, "file"),
        plural(result.symbols_checked, "marked declaration"),
    )?;

    if result.files_skipped > 0 {
        writeln!(
            out,
            "{} could not be checked",
            plural(result.files_skipped, "file")
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticKind;
    use crate::symbol::{Location, Symbol, SymbolKind};
    use crate::types::Language;
    use termcolor::{Ansi, NoColor};

    fn result() -> ExecutionResult {
        let symbol = Symbol::new(
            "foo",
            Language::Java,
            SymbolKind::Method,
            Location::new("src/HelloWorld.java", 3, 10),
        );
        ExecutionResult {
            diagnostics: vec![Diagnostic::new(
                DiagnosticKind::WrongTarget,
                DiagnosticKind::WrongTarget.message("@Regex"),
                &symbol,
            )],
            files_checked: 1,
            files_skipped: 0,
            symbols_checked: 1,
        }
    }

    fn render(result: &ExecutionResult) -> String {
        let mut out = NoColor::new(Vec::new());
        HumanFormatter::new(ColorChoice::Never)
            .write(&mut out, result)
            .unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn test_diagnostic_layout() {
        let text = render(&result());
        assert!(text.starts_with(
            "error[wrong-target]: @Regex can only be applied to a field declaration\n  --> src/HelloWorld.java:3:10\n"
        ));
        assert!(text.contains("Check FAILED: 1 error, 0 warnings in 1 file (1 marked declaration)"));
    }

    #[test]
    fn test_clean_summary() {
        let clean = ExecutionResult {
            files_checked: 2,
            symbols_checked: 3,
            files_skipped: 1,
            ..ExecutionResult::default()
        };
        let text = render(&clean);
        assert_eq!(
            text,
            "Check PASSED: 0 errors, 0 warnings in 2 files (3 marked declarations)\n1 file could not be checked\n"
        );
    }

    #[test]
    fn test_ansi_output_has_escapes() {
        let mut out = Ansi::new(Vec::new());
        HumanFormatter::new(ColorChoice::Always)
            .write(&mut out, &result())
            .unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();
        assert!(text.contains("\x1b["));
        assert!(text.contains("wrong-target"));
    }
}

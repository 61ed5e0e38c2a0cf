#![forbid(unsafe_code)]

//! Declaration scanner: drives one validation per annotated symbol

use super::LanguageProfile;
use super::constraints;
use crate::diagnostic::{Diagnostic, DiagnosticCounts, DiagnosticSink};
use crate::error::CheckerError;
use crate::symbol::Symbol;
use crate::types::{Language, Severity};
use std::collections::HashMap;

/// Statistics for one scan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub symbols_checked: usize,
    pub diagnostics: DiagnosticCounts,
}

/// Forwards to the host sink while counting what passes through
struct CountingSink<'a, S: ?Sized> {
    inner: &'a mut S,
    counts: DiagnosticCounts,
}

impl<S> DiagnosticSink for CountingSink<'_, S>
where
    S: DiagnosticSink + ?Sized,
{
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.counts.errors += 1,
            Severity::Warning => self.counts.warnings += 1,
        }
        self.inner.report(diagnostic);
    }
}

/// Visits every symbol exactly once, in the order given
///
/// Languages are resolved for the whole round before any symbol is checked,
/// so an uninitialized language fails the round without partial output.
pub(crate) fn scan<S>(
    symbols: &[Symbol],
    profiles: &HashMap<Language, LanguageProfile>,
    sink: &mut S,
) -> Result<ScanSummary, CheckerError>
where
    S: DiagnosticSink + ?Sized,
{
    let resolved = symbols
        .iter()
        .map(|symbol| {
            profiles
                .get(&symbol.language)
                .map(|profile| (symbol, profile))
                .ok_or(CheckerError::UninitializedLanguage(symbol.language))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut counting = CountingSink {
        inner: sink,
        counts: DiagnosticCounts::default(),
    };

    for (symbol, profile) in resolved {
        tracing::trace!(
            symbol = %symbol.name,
            kind = symbol.kind.describe(),
            location = %symbol.location,
            "checking annotated symbol"
        );
        constraints::validate_symbol(symbol, profile, &mut counting);
    }

    Ok(ScanSummary {
        symbols_checked: symbols.len(),
        diagnostics: counting.counts,
    })
}

#![forbid(unsafe_code)]

//! Parallel execution engine for checking source files
//!
//! Each file is one independent round: read the file, let the language's
//! front-end collect the marked symbols, and hand them to the shared
//! [`RegexChecker`]. Rounds run in parallel with rayon.

use crate::checker::RegexChecker;
use crate::config::Config;
use crate::diagnostic::Diagnostic;
use crate::engine::file_walker::FileEntry;
use crate::error::{CheckerError, FrontendError};
use crate::frontend::{Frontend, SourceUnit, frontend_for};
use crate::types::Language;
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;

/// Result of checking all files
#[derive(Debug, Default)]
pub struct ExecutionResult {
    /// Diagnostics sorted by file, line and column
    pub diagnostics: Vec<Diagnostic>,
    /// Number of files that completed a round
    pub files_checked: usize,
    /// Number of files that could not be read or parsed
    pub files_skipped: usize,
    /// Number of marked symbols validated
    pub symbols_checked: usize,
}

/// Outcome of one file's round
enum Round {
    Checked {
        diagnostics: Vec<Diagnostic>,
        symbols: usize,
    },
    Skipped,
}

/// Front-end and bare marker name for one language
struct LanguageSetup {
    frontend: Box<dyn Frontend>,
    marker: String,
}

/// Execution engine that coordinates parallel rounds
pub struct ExecutionEngine {
    checker: RegexChecker,
    languages: HashMap<Language, LanguageSetup>,
}

impl ExecutionEngine {
    /// Creates an engine for the languages and markers in `config`
    ///
    /// # Errors
    ///
    /// Returns `FrontendError` if a configured language has no usable front-end.
    pub fn new(config: &Config) -> Result<Self, FrontendError> {
        Self::with_markers(config.language_markers())
    }

    /// Creates an engine from explicit `(language, marker)` pairs
    pub fn with_markers<'a, I>(markers: I) -> Result<Self, FrontendError>
    where
        I: IntoIterator<Item = (Language, &'a str)>,
    {
        let markers: Vec<(Language, &str)> = markers.into_iter().collect();

        let mut languages = HashMap::new();
        for &(language, marker) in &markers {
            languages.insert(
                language,
                LanguageSetup {
                    frontend: frontend_for(language)?,
                    marker: marker.to_string(),
                },
            );
        }

        Ok(Self {
            checker: RegexChecker::initialize_with_markers(markers),
            languages,
        })
    }

    /// Checks `files` in parallel
    ///
    /// Unreadable or unparsable files are logged and counted as skipped.
    ///
    /// # Errors
    ///
    /// Returns `CheckerError` if a front-end produced symbols for a language
    /// the checker was not initialized for.
    pub fn execute(&self, files: &[FileEntry]) -> Result<ExecutionResult, CheckerError> {
        let rounds = files
            .par_iter()
            .map(|file| self.execute_file(file))
            .collect::<Result<Vec<Round>, CheckerError>>()?;

        let mut result = ExecutionResult::default();
        for round in rounds {
            match round {
                Round::Checked {
                    diagnostics,
                    symbols,
                } => {
                    result.files_checked += 1;
                    result.symbols_checked += symbols;
                    result.diagnostics.extend(diagnostics);
                }
                Round::Skipped => result.files_skipped += 1,
            }
        }

        result.diagnostics.sort_by(|a, b| a.location.cmp(&b.location));
        Ok(result)
    }

    fn execute_file(&self, file: &FileEntry) -> Result<Round, CheckerError> {
        let Some(setup) = self.languages.get(&file.language) else {
            tracing::debug!(path = %file.path.display(), language = %file.language, "language not configured");
            return Ok(Round::Skipped);
        };

        let content = match fs::read_to_string(&file.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %file.path.display(), error = %e, "failed to read file");
                return Ok(Round::Skipped);
            }
        };

        let unit = SourceUnit::new(&file.path, &content);
        let symbols = match setup.frontend.annotated_symbols(&unit, &setup.marker) {
            Ok(symbols) => symbols,
            Err(e) => {
                tracing::warn!(path = %file.path.display(), error = %e, "failed to collect symbols");
                return Ok(Round::Skipped);
            }
        };

        tracing::debug!(
            path = %file.path.display(),
            symbols = symbols.len(),
            "checking file"
        );

        let diagnostics = self.checker.scan(&symbols)?;
        Ok(Round::Checked {
            diagnostics,
            symbols: symbols.len(),
        })
    }
}

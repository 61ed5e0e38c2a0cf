//! Check command implementation
//!
//! Loads the configuration, discovers source files, runs one checking round
//! per file and prints the diagnostics. Any error diagnostic fails the run;
//! warnings never do.

use crate::cli::common::{
    EXIT_ERROR, EXIT_ERRORS_FOUND, EXIT_PARSE_ERROR, EXIT_SUCCESS, color_choice, discover_files,
    load_config,
};
use crate::config::{ColorOption, OutputFormat};
use crate::diagnostic::DiagnosticCounts;
use crate::engine::ExecutionEngine;
use crate::engine::file_walker::FileWalkerError;
use crate::error::{CheckerError, ConfigError, FrontendError};
use crate::output::{HumanFormatter, JsonlFormatter};
use std::path::{Path, PathBuf};

/// Options for one `regexcheck check` invocation
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    pub paths: Vec<PathBuf>,
    pub format: Option<OutputFormat>,
    pub color: Option<ColorOption>,
    pub config: Option<PathBuf>,
}

/// Error type specific to the check command
#[derive(Debug, thiserror::Error)]
pub(crate) enum CheckError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Front-end error: {0}")]
    Frontend(#[from] FrontendError),

    #[error("File walker error: {0}")]
    FileWalker(#[from] FileWalkerError),

    #[error(transparent)]
    Checker(#[from] CheckerError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CheckError {
    fn exit_code(&self) -> i32 {
        match self {
            CheckError::Config(ConfigError::Parse(_)) => EXIT_PARSE_ERROR,
            _ => EXIT_ERROR,
        }
    }
}

/// Run the check command
///
/// # Returns
///
/// Exit code:
/// - 0: no error diagnostics
/// - 1: one or more error diagnostics
/// - 2: configuration, I/O or front-end error
/// - 3: configuration file is not valid TOML
pub fn run_check(options: &CheckOptions) -> i32 {
    match run_check_inner(options) {
        Ok(true) => EXIT_SUCCESS,
        Ok(false) => EXIT_ERRORS_FOUND,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}

fn run_check_inner(options: &CheckOptions) -> Result<bool, CheckError> {
    let config = load_config(options.config.as_deref())?;
    let format = options.format.unwrap_or(config.output.format);
    let color = options.color.unwrap_or(config.output.color);

    let paths: Vec<PathBuf> = if options.paths.is_empty() {
        vec![Path::new(".").to_path_buf()]
    } else {
        options.paths.clone()
    };
    let files = discover_files(&paths, &config)?;
    if files.is_empty() && format == OutputFormat::Human {
        eprintln!("Warning: No files found to check.");
    }

    let engine = ExecutionEngine::new(&config)?;
    let result = engine.execute(&files)?;

    match format {
        OutputFormat::Human => HumanFormatter::new(color_choice(color)).print(&result)?,
        OutputFormat::Jsonl => print!("{}", JsonlFormatter::new().format(&result)),
    }

    Ok(DiagnosticCounts::tally(&result.diagnostics).errors == 0)
}

//! Helpers shared across CLI commands

use crate::config::{CONFIG_FILE_NAME, ColorOption, Config};
use crate::engine::file_walker::{FileEntry, FileWalker, FileWalkerError};
use crate::error::ConfigError;
use std::collections::HashSet;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERRORS_FOUND: i32 = 1;
pub const EXIT_ERROR: i32 = 2;
pub const EXIT_PARSE_ERROR: i32 = 3;

/// Loads the configuration
///
/// An explicit path must exist; the default `regexcheck.toml` is optional.
///
/// # Errors
///
/// Returns `ConfigError::Io` if an explicit file cannot be read and
/// `ConfigError::Parse`/`Validation` if the file is invalid.
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    match explicit {
        Some(path) => Config::load(path),
        None => Config::load_or_default(CONFIG_FILE_NAME),
    }
}

/// Walks `paths` and collects the files selected by `config`
///
/// Files reachable from more than one path are returned once, under the
/// first spelling in sort order; paths are compared after canonicalization.
pub fn discover_files(
    paths: &[PathBuf],
    config: &Config,
) -> Result<Vec<FileEntry>, FileWalkerError> {
    let mut all_files = Vec::new();

    for path in paths {
        let walker = FileWalker::new(
            path,
            &config.regexcheck.include,
            &config.regexcheck.exclude,
            &config.regexcheck.languages,
        )?;
        for result in walker.walk() {
            all_files.push(result?);
        }
    }

    all_files.sort_by(|a, b| a.path.cmp(&b.path));
    let mut seen = HashSet::new();
    all_files.retain(|file| {
        seen.insert(fs::canonicalize(&file.path).unwrap_or_else(|_| file.path.clone()))
    });
    tracing::info!(files = all_files.len(), "discovered source files");
    Ok(all_files)
}

/// Resolves the color choice for stderr output
pub(crate) fn color_choice(option: ColorOption) -> termcolor::ColorChoice {
    match option {
        ColorOption::Always => termcolor::ColorChoice::Always,
        ColorOption::Never => termcolor::ColorChoice::Never,
        ColorOption::Auto if std::io::stderr().is_terminal() => termcolor::ColorChoice::Auto,
        ColorOption::Auto => termcolor::ColorChoice::Never,
    }
}

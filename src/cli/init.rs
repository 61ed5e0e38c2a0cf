//! Initialize a regexcheck project
//!
//! Writes a commented default `regexcheck.toml`.

use crate::config::CONFIG_FILE_NAME;
use crate::types::Language;
use std::fs;
use std::path::{Path, PathBuf};

/// Default content for regexcheck.toml, before the language list is filled in
const DEFAULT_CONFIG_TEMPLATE: &str = r#"[regexcheck]
version = "1"

# Languages to check
languages = [{languages}]

# File patterns to include (defaults to all)
# include = ["src/**"]

# File patterns to exclude
exclude = ["target/**", "build/**"]

[markers]
# Attribute names marking regular-expression constants
# rust = "regex"     # #[regex]
# java = "Regex"     # @Regex

[output]
format = "human"
color = "auto"
"#;

/// Default content for regexcheck.toml, listing the languages compiled in
pub(crate) fn default_config_toml() -> String {
    let languages = Language::enabled()
        .iter()
        .map(|language| format!("\"{}\"", language))
        .collect::<Vec<_>>()
        .join(", ");
    DEFAULT_CONFIG_TEMPLATE.replace("{languages}", &languages)
}

/// Error type for init command
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{} already exists (use --force to overwrite)", .0.display())]
    AlreadyExists(PathBuf),
}

/// What `run_init` did with the configuration file
#[derive(Debug, PartialEq, Eq)]
pub enum InitOutcome {
    Created(PathBuf),
    Overwritten(PathBuf),
}

/// Writes the default configuration into `dir`
///
/// # Errors
///
/// Returns `InitError::AlreadyExists` when the file exists and `force` is
/// false, and `InitError::Io` if it cannot be written.
pub fn run_init(dir: &Path, force: bool) -> Result<InitOutcome, InitError> {
    let path = dir.join(CONFIG_FILE_NAME);
    let existed = path.exists();

    if existed && !force {
        return Err(InitError::AlreadyExists(path));
    }

    fs::write(&path, default_config_toml())?;
    tracing::info!(path = %path.display(), "wrote configuration");

    Ok(if existed {
        InitOutcome::Overwritten(path)
    } else {
        InitOutcome::Created(path)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_default_config_parses() {
        let config = Config::parse(&default_config_toml()).unwrap();
        assert_eq!(config.regexcheck.exclude.len(), 2);
        assert_eq!(config.regexcheck.languages, Language::enabled());
        assert_eq!(config.markers.rust.as_str(), "regex");
    }

    #[test]
    fn test_init_creates_then_refuses() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);

        assert_eq!(
            run_init(temp.path(), false).unwrap(),
            InitOutcome::Created(path.clone())
        );
        assert!(matches!(
            run_init(temp.path(), false),
            Err(InitError::AlreadyExists(_))
        ));
    }

    #[test]
    fn test_init_force_overwrites() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "garbage").unwrap();

        assert_eq!(
            run_init(temp.path(), true).unwrap(),
            InitOutcome::Overwritten(path.clone())
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), default_config_toml());
    }
}

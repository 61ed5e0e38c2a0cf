//! Configuration loading and validation tests

mod common;

use common::TestResult;
use regexcheck::config::{ColorOption, Config, OutputFormat};
use regexcheck::{ConfigError, GlobPattern, Language};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_from_file() -> TestResult {
    let temp = TempDir::new()?;
    let path = temp.path().join("regexcheck.toml");
    fs::write(
        &path,
        r#"
[regexcheck]
version = "1"
languages = ["java"]
include = ["src/main/java/**"]

[markers]
java = "Pattern"
"#,
    )?;

    let config = Config::load(&path)?;
    assert_eq!(config.regexcheck.languages, vec![Language::Java]);
    assert_eq!(
        config.regexcheck.include,
        vec![GlobPattern::new("src/main/java/**")]
    );
    assert_eq!(config.marker_for(Language::Java).as_str(), "Pattern");
    assert_eq!(config.marker_for(Language::Rust).as_str(), "regex");
    assert_eq!(config.output.format, OutputFormat::Human);
    assert_eq!(config.output.color, ColorOption::Auto);
    Ok(())
}

#[test]
fn test_language_markers_follow_configured_languages() -> TestResult {
    let config = Config::parse(
        "[regexcheck]\nversion = \"1\"\nlanguages = [\"java\", \"rust\"]\n\n[markers]\nrust = \"re\"\n",
    )?;
    let pairs: Vec<(Language, &str)> = config.language_markers().collect();
    assert_eq!(pairs, vec![(Language::Java, "Regex"), (Language::Rust, "re")]);
    Ok(())
}

#[test]
fn test_load_or_default_without_file() -> TestResult {
    let temp = TempDir::new()?;
    let config = Config::load_or_default(temp.path().join("regexcheck.toml"))?;
    assert_eq!(config, Config::default());
    assert_eq!(config.regexcheck.languages, Language::enabled());
    Ok(())
}

#[test]
fn test_load_missing_file_is_io_error() {
    let temp = assert_ok!(TempDir::new());
    let result = Config::load(temp.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_malformed_toml_is_parse_error() {
    let result = Config::parse("[regexcheck\nversion = 1");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_unknown_language_is_parse_error() {
    let result = Config::parse("[regexcheck]\nversion = \"1\"\nlanguages = [\"cobol\"]\n");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_invalid_marker_is_rejected() {
    let result = Config::parse(
        "[regexcheck]\nversion = \"1\"\nlanguages = [\"rust\"]\n\n[markers]\nrust = \"not a name\"\n",
    );
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_wrong_version_is_validation_error() {
    let result = Config::parse("[regexcheck]\nversion = \"2\"\nlanguages = [\"rust\"]\n");
    match result {
        Err(ConfigError::Validation(message)) => assert!(message.contains("version")),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_empty_languages_is_validation_error() {
    let result = Config::parse("[regexcheck]\nversion = \"1\"\nlanguages = []\n");
    assert!(matches!(result, Err(ConfigError::Validation(_))));
}

#[test]
fn test_bad_exclude_glob_is_validation_error() {
    let result = Config::parse(
        "[regexcheck]\nversion = \"1\"\nlanguages = [\"rust\"]\nexclude = [\"src/[\"]\n",
    );
    match result {
        Err(ConfigError::Validation(message)) => assert!(message.contains("exclude")),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_config_round_trips_through_toml() -> TestResult {
    let config = Config::default();
    let text = toml::to_string(&config)?;
    assert_eq!(Config::parse(&text)?, config);
    Ok(())
}

//! Parsing and validation for regexcheck.toml configuration files

use crate::error::ConfigError;
use crate::types::{GlobPattern, Language, MarkerName};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name looked up in the working directory when `--config` is absent
pub const CONFIG_FILE_NAME: &str = "regexcheck.toml";

/// Main configuration struct for regexcheck.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Checker metadata and file selection
    pub regexcheck: CheckerMeta,

    /// Marker attribute names per language
    #[serde(default)]
    pub markers: MarkersConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load configuration from `path`, falling back to defaults when it does not exist
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse configuration from a TOML string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Marker name configured for `language`
    pub fn marker_for(&self, language: Language) -> &MarkerName {
        match language {
            Language::Rust => &self.markers.rust,
            Language::Java => &self.markers.java,
        }
    }

    /// Configured languages paired with their marker names
    pub fn language_markers(&self) -> impl Iterator<Item = (Language, &str)> + '_ {
        self.regexcheck
            .languages
            .iter()
            .map(|&language| (language, self.marker_for(language).as_str()))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.regexcheck.version != "1" {
            return Err(ConfigError::Validation(format!(
                "Unsupported configuration version '{}'. Expected '1'",
                self.regexcheck.version
            )));
        }

        if self.regexcheck.languages.is_empty() {
            return Err(ConfigError::Validation(
                "No languages configured. Add languages to regexcheck.toml to start checking."
                    .to_string(),
            ));
        }

        if let Some(language) = self
            .regexcheck
            .languages
            .iter()
            .find(|language| !language.is_compiled_in())
        {
            return Err(ConfigError::Validation(format!(
                "Language '{}' is not compiled into this build (enable the lang-{} feature)",
                language, language
            )));
        }

        for (kind, patterns) in [
            ("include", &self.regexcheck.include),
            ("exclude", &self.regexcheck.exclude),
        ] {
            for pattern in patterns {
                globset::Glob::new(pattern.as_str()).map_err(|e| {
                    ConfigError::Validation(format!(
                        "Invalid {} glob pattern '{}': {}",
                        kind,
                        pattern.as_str(),
                        e
                    ))
                })?;
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            regexcheck: CheckerMeta {
                version: "1".to_string(),
                languages: Language::enabled(),
                include: default_include(),
                exclude: Vec::new(),
            },
            markers: MarkersConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// `[regexcheck]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckerMeta {
    /// Configuration version (must be "1")
    pub version: String,

    /// Languages to analyze
    #[serde(default)]
    pub languages: Vec<Language>,

    /// File patterns to include
    #[serde(default = "default_include")]
    pub include: Vec<GlobPattern>,

    /// File patterns to exclude
    #[serde(default)]
    pub exclude: Vec<GlobPattern>,
}

fn default_include() -> Vec<GlobPattern> {
    vec![GlobPattern::new("**/*")]
}

/// `[markers]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkersConfig {
    #[serde(default = "default_rust_marker")]
    pub rust: MarkerName,

    #[serde(default = "default_java_marker")]
    pub java: MarkerName,
}

fn default_rust_marker() -> MarkerName {
    MarkerName::default_for(Language::Rust)
}

fn default_java_marker() -> MarkerName {
    MarkerName::default_for(Language::Java)
}

impl Default for MarkersConfig {
    fn default() -> Self {
        Self {
            rust: default_rust_marker(),
            java: default_java_marker(),
        }
    }
}

/// Output configuration section
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Color output setting
    #[serde(default)]
    pub color: ColorOption,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    #[default]
    Human,
    /// JSON Lines format (one JSON object per line)
    Jsonl,
}

/// Color output options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorOption {
    /// Auto-detect based on terminal capabilities
    #[default]
    Auto,
    /// Always use color
    Always,
    /// Never use color
    Never,
}

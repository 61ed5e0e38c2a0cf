//! Configuration file parsing and validation

pub mod checker_toml;

pub use checker_toml::{
    CONFIG_FILE_NAME, CheckerMeta, ColorOption, Config, MarkersConfig, OutputConfig, OutputFormat,
};

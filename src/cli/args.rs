//! CLI argument parsing using clap

use crate::config::{ColorOption, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// regexcheck CLI main entry point
#[derive(Parser, Debug)]
#[command(name = "regexcheck")]
#[command(about = "Compile-time validation of regular-expression constants")]
#[command(version)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Output coloring (overrides the configuration file)
    #[arg(long, global = true)]
    pub color: Option<ColorOption>,
}

/// Available regexcheck subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check marked regular-expression constants
    Check {
        /// Paths to check (defaults to current directory)
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Output format (overrides the configuration file)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Configuration file (defaults to ./regexcheck.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Log progress to stderr
        #[arg(short, long)]
        verbose: bool,
    },

    /// Write a default regexcheck.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Command {
    pub fn verbose(&self) -> bool {
        matches!(self, Command::Check { verbose: true, .. })
    }
}

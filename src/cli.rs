//! CLI argument parsing and command dispatch

pub mod args;
pub mod check;
pub mod common;
pub mod init;

pub use args::{Cli, Command};
pub use check::{CheckOptions, run_check};
pub use init::{InitError, InitOutcome, run_init};

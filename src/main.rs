//! regexcheck CLI entry point

use clap::Parser;
use regexcheck::cli::{CheckOptions, Cli, Command, InitOutcome};
use regexcheck::cli::common::{EXIT_ERROR, EXIT_SUCCESS};
use std::path::Path;
use std::process;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "warn,regexcheck=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.command.verbose());

    let exit_code = match cli.command {
        Command::Init { force } => match regexcheck::cli::run_init(Path::new("."), force) {
            Ok(InitOutcome::Created(path)) => {
                println!("Created {}", path.display());
                EXIT_SUCCESS
            }
            Ok(InitOutcome::Overwritten(path)) => {
                println!("Overwrote {}", path.display());
                EXIT_SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                EXIT_ERROR
            }
        },
        Command::Check {
            paths,
            format,
            config,
            verbose: _,
        } => regexcheck::cli::run_check(&CheckOptions {
            paths,
            format,
            color: cli.color,
            config,
        }),
    };

    process::exit(exit_code);
}

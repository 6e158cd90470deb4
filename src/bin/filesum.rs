//! Filesum CLI Binary
//!
//! Command-line interface for incremental checksum manifests.

use clap::Parser;
use filesum::error::ChecksumError;
use filesum::logging::init_logging;
use filesum::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    let context = match CliContext::new(cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    let logging = context.logging_config(&cli);
    if let Err(e) = init_logging(Some(&logging)) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if matches!(e, ChecksumError::UnsupportedAlgorithm(_)) {
                eprintln!("Run `filesum algorithms` to list supported algorithms.");
            }
            process::exit(1);
        }
    }
}

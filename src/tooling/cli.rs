//! CLI Tooling
//!
//! Command-line interface for checksum runs. Arguments are folded over the loaded
//! configuration and handed to the orchestrator; the CLI itself holds no state.

use crate::checksum::{
    format_algorithms_text, format_report_text, ChecksumOrchestrator, ChecksumRequest,
};
use crate::config::{ConfigLoader, FilesumConfig};
use crate::digest::Algorithm;
use crate::error::ChecksumError;
use crate::logging::LoggingConfig;
use crate::manifest::manifest_file_name;
use crate::types::WriteMode;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use tracing::debug;

/// Filesum CLI - incremental per-directory checksum manifests
#[derive(Parser)]
#[command(name = "filesum")]
#[command(about = "Compute file checksums into per-directory manifests")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (info level)
    #[arg(long)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Checksum a file or directory and record results in sidecar manifests
    Checksum {
        /// File or directory to checksum
        path: PathBuf,
        /// Algorithm identifier (defaults to checksum.algorithm from config)
        algorithm: Option<String>,
        /// Walk subdirectories
        #[arg(short, long)]
        recursive: bool,
        /// Keep existing manifest entries and add only new files
        #[arg(short, long)]
        append: bool,
        /// Digest worker threads
        #[arg(short, long)]
        jobs: Option<usize>,
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// List supported checksum algorithms
    Algorithms {
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}

/// CLI execution context
pub struct CliContext {
    config: FilesumConfig,
    orchestrator: ChecksumOrchestrator,
}

impl CliContext {
    /// Create a new CLI context, loading configuration from `config_path` or the default sources
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ChecksumError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        Ok(Self::with_config(config, ChecksumOrchestrator::new()))
    }

    pub fn with_config(config: FilesumConfig, orchestrator: ChecksumOrchestrator) -> Self {
        Self {
            config,
            orchestrator,
        }
    }

    pub fn config(&self) -> &FilesumConfig {
        &self.config
    }

    /// Logging configuration with CLI flags applied over the loaded config
    pub fn logging_config(&self, cli: &Cli) -> LoggingConfig {
        let mut logging = self.config.logging.clone();
        if cli.verbose {
            logging.level = "info".to_string();
        }
        if let Some(level) = &cli.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &cli.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &cli.log_output {
            logging.output = output.clone();
        }
        if let Some(file) = &cli.log_file {
            logging.file = Some(file.clone());
        }
        logging
    }

    /// Execute a command and return its rendered output
    pub fn execute(&self, command: &Commands) -> Result<String, ChecksumError> {
        debug!(command = command_name(command), "Executing command");
        match command {
            Commands::Checksum {
                path,
                algorithm,
                recursive,
                append,
                jobs,
                format,
            } => {
                let request =
                    self.checksum_request(path, algorithm.as_deref(), *recursive, *append, *jobs)?;
                let report = self.orchestrator.run(&request)?;
                if format == "json" {
                    to_json(&report)
                } else {
                    Ok(format_report_text(&report))
                }
            }
            Commands::Algorithms { format } => {
                let supported = self.orchestrator.registry().supported();
                if format == "json" {
                    let entries: Vec<_> = supported
                        .iter()
                        .map(|algorithm| {
                            json!({
                                "name": algorithm.name(),
                                "digest_bytes": algorithm.output_len(),
                                "manifest": manifest_file_name(*algorithm),
                            })
                        })
                        .collect();
                    to_json(&json!({ "algorithms": entries }))
                } else {
                    Ok(format_algorithms_text(&supported))
                }
            }
        }
    }

    /// Fold command arguments over configured defaults
    fn checksum_request(
        &self,
        path: &std::path::Path,
        algorithm: Option<&str>,
        recursive: bool,
        append: bool,
        jobs: Option<usize>,
    ) -> Result<ChecksumRequest, ChecksumError> {
        let defaults = &self.config.checksum;
        let algorithm: Algorithm = algorithm.unwrap_or(&defaults.algorithm).parse()?;
        Ok(ChecksumRequest::new(path, algorithm)
            .recursive(recursive || defaults.recursive)
            .mode(WriteMode::from_append(append || defaults.append))
            .threads(jobs.or(defaults.threads)))
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ChecksumError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ChecksumError::ConfigError(format!("Failed to serialize output: {}", e)))
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Checksum { .. } => "checksum",
        Commands::Algorithms { .. } => "algorithms",
    }
}

//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::config::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// SheetPulse - project roadmap and work-log dashboard from spreadsheet feeds
///
/// Reads the phases, modules and daily work-log feeds (published CSV
/// exports or local files), links the logged hours to modules and prints
/// a dashboard summary.
///
/// Examples:
///   sheetpulse
///   sheetpulse --format json --output dashboard.json
///   sheetpulse --phases data/phases.csv --modules data/modules.csv --logs data/logs.csv
///   sheetpulse --module 12
///   sheetpulse --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Phases feed location (URL or file path)
    #[arg(long, value_name = "LOCATION", env = "SHEETPULSE_PHASES")]
    pub phases: Option<String>,

    /// Modules feed location (URL or file path)
    #[arg(long, value_name = "LOCATION", env = "SHEETPULSE_MODULES")]
    pub modules: Option<String>,

    /// Daily work-log feed location (URL or file path)
    #[arg(long, value_name = "LOCATION", env = "SHEETPULSE_LOGS")]
    pub logs: Option<String>,

    /// Output file path (defaults to standard output)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (markdown, json)
    #[arg(short, long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Print the detail view of a single module instead of the dashboard
    #[arg(short, long, value_name = "ID")]
    pub module: Option<i64>,

    /// Number of recent activity entries in the Markdown report
    #[arg(long, value_name = "NUM")]
    pub recent: Option<usize>,

    /// Request timeout in seconds for each feed
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .sheetpulse.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only, no progress spinner)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .sheetpulse.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(id) = self.module {
            if id <= 0 {
                return Err("Module id must be a positive number".to_string());
            }
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        for (flag, value) in [
            ("--phases", &self.phases),
            ("--modules", &self.modules),
            ("--logs", &self.logs),
        ] {
            if let Some(location) = value {
                if location.trim().is_empty() {
                    return Err(format!("{} must not be empty", flag));
                }
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.sheetpulse.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".sheetpulse.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Feed locations.
    #[serde(default)]
    pub feeds: FeedsConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Output file path. Standard output when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

/// Where the three feeds are read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedsConfig {
    /// Phases feed: URL or file path.
    #[serde(default = "default_phases")]
    pub phases: String,

    /// Modules feed: URL or file path.
    #[serde(default = "default_modules")]
    pub modules: String,

    /// Daily work-log feed: URL or file path.
    #[serde(default = "default_logs")]
    pub logs: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            phases: default_phases(),
            modules: default_modules(),
            logs: default_logs(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_phases() -> String {
    "https://docs.google.com/spreadsheets/d/e/2PACX-1vQdFVuQVSZo1N3tHpUTflvm4ihZwf03NVdgMmuUM5sfhWp7BqngiwiFKnpi-2h2Zz5SYegu5hoc5oWj/pub?gid=292334100&single=true&output=csv".to_string()
}

fn default_modules() -> String {
    "https://docs.google.com/spreadsheets/d/e/2PACX-1vRYZ3wUgfEFjk9TzHKxaZf9iLGE30KDLOwR6_ufaanaz0ocO_4S0xNuJJtcfzpy1JyzasGeAPZ_s96S/pub?gid=1457823520&single=true&output=csv".to_string()
}

fn default_logs() -> String {
    "https://docs.google.com/spreadsheets/d/e/2PACX-1vQyyn3C4bgZfVW-AW2O4nfwKiDqCiLA7pAuhvN2x09sIMUweviV7C6NmhJbeZA2qgr5Mp_H1GqkN5rC/pub?gid=108739046&single=true&output=csv".to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Output format for the rendered dashboard.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown summary (default)
    #[default]
    Markdown,
    /// Full JSON model
    Json,
}

/// Report generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Output format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Number of recent work-log entries in the Markdown activity feed.
    #[serde(default = "default_recent_activity")]
    pub recent_activity: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            recent_activity: default_recent_activity(),
        }
    }
}

fn default_recent_activity() -> usize {
    10
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.sheetpulse.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref phases) = args.phases {
            self.feeds.phases = phases.clone();
        }
        if let Some(ref modules) = args.modules {
            self.feeds.modules = modules.clone();
        }
        if let Some(ref logs) = args.logs {
            self.feeds.logs = logs.clone();
        }
        if let Some(timeout) = args.timeout {
            self.feeds.timeout_seconds = timeout;
        }

        if let Some(format) = args.format {
            self.report.format = format;
        }
        if let Some(recent) = args.recent {
            self.report.recent_activity = recent;
        }

        if let Some(ref output) = args.output {
            self.general.output = Some(output.clone());
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

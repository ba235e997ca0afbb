//! SheetPulse - project roadmap dashboard from spreadsheet feeds
//!
//! A CLI tool that reads the phases, modules and daily work-log feeds,
//! links logged hours to modules and renders the result as Markdown or
//! JSON.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (config, feed retrieval, output write, etc.)

mod analysis;
mod cli;
mod config;
mod decode;
mod feed;
mod ingest;
mod models;
mod report;

use anyhow::{Context, Result};
use chrono::Local;
use cli::Args;
use config::{Config, OutputFormat, CONFIG_FILE_NAME};
use indicatif::{ProgressBar, ProgressStyle};
use ingest::{FeedKind, FeedLocator};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("SheetPulse v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args).await {
        error!("Dashboard refresh failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .sheetpulse.toml.
fn handle_init_config() -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "{} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("Created {} with default settings.", CONFIG_FILE_NAME);
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so the rendered dashboard can be piped from stdout.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run one ingestion cycle and write the rendered dashboard.
async fn run(args: Args) -> Result<()> {
    let start_time = Instant::now();

    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let locator = FeedLocator::from_config(&config.feeds)?;
    for kind in FeedKind::ALL {
        debug!("{} feed: {}", kind, locator.location(kind));
    }

    let spinner = (!args.quiet).then(fetch_spinner);

    let result = ingest::ingest(&locator).await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    let dashboard = match result {
        Ok(dashboard) => dashboard,
        Err(e) => {
            if let Some(kind) = e.feed() {
                warn!("The {} feed could not be loaded", kind);
            }
            return Err(e).context("Failed to load dashboard data");
        }
    };

    let output = if let Some(id) = args.module {
        report::generate_module_details(&dashboard, id)
            .with_context(|| format!("No module with id {}", id))?
    } else {
        match config.report.format {
            OutputFormat::Json => report::generate_json_report(&dashboard)?,
            OutputFormat::Markdown => report::generate_markdown_report(
                &dashboard,
                Local::now().date_naive(),
                config.report.recent_activity,
            ),
        }
    };

    match config.general.output {
        Some(ref path) => {
            std::fs::write(path, &output)
                .with_context(|| format!("Failed to write dashboard to {}", path.display()))?;
            info!("Dashboard written to {}", path.display());
        }
        None => print!("{}", output),
    }

    info!(
        "Done in {:.1}s ({} modules, {} log entries)",
        start_time.elapsed().as_secs_f64(),
        dashboard.modules.len(),
        dashboard.logs.len()
    );

    Ok(())
}

fn fetch_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message("Fetching feeds...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", CONFIG_FILE_NAME);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}

//! The ingestion cycle: fetch, decode, aggregate.

use super::error::IngestError;
use super::source::{FeedKind, FeedProvider};
use crate::analysis::aggregate_hours;
use crate::decode::{decode_logs, decode_modules, decode_phases};
use crate::models::Dashboard;
use tracing::info;

/// Run one ingestion cycle against `provider`.
///
/// The three feeds are fetched concurrently. If any fetch fails the cycle
/// fails with that error and nothing is decoded. Every call decodes fresh
/// modules, so hour totals never carry over between cycles.
pub async fn ingest<P: FeedProvider>(provider: &P) -> Result<Dashboard, IngestError> {
    let (phases, modules, logs) = futures::try_join!(
        provider.fetch(FeedKind::Phases),
        provider.fetch(FeedKind::Modules),
        provider.fetch(FeedKind::Logs),
    )?;

    Ok(build_dashboard(&phases, &modules, &logs))
}

/// Decode three raw payloads and aggregate work-log hours onto the modules.
pub fn build_dashboard(phases_text: &str, modules_text: &str, logs_text: &str) -> Dashboard {
    let phases = decode_phases(phases_text);
    let mut modules = decode_modules(modules_text);
    let logs = decode_logs(logs_text);

    aggregate_hours(&mut modules, &logs);

    info!(
        "Ingested {} phases, {} modules, {} log entries",
        phases.len(),
        modules.len(),
        logs.len()
    );

    Dashboard {
        phases,
        modules,
        logs,
    }
}

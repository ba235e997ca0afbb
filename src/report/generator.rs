//! Markdown and JSON report generation.
//!
//! This module renders an ingested [`Dashboard`] as a Markdown summary or
//! as the full JSON model.

use crate::analysis::{
    last_update, log_module_names, modules_by_progress, phase_color, roadmap, rounded_hours,
    total_logged_hours, RoadmapPhase,
};
use crate::models::{Dashboard, Module, WorkLogEntry};
use anyhow::Result;
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%d/%m/%Y";

/// Generate a complete Markdown report.
///
/// `today` stands in for the last-update date when no module carries one.
pub fn generate_markdown_report(dashboard: &Dashboard, today: NaiveDate, recent: usize) -> String {
    let mut output = String::new();

    output.push_str("# Project Dashboard\n\n");

    let updated = last_update(&dashboard.modules).unwrap_or(today);
    output.push_str(&format!("*Last update: {}*\n\n", updated.format(DATE_FORMAT)));

    output.push_str(&generate_summary_section(dashboard));
    output.push_str(&generate_modules_section(dashboard));
    output.push_str(&generate_roadmap_section(&roadmap(dashboard)));
    output.push_str(&generate_activity_section(&dashboard.logs, recent));

    output
}

/// Generate the summary section.
fn generate_summary_section(dashboard: &Dashboard) -> String {
    let mut section = String::new();

    section.push_str("## Summary\n\n");
    section.push_str(&format!("- **Phases:** {}\n", dashboard.phases.len()));
    section.push_str(&format!("- **Modules:** {}\n", dashboard.modules.len()));
    if !dashboard.modules.is_empty() {
        let avg = dashboard
            .modules
            .iter()
            .map(|m| m.percent_complete as f64)
            .sum::<f64>()
            / dashboard.modules.len() as f64;
        section.push_str(&format!("- **Average Progress:** {:.0}%\n", avg));
    }
    section.push_str(&format!("- **Log Entries:** {}\n", dashboard.logs.len()));
    section.push_str(&format!(
        "- **Hours Logged:** {}\n",
        rounded_hours(total_logged_hours(&dashboard.logs))
    ));
    let active = log_module_names(&dashboard.logs);
    if !active.is_empty() {
        section.push_str(&format!("- **Active Modules:** {}\n", active.join(", ")));
    }
    section.push('\n');

    section
}

/// Generate the modules table, most complete first.
fn generate_modules_section(dashboard: &Dashboard) -> String {
    let mut section = String::new();

    section.push_str("## Modules\n\n");

    if dashboard.modules.is_empty() {
        section.push_str("No modules found.\n\n");
        return section;
    }

    section.push_str("| Module | Phase | Theme | Start | End | Hours | Status | Progress |\n");
    section.push_str("|:---|:---|:---|:---:|:---:|:---:|:---|:---:|\n");

    for module in modules_by_progress(&dashboard.modules) {
        section.push_str(&generate_module_row(dashboard, module));
    }
    section.push('\n');

    section
}

fn generate_module_row(dashboard: &Dashboard, module: &Module) -> String {
    // Phase names look like "Fase 1: Discovery"; the table shows the prefix.
    let phase = dashboard
        .phase(&module.phase_id)
        .map(|p| p.name.split(':').next().unwrap_or("").trim())
        .filter(|name| !name.is_empty())
        .unwrap_or("-");

    let status = if module.status_label.is_empty() {
        "N/A"
    } else {
        module.status_label.as_str()
    };

    format!(
        "| {} | {} | {} | {} | {} | {} hs | {} | {}% |\n",
        cell(&module.name),
        cell(phase),
        cell(phase_color(&dashboard.phases, &module.phase_id)),
        cell(or_dash(&module.start_date)),
        cell(or_dash(&module.end_date)),
        rounded_hours(module.total_hours),
        cell(format!("{} {}", module.status_icon, status).trim()),
        module.percent_complete
    )
}

/// Generate the detail view of a single module, or `None` for an unknown id.
pub fn generate_module_details(dashboard: &Dashboard, id: i64) -> Option<String> {
    let module = dashboard.module(id)?;
    let mut details = String::new();

    details.push_str(&format!("## {}\n\n", module.name));

    if module.comment.is_empty() {
        details.push_str("No description available.\n\n");
    } else {
        details.push_str(&format!("{}\n\n", module.comment));
    }

    if !module.start_date.is_empty() {
        details.push_str(&format!(
            "- **Schedule:** {} to {}\n",
            module.start_date,
            or_dash(&module.end_date)
        ));
    }
    if let Some(phase) = dashboard.phase(&module.phase_id) {
        details.push_str(&format!("- **Phase:** {}\n", phase.name));
    }
    details.push_str(&format!("- **Progress:** {}%\n", module.percent_complete));
    details.push_str(&format!(
        "- **Hours:** {}\n",
        rounded_hours(module.total_hours)
    ));
    if !module.status_label.is_empty() {
        details.push_str(&format!(
            "- **Status:** {}\n",
            format!("{} {}", module.status_icon, module.status_label).trim()
        ));
    }

    Some(details)
}

/// Generate the roadmap section.
fn generate_roadmap_section(roadmap: &[RoadmapPhase<'_>]) -> String {
    if roadmap.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Roadmap\n\n");

    for entry in roadmap {
        section.push_str(&format!(
            "### {} `{}`\n\n",
            entry.phase.name, entry.phase.color_tag
        ));
        for module in &entry.modules {
            section.push_str(&format!(
                "- {} **{}**: {} to {}\n",
                module.status_icon,
                module.name,
                module.start_date,
                or_dash(&module.end_date)
            ));
        }
        section.push('\n');
    }

    section
}

/// Generate the recent activity feed.
fn generate_activity_section(logs: &[WorkLogEntry], recent: usize) -> String {
    if logs.is_empty() || recent == 0 {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Recent Activity\n\n");

    for entry in logs.iter().take(recent) {
        section.push_str(&generate_activity_item(entry));
    }
    section.push('\n');

    section
}

fn generate_activity_item(entry: &WorkLogEntry) -> String {
    let date = entry
        .timestamp
        .map(|ts| ts.format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string());

    let mut item = format!(
        "- {} **{}** ({}) {} [{}]",
        entry.action_kind().icon(),
        entry.developer,
        date,
        entry.action_type,
        entry.module_name
    );
    if !entry.message.is_empty() {
        item.push_str(&format!(": {}", entry.message));
    }
    item.push('\n');

    item
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

/// Escape a value for use inside a Markdown table cell.
fn cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

/// Generate a JSON report.
pub fn generate_json_report(dashboard: &Dashboard) -> Result<String> {
    serde_json::to_string_pretty(dashboard).map_err(Into::into)
}

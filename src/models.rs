//! Data models for the dashboard feeds.
//!
//! This module contains the typed records decoded from the three feeds
//! (phases, modules and work logs) and the [`Dashboard`] value that one
//! ingestion cycle produces.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A project stage, decoded from the phases feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    /// Unique key, never empty.
    pub id: String,
    /// Display name of the phase.
    pub name: String,
    /// Opaque theme label (e.g. "orange"), not validated.
    pub color_tag: String,
}

/// A unit of work tracked on the roadmap, decoded from the modules feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Module {
    /// Unique key, always greater than zero.
    pub id: i64,
    pub name: String,
    /// Progress percentage, clamped to `0..=100`.
    pub percent_complete: u8,
    /// Raw last-modified date as written in the sheet (usually `dd/mm/yyyy`).
    pub last_modified_date: String,
    /// Foreign key into the phases feed. May not resolve.
    pub phase_id: String,
    pub start_date: String,
    pub end_date: String,
    pub status_label: String,
    pub status_icon: String,
    pub status_style_class: String,
    pub comment: String,
    /// Hours accumulated from the work logs. Only the aggregator writes this.
    pub total_hours: f64,
}

/// One line of a developer's daily work log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkLogEntry {
    /// `None` when the date cell could not be interpreted.
    pub timestamp: Option<NaiveDateTime>,
    pub developer: String,
    /// Name of the module the work was logged against.
    pub module_name: String,
    pub action_type: String,
    pub message: String,
    /// Hours worked, never negative.
    pub working_time: f64,
}

impl WorkLogEntry {
    /// Classify the free-text action type.
    pub fn action_kind(&self) -> ActionKind {
        ActionKind::from(self.action_type.as_str())
    }
}

/// Known action categories used in the work-log feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Bugfix,
    Testing,
    Investigation,
    Documentation,
    Other,
}

impl ActionKind {
    /// Returns an emoji representation of the action.
    pub fn icon(&self) -> &'static str {
        match self {
            ActionKind::Bugfix => "🐞",
            ActionKind::Testing => "🧪",
            ActionKind::Investigation => "🔍",
            ActionKind::Documentation => "📄",
            ActionKind::Other => "🔧",
        }
    }
}

impl From<&str> for ActionKind {
    /// Matches the exact labels used in the sheet.
    fn from(s: &str) -> Self {
        match s {
            "Bugfix" => ActionKind::Bugfix,
            "Testing" => ActionKind::Testing,
            "Investigación" => ActionKind::Investigation,
            "Documentación" => ActionKind::Documentation,
            _ => ActionKind::Other,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Bugfix => write!(f, "Bugfix"),
            ActionKind::Testing => write!(f, "Testing"),
            ActionKind::Investigation => write!(f, "Investigation"),
            ActionKind::Documentation => write!(f, "Documentation"),
            ActionKind::Other => write!(f, "Other"),
        }
    }
}

/// The result of one ingestion cycle.
///
/// Each call to [`crate::ingest::ingest`] returns a fresh value; nothing is
/// cached between cycles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub phases: Vec<Phase>,
    pub modules: Vec<Module>,
    /// Sorted newest first.
    pub logs: Vec<WorkLogEntry>,
}

impl Dashboard {
    /// Look up a phase by id. The first match wins.
    pub fn phase(&self, id: &str) -> Option<&Phase> {
        self.phases.iter().find(|p| p.id == id)
    }

    /// Look up a module by id. The first match wins.
    pub fn module(&self, id: i64) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn module(id: i64, name: &str) -> Module {
        Module {
            id,
            name: name.to_string(),
            percent_complete: 0,
            last_modified_date: String::new(),
            phase_id: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            status_label: String::new(),
            status_icon: String::new(),
            status_style_class: String::new(),
            comment: String::new(),
            total_hours: 0.0,
        }
    }

    pub fn log(module_name: &str, action_type: &str, working_time: f64) -> WorkLogEntry {
        WorkLogEntry {
            timestamp: None,
            developer: "Ana".to_string(),
            module_name: module_name.to_string(),
            action_type: action_type.to_string(),
            message: String::new(),
            working_time,
        }
    }

    pub fn phase(id: &str, name: &str, color_tag: &str) -> Phase {
        Phase {
            id: id.to_string(),
            name: name.to_string(),
            color_tag: color_tag.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_kind_from_str() {
        assert_eq!(ActionKind::from("Bugfix"), ActionKind::Bugfix);
        assert_eq!(ActionKind::from("Investigación"), ActionKind::Investigation);
        assert_eq!(ActionKind::from("Documentación"), ActionKind::Documentation);
        // Labels are matched exactly, unlike the aggregation rule.
        assert_eq!(ActionKind::from("bugfix"), ActionKind::Other);
        assert_eq!(ActionKind::from("Feature"), ActionKind::Other);
    }

    #[test]
    fn test_action_kind_icon() {
        assert_eq!(ActionKind::Bugfix.icon(), "🐞");
        assert_eq!(ActionKind::Testing.icon(), "🧪");
        assert_eq!(ActionKind::Other.icon(), "🔧");
    }

    #[test]
    fn test_dashboard_lookups() {
        let dashboard = Dashboard {
            phases: vec![
                fixtures::phase("P1", "Phase 1", "orange"),
                fixtures::phase("P1", "Shadowed", "blue"),
            ],
            modules: vec![fixtures::module(3, "Auth"), fixtures::module(7, "Billing")],
            logs: vec![],
        };

        assert_eq!(dashboard.phase("P1").map(|p| p.name.as_str()), Some("Phase 1"));
        assert!(dashboard.phase("P9").is_none());
        assert_eq!(dashboard.module(7).map(|m| m.name.as_str()), Some("Billing"));
        assert!(dashboard.module(0).is_none());
    }

    #[test]
    fn test_log_serializes_invalid_timestamp_as_null() {
        let entry = fixtures::log("Auth", "Feature", 1.5);
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"timestamp\":null"));
        assert!(json.contains("\"working_time\":1.5"));
    }
}

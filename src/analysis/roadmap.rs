//! Roadmap and progress views.

use crate::models::{Dashboard, Module, Phase};
use chrono::NaiveDate;
use serde::Serialize;

/// Theme label used when a module's phase cannot be resolved.
pub const FALLBACK_COLOR: &str = "grey";

/// A phase together with its scheduled modules.
#[derive(Debug, Clone, Serialize)]
pub struct RoadmapPhase<'a> {
    pub phase: &'a Phase,
    /// Ordered by end date, earliest first.
    pub modules: Vec<&'a Module>,
}

/// Parse a sheet date written as `dd/mm/yyyy`.
pub fn parse_sheet_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.trim().split('/');
    let day = parts.next()?.trim().parse().ok()?;
    let month = parts.next()?.trim().parse().ok()?;
    let year = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Color tag of the phase with the given id, or [`FALLBACK_COLOR`].
pub fn phase_color<'a>(phases: &'a [Phase], id: &str) -> &'a str {
    phases
        .iter()
        .find(|p| p.id == id)
        .map(|p| p.color_tag.as_str())
        .unwrap_or(FALLBACK_COLOR)
}

/// Most recent module modification date.
///
/// Dates on or before 2020-01-01 are treated as placeholders, so `None`
/// means no module carries a meaningful date.
pub fn last_update(modules: &[Module]) -> Option<NaiveDate> {
    let floor = NaiveDate::from_ymd_opt(2020, 1, 1)?;
    modules
        .iter()
        .filter_map(|m| parse_sheet_date(&m.last_modified_date))
        .filter(|d| *d > floor)
        .max()
}

/// Modules ordered by completion, most complete first. Ties keep feed order.
pub fn modules_by_progress(modules: &[Module]) -> Vec<&Module> {
    let mut sorted: Vec<&Module> = modules.iter().collect();
    sorted.sort_by(|a, b| b.percent_complete.cmp(&a.percent_complete));
    sorted
}

/// Build the roadmap: each phase with the modules scheduled under it.
///
/// Only modules with a start date are scheduled. Modules whose end date
/// cannot be read go last. Phases without scheduled modules are omitted.
pub fn roadmap(dashboard: &Dashboard) -> Vec<RoadmapPhase<'_>> {
    dashboard
        .phases
        .iter()
        .filter_map(|phase| {
            let mut modules: Vec<&Module> = dashboard
                .modules
                .iter()
                .filter(|m| m.phase_id == phase.id && !m.start_date.is_empty())
                .collect();

            if modules.is_empty() {
                return None;
            }

            modules.sort_by_key(|m| {
                let end = parse_sheet_date(&m.end_date);
                (end.is_none(), end)
            });

            Some(RoadmapPhase { phase, modules })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{module, phase};

    fn scheduled(id: i64, name: &str, phase_id: &str, start: &str, end: &str) -> Module {
        Module {
            phase_id: phase_id.to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            ..module(id, name)
        }
    }

    #[test]
    fn test_parse_sheet_date() {
        assert_eq!(parse_sheet_date("05/03/2024"), NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(parse_sheet_date("5/3/2024"), NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(parse_sheet_date("2024-03-05"), None);
        assert_eq!(parse_sheet_date("31/02/2024"), None);
        assert_eq!(parse_sheet_date("01/02/2024/9"), None);
        assert_eq!(parse_sheet_date(""), None);
    }

    #[test]
    fn test_phase_color_fallback() {
        let phases = vec![phase("P1", "Discovery", "orange")];
        assert_eq!(phase_color(&phases, "P1"), "orange");
        assert_eq!(phase_color(&phases, "P9"), "grey");
    }

    #[test]
    fn test_last_update() {
        let mut a = module(1, "A");
        a.last_modified_date = "10/01/2024".to_string();
        let mut b = module(2, "B");
        b.last_modified_date = "02/03/2024".to_string();
        let mut c = module(3, "C");
        c.last_modified_date = "garbage".to_string();

        assert_eq!(
            last_update(&[a.clone(), b, c.clone()]),
            NaiveDate::from_ymd_opt(2024, 3, 2)
        );
        assert_eq!(last_update(&[c]), None);

        a.last_modified_date = "01/01/2020".to_string();
        assert_eq!(last_update(&[a]), None);
    }

    #[test]
    fn test_modules_by_progress_is_stable() {
        let mut modules = vec![module(1, "A"), module(2, "B"), module(3, "C")];
        modules[0].percent_complete = 20;
        modules[1].percent_complete = 90;
        modules[2].percent_complete = 20;

        let names: Vec<&str> = modules_by_progress(&modules)
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_roadmap_grouping_and_order() {
        let dashboard = Dashboard {
            phases: vec![
                phase("P1", "Discovery", "orange"),
                phase("P2", "Empty", "blue"),
                phase("P3", "Build", "green"),
            ],
            modules: vec![
                scheduled(1, "Late", "P1", "01/01/2024", "30/06/2024"),
                scheduled(2, "Unknown end", "P1", "01/01/2024", "TBD"),
                scheduled(3, "Early", "P1", "01/01/2024", "15/02/2024"),
                scheduled(4, "Unscheduled", "P2", "", "01/03/2024"),
                scheduled(5, "Core", "P3", "01/03/2024", "01/05/2024"),
                scheduled(6, "Orphan", "P9", "01/03/2024", "01/05/2024"),
            ],
            logs: vec![],
        };

        let roadmap = roadmap(&dashboard);
        assert_eq!(roadmap.len(), 2);
        assert_eq!(roadmap[0].phase.id, "P1");
        let names: Vec<&str> = roadmap[0].modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Early", "Late", "Unknown end"]);
        assert_eq!(roadmap[1].phase.id, "P3");
        assert_eq!(roadmap[1].modules.len(), 1);
    }
}

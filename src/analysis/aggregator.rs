//! Work-log hour aggregation and statistics.
//!
//! This module links decoded log entries to modules and accumulates the
//! hours worked on each one.

use crate::models::{Module, WorkLogEntry};
use std::collections::HashMap;
use tracing::debug;

/// Action type (compared case-insensitively) that triggers the bugfix rule.
const BUGFIX_ACTION: &str = "bugfix";

/// Substring (lowercase) that marks a module as a bugfix bucket.
const BUGFIX_BUCKET_MARKER: &str = "bugfix";

/// Add each log entry's working time to the modules it belongs to.
///
/// An entry counts towards the module whose name equals its module name
/// (ignoring case; the first such module in feed order). Independently, an
/// entry whose action type is `Bugfix` also counts towards every module whose
/// name contains "bugfix". Entries with an empty module name are skipped.
///
/// Totals are added to, never reset: calling this twice with the same logs
/// counts every entry twice.
pub fn aggregate_hours(modules: &mut [Module], logs: &[WorkLogEntry]) {
    let mut by_name: HashMap<String, usize> = HashMap::new();
    let mut bugfix_buckets = Vec::new();

    for (idx, module) in modules.iter().enumerate() {
        if module.name.is_empty() {
            continue;
        }
        let lower = module.name.to_lowercase();
        if lower.contains(BUGFIX_BUCKET_MARKER) {
            bugfix_buckets.push(idx);
        }
        by_name.entry(lower).or_insert(idx);
    }

    let mut direct = 0usize;
    let mut cross_cut = 0usize;

    for log in logs {
        if log.module_name.is_empty() {
            continue;
        }

        if let Some(&idx) = by_name.get(&log.module_name.to_lowercase()) {
            modules[idx].total_hours += log.working_time;
            direct += 1;
        }

        if log.action_type.to_lowercase() == BUGFIX_ACTION {
            for &idx in &bugfix_buckets {
                modules[idx].total_hours += log.working_time;
            }
            cross_cut += 1;
        }
    }

    debug!(
        "Aggregated {} log entries ({} direct matches, {} bugfix entries over {} buckets)",
        logs.len(),
        direct,
        cross_cut,
        bugfix_buckets.len()
    );
}

/// Distinct module names referenced by the logs, in first-seen order.
pub fn log_module_names(logs: &[WorkLogEntry]) -> Vec<&str> {
    let mut seen = std::collections::HashSet::new();
    logs.iter()
        .map(|l| l.module_name.as_str())
        .filter(|name| seen.insert(*name))
        .collect()
}

/// Round an hour total to one decimal place.
pub fn rounded_hours(hours: f64) -> f64 {
    (hours * 10.0).round() / 10.0
}

/// Total hours logged, across all entries.
pub fn total_logged_hours(logs: &[WorkLogEntry]) -> f64 {
    logs.iter().map(|l| l.working_time).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{log, module};

    fn hours(modules: &[Module], name: &str) -> f64 {
        modules
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.total_hours)
            .unwrap()
    }

    #[test]
    fn test_direct_and_bugfix_rules() {
        let mut modules = vec![module(1, "Auth"), module(2, "Bugfix Pool")];
        let logs = vec![log("Auth", "Feature", 3.0), log("Auth", "Bugfix", 2.0)];

        aggregate_hours(&mut modules, &logs);

        assert_eq!(hours(&modules, "Auth"), 5.0);
        assert_eq!(hours(&modules, "Bugfix Pool"), 2.0);
    }

    #[test]
    fn test_aggregation_is_not_idempotent() {
        let mut modules = vec![module(1, "Auth"), module(2, "Bugfix Pool")];
        let logs = vec![log("Auth", "Feature", 3.0), log("Auth", "Bugfix", 2.0)];

        aggregate_hours(&mut modules, &logs);
        aggregate_hours(&mut modules, &logs);

        assert_eq!(hours(&modules, "Auth"), 10.0);
        assert_eq!(hours(&modules, "Bugfix Pool"), 4.0);
    }

    #[test]
    fn test_name_match_ignores_case() {
        let mut modules = vec![module(1, "Auth")];
        aggregate_hours(&mut modules, &[log("AUTH", "Feature", 1.5)]);
        assert_eq!(modules[0].total_hours, 1.5);
    }

    #[test]
    fn test_bugfix_rule_ignores_case_and_hits_every_bucket() {
        let mut modules = vec![
            module(1, "Auth"),
            module(2, "Bugfix Pool"),
            module(3, "Backend BUGFIXES"),
        ];
        aggregate_hours(&mut modules, &[log("Unknown", "bugFIX", 4.0)]);

        assert_eq!(hours(&modules, "Auth"), 0.0);
        assert_eq!(hours(&modules, "Bugfix Pool"), 4.0);
        assert_eq!(hours(&modules, "Backend BUGFIXES"), 4.0);
    }

    #[test]
    fn test_bugfix_entry_on_bucket_counts_twice() {
        let mut modules = vec![module(1, "Bugfix Pool")];
        aggregate_hours(&mut modules, &[log("bugfix pool", "Bugfix", 1.0)]);
        assert_eq!(modules[0].total_hours, 2.0);
    }

    #[test]
    fn test_duplicate_names_credit_first_module() {
        let mut modules = vec![module(1, "Auth"), module(2, "auth")];
        aggregate_hours(&mut modules, &[log("Auth", "Feature", 2.0)]);
        assert_eq!(modules[0].total_hours, 2.0);
        assert_eq!(modules[1].total_hours, 0.0);
    }

    #[test]
    fn test_empty_names_are_skipped() {
        let mut modules = vec![module(1, ""), module(2, "Bugfix Pool")];
        aggregate_hours(
            &mut modules,
            &[log("", "Bugfix", 5.0), log("Other", "Feature", 1.0)],
        );
        assert_eq!(modules[0].total_hours, 0.0);
        assert_eq!(modules[1].total_hours, 0.0);
    }

    #[test]
    fn test_log_module_names_first_seen_order() {
        let logs = vec![
            log("Auth", "Feature", 1.0),
            log("Billing", "Feature", 1.0),
            log("Auth", "Bugfix", 1.0),
            log("-", "Info", 1.0),
        ];
        assert_eq!(log_module_names(&logs), vec!["Auth", "Billing", "-"]);
    }

    #[test]
    fn test_rounded_hours() {
        assert_eq!(rounded_hours(2.349), 2.3);
        assert_eq!(rounded_hours(2.36), 2.4);
        assert_eq!(rounded_hours(0.0), 0.0);
    }

    #[test]
    fn test_total_logged_hours() {
        let logs = vec![log("Auth", "Feature", 1.5), log("Auth", "Bugfix", 2.0)];
        assert_eq!(total_logged_hours(&logs), 3.5);
    }
}

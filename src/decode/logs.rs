//! Work-log feed: `[date(+time), developer, moduleName, actionType, message, workingTime]`.

use super::coerce::float_or_zero;
use super::{cell, cell_or};
use crate::feed::read_records;
use crate::models::WorkLogEntry;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::debug;

/// Rows with fewer cells than this are dropped.
const MIN_LOG_FIELDS: usize = 5;

const UNKNOWN_DEVELOPER: &str = "Desconocido";
const NO_MODULE: &str = "-";
const DEFAULT_ACTION: &str = "Info";

/// ISO-style layouts accepted before falling back to day/month/year.
const DIRECT_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S%.f", "%H:%M"];

/// Interpret the date cell of a work-log row.
///
/// ISO-style values are parsed directly. Otherwise the cell is split into a
/// date token and an optional time token (midnight when absent); a date token
/// containing `/` is read as `day/month/year`. Returns `None` when neither
/// interpretation yields a valid wall-clock time.
pub fn parse_log_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    parse_direct(raw).or_else(|| parse_day_month_year(raw))
}

fn parse_direct(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }

    DIRECT_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn parse_day_month_year(raw: &str) -> Option<NaiveDateTime> {
    let mut tokens = raw.split_whitespace();
    let date_token = tokens.next()?;
    let time_token = tokens.next().unwrap_or("00:00:00");

    if !date_token.contains('/') {
        return None;
    }

    let parts: Vec<&str> = date_token.split('/').collect();
    if parts.len() < 3 {
        return None;
    }

    let day: u32 = parts[0].parse().ok()?;
    let month: u32 = parts[1].parse().ok()?;
    let year: i32 = parts[2].parse().ok()?;

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(time_token, fmt).ok())?;

    Some(date.and_time(time))
}

/// Decode one work-log record. Rows with fewer than five cells are dropped;
/// an unreadable date is kept as `None`.
pub fn decode_log(fields: &[String]) -> Option<WorkLogEntry> {
    if fields.len() < MIN_LOG_FIELDS {
        return None;
    }

    Some(WorkLogEntry {
        timestamp: parse_log_timestamp(cell(fields, 0)),
        developer: cell_or(fields, 1, UNKNOWN_DEVELOPER).to_string(),
        module_name: cell_or(fields, 2, NO_MODULE).to_string(),
        action_type: cell_or(fields, 3, DEFAULT_ACTION).to_string(),
        message: cell(fields, 4).to_string(),
        working_time: float_or_zero(cell_or(fields, 5, "0")).value().max(0.0),
    })
}

/// Decode the full work-log payload, newest entries first.
///
/// Entries without a timestamp sort after every dated entry. The sort is
/// stable, so equal timestamps (and undated entries) keep feed order.
pub fn decode_logs(text: &str) -> Vec<WorkLogEntry> {
    let records = read_records(text);
    let total = records.len();

    let mut logs: Vec<WorkLogEntry> = records.iter().filter_map(|r| decode_log(r)).collect();
    sort_newest_first(&mut logs);

    debug!(
        "Decoded {} log entries ({} rows dropped, {} undated)",
        logs.len(),
        total - logs.len(),
        logs.iter().filter(|l| l.timestamp.is_none()).count()
    );
    logs
}

/// `Option` orders `None` below any `Some`, so reversing puts undated entries last.
fn sort_newest_first(logs: &mut [WorkLogEntry]) {
    logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

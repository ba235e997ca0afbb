//! Modules feed.
//!
//! Columns: `[id, name, percentComplete, lastModifiedDate, phaseId,
//! startDate, endDate, statusLabel, statusIcon, statusStyleClass, comment]`.

use super::cell;
use super::coerce::int_or_zero;
use crate::feed::read_records;
use crate::models::Module;
use tracing::debug;

/// Decode one modules record.
///
/// Rows whose id does not coerce to a positive integer are dropped. The
/// accumulated hours always start at zero.
pub fn decode_module(fields: &[String]) -> Option<Module> {
    let id = int_or_zero(cell(fields, 0)).value();
    if id <= 0 {
        return None;
    }

    let percent_complete = int_or_zero(cell(fields, 2)).map(|p| p.clamp(0, 100) as u8);
    if percent_complete.is_default() {
        debug!("Module {} has no readable progress, using 0", id);
    }

    Some(Module {
        id,
        name: cell(fields, 1).to_string(),
        percent_complete: percent_complete.value(),
        last_modified_date: cell(fields, 3).to_string(),
        phase_id: cell(fields, 4).to_string(),
        start_date: cell(fields, 5).to_string(),
        end_date: cell(fields, 6).to_string(),
        status_label: cell(fields, 7).to_string(),
        status_icon: cell(fields, 8).to_string(),
        status_style_class: cell(fields, 9).to_string(),
        comment: cell(fields, 10).to_string(),
        total_hours: 0.0,
    })
}

/// Decode the full modules payload, keeping feed order.
pub fn decode_modules(text: &str) -> Vec<Module> {
    let records = read_records(text);
    let total = records.len();

    let modules: Vec<Module> = records.iter().filter_map(|r| decode_module(r)).collect();

    debug!(
        "Decoded {} modules ({} rows dropped)",
        modules.len(),
        total - modules.len()
    );
    modules
}

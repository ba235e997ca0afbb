//! Typed decoders for the three feeds.
//!
//! Each decoder maps the positional cells of a record onto one record type,
//! substitutes defaults for malformed cells and drops rows that cannot be
//! identified. Decoding never fails.

pub mod coerce;
pub mod logs;
pub mod modules;
pub mod phases;

pub use logs::decode_logs;
pub use modules::decode_modules;
pub use phases::decode_phases;

/// Cell at `index`, or an empty string when the row is too short.
fn cell(fields: &[String], index: usize) -> &str {
    fields.get(index).map(String::as_str).unwrap_or("")
}

/// Cell at `index`, or `placeholder` when it is missing or empty.
fn cell_or<'a>(fields: &'a [String], index: usize, placeholder: &'a str) -> &'a str {
    match cell(fields, index) {
        "" => placeholder,
        value => value,
    }
}

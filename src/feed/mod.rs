//! Delimited-text handling for the raw feeds.
//!
//! The feeds are spreadsheet CSV exports. Parsing is best-effort: quotes
//! may be unbalanced and rows may be short, and neither is an error.

pub mod reader;
pub mod tokenizer;

pub use reader::read_records;

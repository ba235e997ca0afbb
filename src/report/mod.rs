//! Dashboard rendering for the command line.

pub mod generator;

pub use generator::{generate_json_report, generate_markdown_report, generate_module_details};

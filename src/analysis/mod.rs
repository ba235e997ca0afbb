//! Analysis over decoded feeds.
//!
//! Hour aggregation runs once per ingestion cycle; the roadmap views are
//! read-only queries over the resulting [`crate::models::Dashboard`].

pub mod aggregator;
pub mod roadmap;

pub use aggregator::*;
pub use roadmap::*;

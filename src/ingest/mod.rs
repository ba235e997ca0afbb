//! Feed retrieval and the ingestion cycle.
//!
//! This is the only part of the crate that touches the network or the
//! filesystem. Everything downstream works on in-memory text.

pub mod error;
pub mod orchestrator;
pub mod source;

pub use orchestrator::ingest;
pub use source::{FeedKind, FeedLocator};

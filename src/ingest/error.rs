//! Ingestion failures.

use super::source::FeedKind;
use std::path::PathBuf;

/// Why an ingestion cycle produced no data.
///
/// Any of these aborts the whole cycle; partial results are never returned.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The configured location for a feed is unusable.
    #[error("invalid location for {feed} feed: {location:?}")]
    InvalidLocation { feed: FeedKind, location: String },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request failed before a response arrived, or the body was unreadable.
    #[error("failed to fetch {feed} feed from {url}: {source}")]
    Request {
        feed: FeedKind,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("{feed} feed returned HTTP {status} from {url}")]
    Status {
        feed: FeedKind,
        url: String,
        status: reqwest::StatusCode,
    },

    /// A local feed file could not be read.
    #[error("failed to read {feed} feed from {}: {source}", .path.display())]
    Read {
        feed: FeedKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IngestError {
    /// The feed that caused the failure, if the failure is feed-specific.
    pub fn feed(&self) -> Option<FeedKind> {
        match self {
            IngestError::InvalidLocation { feed, .. }
            | IngestError::Request { feed, .. }
            | IngestError::Status { feed, .. }
            | IngestError::Read { feed, .. } => Some(*feed),
            IngestError::Client(_) => None,
        }
    }
}

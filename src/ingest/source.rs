//! Feed providers.
//!
//! A [`FeedProvider`] hands the orchestrator the raw text of a feed. The
//! production provider, [`FeedLocator`], reads each feed from an HTTP(S) URL
//! or a local file.

use super::error::IngestError;
use crate::config::FeedsConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// User-Agent string for feed requests.
const USER_AGENT: &str = concat!("sheetpulse/", env!("CARGO_PKG_VERSION"));

/// One of the three input feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    Phases,
    Modules,
    Logs,
}

impl FeedKind {
    pub const ALL: [FeedKind; 3] = [FeedKind::Phases, FeedKind::Modules, FeedKind::Logs];
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedKind::Phases => write!(f, "phases"),
            FeedKind::Modules => write!(f, "modules"),
            FeedKind::Logs => write!(f, "logs"),
        }
    }
}

/// Source of raw feed text.
pub trait FeedProvider {
    /// Retrieve the full text of one feed.
    fn fetch(&self, kind: FeedKind) -> impl Future<Output = Result<String, IngestError>> + Send;
}

/// Where a feed lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedLocation {
    Http(String),
    File(PathBuf),
}

impl FeedLocation {
    /// Interpret a configured location: `http://` and `https://` values are
    /// URLs, anything else is a file path.
    pub fn parse(feed: FeedKind, raw: &str) -> Result<Self, IngestError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(IngestError::InvalidLocation {
                feed,
                location: raw.to_string(),
            });
        }

        if raw.starts_with("http://") || raw.starts_with("https://") {
            Ok(FeedLocation::Http(raw.to_string()))
        } else {
            Ok(FeedLocation::File(PathBuf::from(raw)))
        }
    }
}

impl fmt::Display for FeedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedLocation::Http(url) => write!(f, "{}", url),
            FeedLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Reads the three feeds from their configured locations.
#[derive(Debug, Clone)]
pub struct FeedLocator {
    phases: FeedLocation,
    modules: FeedLocation,
    logs: FeedLocation,
    client: reqwest::Client,
}

impl FeedLocator {
    /// Create a locator. `timeout` bounds each HTTP request.
    pub fn new(
        phases: FeedLocation,
        modules: FeedLocation,
        logs: FeedLocation,
        timeout: Duration,
    ) -> Result<Self, IngestError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(IngestError::Client)?;

        Ok(Self {
            phases,
            modules,
            logs,
            client,
        })
    }

    /// Build a locator from the `[feeds]` config section.
    pub fn from_config(config: &FeedsConfig) -> Result<Self, IngestError> {
        Self::new(
            FeedLocation::parse(FeedKind::Phases, &config.phases)?,
            FeedLocation::parse(FeedKind::Modules, &config.modules)?,
            FeedLocation::parse(FeedKind::Logs, &config.logs)?,
            Duration::from_secs(config.timeout_seconds),
        )
    }

    /// Location configured for a feed.
    pub fn location(&self, kind: FeedKind) -> &FeedLocation {
        match kind {
            FeedKind::Phases => &self.phases,
            FeedKind::Modules => &self.modules,
            FeedKind::Logs => &self.logs,
        }
    }

    async fn fetch_http(&self, kind: FeedKind, url: &str) -> Result<String, IngestError> {
        debug!("Requesting {} feed: {}", kind, url);

        let request_error = |source| IngestError::Request {
            feed: kind,
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(request_error)?;

        if !response.status().is_success() {
            return Err(IngestError::Status {
                feed: kind,
                url: url.to_string(),
                status: response.status(),
            });
        }

        let body = response.text().await.map_err(request_error)?;
        info!("Fetched {} feed ({} bytes)", kind, body.len());
        Ok(body)
    }

    async fn read_file(&self, kind: FeedKind, path: &Path) -> Result<String, IngestError> {
        debug!("Reading {} feed: {}", kind, path.display());

        let body = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| IngestError::Read {
                feed: kind,
                path: path.to_path_buf(),
                source,
            })?;

        info!("Read {} feed ({} bytes)", kind, body.len());
        Ok(body)
    }
}

impl FeedProvider for FeedLocator {
    async fn fetch(&self, kind: FeedKind) -> Result<String, IngestError> {
        match self.location(kind) {
            FeedLocation::Http(url) => self.fetch_http(kind, url).await,
            FeedLocation::File(path) => self.read_file(kind, path).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn http_locator(base: &str) -> FeedLocator {
        FeedLocator::new(
            FeedLocation::Http(format!("{}/phases.csv", base)),
            FeedLocation::Http(format!("{}/modules.csv", base)),
            FeedLocation::Http(format!("{}/logs.csv", base)),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[test]
    fn test_parse_location() {
        assert_eq!(
            FeedLocation::parse(FeedKind::Phases, "https://example.com/a.csv").unwrap(),
            FeedLocation::Http("https://example.com/a.csv".to_string())
        );
        assert_eq!(
            FeedLocation::parse(FeedKind::Logs, " data/logs.csv ").unwrap(),
            FeedLocation::File(PathBuf::from("data/logs.csv"))
        );

        let err = FeedLocation::parse(FeedKind::Modules, "  ").unwrap_err();
        assert_eq!(err.feed(), Some(FeedKind::Modules));
    }

    #[test]
    fn test_feed_kind_display() {
        let names: Vec<String> = FeedKind::ALL.iter().map(|k| k.to_string()).collect();
        assert_eq!(names, vec!["phases", "modules", "logs"]);
    }

    #[tokio::test]
    async fn test_fetch_http_success() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/modules.csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ID,Nombre\n1,Auth\n"))
            .mount(&server)
            .await;

        let locator = http_locator(&server.uri());
        let body = locator.fetch(FeedKind::Modules).await.unwrap();
        assert_eq!(body, "ID,Nombre\n1,Auth\n");
    }

    #[tokio::test]
    async fn test_fetch_http_non_success_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/logs.csv"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let locator = http_locator(&server.uri());
        match locator.fetch(FeedKind::Logs).await {
            Err(IngestError::Status { feed, status, .. }) => {
                assert_eq!(feed, FeedKind::Logs);
                assert_eq!(status, reqwest::StatusCode::NOT_FOUND);
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_read_file_feed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "ID,Nombre,Color\nP1,Discovery,orange\n").unwrap();

        let locator = FeedLocator::new(
            FeedLocation::File(file.path().to_path_buf()),
            FeedLocation::File(PathBuf::from("unused")),
            FeedLocation::File(PathBuf::from("unused")),
            Duration::from_secs(1),
        )
        .unwrap();

        let body = locator.fetch(FeedKind::Phases).await.unwrap();
        assert!(body.contains("P1,Discovery,orange"));
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.csv");

        let locator = FeedLocator::new(
            FeedLocation::File(PathBuf::from("unused")),
            FeedLocation::File(missing),
            FeedLocation::File(PathBuf::from("unused")),
            Duration::from_secs(1),
        )
        .unwrap();

        let err = locator.fetch(FeedKind::Modules).await.unwrap_err();
        assert!(matches!(err, IngestError::Read { feed: FeedKind::Modules, .. }));
    }
}

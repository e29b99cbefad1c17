use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub mod envelope;
pub mod http;

pub use http::HttpFeed;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("request to {endpoint} failed")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },
    #[error("response of {endpoint} is not valid JSON")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to read snapshot {path}")]
    Snapshot {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FeedError {
    /// HTTP status code, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Where a feed is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedLocation {
    Remote(String),
    /// Static JSON file bundled with a deployment
    Snapshot(PathBuf),
}

impl FeedLocation {
    /// Anything that is not an http(s) URL is treated as a file path
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Remote(location.to_string())
        } else {
            let path = location.strip_prefix("file://").unwrap_or(location);
            Self::Snapshot(PathBuf::from(path))
        }
    }
}

impl fmt::Display for FeedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote(url) => write!(f, "{}", url),
            Self::Snapshot(path) => write!(f, "file://{}", path.display()),
        }
    }
}

/// General interface for sources of JSON feeds
#[async_trait]
pub trait FeedProvider: Send + Sync {
    /// Fetch the document at `location`; non-success responses are errors
    async fn fetch_json(&self, location: &FeedLocation) -> Result<Value, FeedError>;
}

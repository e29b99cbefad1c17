//! Feed provider reading remote feeds over HTTP and snapshots from disk
use super::{FeedError, FeedLocation, FeedProvider};
use async_trait::async_trait;
use log::debug;
use serde_json::Value;

#[derive(Clone, Default)]
pub struct HttpFeed {
    client: reqwest::Client,
}

impl HttpFeed {
    pub fn new() -> HttpFeed {
        HttpFeed {
            client: reqwest::Client::new(),
        }
    }

    async fn get(&self, url: &str) -> Result<String, FeedError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FeedError::Transport {
                endpoint: url.to_string(),
                source,
            })?;
        debug!("{} answered with status {}", url, resp.status());
        if !resp.status().is_success() {
            return Err(FeedError::Status {
                endpoint: url.to_string(),
                status: resp.status().as_u16(),
            });
        }
        resp.text().await.map_err(|source| FeedError::Transport {
            endpoint: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl FeedProvider for HttpFeed {
    async fn fetch_json(&self, location: &FeedLocation) -> Result<Value, FeedError> {
        let body = match location {
            FeedLocation::Remote(url) => self.get(url).await?,
            FeedLocation::Snapshot(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| FeedError::Snapshot {
                        path: path.display().to_string(),
                        source,
                    })?
            }
        };
        serde_json::from_str(&body).map_err(|source| FeedError::Decode {
            endpoint: location.to_string(),
            source,
        })
    }
}

//! Concurrent retrieval of all feeds of one dashboard cycle
//!
//! Settings, currencies and (if configured) new assets are mandatory: if one
//! of them fails, the whole cycle fails. Status updates walk their own chain
//! of sources and degrade to an empty list.
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::join;
use log::{debug, error, info, warn};
use serde_json::Value;
use thiserror::Error;

use crate::config::Endpoints;
use crate::datatypes::{CurrencyMeta, StatusUpdate};
use crate::feeds::envelope::{
    parse_currencies, parse_new_assets, parse_settings, parse_updates, ParsedSettings,
};
use crate::feeds::{FeedError, FeedLocation, FeedProvider};

#[derive(Error, Debug)]
pub enum AcquisitionError {
    #[error("failed to load {feed} feed")]
    Feed {
        feed: &'static str,
        #[source]
        source: FeedError,
    },
}

/// Raw material of one dashboard cycle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedData {
    pub settings: ParsedSettings,
    pub currencies: Vec<CurrencyMeta>,
    /// `None` if no new-assets feed is configured
    pub new_assets: Option<HashSet<String>>,
    /// Empty if no updates source could be read
    pub updates: Vec<StatusUpdate>,
}

/// Result of one acquisition, stamped with its generation
#[derive(Debug)]
pub struct Fetched {
    pub generation: u64,
    pub result: Result<FeedData, AcquisitionError>,
}

pub struct Acquirer {
    provider: Arc<dyn FeedProvider>,
    endpoints: Endpoints,
    generation: AtomicU64,
}

impl Acquirer {
    pub fn new(provider: Arc<dyn FeedProvider>, endpoints: Endpoints) -> Self {
        Self {
            provider,
            endpoints,
            generation: AtomicU64::new(0),
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn fetch_mandatory(
        &self,
        feed: &'static str,
        location: &FeedLocation,
    ) -> Result<Value, AcquisitionError> {
        self.provider.fetch_json(location).await.map_err(|source| {
            match source.status() {
                Some(status) => error!("{} feed {} failed with status {}", feed, location, status),
                None => error!("{} feed {} failed: {}", feed, location, source),
            }
            AcquisitionError::Feed { feed, source }
        })
    }

    async fn fetch_new_assets(&self) -> Result<Option<Value>, AcquisitionError> {
        match &self.endpoints.new_assets {
            Some(location) => self.fetch_mandatory("new assets", location).await.map(Some),
            None => Ok(None),
        }
    }

    /// Fetch all feeds concurrently and parse them
    pub async fn acquire(&self) -> Fetched {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("starting acquisition {}", generation);

        let (settings, currencies, new_assets, updates) = join!(
            self.fetch_mandatory("settings", &self.endpoints.settings),
            self.fetch_mandatory("currencies", &self.endpoints.currencies),
            self.fetch_new_assets(),
            fetch_updates(self.provider.as_ref(), &self.endpoints.updates),
        );

        let result = settings.and_then(|settings| {
            let currencies = currencies?;
            let new_assets = new_assets?;
            Ok(FeedData {
                settings: parse_settings(settings),
                currencies: parse_currencies(currencies),
                new_assets: new_assets.map(parse_new_assets),
                updates,
            })
        });
        if let Ok(data) = &result {
            info!(
                "acquisition {}: {} settings, {} currencies, {} status updates",
                generation,
                data.settings.settings.len(),
                data.currencies.len(),
                data.updates.len()
            );
        }
        Fetched { generation, result }
    }
}

/// Try the update sources in order; the first readable one wins
pub async fn fetch_updates(
    provider: &dyn FeedProvider,
    sources: &[FeedLocation],
) -> Vec<StatusUpdate> {
    for location in sources {
        let parsed = match provider.fetch_json(location).await {
            Ok(value) => parse_updates(value),
            Err(err) => {
                warn!("failed to load status updates from {}: {}", location, err);
                continue;
            }
        };
        match parsed {
            Ok(updates) => {
                debug!("loaded {} status updates from {}", updates.len(), location);
                return updates;
            }
            Err(err) => warn!("{} ({})", err, location),
        }
    }
    error!("no status updates source could be read");
    Vec::new()
}

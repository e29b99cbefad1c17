//! Configuration of feed endpoints, deployment variant and logging
//!
//! Read from a TOML file; every field has a default, so an empty file (or no
//! file at all) yields the production setup.
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::feeds::FeedLocation;

pub const SETTINGS_URL: &str = "https://api.bitpanda.com/v1/assets/settings";
pub const CURRENCIES_URL: &str = "https://api.bitpanda.com/v3/currencies";
pub const UPDATES_URL: &str = "https://bitpanda.visionresources.info/updates";
pub const UPDATES_SNAPSHOT: &str = "updates.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration")]
    Parse(#[from] toml::de::Error),
}

/// Deployment flavour, decides which columns and filters are offered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Maintenance, trade-only and fully-integrated filters
    #[default]
    Standard,
    /// Additionally stakeable, new-assets and fusion filters and columns
    Extended,
}

impl Variant {
    pub fn is_extended(&self) -> bool {
        matches!(self, Self::Extended)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Extended => write!(f, "extended"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub settings: String,
    pub currencies: String,
    /// Feed of promoted new assets; not fetched if missing
    pub new_assets: Option<String>,
    pub updates: Option<String>,
    /// Tried if `updates` fails; URL or path of a JSON snapshot
    pub updates_fallback: Option<String>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            settings: SETTINGS_URL.to_string(),
            currencies: CURRENCIES_URL.to_string(),
            new_assets: None,
            updates: Some(UPDATES_URL.to_string()),
            updates_fallback: Some(UPDATES_SNAPSHOT.to_string()),
        }
    }
}

/// Resolved feed locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub settings: FeedLocation,
    pub currencies: FeedLocation,
    pub new_assets: Option<FeedLocation>,
    pub updates: Vec<FeedLocation>,
}

impl EndpointConfig {
    pub fn resolve(&self) -> Endpoints {
        Endpoints {
            settings: FeedLocation::parse(&self.settings),
            currencies: FeedLocation::parse(&self.currencies),
            new_assets: self.new_assets.as_deref().map(FeedLocation::parse),
            updates: self
                .updates
                .iter()
                .chain(self.updates_fallback.iter())
                .map(|location| FeedLocation::parse(location))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directives, e.g. `info` or `assetboard=debug`
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub variant: Variant,
    pub endpoints: EndpointConfig,
    pub log: LogConfig,
    /// Page written by the binary
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            endpoints: EndpointConfig::default(),
            log: LogConfig::default(),
            output: PathBuf::from("assets.html"),
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Config, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        text.parse()
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

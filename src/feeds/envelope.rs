//! Recognition of the payload shapes the feeds are known to deliver
//!
//! Every feed is first classified into one of its recognized shapes; only
//! then are the records extracted. Anything else is a [`ShapeError`].
use std::collections::HashSet;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::datatypes::{AssetSetting, CurrencyMeta, StatusUpdate};

pub const SETTINGS_RECORD_TYPE: &str = "asset_settings";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("unrecognized payload shape of {0} feed")]
    Unrecognized(&'static str),
}

/// `{ "data": [...] }`
fn enveloped_array(value: &mut Value) -> Option<Vec<Value>> {
    match value.get_mut("data") {
        Some(Value::Array(records)) => Some(std::mem::take(records)),
        _ => None,
    }
}

/// Payload of the asset settings feed
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsPayload {
    /// Top-level array of records
    Bare(Vec<Value>),
    /// `{ "data": [...] }`
    Enveloped(Vec<Value>),
}

impl SettingsPayload {
    pub fn recognize(mut value: Value) -> Result<Self, ShapeError> {
        if let Some(records) = enveloped_array(&mut value) {
            return Ok(Self::Enveloped(records));
        }
        match value {
            Value::Array(records) => Ok(Self::Bare(records)),
            _ => Err(ShapeError::Unrecognized("settings")),
        }
    }

    pub fn records(self) -> Vec<Value> {
        match self {
            Self::Bare(records) | Self::Enveloped(records) => records,
        }
    }
}

/// Payload of the currencies feed
#[derive(Debug, Clone, PartialEq)]
pub enum CurrencyPayload {
    /// `{ "data": { "attributes": { <category>: [...] } } }`
    Categorized(Map<String, Value>),
    /// `{ "data": [...] }`
    Flat(Vec<Value>),
    /// Top-level array of records
    Bare(Vec<Value>),
}

impl CurrencyPayload {
    pub fn recognize(mut value: Value) -> Result<Self, ShapeError> {
        if let Some(Value::Object(categories)) = value
            .get_mut("data")
            .and_then(|data| data.get_mut("attributes"))
        {
            return Ok(Self::Categorized(std::mem::take(categories)));
        }
        if let Some(records) = enveloped_array(&mut value) {
            return Ok(Self::Flat(records));
        }
        match value {
            Value::Array(records) => Ok(Self::Bare(records)),
            _ => Err(ShapeError::Unrecognized("currencies")),
        }
    }

    /// All records, flattened across categories; non-array categories are ignored
    pub fn records(self) -> Vec<Value> {
        match self {
            Self::Categorized(categories) => categories
                .into_iter()
                .filter_map(|(_, category)| match category {
                    Value::Array(records) => Some(records),
                    _ => None,
                })
                .flatten()
                .collect(),
            Self::Flat(records) | Self::Bare(records) => records,
        }
    }
}

/// Payload of the "new assets" feed
#[derive(Debug, Clone, PartialEq)]
pub enum NewAssetsPayload {
    Enveloped(Vec<Value>),
    Bare(Vec<Value>),
}

impl NewAssetsPayload {
    pub fn recognize(mut value: Value) -> Result<Self, ShapeError> {
        if let Some(records) = enveloped_array(&mut value) {
            return Ok(Self::Enveloped(records));
        }
        match value {
            Value::Array(records) => Ok(Self::Bare(records)),
            _ => Err(ShapeError::Unrecognized("new assets")),
        }
    }

    pub fn records(self) -> Vec<Value> {
        match self {
            Self::Bare(records) | Self::Enveloped(records) => records,
        }
    }
}

/// Attributes of a record, which is either typed
/// (`{ "type": ..., "attributes": {...} }`) or flat (the object itself).
/// Typed records of a different `expected_type` yield `None`.
pub fn record_attributes<'a>(record: &'a Value, expected_type: Option<&str>) -> Option<&'a Value> {
    match record.get("attributes") {
        Some(attributes) if attributes.is_object() => {
            if let (Some(expected), Some(actual)) =
                (expected_type, record.get("type").and_then(Value::as_str))
            {
                if expected != actual {
                    return None;
                }
            }
            Some(attributes)
        }
        _ if record.is_object() => Some(record),
        _ => None,
    }
}

fn decode_record<T: DeserializeOwned>(attributes: &Value) -> Option<T> {
    serde_json::from_value(attributes.clone()).ok()
}

/// Settings records with a usable `pid`, and the number of records skipped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSettings {
    pub settings: Vec<AssetSetting>,
    pub skipped: usize,
}

pub fn parse_settings(value: Value) -> ParsedSettings {
    let payload = match SettingsPayload::recognize(value) {
        Ok(payload) => payload,
        Err(err) => {
            warn!("{}; using no settings", err);
            return ParsedSettings::default();
        }
    };
    let mut parsed = ParsedSettings::default();
    for record in payload.records() {
        let attributes = match record_attributes(&record, Some(SETTINGS_RECORD_TYPE)) {
            Some(attributes) => attributes,
            None => continue,
        };
        match decode_record::<AssetSetting>(attributes) {
            Some(setting) if !setting.pid.is_empty() => parsed.settings.push(setting),
            _ => parsed.skipped += 1,
        }
    }
    if parsed.skipped > 0 {
        debug!("skipped {} settings records without usable pid", parsed.skipped);
    }
    parsed
}

pub fn parse_currencies(value: Value) -> Vec<CurrencyMeta> {
    let payload = match CurrencyPayload::recognize(value) {
        Ok(payload) => payload,
        Err(err) => {
            warn!("{}; using no currencies", err);
            return Vec::new();
        }
    };
    if !matches!(payload, CurrencyPayload::Categorized(_)) {
        debug!("using alternate currency payload structure");
    }
    payload
        .records()
        .iter()
        .filter_map(|record| record_attributes(record, None))
        .filter_map(decode_record::<CurrencyMeta>)
        .filter(|meta| !meta.pid.is_empty())
        .collect()
}

pub fn parse_new_assets(value: Value) -> HashSet<String> {
    let payload = match NewAssetsPayload::recognize(value) {
        Ok(payload) => payload,
        Err(err) => {
            warn!("{}; no asset is marked as new", err);
            return HashSet::new();
        }
    };
    payload
        .records()
        .iter()
        .filter_map(|record| {
            record
                .get("pid")
                .or_else(|| record_attributes(record, None).and_then(|a| a.get("pid")))
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .collect()
}

/// Status updates; malformed records are dropped, an unknown shape is an error
pub fn parse_updates(mut value: Value) -> Result<Vec<StatusUpdate>, ShapeError> {
    let records = match enveloped_array(&mut value) {
        Some(records) => records,
        None => match value {
            Value::Array(records) => records,
            _ => return Err(ShapeError::Unrecognized("status updates")),
        },
    };
    let total = records.len();
    let updates: Vec<StatusUpdate> = records.iter().filter_map(decode_record).collect();
    if updates.len() < total {
        warn!(
            "dropped {} malformed status update records",
            total - updates.len()
        );
    }
    Ok(updates)
}

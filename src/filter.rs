//! Row predicates for the search box and the filter checkboxes
//!
//! Search uses word-prefix matching: every word of the query must be the
//! prefix of some token of the searched fields. Fields are split on
//! whitespace, `/`, `-` and `_`; the query on whitespace only.
use crate::config::Variant;
use crate::datatypes::{Asset, StatusUpdate};
use crate::pinning::status_label;

/// State of the search box and the checkboxes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterInput {
    pub search: String,
    pub maintenance: bool,
    pub trade_only: bool,
    pub fully_integrated: bool,
    pub stakeable: bool,
    pub new_assets: bool,
    pub fusion: bool,
}

impl FilterInput {
    pub fn search(text: &str) -> Self {
        Self {
            search: text.to_string(),
            ..Self::default()
        }
    }

    /// Checkboxes not offered by `variant` are treated as unchecked
    pub fn effective(&self, variant: Variant) -> FilterInput {
        let mut input = self.clone();
        if !variant.is_extended() {
            input.stakeable = false;
            input.new_assets = false;
            input.fusion = false;
        }
        input
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '/' | '-' | '_')
}

/// Lower-cased query words
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    words: Vec<String>,
}

impl SearchQuery {
    pub fn new(text: &str) -> Self {
        Self {
            words: text
                .to_lowercase()
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// True if every query word starts some token of `fields`
    pub fn matches(&self, fields: &[&str]) -> bool {
        if self.words.is_empty() {
            return true;
        }
        let tokens: Vec<String> = fields
            .iter()
            .flat_map(|field| {
                field
                    .to_lowercase()
                    .split(is_separator)
                    .filter(|token| !token.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();
        self.words
            .iter()
            .all(|word| tokens.iter().any(|token| token.starts_with(word.as_str())))
    }
}

/// Checkbox predicates of a row, AND-combined
pub fn passes_toggles(asset: &Asset, input: &FilterInput) -> bool {
    let withdraw = asset.can_withdraw();
    let deposit = asset.can_deposit();
    (!input.maintenance || asset.in_maintenance())
        && (!input.trade_only || (!withdraw && !deposit))
        && (!input.fully_integrated || withdraw || deposit)
        && (!input.stakeable || asset.settings.stakeable.is_enabled())
        && (!input.new_assets || asset.new)
        && (!input.fusion || asset.settings.fusion.is_enabled())
}

/// Visibility of an asset row; `input` must already be reduced to the variant
pub fn asset_visible(asset: &Asset, query: &SearchQuery, input: &FilterInput) -> bool {
    query.matches(&[asset.name(), asset.symbol()]) && passes_toggles(asset, input)
}

/// Search over component name, status labels and description of an update
pub fn update_visible(update: &StatusUpdate, query: &SearchQuery) -> bool {
    if query.is_empty() {
        return true;
    }
    let new_status = status_label(&update.new_status);
    let old_status = update.old_status.as_ref().map(status_label).unwrap_or_default();
    query.matches(&[
        update.component_name.as_str(),
        new_status.as_str(),
        old_status.as_str(),
        update.description.as_deref().unwrap_or(""),
    ])
}

//! Join of asset settings with currency metadata by product id
use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use crate::datatypes::{Asset, AssetSetting, CurrencyMeta};

/// Result of a merge, with diagnostics about dropped settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeOutcome {
    /// Merged assets in the order of the settings feed
    pub assets: Vec<Asset>,
    /// Pids of settings without a matching currency record
    pub unmatched: Vec<String>,
}

/// Merge settings and currency records.
///
/// Currencies are indexed by pid first (last record wins on duplicates), then
/// every setting is looked up. Settings without a currency match are not part
/// of the output but reported in [`MergeOutcome::unmatched`]. If `new_assets`
/// is given, membership of the pid marks an asset as new.
pub fn process_asset_data(
    settings: &[AssetSetting],
    currencies: &[CurrencyMeta],
    new_assets: Option<&HashSet<String>>,
) -> MergeOutcome {
    let currency_map: HashMap<&str, &CurrencyMeta> = currencies
        .iter()
        .map(|currency| (currency.pid.as_str(), currency))
        .collect();

    let mut outcome = MergeOutcome::default();
    for setting in settings {
        match currency_map.get(setting.pid.as_str()) {
            Some(meta) => {
                let new = new_assets.map_or(false, |ids| ids.contains(&setting.pid));
                outcome
                    .assets
                    .push(Asset::new((*meta).clone(), setting.clone(), new));
            }
            None => outcome.unmatched.push(setting.pid.clone()),
        }
    }

    debug!(
        "merged {} assets from {} settings and {} currencies",
        outcome.assets.len(),
        settings.len(),
        currencies.len()
    );
    if !outcome.unmatched.is_empty() {
        warn!(
            "{} settings records have no matching currency and are not shown",
            outcome.unmatched.len()
        );
    }
    outcome
}

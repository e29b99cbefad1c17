///! Containers for asset settings, currency metadata and the merged asset
use serde::{Deserialize, Serialize};

use super::Flag;

fn unknown_name() -> String {
    "Unknown".to_string()
}

/// Trading capabilities of a single product, as delivered by the settings feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSetting {
    pub pid: String,
    #[serde(default)]
    pub available: Flag,
    #[serde(default)]
    pub buy_active: Flag,
    #[serde(default)]
    pub sell_active: Flag,
    #[serde(default, alias = "maintenance")]
    pub maintenance_enabled: Flag,
    #[serde(default)]
    pub withdraw_active: Flag,
    #[serde(default)]
    pub deposit_active: Flag,
    #[serde(default)]
    pub automated_order_active: Flag,
    #[serde(default)]
    pub limit_order: Flag,
    #[serde(default)]
    pub stakeable: Flag,
    #[serde(default)]
    pub fusion: Flag,
}

impl AssetSetting {
    pub fn new(pid: &str) -> Self {
        Self {
            pid: pid.to_string(),
            available: Flag::Unknown,
            buy_active: Flag::Unknown,
            sell_active: Flag::Unknown,
            maintenance_enabled: Flag::Unknown,
            withdraw_active: Flag::Unknown,
            deposit_active: Flag::Unknown,
            automated_order_active: Flag::Unknown,
            limit_order: Flag::Unknown,
            stakeable: Flag::Unknown,
            fusion: Flag::Unknown,
        }
    }

    /// Limit order capability; older feeds only carry `automated_order_active`
    pub fn limit_order(&self) -> Flag {
        match self.limit_order {
            Flag::Unknown => self.automated_order_active,
            flag => flag,
        }
    }
}

/// Descriptive data of a product from the currencies feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyMeta {
    pub pid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default = "unknown_name")]
    pub asset_type_name: String,
    #[serde(default = "unknown_name")]
    pub asset_group_name: String,
}

impl CurrencyMeta {
    pub fn new(pid: &str, name: &str, symbol: &str, type_name: &str, group_name: &str) -> Self {
        Self {
            pid: pid.to_string(),
            name: name.to_string(),
            symbol: symbol.to_string(),
            asset_type_name: type_name.to_string(),
            asset_group_name: group_name.to_string(),
        }
    }
}

/// Settings joined with their currency metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub meta: CurrencyMeta,
    pub settings: AssetSetting,
    /// Listed in the promoted "new assets" feed
    pub new: bool,
}

impl Asset {
    pub fn new(meta: CurrencyMeta, settings: AssetSetting, new: bool) -> Self {
        Self {
            meta,
            settings,
            new,
        }
    }

    pub fn pid(&self) -> &str {
        &self.meta.pid
    }

    pub fn name(&self) -> &str {
        &self.meta.name
    }

    pub fn symbol(&self) -> &str {
        &self.meta.symbol
    }

    pub fn in_maintenance(&self) -> bool {
        self.settings.maintenance_enabled.is_enabled()
    }

    pub fn can_withdraw(&self) -> bool {
        self.settings.withdraw_active.is_enabled()
    }

    pub fn can_deposit(&self) -> bool {
        self.settings.deposit_active.is_enabled()
    }
}

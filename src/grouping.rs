//! Normalization of the product taxonomy and grouping of assets into display buckets
use std::cmp::Ordering;
use std::collections::HashMap;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::datatypes::Asset;

/// Upper-case the first character, leave the rest untouched
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Display label of an asset type name
pub fn normalize_type_name(type_name: &str) -> String {
    let type_name = type_name.to_lowercase();
    match type_name.as_str() {
        "cryptocoin" => "Crypto".to_string(),
        other => capitalize(other),
    }
}

/// Display label of an asset group name
pub fn normalize_group_name(group_name: &str) -> String {
    let group_name = group_name.to_lowercase();
    let label = match group_name.as_str() {
        "coin" | "token" => "Coin/Token",
        "fiat_earn" | "security_earn" => "Cash Plus",
        "leveraged_token" => "Leverage",
        "security_token" => "Security",
        "metal" => "Metal",
        "stock" => "Stock",
        "etf" => "ETF",
        "etc" => "ETC",
        "index" => "Index",
        other => {
            return other
                .split('_')
                .map(capitalize)
                .collect::<Vec<_>>()
                .join(" ")
        }
    };
    label.to_string()
}

/// Lower case base letters, accents stripped
fn collation_key(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Comparison ignoring case and accents; ties are broken by accents, then
/// lower case sorts first
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

fn compare_assets(a: &Asset, b: &Asset) -> Ordering {
    locale_cmp(a.name(), b.name())
        .then_with(|| locale_cmp(a.symbol(), b.symbol()))
        .then_with(|| a.pid().cmp(b.pid()))
}

/// Group key of an asset, `"{type label}-{group label}"`
pub fn group_key(asset: &Asset) -> String {
    format!(
        "{}-{}",
        normalize_type_name(&asset.meta.asset_type_name),
        normalize_group_name(&asset.meta.asset_group_name)
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssetGroup {
    pub key: String,
    pub type_label: String,
    pub group_label: String,
    /// Members, sorted by name
    pub assets: Vec<Asset>,
}

/// Assets bucketed by group key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetGroups {
    groups: HashMap<String, AssetGroup>,
}

impl AssetGroups {
    pub fn get(&self, key: &str) -> Option<&AssetGroup> {
        self.groups.get(key)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups in rendering order, i.e. by group key
    pub fn sorted(&self) -> Vec<&AssetGroup> {
        let mut groups: Vec<&AssetGroup> = self.groups.values().collect();
        groups.sort_by(|a, b| locale_cmp(&a.key, &b.key));
        groups
    }
}

/// Bucket assets by normalized (type, group) labels
pub fn group_assets(assets: &[Asset]) -> AssetGroups {
    let mut groups: HashMap<String, AssetGroup> = HashMap::new();
    for asset in assets {
        let type_label = normalize_type_name(&asset.meta.asset_type_name);
        let group_label = normalize_group_name(&asset.meta.asset_group_name);
        let key = format!("{}-{}", type_label, group_label);
        groups
            .entry(key.clone())
            .or_insert_with(|| AssetGroup {
                key,
                type_label,
                group_label,
                assets: Vec::new(),
            })
            .assets
            .push(asset.clone());
    }
    for group in groups.values_mut() {
        group.assets.sort_by(compare_assets);
    }
    AssetGroups { groups }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::{AssetSetting, CurrencyMeta};

    fn asset(pid: &str, name: &str, type_name: &str, group_name: &str) -> Asset {
        Asset::new(
            CurrencyMeta::new(pid, name, pid, type_name, group_name),
            AssetSetting::new(pid),
            false,
        )
    }

    #[test]
    fn capitalize_first_letter_only() {
        assert_eq!(capitalize("stock"), "Stock");
        assert_eq!(capitalize("eTF"), "ETF");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("ämter"), "Ämter");
    }

    #[test]
    fn type_name_table() {
        assert_eq!(normalize_type_name("cryptocoin"), "Crypto");
        assert_eq!(normalize_type_name("CryptoCoin"), "Crypto");
        assert_eq!(normalize_type_name("stock"), "Stock");
        assert_eq!(normalize_type_name("METAL"), "Metal");
    }

    #[test]
    fn group_name_table() {
        let cases = [
            ("coin", "Coin/Token"),
            ("token", "Coin/Token"),
            ("fiat_earn", "Cash Plus"),
            ("security_earn", "Cash Plus"),
            ("leveraged_token", "Leverage"),
            ("security_token", "Security"),
            ("metal", "Metal"),
            ("stock", "Stock"),
            ("etf", "ETF"),
            ("etc", "ETC"),
            ("index", "Index"),
            ("unknown_bucket", "Unknown Bucket"),
            ("Crypto_Index_Fund", "Crypto Index Fund"),
        ];
        for (input, expected) in cases {
            assert_eq!(normalize_group_name(input), expected, "input {}", input);
        }
    }

    #[test]
    fn composite_group_keys() {
        assert_eq!(
            group_key(&asset("a", "A", "cryptocoin", "fiat_earn")),
            "Crypto-Cash Plus"
        );
        assert_eq!(
            group_key(&asset("b", "B", "stock", "unknown_bucket")),
            "Stock-Unknown Bucket"
        );
    }

    #[test]
    fn grouping_is_order_independent() {
        let assets = vec![
            asset("1", "bitcoin", "cryptocoin", "coin"),
            asset("2", "Apple", "stock", "stock"),
            asset("3", "Aave", "cryptocoin", "token"),
            asset("4", "Amazon", "stock", "stock"),
            asset("5", "Gold", "metal", "metal"),
        ];
        let mut reversed = assets.clone();
        reversed.reverse();
        assert_eq!(group_assets(&assets), group_assets(&reversed));
    }

    #[test]
    fn groups_sorted_by_key_and_members_by_name() {
        let assets = vec![
            asset("1", "bitcoin", "cryptocoin", "coin"),
            asset("2", "Apple", "stock", "stock"),
            asset("3", "Aave", "cryptocoin", "token"),
            asset("4", "Cardano", "cryptocoin", "coin"),
            asset("5", "Gold", "metal", "metal"),
        ];
        let groups = group_assets(&assets);
        let keys: Vec<&str> = groups.sorted().iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["Crypto-Coin/Token", "Metal-Metal", "Stock-Stock"]);
        let crypto = groups.get("Crypto-Coin/Token").unwrap();
        let names: Vec<&str> = crypto.assets.iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["Aave", "bitcoin", "Cardano"]);
        assert_eq!(crypto.type_label, "Crypto");
        assert_eq!(crypto.group_label, "Coin/Token");
    }

    #[test]
    fn locale_comparison_ignores_case() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("ETF", "Etc"), Ordering::Greater);
    }

    #[test]
    fn locale_comparison_folds_accents() {
        assert_eq!(locale_cmp("Ärzte Coin", "Bitcoin"), Ordering::Less);
        assert_eq!(locale_cmp("élan", "Zcash"), Ordering::Less);
        assert_eq!(locale_cmp("Ecu", "Écu"), Ordering::Less);

        let assets: Vec<Asset> = ["Zcash", "Ärzte Coin", "Bitcoin"]
            .iter()
            .map(|name| asset(name, name, "cryptocoin", "coin"))
            .collect();
        let groups = group_assets(&assets);
        let names: Vec<&str> = groups
            .get("Crypto-Coin/Token")
            .unwrap()
            .assets
            .iter()
            .map(|a| a.name())
            .collect();
        assert_eq!(names, vec!["Ärzte Coin", "Bitcoin", "Zcash"]);
    }
}

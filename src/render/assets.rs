use super::Node;
use crate::config::Variant;
use crate::datatypes::{Asset, Flag};
use crate::view::{AssetView, GroupView};

/// Shown in place of the asset tables if a mandatory feed failed
pub const LOAD_ERROR_MARKUP: &str =
    r#"<p class="error">Error loading data. Please try again later.</p>"#;

pub const NO_RESULTS_MARKUP: &str =
    r#"<p class="no-results">No assets match your search or filters.</p>"#;

const STANDARD_COLUMNS: [&str; 9] = [
    "Name",
    "Symbol",
    "Available",
    "Buy",
    "Sell",
    "Maintenance",
    "Withdraw",
    "Deposit",
    "Limit Order",
];

const EXTENDED_COLUMNS: [&str; 2] = ["Stakeable", "Fusion"];

pub fn badge_class(count: usize) -> &'static str {
    if count > 10 {
        "badge-large"
    } else {
        "badge-small"
    }
}

fn flag_cell(flag: Flag) -> Node {
    Node::new("td").text(flag.symbol())
}

fn header(variant: Variant) -> Node {
    let mut columns: Vec<&str> = STANDARD_COLUMNS.to_vec();
    if variant.is_extended() {
        columns.extend(EXTENDED_COLUMNS);
    }
    let row = columns
        .into_iter()
        .fold(Node::new("tr"), |row, column| row.child(Node::new("th").text(column)));
    Node::new("thead").child(row)
}

fn name_cell(asset: &Asset, variant: Variant) -> Node {
    let mut cell = Node::new("td").child(Node::new("strong").text(asset.name()));
    if variant.is_extended() && asset.new {
        cell = cell.markup(" ").child(Node::new("span").class("new-badge").text("NEW"));
    }
    cell
}

pub fn render_row(asset: &Asset, variant: Variant, visible: bool) -> Node {
    let s = &asset.settings;
    let mut row = Node::new("tr")
        .attr("data-pid", asset.pid())
        .flag("hidden", !visible)
        .child(name_cell(asset, variant))
        .child(Node::new("td").text(asset.symbol()));
    for flag in [
        s.available,
        s.buy_active,
        s.sell_active,
        s.maintenance_enabled,
        s.withdraw_active,
        s.deposit_active,
        s.limit_order(),
    ] {
        row = row.child(flag_cell(flag));
    }
    if variant.is_extended() {
        row = row.child(flag_cell(s.stakeable)).child(flag_cell(s.fusion));
    }
    row
}

/// Collapsible table of one group; hidden if no row is visible
pub fn render_group(view: &GroupView, variant: Variant) -> Node {
    let group = &view.group;
    let summary = Node::new("summary")
        .child(
            Node::new("span")
                .class(&format!("asset-count {}", badge_class(view.visible_count)))
                .text(&view.visible_count.to_string()),
        )
        .child(
            Node::new("div")
                .class("summary-content")
                .child(Node::new("span").class("group-type").text(&group.type_label))
                .child(Node::new("span").class("group-separator").text("-"))
                .child(Node::new("span").class("group-name").text(&group.group_label)),
        );
    let body = group
        .assets
        .iter()
        .zip(&view.visible)
        .fold(Node::new("tbody"), |body, (asset, &visible)| {
            body.child(render_row(asset, variant, visible))
        });
    let table = Node::new("table").child(header(variant)).child(body);

    Node::new("details")
        .class("asset-group")
        .attr("data-group", &group.key)
        .flag("hidden", view.is_hidden())
        .child(summary)
        .child(Node::new("div").class("table-container").child(table))
}

/// One `<details>` element per group, in rendering order
pub fn render_asset_groups(view: &AssetView) -> Vec<Node> {
    view.groups
        .iter()
        .map(|group| render_group(group, view.variant))
        .collect()
}

pub fn render_no_results(view: &AssetView) -> &'static str {
    if view.no_results() {
        NO_RESULTS_MARKUP
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatypes::{AssetSetting, CurrencyMeta};
    use crate::filter::FilterInput;
    use crate::grouping::group_assets;
    use crate::view::filter_assets;
    use scraper::{Html, Selector};

    fn view(variant: Variant, count: usize) -> AssetView {
        let assets: Vec<Asset> = (0..count)
            .map(|i| {
                let mut settings = AssetSetting::new(&format!("p{}", i));
                settings.buy_active = Flag::Enabled;
                settings.sell_active = Flag::Disabled;
                settings.stakeable = Flag::Enabled;
                Asset::new(
                    CurrencyMeta::new(
                        &format!("p{}", i),
                        &format!("Coin <{}>", i),
                        &format!("C{}", i),
                        "cryptocoin",
                        "coin",
                    ),
                    settings,
                    i == 0,
                )
            })
            .collect();
        AssetView::new(&group_assets(&assets), variant)
    }

    fn cells(html: &str, selector: &str) -> Vec<String> {
        let doc = Html::parse_fragment(html);
        let selector = Selector::parse(selector).unwrap();
        doc.select(&selector)
            .map(|e| e.text().collect::<String>().trim().to_string())
            .collect()
    }

    #[test]
    fn group_markup_standard_variant() {
        let view = view(Variant::Standard, 2);
        let html = render_group(&view.groups[0], Variant::Standard).to_string();
        assert_eq!(cells(&html, "th").len(), 9);
        assert_eq!(cells(&html, "span.asset-count.badge-small"), vec!["2"]);
        assert_eq!(cells(&html, "span.group-type"), vec!["Crypto"]);
        assert_eq!(cells(&html, "span.group-name"), vec!["Coin/Token"]);
        let first_row = cells(&html, "tbody tr:first-child td");
        assert_eq!(
            first_row,
            vec!["Coin <0>", "C0", "⚪", "✅", "❌", "⚪", "⚪", "⚪", "⚪"]
        );
        assert!(cells(&html, "span.new-badge").is_empty());
        assert!(html.contains("Coin &lt;0&gt;"));
    }

    #[test]
    fn group_markup_extended_variant() {
        let view = view(Variant::Extended, 2);
        let html = render_group(&view.groups[0], Variant::Extended).to_string();
        assert_eq!(cells(&html, "th").len(), 11);
        assert_eq!(cells(&html, "span.new-badge"), vec!["NEW"]);
        let first_row = cells(&html, "tbody tr:first-child td");
        assert_eq!(first_row.len(), 11);
        assert_eq!(first_row[9], "✅");
    }

    #[test]
    fn large_groups_get_large_badge() {
        let view = view(Variant::Standard, 12);
        let html = render_group(&view.groups[0], Variant::Standard).to_string();
        assert_eq!(cells(&html, "span.asset-count.badge-large"), vec!["12"]);
    }

    #[test]
    fn hidden_rows_and_groups() {
        let mut view = view(Variant::Standard, 3);
        view.apply(&filter_assets(&view, &FilterInput::search("c1")));
        let html = render_group(&view.groups[0], Variant::Standard).to_string();
        assert_eq!(cells(&html, "tr[hidden]").len(), 2);
        assert_eq!(cells(&html, "span.asset-count"), vec!["1"]);
        assert_eq!(render_no_results(&view), "");

        view.apply(&filter_assets(&view, &FilterInput::search("nomatch")));
        let groups = render_asset_groups(&view);
        let markup = groups[0].to_string();
        let expected = r#"<details class="asset-group" data-group="Crypto-Coin/Token" hidden>"#;
        assert!(markup.starts_with(expected));
        assert_eq!(render_no_results(&view), NO_RESULTS_MARKUP);
    }
}

//! Standalone HTML page around the rendered containers
use super::{escape_html, HtmlDocument, Node, UiHandles};
use crate::config::Variant;
use crate::filter::FilterInput;

fn checkbox(id: &str, label: &str, checked: bool) -> Node {
    Node::new("label")
        .class("filter-option")
        .child(
            Node::new("input")
                .attr("type", "checkbox")
                .attr("id", id)
                .flag("checked", checked),
        )
        .markup(" ")
        .text(label)
}

/// Search box and the checkboxes offered by `variant`, reflecting `input`
pub fn render_controls(handles: &UiHandles, variant: Variant, input: &FilterInput) -> Node {
    let mut controls = Node::new("div")
        .class("controls")
        .child(
            Node::new("input")
                .attr("type", "search")
                .attr("id", &handles.search_input)
                .attr("placeholder", "Search by name or symbol")
                .attr("value", &input.search),
        )
        .child(checkbox(
            &handles.maintenance_filter,
            "Maintenance",
            input.maintenance,
        ))
        .child(checkbox(
            &handles.trade_only_filter,
            "Trade only",
            input.trade_only,
        ))
        .child(checkbox(
            &handles.fully_integrated_filter,
            "Fully integrated",
            input.fully_integrated,
        ));
    if variant.is_extended() {
        controls = controls
            .child(checkbox(&handles.stakeable_filter, "Stakeable", input.stakeable))
            .child(checkbox(&handles.new_assets_filter, "New assets", input.new_assets))
            .child(checkbox(&handles.fusion_filter, "Fusion", input.fusion));
    }
    controls
}

fn container(doc: &HtmlDocument, id: &str) -> Node {
    Node::new("div")
        .attr("id", id)
        .markup(doc.content(id).unwrap_or(""))
}

/// Complete page with controls and the current content of all containers
pub fn render_page(
    doc: &HtmlDocument,
    handles: &UiHandles,
    variant: Variant,
    input: &FilterInput,
    title: &str,
) -> String {
    let body = Node::new("body")
        .child(Node::new("h1").text(title))
        .child(render_controls(handles, variant, input))
        .child(container(doc, &handles.updates_section))
        .child(container(doc, &handles.no_results))
        .child(container(doc, &handles.asset_groups));
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n{}\n</html>\n",
        escape_html(title),
        body
    )
}

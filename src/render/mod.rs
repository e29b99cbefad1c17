//! Rendering of the dashboard into a DOM-like target
//!
//! Renderers are pure functions from views to markup. Markup reaches the
//! page only through a [`RenderSink`], addressed by the container ids kept in
//! [`UiHandles`].
use std::collections::BTreeMap;
use std::fmt;

pub mod assets;
pub mod page;
pub mod updates;

/// Target able to replace a container's content and to append elements to it
pub trait RenderSink {
    fn set_content(&mut self, container_id: &str, markup: &str);
    fn append_child(&mut self, container_id: &str, node: Node);
}

/// Ids of all containers and controls of the page, built once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiHandles {
    pub asset_groups: String,
    pub updates_section: String,
    pub no_results: String,
    pub search_input: String,
    pub maintenance_filter: String,
    pub trade_only_filter: String,
    pub fully_integrated_filter: String,
    pub stakeable_filter: String,
    pub new_assets_filter: String,
    pub fusion_filter: String,
}

impl Default for UiHandles {
    fn default() -> Self {
        Self {
            asset_groups: "assetGroups".to_string(),
            updates_section: "updatesSection".to_string(),
            no_results: "noResults".to_string(),
            search_input: "assetSearch".to_string(),
            maintenance_filter: "maintenanceFilter".to_string(),
            trade_only_filter: "tradeOnlyFilter".to_string(),
            fully_integrated_filter: "fullyIntegratedFilter".to_string(),
            stakeable_filter: "stakeableFilter".to_string(),
            new_assets_filter: "newAssetsFilter".to_string(),
            fusion_filter: "fusionFilter".to_string(),
        }
    }
}

/// Escape text for use in element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

const VOID_ELEMENTS: [&str; 4] = ["br", "input", "meta", "hr"];

/// An element with attributes and already rendered inner markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    tag: &'static str,
    attributes: Vec<(&'static str, String)>,
    inner: String,
}

impl Node {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            inner: String::new(),
        }
    }

    /// Attribute; the value is escaped on output
    pub fn attr(mut self, name: &'static str, value: &str) -> Self {
        self.attributes.push((name, value.to_string()));
        self
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    /// Boolean attribute, e.g. `hidden` or `open`
    pub fn flag(self, name: &'static str, set: bool) -> Self {
        if set {
            self.attr(name, "")
        } else {
            self
        }
    }

    /// Inner markup; must already be escaped
    pub fn markup(mut self, markup: &str) -> Self {
        self.inner.push_str(markup);
        self
    }

    pub fn text(self, text: &str) -> Self {
        let escaped = escape_html(text);
        self.markup(&escaped)
    }

    pub fn child(self, node: Node) -> Self {
        self.markup(&node.to_string())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.tag)?;
        for (name, value) in &self.attributes {
            if value.is_empty() {
                write!(f, " {}", name)?;
            } else {
                write!(f, " {}=\"{}\"", name, escape_html(value))?;
            }
        }
        if VOID_ELEMENTS.contains(&self.tag) {
            return write!(f, ">");
        }
        write!(f, ">{}</{}>", self.inner, self.tag)
    }
}

/// In-memory render target collecting the markup of every container
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlDocument {
    containers: BTreeMap<String, String>,
}

impl HtmlDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self, container_id: &str) -> Option<&str> {
        self.containers.get(container_id).map(String::as_str)
    }
}

impl RenderSink for HtmlDocument {
    fn set_content(&mut self, container_id: &str, markup: &str) {
        self.containers
            .insert(container_id.to_string(), markup.to_string());
    }

    fn append_child(&mut self, container_id: &str, node: Node) {
        self.containers
            .entry(container_id.to_string())
            .or_default()
            .push_str(&node.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_special_characters() {
        assert_eq!(
            escape_html(r#"<b>"A&B's"</b>"#),
            "&lt;b&gt;&quot;A&amp;B&#39;s&quot;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn node_to_html() {
        let node = Node::new("td")
            .class("status-positive")
            .flag("hidden", true)
            .flag("open", false)
            .text("S&P 500");
        assert_eq!(
            node.to_string(),
            r#"<td class="status-positive" hidden>S&amp;P 500</td>"#
        );
        let row = Node::new("tr").child(Node::new("td").text("x"));
        assert_eq!(row.to_string(), "<tr><td>x</td></tr>");
        let input = Node::new("input").attr("type", "checkbox");
        assert_eq!(input.to_string(), r#"<input type="checkbox">"#);
    }

    #[test]
    fn document_set_and_append() {
        let mut doc = HtmlDocument::new();
        doc.append_child("a", Node::new("p").text("one"));
        doc.append_child("a", Node::new("p").text("two"));
        assert_eq!(doc.content("a"), Some("<p>one</p><p>two</p>"));
        doc.set_content("a", "");
        assert_eq!(doc.content("a"), Some(""));
        assert_eq!(doc.content("b"), None);
    }
}

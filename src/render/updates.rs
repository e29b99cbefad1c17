use chrono::{DateTime, Utc};

use super::Node;
use crate::datatypes::ComponentStatus;
use crate::pinning::{status_class, status_label};
use crate::view::{UpdateEntry, UpdatesView};

pub const PIN_MARKER: &str = "📌";

const UNAVAILABLE_MARKUP: &str = r#"<h2>Status Updates Unavailable</h2>
<p class="updates-subtitle">Updates could not be loaded at this time</p>
<div class="warning-card">
<div class="warning-icon">⚠️</div>
<div class="warning-content">
<p class="error">Unable to retrieve status updates.</p>
<p>This may be due to:</p>
<ul>
<li>The updates service being temporarily unavailable</li>
<li>Network connectivity issues</li>
</ul>
<p class="warning-note">You can still view all asset data below.</p>
</div>
</div>"#;

pub fn format_changed_at(time: &DateTime<Utc>) -> String {
    time.format("%b %-d, %Y %H:%M").to_string()
}

fn status_cell(status: Option<&ComponentStatus>) -> Node {
    match status {
        Some(status) => Node::new("td")
            .class(status_class(status))
            .child(Node::new("span").class("status-badge").text(&status_label(status))),
        None => Node::new("td").class("status-neutral"),
    }
}

fn render_entry(entry: &UpdateEntry) -> Node {
    let update = &entry.update;
    let mut component = Node::new("td");
    if entry.pinned {
        component = component
            .child(Node::new("span").class("pin-marker").text(PIN_MARKER))
            .markup(" ");
    }
    let component = component.child(Node::new("strong").text(&update.component_name));

    let row = Node::new("tr");
    let row = if entry.pinned { row.class("pinned") } else { row };
    row.flag("hidden", !entry.visible)
        .child(component)
        .child(status_cell(Some(&update.new_status)))
        .child(Node::new("td").text(update.description.as_deref().unwrap_or("")))
        .child(status_cell(update.old_status.as_ref()))
        .child(Node::new("td").text(&format_changed_at(&update.changed_at)))
}

fn header() -> Node {
    let row = ["Component", "New Status", "Description", "Old Status", "Changed At"]
        .into_iter()
        .fold(Node::new("tr"), |row, column| row.child(Node::new("th").text(column)));
    Node::new("thead").child(row)
}

/// Updates table, or the "unavailable" notice if there are no updates
pub fn render_updates(view: &UpdatesView) -> Node {
    if view.is_unavailable() {
        return Node::new("div")
            .class("updates-section warning-section")
            .markup(UNAVAILABLE_MARKUP);
    }

    let mut body = view
        .entries
        .iter()
        .fold(Node::new("tbody"), |body, entry| body.child(render_entry(entry)));
    if view.visible_count() == 0 {
        body = body.child(
            Node::new("tr").class("no-results-row").child(
                Node::new("td")
                    .attr("colspan", "5")
                    .text("No updates match your search."),
            ),
        );
    }

    let summary = Node::new("summary").child(
        Node::new("div")
            .class("summary-content")
            .child(Node::new("span").class("group-type").text("Recent Changes"))
            .child(Node::new("span").class("group-separator").text("-"))
            .child(
                Node::new("span")
                    .class("group-name")
                    .text("Component updates from status.bitpanda.com"),
            ),
    );
    Node::new("details")
        .class("updates-section")
        .flag("open", true)
        .child(summary)
        .child(Node::new("table").child(header()).child(body))
}

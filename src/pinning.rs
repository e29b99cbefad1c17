//! Selection of status updates that are pinned above the chronological feed
//!
//! Only the latest update of each component is considered for pinning:
//! the most recent scheduled or running maintenance (at most one), and every
//! component currently under investigation.
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::datatypes::{ComponentStatus, StatusUpdate};
use crate::grouping::capitalize;

/// Updates split into pinned and unpinned entries, both newest first
#[derive(Debug, Clone, PartialEq)]
pub struct PinnedUpdates<'a> {
    pub pinned: Vec<&'a StatusUpdate>,
    pub unpinned: Vec<&'a StatusUpdate>,
}

fn newest_first(a: &StatusUpdate, b: &StatusUpdate) -> Ordering {
    b.changed_at
        .cmp(&a.changed_at)
        .then_with(|| a.component_name.cmp(&b.component_name))
}

/// Index of the latest update per component name.
/// On equal timestamps the record appearing later in the input wins.
pub fn latest_per_component(updates: &[StatusUpdate]) -> HashMap<&str, usize> {
    let mut latest: HashMap<&str, usize> = HashMap::new();
    for (idx, update) in updates.iter().enumerate() {
        let entry = latest.entry(update.component_name.as_str()).or_insert(idx);
        if update.changed_at >= updates[*entry].changed_at {
            *entry = idx;
        }
    }
    latest
}

pub fn pin_updates(updates: &[StatusUpdate]) -> PinnedUpdates<'_> {
    let latest = latest_per_component(updates);

    let maintenance = latest
        .values()
        .copied()
        .filter(|&idx| updates[idx].new_status.is_maintenance())
        .min_by(|&a, &b| newest_first(&updates[a], &updates[b]));
    let investigating = latest
        .values()
        .copied()
        .filter(|&idx| updates[idx].new_status == ComponentStatus::Investigating);

    let pinned_idx: HashSet<usize> = maintenance.into_iter().chain(investigating).collect();

    let mut pinned: Vec<&StatusUpdate> = pinned_idx.iter().map(|&idx| &updates[idx]).collect();
    pinned.sort_by(|a, b| newest_first(a, b));

    let mut unpinned: Vec<&StatusUpdate> = updates
        .iter()
        .enumerate()
        .filter(|(idx, _)| !pinned_idx.contains(idx))
        .map(|(_, update)| update)
        .collect();
    unpinned.sort_by(|a, b| b.changed_at.cmp(&a.changed_at));

    PinnedUpdates { pinned, unpinned }
}

/// Human readable status, e.g. `degraded_performance` -> `Degraded performance`
pub fn status_label(status: &ComponentStatus) -> String {
    capitalize(&status.as_str().replace('_', " "))
}

/// CSS class used to colour a status
pub fn status_class(status: &ComponentStatus) -> &'static str {
    if *status == ComponentStatus::Operational {
        "status-positive"
    } else if status.is_outage() {
        "status-negative"
    } else {
        "status-neutral"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn update(component: &str, old: &str, new: &str, hour: u32) -> StatusUpdate {
        StatusUpdate {
            component_name: component.to_string(),
            old_status: Some(old.into()),
            new_status: new.into(),
            description: None,
            changed_at: Utc.with_ymd_and_hms(2024, 5, 1, hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn pin_latest_maintenance_and_investigations() {
        let updates = vec![
            update("A", "operational", "degraded_performance", 1),
            update("A", "degraded_performance", "investigating", 2),
            update("B", "operational", "scheduled", 3),
        ];
        let result = pin_updates(&updates);
        assert_eq!(result.pinned, vec![&updates[2], &updates[1]]);
        assert_eq!(result.unpinned, vec![&updates[0]]);
    }

    #[test]
    fn reverted_component_is_never_pinned() {
        let updates = vec![
            update("A", "operational", "investigating", 1),
            update("A", "investigating", "operational", 2),
            update("B", "operational", "in_progress", 3),
            update("B", "in_progress", "completed", 4),
        ];
        let result = pin_updates(&updates);
        assert!(result.pinned.is_empty());
        assert_eq!(result.unpinned.len(), 4);
        assert_eq!(result.unpinned[0], &updates[3]);
        assert_eq!(result.unpinned[3], &updates[0]);
    }

    #[test]
    fn only_most_recent_maintenance_is_pinned() {
        let updates = vec![
            update("Deposits", "operational", "scheduled", 5),
            update("Trading", "operational", "in_progress", 7),
            update("API", "operational", "investigating", 6),
            update("Cards", "operational", "investigating", 2),
        ];
        let result = pin_updates(&updates);
        let pinned: Vec<&str> = result
            .pinned
            .iter()
            .map(|u| u.component_name.as_str())
            .collect();
        assert_eq!(pinned, vec!["Trading", "API", "Cards"]);
        assert_eq!(result.unpinned, vec![&updates[0]]);
    }

    #[test]
    fn latest_update_per_component() {
        let updates = vec![
            update("A", "operational", "major_outage", 3),
            update("A", "major_outage", "operational", 1),
            update("B", "operational", "partial_outage", 2),
        ];
        let latest = latest_per_component(&updates);
        assert_eq!(latest["A"], 0);
        assert_eq!(latest["B"], 2);
    }

    #[test]
    fn status_labels_and_classes() {
        assert_eq!(
            status_label(&ComponentStatus::DegradedPerformance),
            "Degraded performance"
        );
        assert_eq!(status_label(&ComponentStatus::InProgress), "In progress");
        assert_eq!(status_class(&ComponentStatus::Operational), "status-positive");
        assert_eq!(status_class(&ComponentStatus::MajorOutage), "status-negative");
        assert_eq!(status_class(&ComponentStatus::Scheduled), "status-neutral");
    }
}

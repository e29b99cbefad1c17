//! Presentation state of the rendered tables
//!
//! The views own the rendered data plus visibility flags and counts. Applying
//! a filter only touches the flags and counts, never the data.
use crate::config::Variant;
use crate::datatypes::StatusUpdate;
use crate::filter::{asset_visible, update_visible, FilterInput, SearchQuery};
use crate::grouping::{AssetGroup, AssetGroups};
use crate::pinning::pin_updates;

#[derive(Debug, Clone, PartialEq)]
pub struct GroupView {
    pub group: AssetGroup,
    /// One flag per member of `group.assets`
    pub visible: Vec<bool>,
    pub visible_count: usize,
}

impl GroupView {
    pub fn is_hidden(&self) -> bool {
        self.visible_count == 0
    }
}

/// Visibility computed by [`filter_assets`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    pub rows: Vec<Vec<bool>>,
    pub group_counts: Vec<usize>,
    pub total_visible: usize,
}

impl FilterOutcome {
    pub fn no_results(&self) -> bool {
        self.total_visible == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssetView {
    pub variant: Variant,
    /// Groups in rendering order
    pub groups: Vec<GroupView>,
    pub total_visible: usize,
}

impl AssetView {
    /// View with every row visible
    pub fn new(groups: &AssetGroups, variant: Variant) -> Self {
        let groups: Vec<GroupView> = groups
            .sorted()
            .into_iter()
            .map(|group| GroupView {
                group: group.clone(),
                visible: vec![true; group.assets.len()],
                visible_count: group.assets.len(),
            })
            .collect();
        let total_visible = groups.iter().map(|g| g.visible_count).sum();
        Self {
            variant,
            groups,
            total_visible,
        }
    }

    pub fn apply(&mut self, outcome: &FilterOutcome) {
        for ((group, rows), count) in self
            .groups
            .iter_mut()
            .zip(&outcome.rows)
            .zip(&outcome.group_counts)
        {
            group.visible.clone_from(rows);
            group.visible_count = *count;
        }
        self.total_visible = outcome.total_visible;
    }

    pub fn no_results(&self) -> bool {
        self.total_visible == 0
    }
}

/// Evaluate search and checkboxes for every row of `view`
pub fn filter_assets(view: &AssetView, input: &FilterInput) -> FilterOutcome {
    let input = input.effective(view.variant);
    let query = SearchQuery::new(&input.search);
    let rows: Vec<Vec<bool>> = view
        .groups
        .iter()
        .map(|g| {
            g.group
                .assets
                .iter()
                .map(|asset| asset_visible(asset, &query, &input))
                .collect()
        })
        .collect();
    let group_counts: Vec<usize> = rows
        .iter()
        .map(|r| r.iter().filter(|&&v| v).count())
        .collect();
    let total_visible = group_counts.iter().sum();
    FilterOutcome {
        rows,
        group_counts,
        total_visible,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateEntry {
    pub update: StatusUpdate,
    pub pinned: bool,
    pub visible: bool,
}

/// Status updates in display order: pinned first, then newest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdatesView {
    pub entries: Vec<UpdateEntry>,
}

impl UpdatesView {
    pub fn new(updates: &[StatusUpdate]) -> Self {
        let split = pin_updates(updates);
        let pinned = split.pinned.into_iter().map(|u| (u, true));
        let unpinned = split.unpinned.into_iter().map(|u| (u, false));
        Self {
            entries: pinned
                .chain(unpinned)
                .map(|(update, pinned)| UpdateEntry {
                    update: update.clone(),
                    pinned,
                    visible: true,
                })
                .collect(),
        }
    }

    /// No updates could be loaded
    pub fn is_unavailable(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn visible_count(&self) -> usize {
        self.entries.iter().filter(|e| e.visible).count()
    }

    pub fn apply(&mut self, visible: &[bool]) {
        for (entry, &v) in self.entries.iter_mut().zip(visible) {
            entry.visible = v;
        }
    }
}

/// Evaluate the search text against every update of `view`
pub fn filter_updates(view: &UpdatesView, search: &str) -> Vec<bool> {
    let query = SearchQuery::new(search);
    view.entries
        .iter()
        .map(|entry| update_visible(&entry.update, &query))
        .collect()
}

//! The dashboard: turns acquisitions into rendered views and applies filters
use std::path::{Path, PathBuf};

use log::{debug, error, info};
use thiserror::Error;

use crate::acquisition::Fetched;
use crate::config::{ConfigError, Variant};
use crate::filter::FilterInput;
use crate::grouping::group_assets;
use crate::merge::process_asset_data;
use crate::render::assets::{render_asset_groups, render_no_results, LOAD_ERROR_MARKUP};
use crate::render::updates::render_updates;
use crate::render::{RenderSink, UiHandles};
use crate::view::{filter_assets, filter_updates, AssetView, UpdatesView};

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to write page to {}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What happened to an acquisition handed to [`Dashboard::apply`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Rendered,
    /// A mandatory feed failed; the error placeholder is shown
    Failed,
    /// A newer acquisition was applied already; nothing was rendered
    Stale,
}

/// Counts after a filter run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSummary {
    pub visible_assets: usize,
    pub visible_groups: usize,
    pub visible_updates: usize,
    pub no_results: bool,
}

pub struct Dashboard {
    handles: UiHandles,
    variant: Variant,
    filter: FilterInput,
    assets: Option<AssetView>,
    updates: UpdatesView,
    last_generation: u64,
    unmatched: usize,
}

impl Dashboard {
    pub fn new(handles: UiHandles, variant: Variant) -> Self {
        Self {
            handles,
            variant,
            filter: FilterInput::default(),
            assets: None,
            updates: UpdatesView::default(),
            last_generation: 0,
            unmatched: 0,
        }
    }

    pub fn handles(&self) -> &UiHandles {
        &self.handles
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn filter(&self) -> &FilterInput {
        &self.filter
    }

    pub fn assets(&self) -> Option<&AssetView> {
        self.assets.as_ref()
    }

    pub fn updates(&self) -> &UpdatesView {
        &self.updates
    }

    /// Settings of the last applied acquisition without a currency match
    pub fn unmatched_count(&self) -> usize {
        self.unmatched
    }

    /// Merge, group and render an acquisition unless a newer one was applied.
    /// The current filter is re-applied to the new data.
    pub fn apply<S: RenderSink>(&mut self, fetched: Fetched, sink: &mut S) -> ApplyOutcome {
        if fetched.generation <= self.last_generation {
            debug!(
                "discarding acquisition {}, already showing {}",
                fetched.generation, self.last_generation
            );
            return ApplyOutcome::Stale;
        }
        self.last_generation = fetched.generation;

        let data = match fetched.result {
            Ok(data) => data,
            Err(err) => {
                error!("error fetching data: {}", err);
                self.assets = None;
                self.updates = UpdatesView::default();
                sink.set_content(&self.handles.updates_section, "");
                sink.set_content(&self.handles.no_results, "");
                sink.set_content(&self.handles.asset_groups, LOAD_ERROR_MARKUP);
                return ApplyOutcome::Failed;
            }
        };

        let merged = process_asset_data(
            &data.settings.settings,
            &data.currencies,
            data.new_assets.as_ref(),
        );
        self.unmatched = merged.unmatched.len();
        let groups = group_assets(&merged.assets);
        info!(
            "showing {} assets in {} groups",
            merged.assets.len(),
            groups.len()
        );
        self.assets = Some(AssetView::new(&groups, self.variant));
        self.updates = UpdatesView::new(&data.updates);

        let filter = self.filter.clone();
        self.set_filter(filter, sink);
        ApplyOutcome::Rendered
    }

    /// Re-evaluate row visibility and re-render the affected containers.
    /// Without applied data (nothing loaded yet, or the last acquisition
    /// failed) the filter is only stored and the page is left untouched.
    pub fn set_filter<S: RenderSink>(&mut self, input: FilterInput, sink: &mut S) -> FilterSummary {
        self.filter = input;
        let view = match self.assets.as_mut() {
            Some(view) => view,
            None => {
                debug!("no asset data applied, filter stored only");
                return FilterSummary {
                    visible_assets: 0,
                    visible_groups: 0,
                    visible_updates: 0,
                    no_results: false,
                };
            }
        };

        let visible = filter_updates(&self.updates, &self.filter.search);
        self.updates.apply(&visible);
        sink.set_content(&self.handles.updates_section, "");
        sink.append_child(&self.handles.updates_section, render_updates(&self.updates));

        let outcome = filter_assets(view, &self.filter);
        view.apply(&outcome);
        sink.set_content(&self.handles.asset_groups, "");
        for node in render_asset_groups(view) {
            sink.append_child(&self.handles.asset_groups, node);
        }
        sink.set_content(&self.handles.no_results, render_no_results(view));

        FilterSummary {
            visible_assets: view.total_visible,
            visible_groups: view.groups.iter().filter(|g| !g.is_hidden()).count(),
            visible_updates: self.updates.visible_count(),
            no_results: view.no_results(),
        }
    }
}

/// Write a rendered page to `path`
pub async fn write_page(path: &Path, page: &str) -> Result<(), DashboardError> {
    tokio::fs::write(path, page)
        .await
        .map_err(|source| DashboardError::Output {
            path: path.to_path_buf(),
            source,
        })?;
    info!("wrote {} bytes to {}", page.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::{AcquisitionError, FeedData};
    use crate::datatypes::{AssetSetting, CurrencyMeta};
    use crate::feeds::envelope::ParsedSettings;
    use crate::feeds::FeedError;
    use crate::render::HtmlDocument;

    fn data(names: &[&str]) -> FeedData {
        FeedData {
            settings: ParsedSettings {
                settings: names.iter().map(|n| AssetSetting::new(n)).collect(),
                skipped: 0,
            },
            currencies: names
                .iter()
                .map(|n| CurrencyMeta::new(n, n, n, "cryptocoin", "coin"))
                .collect(),
            new_assets: None,
            updates: Vec::new(),
        }
    }

    fn fetched(generation: u64, names: &[&str]) -> Fetched {
        Fetched {
            generation,
            result: Ok(data(names)),
        }
    }

    #[test]
    fn stale_acquisitions_are_discarded() {
        let mut doc = HtmlDocument::new();
        let mut dashboard = Dashboard::new(UiHandles::default(), Variant::Standard);
        assert_eq!(dashboard.apply(fetched(2, &["Newer"]), &mut doc), ApplyOutcome::Rendered);
        let rendered = doc.clone();
        assert_eq!(dashboard.apply(fetched(1, &["Older"]), &mut doc), ApplyOutcome::Stale);
        assert_eq!(doc, rendered);
        assert_eq!(dashboard.apply(fetched(2, &["Again"]), &mut doc), ApplyOutcome::Stale);
        assert!(doc.content("assetGroups").unwrap().contains("Newer"));
    }

    #[test]
    fn failure_shows_generic_error() {
        let mut doc = HtmlDocument::new();
        let mut dashboard = Dashboard::new(UiHandles::default(), Variant::Standard);
        let failed = Fetched {
            generation: 1,
            result: Err(AcquisitionError::Feed {
                feed: "settings",
                source: FeedError::Status {
                    endpoint: "https://feeds.test/settings".to_string(),
                    status: 500,
                },
            }),
        };
        assert_eq!(dashboard.apply(failed, &mut doc), ApplyOutcome::Failed);
        assert_eq!(doc.content("assetGroups"), Some(LOAD_ERROR_MARKUP));
        assert!(!doc.content("assetGroups").unwrap().contains("500"));
        assert!(dashboard.assets().is_none());
    }

    #[test]
    fn filtering_after_failure_keeps_error_only() {
        let mut doc = HtmlDocument::new();
        let mut dashboard = Dashboard::new(UiHandles::default(), Variant::Standard);
        dashboard.apply(fetched(1, &["Alpha"]), &mut doc);
        let failed = Fetched {
            generation: 2,
            result: Err(AcquisitionError::Feed {
                feed: "currencies",
                source: FeedError::Status {
                    endpoint: "https://feeds.test/currencies".to_string(),
                    status: 502,
                },
            }),
        };
        assert_eq!(dashboard.apply(failed, &mut doc), ApplyOutcome::Failed);

        let summary = dashboard.set_filter(FilterInput::search("btc"), &mut doc);
        assert_eq!(summary.visible_assets, 0);
        assert_eq!(doc.content("updatesSection"), Some(""));
        assert_eq!(doc.content("noResults"), Some(""));
        assert_eq!(doc.content("assetGroups"), Some(LOAD_ERROR_MARKUP));
        assert_eq!(dashboard.filter().search, "btc");

        dashboard.apply(fetched(3, &["Btc Cash", "Alpha"]), &mut doc);
        assert_eq!(dashboard.assets().unwrap().total_visible, 1);
    }

    #[test]
    fn filter_survives_refresh() {
        let mut doc = HtmlDocument::new();
        let mut dashboard = Dashboard::new(UiHandles::default(), Variant::Standard);
        dashboard.apply(fetched(1, &["Alpha", "Beta"]), &mut doc);
        let summary = dashboard.set_filter(FilterInput::search("alp"), &mut doc);
        assert_eq!(summary.visible_assets, 1);
        assert_eq!(summary.visible_groups, 1);

        dashboard.apply(fetched(2, &["Alpha", "Alpine", "Gamma"]), &mut doc);
        assert_eq!(dashboard.assets().unwrap().total_visible, 2);
    }

    #[test]
    fn no_results_indicator() {
        let mut doc = HtmlDocument::new();
        let mut dashboard = Dashboard::new(UiHandles::default(), Variant::Standard);
        dashboard.apply(fetched(1, &["Alpha"]), &mut doc);
        assert_eq!(doc.content("noResults"), Some(""));
        let summary = dashboard.set_filter(FilterInput::search("zzz"), &mut doc);
        assert!(summary.no_results);
        assert_eq!(summary.visible_groups, 0);
        assert!(!doc.content("noResults").unwrap().is_empty());
        let summary = dashboard.set_filter(FilterInput::default(), &mut doc);
        assert!(!summary.no_results);
        assert_eq!(doc.content("noResults"), Some(""));
    }

    #[test]
    fn unavailable_updates_render_notice() {
        let mut doc = HtmlDocument::new();
        let mut dashboard = Dashboard::new(UiHandles::default(), Variant::Standard);
        dashboard.apply(fetched(1, &["Alpha"]), &mut doc);
        assert!(doc
            .content("updatesSection")
            .unwrap()
            .contains("Status Updates Unavailable"));
        assert!(doc.content("assetGroups").unwrap().contains("Alpha"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn write_page_reports_path() {
        let path = Path::new("/nonexistent/dir/assets.html");
        match write_page(path, "<html></html>").await {
            Err(DashboardError::Output { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("unexpected result {:?}", other),
        }
    }
}

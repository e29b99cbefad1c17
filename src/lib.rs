//! # assetboard
//!
//! Builds an overview of the availability of all assets offered by a trading
//! venue, together with the most recent status changes of its platform
//! components.
//!
//! Asset settings, currency metadata and (optionally) the list of newly listed
//! assets are fetched concurrently, merged by asset id and grouped by asset
//! type and group. Status updates are read from a chain of sources, with the
//! latest ongoing maintenance or outage per component pinned to the top.
//! The result is rendered into named containers of a page through a
//! [`render::RenderSink`], and can be narrowed by a search text and a set of
//! attribute filters.

// module exports
pub mod acquisition;
pub mod config;
pub mod dashboard;
pub mod datatypes;
pub mod feeds;
pub mod filter;
pub mod grouping;
pub mod merge;
pub mod pinning;
pub mod render;
pub mod view;

pub use acquisition::{Acquirer, AcquisitionError, FeedData, Fetched};
pub use config::{Config, ConfigError, Variant};
pub use dashboard::{ApplyOutcome, Dashboard, DashboardError, FilterSummary};
pub use filter::FilterInput;
pub use render::{HtmlDocument, RenderSink, UiHandles};

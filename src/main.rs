use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use log::{debug, info};

use assetboard::feeds::http::HttpFeed;
use assetboard::render::page::render_page;
use assetboard::{dashboard, Acquirer, ApplyOutcome, Config, Dashboard, FilterInput};
use assetboard::{HtmlDocument, UiHandles};

const TITLE: &str = "Asset Status Overview";

/// Generate an HTML overview of asset availability and platform status
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// TOML configuration file; production endpoints are used if omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Output file, overrides the configured one
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Initial search text
    #[arg(short, long, default_value = "")]
    search: String,
    #[arg(long)]
    maintenance: bool,
    #[arg(long)]
    trade_only: bool,
    #[arg(long)]
    fully_integrated: bool,
    #[arg(long)]
    stakeable: bool,
    #[arg(long)]
    new_assets: bool,
    #[arg(long)]
    fusion: bool,
}

impl Cli {
    fn filter(&self) -> FilterInput {
        FilterInput {
            search: self.search.clone(),
            maintenance: self.maintenance,
            trade_only: self.trade_only,
            fully_integrated: self.fully_integrated,
            stakeable: self.stakeable,
            new_assets: self.new_assets,
            fusion: self.fusion,
        }
    }
}

fn init_logger(config: &Config) {
    let filters = std::env::var("RUST_LOG").unwrap_or_else(|_| config.log.level.clone());
    pretty_env_logger::formatted_builder()
        .parse_filters(&filters)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::from_file(path).map_err(dashboard::DashboardError::from)?,
        None => Config::default(),
    };
    init_logger(&config);
    debug!("configuration: {:?}", config);

    let handles = UiHandles::default();
    let acquirer = Acquirer::new(Arc::new(HttpFeed::new()), config.endpoints.resolve());
    let mut dashboard = Dashboard::new(handles.clone(), config.variant);
    let mut doc = HtmlDocument::new();

    let fetched = acquirer.acquire().await;
    if dashboard.apply(fetched, &mut doc) == ApplyOutcome::Rendered {
        if dashboard.unmatched_count() > 0 {
            info!(
                "{} settings without currency metadata were left out",
                dashboard.unmatched_count()
            );
        }
        let summary = dashboard.set_filter(cli.filter(), &mut doc);
        info!(
            "{} assets in {} groups and {} status updates visible",
            summary.visible_assets, summary.visible_groups, summary.visible_updates
        );
    }

    let page = render_page(&doc, &handles, config.variant, dashboard.filter(), TITLE);
    let output = cli.output.unwrap_or(config.output);
    dashboard::write_page(&output, &page).await?;
    Ok(())
}

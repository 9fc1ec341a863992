use anyhow::Result;
use chrono::Local;
use clap::{Parser, ValueEnum};
use log::{error, info};
use std::path::PathBuf;
use std::sync::Arc;

use skuscraper::core::catalog::{category_report, render_table, LABELS};
use skuscraper::core::config::Settings;
use skuscraper::storage::OutputTarget;
use skuscraper::{
    create_storage, CatalogWalker, ChromiumLauncher, Crawler, CrawlerConfig, HttpListingClient,
    PageRange, StatsTracker, StorageBackend, StorageType,
};

const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S %p";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

/// Walks the product catalog by leading letter and exports every product page.
#[derive(Parser, Debug)]
#[command(name = "skuscraper")]
#[command(about = "Scrape product details from the catalog listing", long_about = None)]
struct Args {
    /// Print how many products and pages each label has, then exit
    #[arg(long = "lc", visible_alias = "list-categories")]
    list_categories: bool,

    /// Catalog label, one of [a-z]
    #[arg(short, long)]
    label: Option<String>,

    /// First listing page to fetch
    #[arg(long = "p1", visible_alias = "page-from")]
    page_from: Option<u32>,

    /// Last listing page to fetch, inclusive
    #[arg(long = "p2", visible_alias = "page-to")]
    page_to: Option<u32>,

    #[arg(long, default_value = "settings.json")]
    settings: PathBuf,

    /// Directory results are written under
    #[arg(long, default_value = "output")]
    output: String,

    #[arg(long, value_enum, default_value = "csv")]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("selectors", log::LevelFilter::Warn)
        .filter_module("html5ever", log::LevelFilter::Error)
        .filter_module("chromiumoxide", log::LevelFilter::Warn)
        .init();

    let start = Local::now();
    info!("Script starts at: {}", start.format(TIMESTAMP_FORMAT));

    let args = Args::parse();
    let settings = Settings::load(&args.settings)?;
    let config = CrawlerConfig::from_settings(&settings)?;

    if args.list_categories {
        let source = HttpListingClient::from_config(&config)?;
        let counts = category_report(&source, LABELS, config.per_page).await?;
        println!("\n{}", render_table(&counts));
        return Ok(());
    }

    let range = PageRange::new(args.label.as_deref(), args.page_from, args.page_to)?;
    let outcome = run(&args, &config, &range).await;

    let end = Local::now();
    info!("Script ends at: {}", end.format(TIMESTAMP_FORMAT));
    let elapsed = end.signed_duration_since(start).num_milliseconds() as f64 / 60_000.0;
    info!("Time Elapsed: {:.4} minutes", elapsed);

    outcome
}

async fn run(args: &Args, config: &CrawlerConfig, range: &PageRange) -> Result<()> {
    let storage = create_storage(match args.format {
        OutputFormat::Csv => StorageType::Csv {
            path: args.output.clone(),
        },
        OutputFormat::Json => StorageType::Json {
            path: args.output.clone(),
        },
    })
    .await?;
    let target = OutputTarget::from_range(range);
    storage.setup(&target).await?;

    let stats = Arc::new(StatsTracker::new());
    let launcher = Arc::new(ChromiumLauncher::from_config(config));
    let crawler = Crawler::from_config(config, launcher, Arc::clone(&stats))?;
    let source = Arc::new(HttpListingClient::from_config(config)?);
    let mut walker = CatalogWalker::new(source, crawler).with_per_page(config.per_page);

    let mut records = Vec::new();
    let walked = walker.walk(range, &mut records).await;
    if let Err(e) = &walked {
        error!("Error: {}", e);
    }

    let path = storage.store_records(&target, &records).await?;
    info!("Saved {} records to {}", records.len(), path.display());

    stats.finish();
    stats.print_summary();

    Ok(walked?)
}

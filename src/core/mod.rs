pub mod catalog;
pub mod config;
pub mod crawling;
mod errors;

pub use catalog::{CatalogWalker, WalkState};
pub use config::{CrawlerConfig, PageRange, Settings};
pub use crawling::Crawler;
pub use errors::{ScraperError, ScraperResult};

pub mod core;
pub mod http;
pub mod parser;
pub mod scrapers;
pub mod stats;
pub mod storage;

pub use self::core::{CatalogWalker, Crawler, CrawlerConfig, PageRange, WalkState};
pub use self::core::{ScraperError, ScraperResult};
pub use http::{HttpListingClient, ListingSource, ProductDescriptor};
pub use parser::{ExtractedRecord, RecordBuilder};
pub use scrapers::{BrowserSession, ChromiumLauncher, DetailRunner, SessionLauncher};
pub use stats::StatsTracker;
pub use storage::{create_storage, StorageBackend, StorageType};

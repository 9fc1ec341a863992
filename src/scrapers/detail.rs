use chrono::Utc;
use log::{debug, error};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::{BrowserSession, SessionLauncher};
use crate::core::config::CrawlerConfig;
use crate::http::ProductDescriptor;
use crate::parser::{ExtractedRecord, RecordBuilder};
use crate::stats::StatsTracker;
use crate::ScraperResult;

/// Loads one product detail page in its own browser session and turns it into
/// a record.
pub struct DetailRunner {
    launcher: Arc<dyn SessionLauncher>,
    builder: RecordBuilder,
    readiness_marker: String,
    page_load_timeout: Duration,
    stats: Arc<StatsTracker>,
}

impl DetailRunner {
    pub fn new(
        launcher: Arc<dyn SessionLauncher>,
        builder: RecordBuilder,
        readiness_marker: impl Into<String>,
        page_load_timeout: Duration,
    ) -> Self {
        Self {
            launcher,
            builder,
            readiness_marker: readiness_marker.into(),
            page_load_timeout,
            stats: Arc::new(StatsTracker::new()),
        }
    }

    pub fn from_config(
        config: &CrawlerConfig,
        launcher: Arc<dyn SessionLauncher>,
    ) -> ScraperResult<Self> {
        let layout = Arc::new(config.layout.compile()?);
        let readiness_marker = layout.readiness_marker().to_string();
        let builder = RecordBuilder::new(&config.base_url()?, layout);
        Ok(Self::new(
            launcher,
            builder,
            readiness_marker,
            config.page_load_timeout,
        ))
    }

    pub fn with_stats(mut self, stats: Arc<StatsTracker>) -> Self {
        self.stats = stats;
        self
    }

    pub fn stats(&self) -> &Arc<StatsTracker> {
        &self.stats
    }

    /// Never fails: a product whose page cannot be loaded or read is logged
    /// and yields `None`.
    pub async fn run(&self, product: &ProductDescriptor) -> Option<ExtractedRecord> {
        let started = Utc::now();
        let result = self.fetch(product).await;
        let elapsed = Utc::now().signed_duration_since(started);

        match result {
            Ok(record) => {
                self.stats.record_detail(true, elapsed);
                Some(record)
            }
            Err(e) => {
                if e.is_timeout() {
                    self.stats.record_timeout();
                }
                self.stats.record_detail(false, elapsed);
                error!(
                    "Error on loading the product info: {}",
                    self.builder.product_url(&product.slug)
                );
                error!("{}", e);
                None
            }
        }
    }

    pub async fn fetch(&self, product: &ProductDescriptor) -> ScraperResult<ExtractedRecord> {
        let url = Url::parse(&self.builder.product_url(&product.slug))?;
        let mut session = self.launcher.launch().await?;

        let rendered = self.render(session.as_mut(), &url).await;
        if let Err(e) = session.close().await {
            debug!("Failed to close session for {}: {}", url, e);
        }

        self.builder.build(product, &rendered?)
    }

    async fn render(&self, session: &mut dyn BrowserSession, url: &Url) -> ScraperResult<String> {
        debug!("Loading {}", url);
        session.navigate(url).await?;
        session
            .wait_for_element(&self.readiness_marker, self.page_load_timeout)
            .await?;
        session.page_source().await
    }
}

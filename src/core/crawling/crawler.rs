use futures::stream::{FuturesUnordered, StreamExt};
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::spawn;
use tokio::task::{JoinError, JoinHandle};

use crate::core::config::{CrawlerConfig, DEFAULT_PROGRESS_EVERY};
use crate::http::ProductDescriptor;
use crate::parser::ExtractedRecord;
use crate::scrapers::{DetailRunner, SessionLauncher};
use crate::stats::StatsTracker;
use crate::ScraperResult;

type DetailTask = JoinHandle<Option<ExtractedRecord>>;

/// Fans a batch of products out over at most `workers` concurrent detail
/// loads and collects whatever succeeds.
pub struct Crawler {
    runner: Arc<DetailRunner>,
    workers: usize,
    progress_every: usize,
}

impl Crawler {
    pub fn new(runner: DetailRunner, workers: usize) -> Self {
        info!("Initializing crawler with {} workers", workers);
        Self {
            runner: Arc::new(runner),
            workers: workers.max(1),
            progress_every: DEFAULT_PROGRESS_EVERY,
        }
    }

    pub fn from_config(
        config: &CrawlerConfig,
        launcher: Arc<dyn SessionLauncher>,
        stats: Arc<StatsTracker>,
    ) -> ScraperResult<Self> {
        config.validate()?;
        let runner = DetailRunner::from_config(config, launcher)?.with_stats(stats);
        Ok(Self::new(runner, config.workers).with_progress_every(config.progress_every))
    }

    pub fn with_progress_every(mut self, every: usize) -> Self {
        self.progress_every = every.max(1);
        self
    }

    pub fn stats(&self) -> &Arc<StatsTracker> {
        self.runner.stats()
    }

    /// Records come back in completion order, one at most per product.
    pub async fn crawl(&self, products: Vec<ProductDescriptor>) -> Vec<ExtractedRecord> {
        let total = products.len();
        let mut futures: FuturesUnordered<DetailTask> = FuturesUnordered::new();
        let mut records = Vec::with_capacity(total);
        let mut completed = 0;

        for product in products {
            if futures.len() >= self.workers {
                debug!("Reached worker limit {}, waiting for slot", self.workers);
                if let Some(result) = futures.next().await {
                    self.collect(result, &mut records, &mut completed);
                }
            }

            let runner = Arc::clone(&self.runner);
            futures.push(spawn(async move { runner.run(&product).await }));
        }

        while let Some(result) = futures.next().await {
            self.collect(result, &mut records, &mut completed);
        }

        debug!("Batch finished: {} of {} products built", records.len(), total);
        records
    }

    fn collect(
        &self,
        result: Result<Option<ExtractedRecord>, JoinError>,
        records: &mut Vec<ExtractedRecord>,
        completed: &mut usize,
    ) {
        match result {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(e) => {
                warn!("Task error: {}", e);
                self.stats().record_lost_task();
            }
        }

        *completed += 1;
        if *completed % self.progress_every == 0 {
            info!("So far {} has been fetched ...", *completed);
            self.stats().record_progress();
        }
    }
}

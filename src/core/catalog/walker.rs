use log::{debug, error, info};
use std::sync::Arc;

use crate::core::config::{PageRange, PAGE_SIZE};
use crate::core::crawling::Crawler;
use crate::http::{ListingRequest, ListingSource};
use crate::parser::ExtractedRecord;
use crate::ScraperResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkState {
    Idle,
    FetchingPage(u32),
    Dispatching(u32),
    Accumulating(u32),
    Done,
    Fatal,
}

/// Walks listing pages for one label and feeds each page's products through
/// the crawler.
pub struct CatalogWalker {
    source: Arc<dyn ListingSource>,
    crawler: Crawler,
    per_page: u32,
    state: WalkState,
}

impl CatalogWalker {
    pub fn new(source: Arc<dyn ListingSource>, crawler: Crawler) -> Self {
        Self {
            source,
            crawler,
            per_page: PAGE_SIZE,
            state: WalkState::Idle,
        }
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn state(&self) -> WalkState {
        self.state
    }

    pub fn crawler(&self) -> &Crawler {
        &self.crawler
    }

    fn transition(&mut self, next: WalkState) {
        debug!("Walk state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Appends records to `results` page by page. A listing failure stops the
    /// walk with the error; records from earlier pages stay in `results`.
    pub async fn walk(
        &mut self,
        range: &PageRange,
        results: &mut Vec<ExtractedRecord>,
    ) -> ScraperResult<()> {
        info!(
            "Walking label '{}' pages {} to {}",
            range.label(),
            range.from_page(),
            range.to_page()
        );

        for page in range.pages() {
            self.transition(WalkState::FetchingPage(page));
            let request = ListingRequest::new(range.label(), page, self.per_page);
            let listing = match self.source.fetch_listing(&request).await {
                Ok(listing) => listing,
                Err(e) => {
                    error!("Listing page {} for '{}' failed: {}", page, range.label(), e);
                    self.transition(WalkState::Fatal);
                    return Err(e);
                }
            };

            let products = listing.data.skus;
            self.crawler.stats().record_page(products.len());
            if products.is_empty() {
                info!("Page {} has no products", page);
            }

            self.transition(WalkState::Dispatching(page));
            let records = self.crawler.crawl(products).await;

            self.transition(WalkState::Accumulating(page));
            info!("Page {} contributed {} records", page, records.len());
            results.extend(records);
        }

        self.transition(WalkState::Done);
        Ok(())
    }
}

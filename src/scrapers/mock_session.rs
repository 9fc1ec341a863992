use async_trait::async_trait;
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use url::Url;

use super::{BrowserSession, SessionLauncher};
use crate::{ScraperError, ScraperResult};

/// Canned markup served for one URL.
#[derive(Clone, Debug)]
pub struct MockPage {
    pub markup: String,
    /// How long the page takes before its markup is "rendered".
    pub hydration_delay: Option<Duration>,
}

impl MockPage {
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
            hydration_delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.hydration_delay = Some(delay);
        self
    }
}

#[derive(Debug, Default)]
struct SessionCounters {
    launched: AtomicUsize,
    closed: AtomicUsize,
    active: AtomicUsize,
    peak: AtomicUsize,
}

/// In-memory launcher for tests and dry runs. Tracks how many sessions are
/// open at once.
#[derive(Clone, Default)]
pub struct MockLauncher {
    pages: Arc<HashMap<String, MockPage>>,
    counters: Arc<SessionCounters>,
}

impl MockLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, page: MockPage) -> Self {
        let key = normalize(url);
        Arc::make_mut(&mut self.pages).insert(key, page);
        self
    }

    pub fn launched(&self) -> usize {
        self.counters.launched.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.counters.closed.load(Ordering::SeqCst)
    }

    /// Highest number of sessions that were open at the same time.
    pub fn peak_active(&self) -> usize {
        self.counters.peak.load(Ordering::SeqCst)
    }
}

fn normalize(url: &str) -> String {
    Url::parse(url)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| url.to_string())
}

#[async_trait]
impl SessionLauncher for MockLauncher {
    async fn launch(&self) -> ScraperResult<Box<dyn BrowserSession>> {
        self.counters.launched.fetch_add(1, Ordering::SeqCst);
        let active = self.counters.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.peak.fetch_max(active, Ordering::SeqCst);

        Ok(Box::new(MockSession {
            pages: Arc::clone(&self.pages),
            counters: Arc::clone(&self.counters),
            current: None,
        }))
    }
}

pub struct MockSession {
    pages: Arc<HashMap<String, MockPage>>,
    counters: Arc<SessionCounters>,
    current: Option<MockPage>,
}

impl MockSession {
    fn current(&self) -> ScraperResult<&MockPage> {
        self.current
            .as_ref()
            .ok_or_else(|| ScraperError::BrowserError("no page has been opened".to_string()))
    }
}

#[async_trait]
impl BrowserSession for MockSession {
    async fn navigate(&mut self, url: &Url) -> ScraperResult<()> {
        match self.pages.get(url.as_str()) {
            Some(page) => {
                self.current = Some(page.clone());
                Ok(())
            }
            None => Err(ScraperError::BrowserError(format!(
                "net::ERR_NAME_NOT_RESOLVED at {}",
                url
            ))),
        }
    }

    async fn wait_for_element(&self, selector: &str, timeout: Duration) -> ScraperResult<()> {
        let page = self.current()?;
        let compiled = Selector::parse(selector).map_err(|e| ScraperError::SelectorError {
            selector: selector.to_string(),
            reason: e.to_string(),
        })?;
        let present = Html::parse_document(&page.markup)
            .select(&compiled)
            .next()
            .is_some();
        let delay = page.hydration_delay.unwrap_or_default();

        let hydrate = async {
            sleep(delay).await;
            if !present {
                std::future::pending::<()>().await;
            }
        };

        tokio::time::timeout(timeout, hydrate)
            .await
            .map_err(|_| ScraperError::DetailLoadTimeout {
                selector: selector.to_string(),
                timeout,
            })
    }

    async fn page_source(&self) -> ScraperResult<String> {
        Ok(self.current()?.markup.clone())
    }

    async fn close(self: Box<Self>) -> ScraperResult<()> {
        self.counters.active.fetch_sub(1, Ordering::SeqCst);
        self.counters.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

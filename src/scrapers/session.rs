use async_trait::async_trait;
use std::time::Duration;
use url::Url;

use crate::ScraperResult;

/// Opens isolated browser sessions, one per product.
#[async_trait]
pub trait SessionLauncher: Send + Sync {
    async fn launch(&self) -> ScraperResult<Box<dyn BrowserSession>>;
}

/// A single rendering session. Callers must `close` it on every path once
/// `launch` has succeeded.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    async fn navigate(&mut self, url: &Url) -> ScraperResult<()>;

    /// Blocks until `selector` matches in the live document.
    ///
    /// Fails with [`crate::ScraperError::DetailLoadTimeout`] once `timeout`
    /// elapses.
    async fn wait_for_element(&self, selector: &str, timeout: Duration) -> ScraperResult<()>;

    /// Markup of the document as currently rendered.
    async fn page_source(&self) -> ScraperResult<String>;

    async fn close(self: Box<Self>) -> ScraperResult<()>;
}

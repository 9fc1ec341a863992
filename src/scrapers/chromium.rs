//! Headless Chromium sessions driven through chromiumoxide.

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use log::{debug, trace, warn};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use url::Url;
use uuid::Uuid;

use super::{BrowserSession, SessionLauncher};
use crate::core::config::CrawlerConfig;
use crate::{ScraperError, ScraperResult};

const READINESS_POLL_INTERVAL: Duration = Duration::from_millis(250);
/// How long a browser gets to exit after a successful close before it is killed.
const BROWSER_EXIT_GRACE: Duration = Duration::from_secs(5);

/// Launches a fresh Chromium process for every session.
///
/// Each browser gets its own throwaway profile directory, so concurrent
/// sessions never share cookies, cache or a profile lock.
#[derive(Debug, Clone)]
pub struct ChromiumLauncher {
    chrome_path: Option<PathBuf>,
    request_timeout: Option<Duration>,
    profile_root: PathBuf,
}

impl ChromiumLauncher {
    pub fn from_config(config: &CrawlerConfig) -> Self {
        Self {
            chrome_path: config.chrome_path.clone(),
            request_timeout: Some(config.page_load_timeout),
            profile_root: std::env::temp_dir(),
        }
    }

    fn browser_config(&self, profile_dir: &Path) -> ScraperResult<BrowserConfig> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .user_data_dir(profile_dir)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--disable-background-networking");

        if let Some(path) = &self.chrome_path {
            builder = builder.chrome_executable(path);
        }
        if let Some(timeout) = self.request_timeout {
            builder = builder.request_timeout(timeout);
        }

        builder.build().map_err(ScraperError::BrowserError)
    }
}

#[async_trait]
impl SessionLauncher for ChromiumLauncher {
    async fn launch(&self) -> ScraperResult<Box<dyn BrowserSession>> {
        let profile_dir = self
            .profile_root
            .join(format!("skuscraper-{}", Uuid::now_v7()));
        let config = self.browser_config(&profile_dir)?;

        let (browser, mut handler) = match Browser::launch(config).await {
            Ok(launched) => launched,
            Err(e) => {
                discard_profile(&profile_dir).await;
                return Err(e.into());
            }
        };
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    trace!("Browser handler event error: {}", e);
                }
            }
        });
        debug!("Launched browser with profile {}", profile_dir.display());

        Ok(Box::new(ChromiumSession {
            browser,
            handler,
            page: None,
            profile_dir,
        }))
    }
}

async fn discard_profile(profile_dir: &Path) {
    match tokio::fs::remove_dir_all(profile_dir).await {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => debug!("Could not remove profile {}: {}", profile_dir.display(), e),
    }
}

/// The parts of a browser process that teardown needs.
#[async_trait]
trait BrowserProcess: Send {
    async fn request_close(&mut self) -> ScraperResult<()>;

    async fn wait_exit(&mut self) -> io::Result<()>;

    async fn force_kill(&mut self) -> io::Result<()>;
}

#[async_trait]
impl BrowserProcess for Browser {
    async fn request_close(&mut self) -> ScraperResult<()> {
        self.close().await?;
        Ok(())
    }

    async fn wait_exit(&mut self) -> io::Result<()> {
        self.wait().await.map(|_| ())
    }

    async fn force_kill(&mut self) -> io::Result<()> {
        Browser::kill(self).await.unwrap_or(Ok(()))
    }
}

/// Asks the browser to close and waits at most `grace` for it to exit. A
/// failed close or a process still running after `grace` is killed.
async fn shut_down<P: BrowserProcess>(
    process: &mut P,
    grace: Duration,
) -> ScraperResult<()> {
    let closed = process.request_close().await;
    let exited = match &closed {
        Ok(()) => timeout(grace, process.wait_exit()).await.ok(),
        Err(_) => None,
    };

    match exited {
        Some(Ok(())) => {}
        Some(Err(e)) => warn!("Browser process did not exit cleanly: {}", e),
        None => {
            warn!("Browser did not exit after close, killing it");
            if let Err(e) = process.force_kill().await {
                warn!("Failed to kill browser process: {}", e);
            }
        }
    }
    closed
}

pub struct ChromiumSession {
    browser: Browser,
    handler: JoinHandle<()>,
    page: Option<Page>,
    profile_dir: PathBuf,
}

impl ChromiumSession {
    fn page(&self) -> ScraperResult<&Page> {
        self.page
            .as_ref()
            .ok_or_else(|| ScraperError::BrowserError("no page has been opened".to_string()))
    }
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn navigate(&mut self, url: &Url) -> ScraperResult<()> {
        let page = self.browser.new_page(url.as_str()).await?;
        self.page = Some(page);
        Ok(())
    }

    async fn wait_for_element(&self, selector: &str, wait: Duration) -> ScraperResult<()> {
        let page = self.page()?;
        let poll = async {
            while page.find_element(selector).await.is_err() {
                sleep(READINESS_POLL_INTERVAL).await;
            }
        };

        timeout(wait, poll)
            .await
            .map_err(|_| ScraperError::DetailLoadTimeout {
                selector: selector.to_string(),
                timeout: wait,
            })
    }

    async fn page_source(&self) -> ScraperResult<String> {
        Ok(self.page()?.content().await?)
    }

    async fn close(self: Box<Self>) -> ScraperResult<()> {
        let mut session = *self;

        if let Some(page) = session.page.take() {
            if let Err(e) = page.close().await {
                debug!("Failed to close page: {}", e);
            }
        }
        let closed = shut_down(&mut session.browser, BROWSER_EXIT_GRACE).await;
        session.handler.abort();
        discard_profile(&session.profile_dir).await;

        closed
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

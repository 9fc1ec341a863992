use async_trait::async_trait;
use log::{debug, info};
use reqwest::{Client, ClientBuilder};
use url::Url;

use super::{ListingRequest, ListingResponse};
use crate::core::config::{CrawlerConfig, LISTING_PATH};
use crate::{ScraperError, ScraperResult};

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Anything that can answer a paginated listing query.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetches one listing page. Any non-200 status is an error.
    async fn fetch_listing(&self, request: &ListingRequest) -> ScraperResult<ListingResponse>;
}

#[derive(Clone)]
pub struct HttpListingClient {
    client: Client,
    base_url: Url,
    listing_path: String,
}

impl HttpListingClient {
    pub fn new(base_url: Url) -> ScraperResult<Self> {
        let client = ClientBuilder::new()
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url,
            listing_path: LISTING_PATH.to_string(),
        })
    }

    pub fn from_config(config: &CrawlerConfig) -> ScraperResult<Self> {
        Ok(Self::new(config.base_url()?)?.with_listing_path(config.listing_path.clone()))
    }

    pub fn with_listing_path(mut self, listing_path: impl Into<String>) -> Self {
        self.listing_path = listing_path.into();
        self
    }
}

#[async_trait]
impl ListingSource for HttpListingClient {
    async fn fetch_listing(&self, request: &ListingRequest) -> ScraperResult<ListingResponse> {
        let url = request.url(&self.base_url, &self.listing_path)?;
        info!("Fetching from: {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        if status != 200 {
            return Err(ScraperError::ListingStatus {
                status,
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        debug!("Listing response: status={}, body_length={}", status, body.len());
        Ok(serde_json::from_slice(&body)?)
    }
}

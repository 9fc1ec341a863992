use serde::Serialize;
use url::Url;

use crate::core::ScraperResult;

/// Query for one page of the prefix listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingRequest {
    pub prefix_term: String,
    pub page: u32,
    pub per_page: u32,
}

impl ListingRequest {
    pub fn new(prefix_term: impl Into<String>, page: u32, per_page: u32) -> Self {
        Self {
            prefix_term: prefix_term.into(),
            page,
            per_page,
        }
    }

    pub fn url(&self, base_url: &Url, listing_path: &str) -> ScraperResult<Url> {
        let mut url = base_url.join(listing_path)?;
        url.query_pairs_mut()
            .clear()
            .append_pair("prefix_term", &self.prefix_term)
            .append_pair("page", &self.page.to_string())
            .append_pair("per_page", &self.per_page.to_string());
        Ok(url)
    }
}

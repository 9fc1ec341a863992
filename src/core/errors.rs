use crate::storage::base::StorageError;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Browser error: {0}")]
    BrowserError(String),

    #[error("Detail page not ready: `{selector}` did not appear within {timeout:?}")]
    DetailLoadTimeout { selector: String, timeout: Duration },

    #[error("Listing endpoint {url} returned status {status}")]
    ListingStatus { status: u16, url: String },

    #[error("Cannot build record for product {slug}: {reason}")]
    RecordBuild { slug: String, reason: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid selector `{selector}`: {reason}")]
    SelectorError { selector: String, reason: String },

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
}

impl From<chromiumoxide::error::CdpError> for ScraperError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        ScraperError::BrowserError(err.to_string())
    }
}

impl ScraperError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ScraperError::DetailLoadTimeout { .. })
    }
}

pub type ScraperResult<T> = Result<T, ScraperError>;

use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::parser::PageLayout;
use crate::{ScraperError, ScraperResult};

pub const DEFAULT_BASE_URL: &str = "https://www.1mg.com";
pub const LISTING_PATH: &str = "/pharmacy_api_gateway/v4/drug_skus/by_prefix";
/// Products requested per listing page.
pub const PAGE_SIZE: u32 = 50;
pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_PAGE_LOAD_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_PROGRESS_EVERY: usize = 2;

/// A settings-file entry, `{"value": ..., "description": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting<T> {
    pub value: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Contents of `settings.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub workers: Setting<usize>,
    /// Seconds to wait for the readiness marker on each detail page.
    pub page_load_timeout: Setting<u64>,
    /// Chrome/Chromium executable; auto-detected when absent.
    #[serde(default)]
    pub driver_path: Option<Setting<PathBuf>>,
    #[serde(default)]
    pub base_url: Option<Setting<String>>,
    /// Log progress after every N completed products.
    #[serde(default)]
    pub progress_every: Option<Setting<usize>>,
    #[serde(default)]
    pub layout: PageLayout,
}

impl Settings {
    pub fn load<P: AsRef<Path>>(path: P) -> ScraperResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            ScraperError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> ScraperResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Runtime knobs for a walk, built from [`Settings`] or with the `with_*`
/// builders.
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    pub base_url: String,
    pub listing_path: String,
    pub per_page: u32,
    pub workers: usize,
    pub page_load_timeout: Duration,
    pub chrome_path: Option<PathBuf>,
    pub progress_every: usize,
    pub layout: PageLayout,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            listing_path: LISTING_PATH.to_string(),
            per_page: PAGE_SIZE,
            workers: DEFAULT_WORKERS,
            page_load_timeout: DEFAULT_PAGE_LOAD_TIMEOUT,
            chrome_path: None,
            progress_every: DEFAULT_PROGRESS_EVERY,
            layout: PageLayout::default(),
        }
    }
}

impl CrawlerConfig {
    pub fn from_settings(settings: &Settings) -> ScraperResult<Self> {
        let mut config = Self::default()
            .with_workers(settings.workers.value)
            .with_page_load_timeout(Duration::from_secs(settings.page_load_timeout.value))
            .with_layout(settings.layout.clone());
        if let Some(path) = &settings.driver_path {
            config = config.with_chrome_path(path.value.clone());
        }
        if let Some(base_url) = &settings.base_url {
            config = config.with_base_url(base_url.value.clone());
        }
        if let Some(every) = &settings.progress_every {
            config = config.with_progress_every(every.value);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_page_load_timeout(mut self, timeout: Duration) -> Self {
        self.page_load_timeout = timeout;
        self
    }

    pub fn with_chrome_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    pub fn with_progress_every(mut self, every: usize) -> Self {
        self.progress_every = every;
        self
    }

    pub fn with_layout(mut self, layout: PageLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn base_url(&self) -> ScraperResult<Url> {
        Ok(Url::parse(&self.base_url)?)
    }

    pub fn validate(&self) -> ScraperResult<()> {
        if self.workers == 0 {
            return Err(ScraperError::ConfigError(
                "workers must be at least 1".to_string(),
            ));
        }
        if self.per_page == 0 {
            return Err(ScraperError::ConfigError(
                "per_page must be at least 1".to_string(),
            ));
        }
        if self.progress_every == 0 {
            return Err(ScraperError::ConfigError(
                "progress cadence must be at least 1".to_string(),
            ));
        }
        if self.page_load_timeout.is_zero() {
            return Err(ScraperError::ConfigError(
                "page_load_timeout must be positive".to_string(),
            ));
        }
        self.base_url()?;
        self.layout.compile()?;
        Ok(())
    }
}

/// Inclusive range of listing pages to walk for one catalog label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRange {
    label: String,
    from_page: u32,
    to_page: u32,
}

impl PageRange {
    /// Validates command-line input before anything touches the network.
    pub fn new(label: Option<&str>, from_page: Option<u32>, to_page: Option<u32>) -> ScraperResult<Self> {
        let label = label.ok_or_else(|| {
            ScraperError::ConfigError("a label is required to walk the catalog".to_string())
        })?;
        let mut chars = label.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_lowercase() => {}
            _ => {
                return Err(ScraperError::ConfigError(format!(
                    "label must be one of [a-z], got {:?}",
                    label
                )))
            }
        }

        let (from_page, to_page) = match (from_page, to_page) {
            (Some(from), Some(to)) => (from, to),
            _ => {
                return Err(ScraperError::ConfigError(
                    "-p1 and -p2 are both required with a label".to_string(),
                ))
            }
        };
        if from_page == 0 || from_page > to_page {
            return Err(ScraperError::ConfigError(format!(
                "invalid page range {}..={}",
                from_page, to_page
            )));
        }

        Ok(Self {
            label: label.to_string(),
            from_page,
            to_page,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn from_page(&self) -> u32 {
        self.from_page
    }

    pub fn to_page(&self) -> u32 {
        self.to_page
    }

    pub fn pages(&self) -> RangeInclusive<u32> {
        self.from_page..=self.to_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_file_shape() {
        let settings = Settings::from_json(
            r#"{
                "workers": {"value": 8, "description": "parallel browser sessions"},
                "page_load_timeout": {"value": 45},
                "driver_path": {"value": "/usr/bin/chromium"}
            }"#,
        )
        .unwrap();

        let config = CrawlerConfig::from_settings(&settings).unwrap();
        assert_eq!(config.workers, 8);
        assert_eq!(config.page_load_timeout, Duration::from_secs(45));
        assert_eq!(config.chrome_path, Some(PathBuf::from("/usr/bin/chromium")));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.layout, PageLayout::default());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let settings =
            Settings::from_json(r#"{"workers": {"value": 0}, "page_load_timeout": {"value": 10}}"#)
                .unwrap();
        assert!(matches!(
            CrawlerConfig::from_settings(&settings),
            Err(ScraperError::ConfigError(_))
        ));
    }

    #[test]
    fn test_bad_layout_override_rejected() {
        let settings = Settings::from_json(
            r#"{"workers": {"value": 2}, "page_load_timeout": {"value": 10},
                "layout": {"readiness_marker": "div..x"}}"#,
        )
        .unwrap();
        assert!(matches!(
            CrawlerConfig::from_settings(&settings),
            Err(ScraperError::SelectorError { .. })
        ));
    }

    #[test]
    fn test_progress_cadence_from_settings() {
        let settings = Settings::from_json(
            r#"{"workers": {"value": 2}, "page_load_timeout": {"value": 10},
                "progress_every": {"value": 5}}"#,
        )
        .unwrap();
        let config = CrawlerConfig::from_settings(&settings).unwrap();
        assert_eq!(config.progress_every, 5);

        let settings = Settings::from_json(
            r#"{"workers": {"value": 2}, "page_load_timeout": {"value": 10},
                "progress_every": {"value": 0}}"#,
        )
        .unwrap();
        assert!(matches!(
            CrawlerConfig::from_settings(&settings),
            Err(ScraperError::ConfigError(_))
        ));
    }

    #[test]
    fn test_missing_settings_file() {
        assert!(matches!(
            Settings::load("/definitely/not/here/settings.json"),
            Err(ScraperError::ConfigError(_))
        ));
    }

    #[test]
    fn test_page_range_requires_both_bounds() {
        assert!(PageRange::new(Some("a"), Some(1), None).is_err());
        assert!(PageRange::new(Some("a"), None, Some(3)).is_err());
        assert!(PageRange::new(Some("a"), None, None).is_err());
        assert!(PageRange::new(None, Some(1), Some(3)).is_err());
    }

    #[test]
    fn test_page_range_validation() {
        let range = PageRange::new(Some("d"), Some(2), Some(4)).unwrap();
        assert_eq!(range.label(), "d");
        assert_eq!(range.pages().collect::<Vec<_>>(), vec![2, 3, 4]);

        assert!(PageRange::new(Some("d"), Some(0), Some(4)).is_err());
        assert!(PageRange::new(Some("d"), Some(5), Some(4)).is_err());
        assert!(PageRange::new(Some("D"), Some(1), Some(1)).is_err());
        assert!(PageRange::new(Some("ab"), Some(1), Some(1)).is_err());
    }
}

use crate::core::config::CrawlerConfig;
use crate::core::crawling::Crawler;
use crate::http::ProductDescriptor;
use crate::parser::html::fixtures::{product_page, unhydrated_page};
use crate::parser::ExtractedRecord;
use crate::scrapers::{MockLauncher, MockPage};
use crate::stats::StatsTracker;
use std::sync::Arc;
use std::time::{Duration, Instant};

const BASE: &str = "https://www.1mg.com";

fn slug(i: usize) -> String {
    format!("/drugs/product-{}", i)
}

fn descriptor(slug: String) -> ProductDescriptor {
    ProductDescriptor {
        slug,
        manufacturer_name: Some("Cipla Ltd".to_string()),
        kind: Some("allopathy".to_string()),
    }
}

fn catalog(count: usize, delay: Duration) -> MockLauncher {
    (0..count).fold(MockLauncher::new(), |launcher, i| {
        launcher.with_page(
            &format!("{}{}", BASE, slug(i)),
            MockPage::new(product_page(&format!("Product {}", i))).with_delay(delay),
        )
    })
}

fn crawler(launcher: &MockLauncher, workers: usize, timeout: Duration) -> Crawler {
    let config = CrawlerConfig::default()
        .with_base_url(BASE)
        .with_workers(workers)
        .with_page_load_timeout(timeout);
    Crawler::from_config(&config, Arc::new(launcher.clone()), Arc::new(StatsTracker::new()))
        .unwrap()
}

fn sorted_urls(records: &[ExtractedRecord]) -> Vec<String> {
    let mut urls: Vec<String> = records.iter().map(|r| r.product_url.clone()).collect();
    urls.sort();
    urls
}

#[tokio::test]
async fn test_every_product_yields_one_record() {
    let launcher = catalog(10, Duration::from_millis(5));
    let crawler = crawler(&launcher, 3, Duration::from_secs(2));

    let products: Vec<_> = (0..10).map(|i| descriptor(slug(i))).collect();
    let records = crawler.crawl(products).await;

    assert_eq!(records.len(), 10);
    let expected: Vec<String> = {
        let mut urls: Vec<String> = (0..10).map(|i| format!("{}{}", BASE, slug(i))).collect();
        urls.sort();
        urls
    };
    assert_eq!(sorted_urls(&records), expected);
    assert_eq!(launcher.launched(), 10);
    assert_eq!(launcher.closed(), 10);
}

#[tokio::test]
async fn test_failures_are_dropped_not_fatal() {
    let launcher = catalog(4, Duration::ZERO)
        .with_page(&format!("{}/drugs/never-ready", BASE), MockPage::new(unhydrated_page()));
    let crawler = crawler(&launcher, 2, Duration::from_millis(100));

    let mut products: Vec<_> = (0..4).map(|i| descriptor(slug(i))).collect();
    products.push(descriptor("/drugs/never-ready".to_string()));
    products.push(descriptor("/drugs/not-in-catalog".to_string()));

    let records = crawler.crawl(products).await;
    assert_eq!(records.len(), 4);
    assert!(records.iter().all(|r| !r.product_url.ends_with("never-ready")));

    let stats = crawler.stats().get_stats();
    assert_eq!(stats.records_built, 4);
    assert_eq!(stats.products_failed, 2);
    assert_eq!(stats.detail_timeouts, 1);
    assert_eq!(launcher.launched(), launcher.closed());
}

#[tokio::test]
async fn test_worker_count_does_not_change_results() {
    let products: Vec<_> = (0..12).map(|i| descriptor(slug(i))).collect();

    let serial = catalog(12, Duration::from_millis(2));
    let serial_records = crawler(&serial, 1, Duration::from_secs(2))
        .crawl(products.clone())
        .await;

    let parallel = catalog(12, Duration::from_millis(2));
    let parallel_records = crawler(&parallel, 8, Duration::from_secs(2))
        .crawl(products)
        .await;

    let mut left = serial_records.clone();
    let mut right = parallel_records.clone();
    left.sort_by(|a, b| a.product_url.cmp(&b.product_url));
    right.sort_by(|a, b| a.product_url.cmp(&b.product_url));
    assert_eq!(left, right);
    assert_eq!(serial.peak_active(), 1);
}

#[tokio::test]
async fn test_concurrent_sessions_stay_within_bound() {
    let launcher = catalog(20, Duration::from_millis(20));
    let crawler = crawler(&launcher, 4, Duration::from_secs(2));

    let products: Vec<_> = (0..20).map(|i| descriptor(slug(i))).collect();
    let records = crawler.crawl(products).await;

    assert_eq!(records.len(), 20);
    assert!(launcher.peak_active() <= 4);
    assert!(launcher.peak_active() >= 1);
    assert_eq!(launcher.closed(), 20);
}

#[tokio::test]
async fn test_timeout_does_not_block_siblings() {
    let launcher = catalog(6, Duration::from_millis(10))
        .with_page(&format!("{}/drugs/stuck", BASE), MockPage::new(unhydrated_page()));
    let crawler = crawler(&launcher, 2, Duration::from_millis(400));

    let mut products = vec![descriptor("/drugs/stuck".to_string())];
    products.extend((0..6).map(|i| descriptor(slug(i))));

    let started = Instant::now();
    let records = crawler.crawl(products).await;

    assert_eq!(records.len(), 6);
    // The stuck page holds one slot for the full timeout while the other slot
    // keeps draining the remaining products.
    assert!(started.elapsed() < Duration::from_millis(400 + 6 * 10 * 4));
}

#[tokio::test]
async fn test_empty_batch() {
    let launcher = MockLauncher::new();
    let crawler = crawler(&launcher, 4, Duration::from_secs(1));
    assert!(crawler.crawl(Vec::new()).await.is_empty());
    assert_eq!(launcher.launched(), 0);
}

#[tokio::test]
async fn test_progress_reported_every_n_completions() {
    let launcher = catalog(7, Duration::ZERO)
        .with_page(&format!("{}/drugs/never-ready", BASE), MockPage::new(unhydrated_page()));
    let config = CrawlerConfig::default()
        .with_base_url(BASE)
        .with_workers(3)
        .with_page_load_timeout(Duration::from_millis(50))
        .with_progress_every(2);
    let crawler = Crawler::from_config(
        &config,
        Arc::new(launcher.clone()),
        Arc::new(StatsTracker::new()),
    )
    .unwrap();

    let mut products: Vec<_> = (0..7).map(|i| descriptor(slug(i))).collect();
    products.push(descriptor("/drugs/never-ready".to_string()));
    let records = crawler.crawl(products).await;

    assert_eq!(records.len(), 7);
    // Failed products count towards the cadence too: 8 completions, every 2nd.
    assert_eq!(crawler.stats().get_stats().progress_reports, 4);
}

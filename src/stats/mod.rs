use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct ScrapingStats {
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub pages_fetched: usize,
    pub products_listed: usize,
    pub records_built: usize,
    pub products_failed: usize,
    pub detail_timeouts: usize,
    pub lost_tasks: usize,
    pub progress_reports: usize,
    pub average_detail_time: f64, // in milliseconds
}

#[derive(Debug, Clone)]
pub struct StatsTracker {
    stats: Arc<RwLock<ScrapingStats>>,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self {
            stats: Arc::new(RwLock::new(ScrapingStats {
                start_time: Utc::now(),
                end_time: None,
                pages_fetched: 0,
                products_listed: 0,
                records_built: 0,
                products_failed: 0,
                detail_timeouts: 0,
                lost_tasks: 0,
                progress_reports: 0,
                average_detail_time: 0.0,
            })),
        }
    }

    pub fn record_page(&self, products: usize) {
        let mut stats = self.stats.write();
        stats.pages_fetched += 1;
        stats.products_listed += products;
    }

    pub fn record_detail(&self, success: bool, duration: Duration) {
        let mut stats = self.stats.write();
        if success {
            stats.records_built += 1;
        } else {
            stats.products_failed += 1;
        }

        let completed = stats.records_built + stats.products_failed;
        let current_total = stats.average_detail_time * (completed - 1) as f64;
        let new_duration = duration.num_milliseconds() as f64;
        stats.average_detail_time = (current_total + new_duration) / completed as f64;
    }

    pub fn record_timeout(&self) {
        self.stats.write().detail_timeouts += 1;
    }

    /// A worker that panicked before reporting its product.
    pub fn record_lost_task(&self) {
        self.stats.write().lost_tasks += 1;
    }

    pub fn record_progress(&self) {
        self.stats.write().progress_reports += 1;
    }

    pub fn finish(&self) {
        self.stats.write().end_time = Some(Utc::now());
    }

    pub fn get_stats(&self) -> ScrapingStats {
        self.stats.read().clone()
    }

    pub fn print_summary(&self) {
        let stats = self.stats.read();
        let duration = stats
            .end_time
            .unwrap_or_else(Utc::now)
            .signed_duration_since(stats.start_time);

        println!("\nScraping Statistics:");
        println!("===================");
        println!("Duration: {} seconds", duration.num_seconds());
        println!("Listing Pages: {}", stats.pages_fetched);
        println!("Products Listed: {}", stats.products_listed);
        println!("Records Built: {}", stats.records_built);
        println!("Products Failed: {}", stats.products_failed);
        println!("Readiness Timeouts: {}", stats.detail_timeouts);
        println!("Lost Worker Tasks: {}", stats.lost_tasks);
        println!(
            "Average Detail Time: {:.2}ms",
            stats.average_detail_time
        );
    }
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_average() {
        let stats = StatsTracker::new();
        stats.record_detail(true, Duration::milliseconds(100));
        stats.record_detail(false, Duration::milliseconds(300));
        stats.record_timeout();
        stats.record_page(2);

        let snapshot = stats.get_stats();
        assert_eq!(snapshot.records_built, 1);
        assert_eq!(snapshot.products_failed, 1);
        assert_eq!(snapshot.detail_timeouts, 1);
        assert_eq!(snapshot.products_listed, 2);
        assert!((snapshot.average_detail_time - 200.0).abs() < f64::EPSILON);
    }
}

use log::info;
use serde::Serialize;
use std::fmt::Write;

use crate::http::{ListingRequest, ListingSource};
use crate::ScraperResult;

/// Catalog labels, one per leading letter.
pub const LABELS: std::ops::RangeInclusive<char> = 'a'..='z';

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: char,
    pub total_count: u64,
    pub pages: u64,
}

pub fn page_count(total_count: u64, page_size: u32) -> u64 {
    total_count.div_ceil(u64::from(page_size.max(1)))
}

/// Asks the listing for one product per label and derives how many pages of
/// `page_size` each label spans.
pub async fn category_report(
    source: &dyn ListingSource,
    labels: impl IntoIterator<Item = char>,
    page_size: u32,
) -> ScraperResult<Vec<LabelCount>> {
    let mut counts = Vec::new();
    for label in labels {
        let request = ListingRequest::new(label.to_string(), 1, 1);
        let listing = source.fetch_listing(&request).await?;
        let total_count = listing.meta.total_count;
        info!("Label '{}' has {} products", label, total_count);

        counts.push(LabelCount {
            label,
            total_count,
            pages: page_count(total_count, page_size),
        });
    }
    Ok(counts)
}

pub fn render_table(counts: &[LabelCount]) -> String {
    let mut table = String::from("Label | Count | Pages\n");
    table.push_str("------|-------|------\n");
    for count in counts {
        let _ = writeln!(
            table,
            "{:<5} | {:<5} | {}",
            count.label, count.total_count, count.pages
        );
    }
    table
}

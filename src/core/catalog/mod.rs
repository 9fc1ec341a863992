pub mod report;
mod walker;

pub use report::{category_report, page_count, render_table, LabelCount, LABELS};
pub use walker::{CatalogWalker, WalkState};

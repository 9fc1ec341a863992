pub mod extractors;
pub mod layout;
pub mod record;

#[cfg(test)]
pub(crate) mod fixtures;

pub use extractors::FieldExtractor;
pub use layout::{CompiledLayout, PageLayout};
pub use record::{ExtractedRecord, RecordBuilder, FIELD_NAMES, NOT_AVAILABLE};

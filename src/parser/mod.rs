pub mod base;
pub mod html;
pub mod patterns;

pub use html::{
    CompiledLayout, ExtractedRecord, FieldExtractor, PageLayout, RecordBuilder, FIELD_NAMES,
};

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::config::PageRange;
use crate::parser::ExtractedRecord;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage operation failed: {0}")]
    OperationError(String),

    #[error("Serialization failed: {0}")]
    SerializationError(String),
}

impl From<std::io::Error> for StorageError {
    fn from(error: std::io::Error) -> Self {
        StorageError::OperationError(error.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(error: serde_json::Error) -> Self {
        StorageError::SerializationError(error.to_string())
    }
}

impl From<csv::Error> for StorageError {
    fn from(error: csv::Error) -> Self {
        StorageError::SerializationError(error.to_string())
    }
}

/// Which walk a result file belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub label: String,
    pub from_page: u32,
    pub to_page: u32,
}

impl OutputTarget {
    pub fn from_range(range: &PageRange) -> Self {
        Self {
            label: range.label().to_string(),
            from_page: range.from_page(),
            to_page: range.to_page(),
        }
    }

    pub fn file_stem(&self) -> String {
        format!("{}_{}", self.from_page, self.to_page)
    }
}

#[async_trait]
pub trait StorageBackend: Send + Sync {
    fn extension(&self) -> &'static str;

    fn base_path(&self) -> &Path;

    /// `{base}/{label}/{from}_{to}.{ext}`
    fn output_path(&self, target: &OutputTarget) -> PathBuf {
        self.base_path()
            .join(&target.label)
            .join(format!("{}.{}", target.file_stem(), self.extension()))
    }

    /// Creates the label directory, returning the file that will be written.
    async fn setup(&self, target: &OutputTarget) -> Result<PathBuf, StorageError> {
        let path = self.output_path(target);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(path)
    }

    async fn store_records(
        &self,
        target: &OutputTarget,
        records: &[ExtractedRecord],
    ) -> Result<PathBuf, StorageError>;
}

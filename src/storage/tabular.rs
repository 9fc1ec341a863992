use async_trait::async_trait;
use log::info;
use std::path::{Path, PathBuf};

use super::base::{OutputTarget, StorageBackend, StorageError};
use crate::parser::{ExtractedRecord, FIELD_NAMES};

/// Writes one row per record under a fixed header, in column order.
#[derive(Clone, Debug)]
pub struct CsvStorage {
    base_path: PathBuf,
}

impl CsvStorage {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn encode(records: &[ExtractedRecord]) -> Result<Vec<u8>, StorageError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(FIELD_NAMES)?;
        for record in records {
            writer.write_record(record.values())?;
        }
        writer
            .into_inner()
            .map_err(|e| StorageError::SerializationError(e.to_string()))
    }
}

#[async_trait]
impl StorageBackend for CsvStorage {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn base_path(&self) -> &Path {
        &self.base_path
    }

    async fn store_records(
        &self,
        target: &OutputTarget,
        records: &[ExtractedRecord],
    ) -> Result<PathBuf, StorageError> {
        let path = self.setup(target).await?;
        let bytes = Self::encode(records)?;
        tokio::fs::write(&path, bytes).await?;
        info!("Wrote {} records to {}", records.len(), path.display());
        Ok(path)
    }
}

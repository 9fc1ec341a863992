use anyhow::Error;
use async_trait::async_trait;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use super::base::{OutputTarget, StorageBackend, StorageError};
use crate::parser::ExtractedRecord;

/// Stores a walk as a pretty-printed JSON array.
#[derive(Clone, Debug)]
pub struct DiskStorage {
    base_path: PathBuf,
}

impl DiskStorage {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Result<Self, Error> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }
}

#[async_trait]
impl StorageBackend for DiskStorage {
    fn extension(&self) -> &'static str {
        "json"
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
        let json = serde_json::to_string_pretty(records)?;
        tokio::fs::write(&path, json).await?;
        info!("Wrote {} records to {}", records.len(), path.display());
        Ok(path)
    }
}

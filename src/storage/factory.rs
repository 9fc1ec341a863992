use anyhow::Error;
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};

use super::base::{OutputTarget, StorageBackend, StorageError};
use super::{CsvStorage, DiskStorage};
use crate::parser::ExtractedRecord;

pub enum StorageType {
    Csv { path: String },
    Json { path: String },
}

#[derive(Clone, Debug)]
pub enum Storage {
    Csv(Box<CsvStorage>),
    Json(Box<DiskStorage>),
}

#[async_trait]
impl StorageBackend for Storage {
    fn extension(&self) -> &'static str {
        match self {
            Storage::Csv(storage) => storage.extension(),
            Storage::Json(storage) => storage.extension(),
        }
    }

    fn base_path(&self) -> &Path {
        match self {
            Storage::Csv(storage) => storage.base_path(),
            Storage::Json(storage) => storage.base_path(),
        }
    }

    async fn store_records(
        &self,
        target: &OutputTarget,
        records: &[ExtractedRecord],
    ) -> Result<PathBuf, StorageError> {
        match self {
            Storage::Csv(storage) => storage.store_records(target, records).await,
            Storage::Json(storage) => storage.store_records(target, records).await,
        }
    }
}

pub async fn create_storage(storage_type: StorageType) -> Result<Storage, Error> {
    match storage_type {
        StorageType::Csv { path } => {
            fs::create_dir_all(&path)?;
            Ok(Storage::Csv(Box::new(CsvStorage::new(path))))
        }
        StorageType::Json { path } => Ok(Storage::Json(Box::new(DiskStorage::new(path)?))),
    }
}

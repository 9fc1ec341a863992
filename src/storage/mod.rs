pub mod base;
pub mod disk;
pub mod factory;
pub mod tabular;

pub use base::{OutputTarget, StorageBackend, StorageError};
pub use disk::DiskStorage;
pub use factory::{create_storage, Storage, StorageType};
pub use tabular::CsvStorage;

//! Configuration loading and representation.

use std::path::PathBuf;

use crate::store::JsonFileStore;

/// File the inventory is kept in when nothing else is configured.
pub const DEFAULT_DATA_FILE: &str = "dados_estoque.json";

/// Where and how the inventory is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_file: PathBuf,
}

impl StoreConfig {
    pub fn new(data_file: impl Into<PathBuf>) -> Self {
        Self {
            data_file: data_file.into(),
        }
    }

    pub fn open(&self) -> JsonFileStore {
        JsonFileStore::new(&self.data_file)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_FILE)
    }
}

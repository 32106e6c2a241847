use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use stockroom_inventory::Inventory;
use tempfile::NamedTempFile;

use super::{InventoryStore, Loaded, StoreError, codec};

/// Inventory persisted as one JSON document on the local filesystem.
///
/// Saves go to a temporary sibling file that is renamed over the target, so
/// a failed save never leaves a half-written document behind.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }
}

impl InventoryStore for JsonFileStore {
    fn load(&self) -> Result<Loaded, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no inventory file, starting empty");
                return Ok(Loaded::fresh());
            }
            Err(err) => return Err(StoreError::io(&self.path, err)),
        };

        match codec::decode(&bytes) {
            Ok(inventory) => {
                tracing::info!(
                    path = %self.path.display(),
                    products = inventory.len(),
                    movements = inventory.movements().len(),
                    "inventory loaded"
                );
                Ok(Loaded {
                    inventory,
                    warning: None,
                })
            }
            Err(warning) => {
                tracing::warn!(path = %self.path.display(), %warning, "discarding inventory file");
                Ok(Loaded::discarded(warning))
            }
        }
    }

    fn save(&self, inventory: &Inventory) -> Result<(), StoreError> {
        let bytes = codec::encode(inventory)?;

        let dir = self.parent_dir();
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
        tmp.write_all(&bytes)
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.as_file()
            .sync_all()
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::io(&self.path, e.error))?;

        tracing::info!(
            path = %self.path.display(),
            products = inventory.len(),
            movements = inventory.movements().len(),
            "inventory saved"
        );
        Ok(())
    }
}

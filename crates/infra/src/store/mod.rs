//! Persistence gateway for the inventory ledger.
//!
//! A store loads the whole [`Inventory`] at startup and overwrites the whole
//! state on every save. A missing store yields an empty inventory; a corrupt
//! one yields an empty inventory plus a [`LoadWarning`].

pub mod codec;
pub mod in_memory;
pub mod json_file;

pub use in_memory::InMemoryStore;
pub use json_file::JsonFileStore;

use std::path::PathBuf;

use stockroom_inventory::Inventory;
use thiserror::Error;

/// Whole-state inventory persistence.
pub trait InventoryStore {
    /// Load the persisted inventory, falling back to an empty one when
    /// nothing usable is stored.
    fn load(&self) -> Result<Loaded, StoreError>;

    /// Replace the persisted state with `inventory`.
    ///
    /// On error the previously persisted state is left as it was.
    fn save(&self, inventory: &Inventory) -> Result<(), StoreError>;
}

/// Outcome of [`InventoryStore::load`].
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub inventory: Inventory,
    /// Set when stored data was discarded.
    pub warning: Option<LoadWarning>,
}

impl Loaded {
    pub fn fresh() -> Self {
        Self {
            inventory: Inventory::new(),
            warning: None,
        }
    }

    pub fn discarded(warning: LoadWarning) -> Self {
        Self {
            inventory: Inventory::new(),
            warning: Some(warning),
        }
    }
}

/// Non-fatal problem found while loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadWarning {
    #[error("stored inventory is corrupt ({reason}); starting with an empty inventory")]
    Corrupt { reason: String },
}

/// Persistence failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode inventory: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

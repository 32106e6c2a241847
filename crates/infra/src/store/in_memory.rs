use std::sync::RwLock;

use stockroom_inventory::Inventory;

use super::{InventoryStore, Loaded, StoreError, codec};

/// In-memory inventory store.
///
/// Keeps the last saved document as bytes so loads go through the same codec
/// as the file store. Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    document: RwLock<Option<Vec<u8>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already-stored document (possibly malformed).
    pub fn with_document(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            document: RwLock::new(Some(bytes.into())),
        }
    }

    /// The last saved document, if any.
    pub fn document(&self) -> Option<Vec<u8>> {
        self.document
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl InventoryStore for InMemoryStore {
    fn load(&self) -> Result<Loaded, StoreError> {
        let guard = self
            .document
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let Some(bytes) = guard.as_deref() else {
            return Ok(Loaded::fresh());
        };

        Ok(match codec::decode(bytes) {
            Ok(inventory) => Loaded {
                inventory,
                warning: None,
            },
            Err(warning) => Loaded::discarded(warning),
        })
    }

    fn save(&self, inventory: &Inventory) -> Result<(), StoreError> {
        let bytes = codec::encode(inventory)?;
        *self
            .document
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(bytes);
        Ok(())
    }
}

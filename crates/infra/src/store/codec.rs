//! JSON encoding of the whole inventory.

use stockroom_inventory::{Inventory, InventorySnapshot};

use super::LoadWarning;

/// Pretty-printed UTF-8 JSON of the current state.
pub fn encode(inventory: &Inventory) -> Result<Vec<u8>, serde_json::Error> {
    let mut bytes = serde_json::to_vec_pretty(&inventory.to_snapshot())?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Parse stored bytes. Anything that is not a valid inventory is reported as
/// corrupt; the caller decides what to fall back to.
pub fn decode(bytes: &[u8]) -> Result<Inventory, LoadWarning> {
    let snapshot: InventorySnapshot =
        serde_json::from_slice(bytes).map_err(|e| LoadWarning::Corrupt {
            reason: e.to_string(),
        })?;

    Inventory::from_snapshot(snapshot).map_err(|e| LoadWarning::Corrupt {
        reason: e.to_string(),
    })
}

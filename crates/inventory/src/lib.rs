//! Inventory ledger.
//!
//! Products with bounded quantities, the append-only movement log, derived
//! reports, and the persisted snapshot shape. Pure domain logic: no IO.

pub mod inventory;
pub mod movement;
pub mod product;
pub mod report;
pub mod snapshot;

pub use inventory::Inventory;
pub use movement::{Movement, MovementKind};
pub use product::{DEFAULT_MAX_CAPACITY, NewProduct, Product};
pub use report::{MovementReport, MovementRow, Occupancy, StockRow};
pub use snapshot::{InventorySnapshot, MovementRecord, ProductRecord, ProductTable};

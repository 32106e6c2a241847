//! Read-only views derived from an [`Inventory`](crate::Inventory).
//!
//! Rows carry display-ready values (percentages computed, timestamps
//! formatted); laying them out as text is left to the caller.

use serde::Serialize;

use stockroom_core::MovementId;

use crate::movement::MovementKind;

/// One line of the stock report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockRow {
    pub code: String,
    pub name: String,
    pub quantity: i64,
    pub occupancy_percent: f64,
    pub max_capacity: i64,
}

/// One line of the movement history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovementRow {
    pub movement_id: MovementId,
    /// Local time, `dd-mm-YYYY HH:MM:SS`.
    pub timestamp: String,
    pub product_code: String,
    pub kind: MovementKind,
    pub quantity: i64,
    pub reason: String,
}

/// Result of a movement history query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MovementReport {
    /// The filter named a product that is not registered. Nothing to show.
    UnknownProduct { code: String },
    /// Matching movements, most recent first.
    Entries {
        /// Name of the product filtered on, if a filter was given.
        product_name: Option<String>,
        rows: Vec<MovementRow>,
    },
}

impl MovementReport {
    pub fn rows(&self) -> &[MovementRow] {
        match self {
            MovementReport::UnknownProduct { .. } => &[],
            MovementReport::Entries { rows, .. } => rows,
        }
    }

    pub fn is_unknown_product(&self) -> bool {
        matches!(self, MovementReport::UnknownProduct { .. })
    }
}

/// Warehouse-wide fill level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Occupancy {
    pub total_stored: i64,
    pub total_capacity: i64,
    /// `0.0` when there is no capacity at all.
    pub occupancy_percent: f64,
}

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, MovementId, Timestamp};

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementKind {
    #[serde(rename = "entrada")]
    Entry,
    #[serde(rename = "saida")]
    Exit,
}

impl MovementKind {
    /// Persisted spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            MovementKind::Entry => "entrada",
            MovementKind::Exit => "saida",
        }
    }

    /// Capitalised label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            MovementKind::Entry => "Entry",
            MovementKind::Exit => "Exit",
        }
    }

    /// Signed stock change for an unsigned amount moved in this direction.
    pub fn signed(self, quantity: i64) -> i64 {
        match self {
            MovementKind::Entry => quantity,
            MovementKind::Exit => -quantity,
        }
    }
}

impl core::fmt::Display for MovementKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MovementKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "entrada" | "entry" => Ok(MovementKind::Entry),
            "saida" | "exit" => Ok(MovementKind::Exit),
            other => Err(DomainError::validation(format!(
                "movement kind must be 'entrada' or 'saida', got '{other}'"
            ))),
        }
    }
}

/// One immutable entry/exit event in the movement log.
///
/// `quantity` is the unsigned amount the user moved; the direction lives in
/// `kind`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movement {
    id: MovementId,
    product_code: String,
    kind: MovementKind,
    quantity: i64,
    reason: String,
    timestamp: Timestamp,
}

impl Movement {
    /// Build a new movement with a fresh id and the current time.
    ///
    /// Does not touch any product balance.
    pub fn create(
        product_code: impl Into<String>,
        kind: MovementKind,
        quantity: i64,
        reason: impl Into<String>,
    ) -> DomainResult<Self> {
        Self::from_parts(
            MovementId::generate(),
            product_code.into(),
            kind,
            quantity,
            reason.into(),
            Timestamp::now(),
        )
    }

    /// Rebuild a persisted movement verbatim (same id, same timestamp).
    pub(crate) fn from_parts(
        id: MovementId,
        product_code: String,
        kind: MovementKind,
        quantity: i64,
        reason: String,
        timestamp: Timestamp,
    ) -> DomainResult<Self> {
        if quantity <= 0 {
            return Err(DomainError::validation("movement quantity must be positive"));
        }

        Ok(Self {
            id,
            product_code,
            kind,
            quantity,
            reason,
            timestamp,
        })
    }

    pub fn movement_id(&self) -> MovementId {
        self.id
    }

    pub fn product_code(&self) -> &str {
        &self.product_code
    }

    pub fn kind(&self) -> MovementKind {
        self.kind
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    /// Stock change this movement stands for.
    pub fn signed_delta(&self) -> i64 {
        self.kind.signed(self.quantity)
    }
}

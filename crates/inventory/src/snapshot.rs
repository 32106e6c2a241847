//! Persisted shape of an [`Inventory`].
//!
//! Field names are the on-disk contract and are mapped field by field from
//! the domain types, so internal representation changes never leak into
//! stored files:
//!
//! ```text
//! {
//!   "products":  { "<codigo>": { "codigo", "nome", "descricao", "quantidade",
//!                                "estoque_maximo", "data_criacao", "ultima_atualizacao" } },
//!   "movements": [ { "id_movimentacao", "codigo_produto", "tipo", "quantidade",
//!                    "motivo", "data_movimentacao" } ]
//! }
//! ```

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use stockroom_core::{DomainError, DomainResult, MovementId, Timestamp};

use crate::inventory::Inventory;
use crate::movement::{Movement, MovementKind};
use crate::product::Product;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
    #[serde(rename = "quantidade")]
    pub quantity: i64,
    #[serde(rename = "estoque_maximo")]
    pub max_capacity: i64,
    #[serde(rename = "data_criacao")]
    pub created_at: Timestamp,
    #[serde(rename = "ultima_atualizacao")]
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementRecord {
    #[serde(rename = "id_movimentacao")]
    pub id: MovementId,
    #[serde(rename = "codigo_produto")]
    pub product_code: String,
    #[serde(rename = "tipo")]
    pub kind: MovementKind,
    #[serde(rename = "quantidade")]
    pub quantity: i64,
    #[serde(rename = "motivo", default)]
    pub reason: String,
    #[serde(rename = "data_movimentacao")]
    pub timestamp: Timestamp,
}

/// Products keyed by code, kept in document order in both directions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductTable(pub Vec<(String, ProductRecord)>);

impl Serialize for ProductTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (code, record) in &self.0 {
            map.serialize_entry(code, record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ProductTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = ProductTable;

            fn expecting(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str("a map of product code to product")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0).min(1024));
                while let Some(entry) = access.next_entry::<String, ProductRecord>()? {
                    entries.push(entry);
                }
                Ok(ProductTable(entries))
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    #[serde(alias = "produtos", default)]
    pub products: ProductTable,
    #[serde(alias = "historico_movimentacoes", default)]
    pub movements: Vec<MovementRecord>,
}

impl From<&Product> for ProductRecord {
    fn from(p: &Product) -> Self {
        Self {
            code: p.code().to_string(),
            name: p.name().to_string(),
            description: p.description().to_string(),
            quantity: p.quantity(),
            max_capacity: p.max_capacity(),
            created_at: p.created_at().clone(),
            updated_at: p.updated_at().clone(),
        }
    }
}

impl TryFrom<ProductRecord> for Product {
    type Error = DomainError;

    fn try_from(r: ProductRecord) -> DomainResult<Self> {
        Product::from_parts(
            r.code,
            r.name,
            r.description,
            r.quantity,
            r.max_capacity,
            r.created_at,
            r.updated_at,
        )
    }
}

impl From<&Movement> for MovementRecord {
    fn from(m: &Movement) -> Self {
        Self {
            id: m.movement_id(),
            product_code: m.product_code().to_string(),
            kind: m.kind(),
            quantity: m.quantity(),
            reason: m.reason().to_string(),
            timestamp: m.timestamp().clone(),
        }
    }
}

impl TryFrom<MovementRecord> for Movement {
    type Error = DomainError;

    fn try_from(r: MovementRecord) -> DomainResult<Self> {
        Movement::from_parts(r.id, r.product_code, r.kind, r.quantity, r.reason, r.timestamp)
    }
}

impl Inventory {
    pub fn to_snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            products: ProductTable(
                self.products()
                    .map(|p| (p.code().to_string(), ProductRecord::from(p)))
                    .collect(),
            ),
            movements: self.movements().iter().map(MovementRecord::from).collect(),
        }
    }

    /// Rebuild an inventory from persisted records, restoring ids and
    /// timestamps verbatim and re-checking every invariant.
    pub fn from_snapshot(snapshot: InventorySnapshot) -> DomainResult<Self> {
        let mut inventory = Inventory::new();

        for (key, record) in snapshot.products.0 {
            if key != record.code {
                return Err(DomainError::validation(format!(
                    "product stored under '{key}' has code '{}'",
                    record.code
                )));
            }
            inventory.insert_product(Product::try_from(record)?)?;
        }

        for record in snapshot.movements {
            inventory.restore_movement(Movement::try_from(record)?)?;
        }

        Ok(inventory)
    }
}

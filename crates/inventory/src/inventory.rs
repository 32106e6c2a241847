use std::collections::HashMap;

use stockroom_core::{DomainError, DomainResult};

use crate::movement::{Movement, MovementKind};
use crate::product::Product;
use crate::report::{MovementReport, MovementRow, Occupancy, StockRow};

/// The stock ledger: registered products plus the append-only movement log.
///
/// Invariants:
/// - product codes are unique;
/// - products iterate in registration order;
/// - every movement references a registered product;
/// - the log only grows, in creation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    products: Vec<Product>,
    index: HashMap<String, usize>,
    movements: Vec<Movement>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products in registration order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// The movement log in creation order.
    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    pub fn get_product(&self, code: &str) -> Option<&Product> {
        self.index.get(code).map(|&idx| &self.products[idx])
    }

    pub fn add_product(&mut self, product: Product) -> DomainResult<()> {
        self.insert_product(product)?;
        if let Some(p) = self.products.last() {
            tracing::info!(code = p.code(), name = p.name(), "product added");
        }
        Ok(())
    }

    pub(crate) fn insert_product(&mut self, product: Product) -> DomainResult<()> {
        if self.contains(product.code()) {
            return Err(DomainError::duplicate_product(product.code()));
        }

        self.index.insert(product.code().to_string(), self.products.len());
        self.products.push(product);
        Ok(())
    }

    /// Record an entry or exit against a product.
    ///
    /// Either the balance changes and exactly one movement is appended, or
    /// nothing changes and the error is returned.
    pub fn record_movement(
        &mut self,
        product_code: &str,
        kind: MovementKind,
        quantity: i64,
        reason: impl Into<String>,
    ) -> DomainResult<&Movement> {
        let idx = *self
            .index
            .get(product_code)
            .ok_or_else(|| DomainError::product_not_found(product_code))?;

        let movement = Movement::create(product_code, kind, quantity, reason)?;
        self.products[idx].adjust_quantity(movement.signed_delta())?;

        tracing::info!(
            code = product_code,
            kind = kind.as_str(),
            quantity,
            balance = self.products[idx].quantity(),
            "movement recorded"
        );

        let pos = self.movements.len();
        self.movements.push(movement);
        Ok(&self.movements[pos])
    }

    pub fn stock_report(&self) -> Vec<StockRow> {
        self.products
            .iter()
            .map(|p| StockRow {
                code: p.code().to_string(),
                name: p.name().to_string(),
                quantity: p.quantity(),
                occupancy_percent: p.occupancy_percent(),
                max_capacity: p.max_capacity(),
            })
            .collect()
    }

    /// Movement history, most recent first, optionally for one product.
    ///
    /// Equal timestamps keep log order. An unknown product yields
    /// [`MovementReport::UnknownProduct`] rather than an error.
    pub fn movement_report(&self, product_code: Option<&str>) -> MovementReport {
        let product_name = match product_code {
            Some(code) => match self.get_product(code) {
                Some(product) => Some(product.name().to_string()),
                None => {
                    return MovementReport::UnknownProduct {
                        code: code.to_string(),
                    };
                }
            },
            None => None,
        };

        let mut selected: Vec<&Movement> = self
            .movements
            .iter()
            .filter(|m| product_code.is_none_or(|code| m.product_code() == code))
            .collect();
        // `sort_by` is stable, so ties stay in append order.
        selected.sort_by(|a, b| b.timestamp().instant().cmp(&a.timestamp().instant()));

        let rows = selected
            .into_iter()
            .map(|m| MovementRow {
                movement_id: m.movement_id(),
                timestamp: m.timestamp().display(),
                product_code: m.product_code().to_string(),
                kind: m.kind(),
                quantity: m.quantity(),
                reason: m.reason().to_string(),
            })
            .collect();

        MovementReport::Entries { product_name, rows }
    }

    pub fn total_occupancy(&self) -> Occupancy {
        let (total_stored, total_capacity) =
            self.products.iter().fold((0i64, 0i64), |(stored, capacity), p| {
                (
                    stored.saturating_add(p.quantity()),
                    capacity.saturating_add(p.max_capacity()),
                )
            });

        let occupancy_percent = if total_capacity > 0 {
            total_stored as f64 / total_capacity as f64 * 100.0
        } else {
            0.0
        };

        Occupancy {
            total_stored,
            total_capacity,
            occupancy_percent,
        }
    }

    /// Append a movement that already exists (restored from storage).
    pub(crate) fn restore_movement(&mut self, movement: Movement) -> DomainResult<()> {
        if !self.contains(movement.product_code()) {
            return Err(DomainError::product_not_found(movement.product_code()));
        }
        self.movements.push(movement);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::NewProduct;
    use crate::snapshot::MovementRecord;
    use proptest::prelude::*;
    use stockroom_core::{MovementId, Timestamp};

    fn product(code: &str, name: &str, max_capacity: i64) -> Product {
        Product::create(NewProduct::new(code, name).max_capacity(max_capacity)).unwrap()
    }

    fn widget_inventory() -> Inventory {
        let mut inv = Inventory::new();
        inv.add_product(product("P1", "Widget", 10)).unwrap();
        inv
    }

    #[test]
    fn exit_beyond_stock_is_rejected_and_balance_kept() {
        let mut inv = widget_inventory();
        inv.record_movement("P1", MovementKind::Entry, 5, "").unwrap();
        assert_eq!(inv.get_product("P1").unwrap().quantity(), 5);

        let err = inv.record_movement("P1", MovementKind::Exit, 7, "").unwrap_err();
        assert!(matches!(err, DomainError::InsufficientStock { requested: 7, .. }));
        assert_eq!(inv.get_product("P1").unwrap().quantity(), 5);
        assert_eq!(inv.movements().len(), 1);
    }

    #[test]
    fn entry_beyond_ceiling_is_rejected_and_balance_kept() {
        let mut inv = widget_inventory();
        inv.record_movement("P1", MovementKind::Entry, 5, "").unwrap();

        let err = inv.record_movement("P1", MovementKind::Entry, 6, "").unwrap_err();
        assert!(matches!(err, DomainError::CapacityExceeded { max_capacity: 10, .. }));
        assert_eq!(inv.get_product("P1").unwrap().quantity(), 5);
        assert_eq!(inv.movements().len(), 1);
    }

    #[test]
    fn duplicate_code_is_rejected() {
        let mut inv = widget_inventory();
        let err = inv.add_product(product("P1", "Other", 20)).unwrap_err();
        assert_eq!(err, DomainError::duplicate_product("P1"));
        assert_eq!(inv.len(), 1);
        assert_eq!(inv.get_product("P1").unwrap().name(), "Widget");
    }

    #[test]
    fn movement_on_unknown_product_is_not_found() {
        let mut inv = widget_inventory();
        let err = inv.record_movement("NOPE", MovementKind::Entry, 1, "").unwrap_err();
        assert_eq!(err, DomainError::product_not_found("NOPE"));
        assert!(inv.movements().is_empty());
    }

    #[test]
    fn invalid_quantity_records_nothing() {
        let mut inv = widget_inventory();
        inv.record_movement("P1", MovementKind::Entry, 3, "").unwrap();
        let before = inv.clone();

        let err = inv.record_movement("P1", MovementKind::Exit, 0, "").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(inv, before);
    }

    #[test]
    fn log_stores_unsigned_quantity_and_kind() {
        let mut inv = widget_inventory();
        inv.record_movement("P1", MovementKind::Entry, 8, "purchase").unwrap();
        let exit = inv
            .record_movement("P1", MovementKind::Exit, 3, "sale")
            .unwrap()
            .clone();

        assert_eq!(exit.kind(), MovementKind::Exit);
        assert_eq!(exit.quantity(), 3);
        assert_eq!(exit.reason(), "sale");
        assert_eq!(inv.get_product("P1").unwrap().quantity(), 5);
    }

    #[test]
    fn get_product_misses_are_none() {
        let inv = widget_inventory();
        assert!(inv.get_product("P2").is_none());
    }

    #[test]
    fn stock_report_follows_registration_order() {
        let mut inv = Inventory::new();
        inv.add_product(product("Z9", "Zeta", 4)).unwrap();
        inv.add_product(product("A1", "Alpha", 10)).unwrap();
        inv.record_movement("Z9", MovementKind::Entry, 1, "").unwrap();

        let report = inv.stock_report();
        let codes: Vec<&str> = report.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["Z9", "A1"]);
        assert_eq!(report[0].quantity, 1);
        assert!((report[0].occupancy_percent - 25.0).abs() < f64::EPSILON);
        assert_eq!(report[1].max_capacity, 10);
    }

    #[test]
    fn empty_inventory_reports_are_defined() {
        let inv = Inventory::new();
        assert!(inv.stock_report().is_empty());
        assert_eq!(
            inv.movement_report(None),
            MovementReport::Entries {
                product_name: None,
                rows: vec![],
            }
        );

        let occupancy = inv.total_occupancy();
        assert_eq!(occupancy.total_stored, 0);
        assert_eq!(occupancy.total_capacity, 0);
        assert_eq!(occupancy.occupancy_percent, 0.0);
    }

    #[test]
    fn total_occupancy_sums_all_products() {
        let mut inv = Inventory::new();
        inv.add_product(product("A", "A", 10)).unwrap();
        inv.add_product(product("B", "B", 30)).unwrap();
        inv.record_movement("A", MovementKind::Entry, 4, "").unwrap();
        inv.record_movement("B", MovementKind::Entry, 6, "").unwrap();

        let occupancy = inv.total_occupancy();
        assert_eq!(occupancy.total_stored, 10);
        assert_eq!(occupancy.total_capacity, 40);
        assert!((occupancy.occupancy_percent - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn movement_report_for_unknown_product_is_benign() {
        let mut inv = widget_inventory();
        inv.record_movement("P1", MovementKind::Entry, 2, "").unwrap();
        let before = inv.clone();

        let report = inv.movement_report(Some("UNKNOWN"));
        assert!(report.is_unknown_product());
        assert!(report.rows().is_empty());
        assert_eq!(inv, before);
    }

    #[test]
    fn movement_report_filters_by_product() {
        let mut inv = widget_inventory();
        inv.add_product(product("P2", "Gadget", 10)).unwrap();
        inv.record_movement("P1", MovementKind::Entry, 2, "").unwrap();
        inv.record_movement("P2", MovementKind::Entry, 3, "").unwrap();
        inv.record_movement("P1", MovementKind::Exit, 1, "").unwrap();

        let report = inv.movement_report(Some("P1"));
        let MovementReport::Entries { product_name, rows } = report else {
            panic!("expected entries for a known product");
        };
        assert_eq!(product_name.as_deref(), Some("Widget"));
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.product_code == "P1"));
    }

    /// Ledger with one product and a movement per timestamp, in the given order.
    fn ledger_with_stamps(stamps: &[&str]) -> (Inventory, Vec<MovementId>) {
        let mut snapshot = widget_inventory().to_snapshot();
        let ids: Vec<MovementId> = stamps.iter().map(|_| MovementId::generate()).collect();
        snapshot.movements = stamps
            .iter()
            .zip(&ids)
            .map(|(stamp, id)| MovementRecord {
                id: *id,
                product_code: "P1".to_string(),
                kind: MovementKind::Entry,
                quantity: 1,
                reason: String::new(),
                timestamp: Timestamp::parse(*stamp).unwrap(),
            })
            .collect();
        (Inventory::from_snapshot(snapshot).unwrap(), ids)
    }

    #[test]
    fn movement_report_is_most_recent_first_and_ties_keep_log_order() {
        let (inv, ids) = ledger_with_stamps(&[
            "2024-05-01T10:00:00Z",
            "2024-05-01T12:00:00Z",
            "2024-05-01T10:00:00Z",
            "2024-05-01T12:00:00Z",
            "2024-05-01T09:00:00Z",
            "2024-05-01T10:00:00Z",
        ]);

        let got: Vec<MovementId> = inv.movement_report(None).rows().iter().map(|r| r.movement_id).collect();
        assert_eq!(got, vec![ids[1], ids[3], ids[0], ids[2], ids[5], ids[4]]);

        let filtered: Vec<MovementId> = inv
            .movement_report(Some("P1"))
            .rows()
            .iter()
            .map(|r| r.movement_id)
            .collect();
        assert_eq!(filtered, got);
    }

    #[test]
    fn movement_report_orders_by_instant_across_offsets() {
        let (inv, ids) = ledger_with_stamps(&["2024-05-01T11:00:00+02:00", "2024-05-01T10:00:00Z"]);

        let got: Vec<MovementId> = inv.movement_report(None).rows().iter().map(|r| r.movement_id).collect();
        assert_eq!(got, vec![ids[1], ids[0]]);
    }

    #[test]
    fn movement_rows_use_display_format() {
        let mut inv = widget_inventory();
        inv.record_movement("P1", MovementKind::Entry, 1, "").unwrap();
        let rows = inv.movement_report(None).rows().to_vec();
        assert_eq!(rows[0].timestamp.len(), "01-05-2024 10:15:30".len());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: each record_movement either moves the balance and appends one
        /// movement, or leaves the whole inventory untouched.
        #[test]
        fn record_movement_is_atomic(
            ops in prop::collection::vec((any::<bool>(), -5i64..25), 1..40)
        ) {
            let mut inv = widget_inventory();

            for (is_entry, quantity) in ops {
                let kind = if is_entry { MovementKind::Entry } else { MovementKind::Exit };
                let before = inv.clone();
                let balance = before.get_product("P1").unwrap().quantity();

                match inv.record_movement("P1", kind, quantity, "") {
                    Ok(_) => {
                        prop_assert_eq!(inv.movements().len(), before.movements().len() + 1);
                        prop_assert_eq!(
                            inv.get_product("P1").unwrap().quantity(),
                            balance + kind.signed(quantity)
                        );
                    }
                    Err(_) => prop_assert_eq!(&inv, &before),
                }
            }
        }

        /// Property: the history is sorted newest first and ties keep append order.
        #[test]
        fn movement_report_order_is_stable(slots in prop::collection::vec(0u32..4, 1..30)) {
            let stamps: Vec<String> = slots
                .iter()
                .map(|s| format!("2024-05-01T10:00:0{s}Z"))
                .collect();
            let stamp_refs: Vec<&str> = stamps.iter().map(String::as_str).collect();
            let (inv, ids) = ledger_with_stamps(&stamp_refs);

            let position: HashMap<MovementId, usize> =
                ids.iter().enumerate().map(|(i, id)| (*id, i)).collect();

            let rows = inv.movement_report(None).rows().to_vec();
            prop_assert_eq!(rows.len(), slots.len());
            for pair in rows.windows(2) {
                let i = position[&pair[0].movement_id];
                let j = position[&pair[1].movement_id];
                prop_assert!(slots[i] >= slots[j]);
                if slots[i] == slots[j] {
                    prop_assert!(i < j);
                }
            }
        }
    }
}

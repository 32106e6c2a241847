//! Text layout of ledger reports.

use std::io::{self, Write};

use stockroom_inventory::{MovementReport, Occupancy, Product, StockRow};

const STOCK_RULE: usize = 85;
const HISTORY_RULE: usize = 90;

pub fn stock_report<W: Write>(out: &mut W, rows: &[StockRow]) -> io::Result<()> {
    writeln!(out, "\n--- Current Stock Report ---")?;
    if rows.is_empty() {
        return writeln!(out, "No products registered.");
    }

    writeln!(
        out,
        "{:<15} | {:<25} | {:<12} | {:<15} | {:<15}",
        "Code", "Name", "Quantity", "Occupancy", "Max Stock"
    )?;
    writeln!(out, "{}", "-".repeat(STOCK_RULE))?;
    for row in rows {
        let occupancy = format!("{:.2}%", row.occupancy_percent);
        writeln!(
            out,
            "{:<15} | {:<25} | {:<12} | {:<15} | {:<15}",
            row.code, row.name, row.quantity, occupancy, row.max_capacity
        )?;
    }
    writeln!(out, "{}", "-".repeat(STOCK_RULE))
}

pub fn movement_report<W: Write>(out: &mut W, report: &MovementReport) -> io::Result<()> {
    writeln!(out, "\n--- Movement History ---")?;

    let rows = match report {
        MovementReport::UnknownProduct { code } => {
            return writeln!(out, "Product with code '{code}' not found.");
        }
        MovementReport::Entries { product_name, rows } => {
            if let Some(name) = product_name {
                writeln!(out, "Filtering by product: {name}\n")?;
            }
            rows
        }
    };

    if rows.is_empty() {
        return writeln!(out, "No movements recorded.");
    }

    writeln!(
        out,
        "{:<28} | {:<15} | {:<10} | {:<12} | Reason",
        "Date/Time", "Product Code", "Kind", "Quantity"
    )?;
    writeln!(out, "{}", "-".repeat(HISTORY_RULE))?;
    for row in rows {
        writeln!(
            out,
            "{:<28} | {:<15} | {:<10} | {:<12} | {}",
            row.timestamp,
            row.product_code,
            row.kind.label(),
            row.quantity,
            row.reason
        )?;
    }
    writeln!(out, "{}", "-".repeat(HISTORY_RULE))
}

pub fn occupancy<W: Write>(out: &mut W, occupancy: &Occupancy) -> io::Result<()> {
    if occupancy.total_capacity == 0 {
        return writeln!(out, "\nInventory is empty. Occupancy is 0%.");
    }

    writeln!(out, "\n--- Overall Stock Occupancy ---")?;
    writeln!(out, "Total items stored: {}", occupancy.total_stored)?;
    writeln!(out, "Total storage capacity: {}", occupancy.total_capacity)?;
    writeln!(out, "Overall occupancy rate: {:.2}%", occupancy.occupancy_percent)?;
    writeln!(out, "-------------------------------")
}

pub fn product<W: Write>(out: &mut W, product: &Product) -> io::Result<()> {
    writeln!(out, "\n--- Product {} ---", product.code())?;
    writeln!(out, "Name:         {}", product.name())?;
    writeln!(out, "Description:  {}", product.description())?;
    writeln!(
        out,
        "Quantity:     {} / {} ({:.2}%)",
        product.quantity(),
        product.max_capacity(),
        product.occupancy_percent()
    )?;
    writeln!(out, "Created:      {}", product.created_at().display())?;
    writeln!(out, "Last updated: {}", product.updated_at().display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_inventory::{Inventory, MovementKind, NewProduct};

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn sample() -> Inventory {
        let mut inv = Inventory::new();
        inv.add_product(Product::create(NewProduct::new("P1", "Widget").max_capacity(8)).unwrap())
            .unwrap();
        inv.record_movement("P1", MovementKind::Entry, 2, "purchase")
            .unwrap();
        inv
    }

    #[test]
    fn stock_report_shows_percentages() {
        let text = render(|out| stock_report(out, &sample().stock_report()));
        assert!(text.contains("Widget"));
        assert!(text.contains("25.00%"));
    }

    #[test]
    fn empty_stock_report_says_so() {
        let text = render(|out| stock_report(out, &[]));
        assert!(text.contains("No products registered."));
    }

    #[test]
    fn history_shows_capitalised_kind_and_reason() {
        let text = render(|out| movement_report(out, &sample().movement_report(Some("P1"))));
        assert!(text.contains("Filtering by product: Widget"));
        assert!(text.contains("Entry"));
        assert!(text.contains("purchase"));
    }

    #[test]
    fn history_for_unknown_product_says_not_found() {
        let text = render(|out| movement_report(out, &sample().movement_report(Some("X"))));
        assert!(text.contains("'X' not found"));
    }

    #[test]
    fn occupancy_handles_empty_inventory() {
        let text = render(|out| occupancy(out, &Inventory::new().total_occupancy()));
        assert!(text.contains("Occupancy is 0%"));
    }

    #[test]
    fn occupancy_prints_totals() {
        let text = render(|out| occupancy(out, &sample().total_occupancy()));
        assert!(text.contains("Total items stored: 2"));
        assert!(text.contains("Total storage capacity: 8"));
        assert!(text.contains("25.00%"));
    }
}

pub mod generic;

use tracing::debug;

use crate::extraction::Table;

/// Canonical header row of the carrier's shipment-label table.
///
/// A table is routed to the shipment parser only when its header equals
/// this sequence cell-for-cell, in order, with no normalization. Everything
/// else on the invoice (cost breakdowns, VAT summaries, footers) is dropped
/// here on purpose.
pub const SHIPMENT_HEADER: [&str; 9] = [
    "AWB",
    "Data wysylki",
    "Usługa",
    "Sztuki",
    "Waga",
    "Numer ref.",
    "Podlega VAT",
    "Bez VAT",
    "Łącznie",
];

/// A header-only fragment is never a shipment table, whatever its header
/// says; at least one data row must follow.
pub fn is_shipment_table(table: &Table) -> bool {
    if table.rows.len() < 2 {
        return false;
    }
    match table.header() {
        Some(header) => {
            header.len() == SHIPMENT_HEADER.len()
                && header
                    .iter()
                    .zip(SHIPMENT_HEADER)
                    .all(|(cell, want)| cell.as_str() == want)
        }
        None => false,
    }
}

/// Filter extracted tables down to the ones matching the shipment schema.
/// Non-matches are not errors.
pub fn select_shipment_tables(tables: &[Table]) -> Vec<&Table> {
    let mut selected = Vec::new();
    for table in tables {
        if is_shipment_table(table) {
            selected.push(table);
        } else {
            debug!(rows = table.rows.len(), "dropping non-shipment table");
        }
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with_header(header: &[&str], data_rows: usize) -> Table {
        let mut rows = vec![header.iter().map(|s| s.to_string()).collect::<Vec<_>>()];
        for _ in 0..data_rows {
            rows.push(vec![String::new(); header.len()]);
        }
        Table { rows }
    }

    #[test]
    fn test_exact_header_matches() {
        let t = table_with_header(&SHIPMENT_HEADER, 1);
        assert!(is_shipment_table(&t));
    }

    #[test]
    fn test_reordered_header_rejected() {
        let mut header = SHIPMENT_HEADER.to_vec();
        header.swap(0, 1);
        assert!(!is_shipment_table(&table_with_header(&header, 1)));
    }

    #[test]
    fn test_truncated_header_rejected() {
        let header = &SHIPMENT_HEADER[..8];
        assert!(!is_shipment_table(&table_with_header(header, 1)));
    }

    #[test]
    fn test_renamed_column_rejected() {
        let mut header = SHIPMENT_HEADER.to_vec();
        header[4] = "Weight";
        assert!(!is_shipment_table(&table_with_header(&header, 1)));
    }

    #[test]
    fn test_header_without_data_rows_rejected() {
        let t = table_with_header(&SHIPMENT_HEADER, 0);
        assert!(!is_shipment_table(&t));
    }

    #[test]
    fn test_selection_keeps_order() {
        let good = table_with_header(&SHIPMENT_HEADER, 1);
        let bad = table_with_header(&["Lp", "Nazwa"], 2);
        let tables = vec![bad.clone(), good.clone(), bad, good.clone()];
        let selected = select_shipment_tables(&tables);
        assert_eq!(selected.len(), 2);
        assert!(selected.iter().all(|t| is_shipment_table(t)));
    }
}

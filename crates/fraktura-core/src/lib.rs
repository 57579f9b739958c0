pub mod classify;
pub mod config;
pub mod error;
pub mod extraction;
pub mod meta;
pub mod model;
pub mod parsing;
pub mod sync;

use error::FrakturaError;
use extraction::{Table, TableExtractor};
use model::{DocumentOutcome, InvoiceMeta};

/// Main API entry point: parse a shipment-invoice PDF into structured
/// records plus a log of rows that failed disambiguation.
///
/// Extraction runs once up front; everything after it is pure and
/// per-table, so a failed row never affects its siblings.
pub fn process_pdf(
    pdf_bytes: &[u8],
    extractor: &dyn TableExtractor,
) -> Result<DocumentOutcome, FrakturaError> {
    let pages = extractor.extract_pages(pdf_bytes)?;

    // Invoice number and date sit in the running text of the first page
    let invoice = pages
        .first()
        .map(|p| meta::parse_invoice_meta(&p.text))
        .unwrap_or_default();

    let tables: Vec<Table> = pages.into_iter().flat_map(|p| p.tables).collect();
    Ok(process_tables(&tables, invoice))
}

/// Route already-extracted tables through the classifier and the
/// disambiguator. Tables that don't match the shipment schema are dropped;
/// rows that match but fail field extraction are collected as errors.
pub fn process_tables(tables: &[Table], invoice: InvoiceMeta) -> DocumentOutcome {
    let shipment_tables = classify::select_shipment_tables(tables);

    let mut records = Vec::new();
    let mut failed_rows = Vec::new();
    for table in shipment_tables {
        match parsing::parse_shipment_table(table, &invoice) {
            Ok(record) => records.push(record),
            Err(e) => failed_rows.push(e.to_string()),
        }
    }

    DocumentOutcome {
        invoice,
        records,
        failed_rows,
    }
}

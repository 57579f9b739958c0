use fraktura_core::classify::generic::{normalize_table, GenericTable};
use fraktura_core::error::FrakturaError;
use fraktura_core::extraction::pdfplumber::PdfplumberExtractor;
use fraktura_core::extraction::TableExtractor;
use std::path::PathBuf;

use crate::output;

pub fn run(input_file: PathBuf, output_format: &str) -> Result<(), FrakturaError> {
    let pdf_bytes = std::fs::read(&input_file)?;
    let extractor = PdfplumberExtractor::new();
    let pages = extractor.extract_pages(&pdf_bytes)?;

    let normalized: Vec<GenericTable> = pages
        .iter()
        .flat_map(|p| p.tables.iter().map(normalize_table))
        .collect();

    match output_format {
        "json" => output::json::print(&normalized)?,
        _ => output::table::print_generic(&normalized),
    }

    Ok(())
}

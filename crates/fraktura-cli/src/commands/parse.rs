use fraktura_core::error::FrakturaError;
use fraktura_core::extraction::pdfplumber::PdfplumberExtractor;
use std::path::PathBuf;

use crate::output;

pub fn run(
    input_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), FrakturaError> {
    let pdf_bytes = std::fs::read(&input_file)?;
    let extractor = PdfplumberExtractor::new();
    let outcome = fraktura_core::process_pdf(&pdf_bytes, &extractor)?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&outcome)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Parsed {} record(s), written to {}",
                outcome.records.len(),
                path.display()
            );
            for failure in &outcome.failed_rows {
                eprintln!("  failed row: {failure}");
            }
        }
        None => match output_format {
            "json" => output::json::print(&outcome)?,
            _ => output::table::print_outcome(&outcome),
        },
    }

    Ok(())
}

use fraktura_core::config::SyncConfig;
use fraktura_core::error::FrakturaError;
use fraktura_core::extraction::pdfplumber::PdfplumberExtractor;
use fraktura_core::sync::{envelope_records, StoreClient, BATCH_SIZE};
use std::path::PathBuf;

pub fn run(
    input_file: PathBuf,
    config_path: Option<PathBuf>,
    dry_run: bool,
) -> Result<(), FrakturaError> {
    let pdf_bytes = std::fs::read(&input_file)?;
    let extractor = PdfplumberExtractor::new();
    let outcome = fraktura_core::process_pdf(&pdf_bytes, &extractor)?;

    for failure in &outcome.failed_rows {
        eprintln!("skipping row: {failure}");
    }

    if outcome.records.is_empty() {
        eprintln!("No shipment records found; nothing to push.");
        return Ok(());
    }

    if dry_run {
        for (i, batch) in outcome.records.chunks(BATCH_SIZE).enumerate() {
            println!("--- batch {} ---", i + 1);
            println!("{}", serde_json::to_string_pretty(&envelope_records(batch))?);
        }
        return Ok(());
    }

    let config = match config_path {
        Some(path) => SyncConfig::load(path)?,
        None => SyncConfig::from_env()?,
    };

    let client = StoreClient::new(config);
    let report = client.push(&outcome.records)?;

    println!(
        "Upserted {} record(s): {} created, {} updated, {} failed",
        outcome.records.len() - report.failed,
        report.created,
        report.updated,
        report.failed
    );
    for e in &report.errors {
        eprintln!("  {e}");
    }

    Ok(())
}

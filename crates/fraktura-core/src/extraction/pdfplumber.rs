use std::io::Write;
use std::process::Command;

use crate::error::FrakturaError;
use crate::extraction::{PageContent, TableExtractor};

/// Table extraction backend driving pdfplumber through a small Python
/// helper.
///
/// The carrier invoices are ruled grids, so pdfplumber's line-based table
/// detection recovers them reliably. The helper dumps every page's text and
/// tables as one JSON document on stdout.
pub struct PdfplumberExtractor;

/// Table detection tuned for the carrier's ruled layout.
const HELPER: &str = r#"
import json, sys
import pdfplumber

TABLE_SETTINGS = {
    "vertical_strategy": "lines",
    "horizontal_strategy": "lines",
    "intersection_tolerance": 5,
    "snap_tolerance": 3,
    "join_tolerance": 3,
    "edge_min_length": 20,
    "snap_x_tolerance": 3,
    "snap_y_tolerance": 3,
}

pages = []
with pdfplumber.open(sys.argv[1]) as pdf:
    for i, page in enumerate(pdf.pages, start=1):
        tables = page.extract_tables(TABLE_SETTINGS) or []
        pages.append({
            "page_number": i,
            "text": page.extract_text() or "",
            "tables": [
                {"rows": [["" if c is None else c for c in row] for row in t]}
                for t in tables
            ],
        })
json.dump({"pages": pages}, sys.stdout, ensure_ascii=False)
"#;

impl PdfplumberExtractor {
    pub fn new() -> Self {
        PdfplumberExtractor
    }

    /// Check if python3 with pdfplumber is available on the system.
    pub fn is_available() -> bool {
        Command::new("python3")
            .args(["-c", "import pdfplumber"])
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

impl Default for PdfplumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl TableExtractor for PdfplumberExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, FrakturaError> {
        // Write PDF bytes to a temp file for the helper to open
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| FrakturaError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| FrakturaError::Extraction(e.to_string()))?;

        let output = Command::new("python3")
            .arg("-c")
            .arg(HELPER)
            .arg(tmpfile.path())
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    FrakturaError::PythonNotFound
                } else {
                    FrakturaError::Extraction(format!("pdfplumber helper failed: {e}"))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(FrakturaError::HelperFailed { code, stderr });
        }

        let dump: HelperDump = serde_json::from_slice(&output.stdout)?;
        Ok(dump.pages)
    }

    fn backend_name(&self) -> &str {
        "pdfplumber"
    }
}

#[derive(serde::Deserialize)]
struct HelperDump {
    pages: Vec<PageContent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helper_dump_shape() {
        let json = r#"{
            "pages": [
                {
                    "page_number": 1,
                    "text": "Numer faktury VAT: 123",
                    "tables": [
                        {"rows": [["AWB", "Data wysylki"], ["771", "10/03/2024"]]}
                    ]
                }
            ]
        }"#;
        let dump: HelperDump = serde_json::from_str(json).unwrap();
        assert_eq!(dump.pages.len(), 1);
        assert_eq!(dump.pages[0].tables[0].cell(1, 0), "771");
    }

    #[test]
    fn test_helper_dump_missing_fields_default() {
        let dump: HelperDump = serde_json::from_str(r#"{"pages": [{"page_number": 1}]}"#).unwrap();
        assert!(dump.pages[0].text.is_empty());
        assert!(dump.pages[0].tables.is_empty());
    }
}

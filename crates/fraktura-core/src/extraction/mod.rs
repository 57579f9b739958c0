pub mod pdfplumber;

use serde::{Deserialize, Serialize};

use crate::error::FrakturaError;

/// A table as delivered by the layout-aware extraction backend: ordered rows
/// of string cells. Rows may be ragged, and a cell may contain embedded
/// newlines where the backend stacked several visual sub-lines into one
/// physical cell. Built once per extraction pass and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(|r| r.as_slice())
    }

    /// Cell text at (row, col), or the empty string when the grid is ragged
    /// and the position does not exist.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Content extracted from a single page of a PDF.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContent {
    pub page_number: usize,
    /// Running text of the page, used for invoice-level metadata.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub tables: Vec<Table>,
}

/// Trait for layout-aware table extraction backends.
pub trait TableExtractor: Send + Sync {
    /// Extract per-page text and tables from PDF bytes.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, FrakturaError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_lookup() {
        let t = Table {
            rows: vec![
                vec!["a".into(), "b".into()],
                vec!["c".into()],
            ],
        };
        assert_eq!(t.cell(0, 1), "b");
        assert_eq!(t.cell(1, 0), "c");
    }

    #[test]
    fn test_ragged_cell_is_empty() {
        let t = Table {
            rows: vec![vec!["a".into()]],
        };
        assert_eq!(t.cell(0, 5), "");
        assert_eq!(t.cell(9, 0), "");
    }
}

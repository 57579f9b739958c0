use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FrakturaError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("python3 not found. The pdfplumber backend needs Python 3 with pdfplumber installed: pip install pdfplumber")]
    PythonNotFound,

    #[error("pdfplumber helper failed with exit code {code}: {stderr}")]
    HelperFailed { code: i32, stderr: String },

    #[error("failed to load sync config from {}: {reason}", path.display())]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("sync credentials missing: pass --config or set AIRTABLE_API_KEY and AIRTABLE_BASE_ID")]
    MissingCredentials,

    #[error("record store rejected the request ({status}): {body}")]
    StoreRejected { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure of a single shipment row. Collected per document and reported
/// alongside the successful records; never aborts sibling rows or tables.
///
/// Both variants carry the invoice number, the airway bill and the raw cell
/// text so the offending row can be located and corrected by hand.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("invoice {invoice}: weight and reference number both span two lines; the token order for this combination is ambiguous. AWB: {awb}. Cell: {raw_cell:?}")]
    UnsupportedLayout {
        invoice: String,
        awb: String,
        raw_cell: String,
    },

    #[error("invoice {invoice}: {reason}. AWB: {awb}. Cell: {raw_cell:?}")]
    FieldParse {
        invoice: String,
        awb: String,
        raw_cell: String,
        reason: String,
    },
}

use std::sync::LazyLock;

use regex::Regex;

use crate::model::InvoiceMeta;

static INVOICE_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Numer\s+faktury\s+VAT:\s*([0-9]+)").unwrap());

static INVOICE_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Data\s+faktury:\s*([0-9]{2}/[0-9]{2}/[0-9]{4})").unwrap());

/// Read invoice number and date from the first page's running text.
/// Both are optional; a page without them is not an error.
pub fn parse_invoice_meta(page_text: &str) -> InvoiceMeta {
    InvoiceMeta {
        number: INVOICE_NUMBER_RE
            .captures(page_text)
            .map(|c| c[1].to_string()),
        date: INVOICE_DATE_RE.captures(page_text).map(|c| c[1].to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_and_date() {
        let text = "Faktura\nNumer faktury VAT: 123456\nData faktury: 01/02/2024\n";
        let meta = parse_invoice_meta(text);
        assert_eq!(meta.number.as_deref(), Some("123456"));
        assert_eq!(meta.date.as_deref(), Some("01/02/2024"));
    }

    #[test]
    fn test_absent_fields_are_none() {
        let meta = parse_invoice_meta("just some cover page text");
        assert_eq!(meta.number, None);
        assert_eq!(meta.date, None);
    }

    #[test]
    fn test_date_format_must_match() {
        let meta = parse_invoice_meta("Data faktury: 2024-02-01");
        assert_eq!(meta.date, None);
    }
}

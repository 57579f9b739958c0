//! Text normalization for the composite shipment cell.

/// Prepare the composite cell for tokenization: strip thousands separators
/// (periods), turn decimal commas into dots and drop the currency
/// annotation. Newlines are kept; the structural signals in
/// [`super::layout`] are read from this pre-collapse form.
pub fn normalize_numeric_text(raw: &str) -> String {
    raw.replace('.', "").replace(',', ".").replace("(PLN)", "")
}

/// Collapse every whitespace run (including newlines) to a single space.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a number written with a decimal comma ("345,60" -> 345.60).
pub fn parse_decimal_comma(s: &str) -> Option<f64> {
    s.replace(',', ".").parse().ok()
}

//! Best-effort normalization for tables that do not match the shipment
//! schema: cost breakdowns, VAT summaries, payment blocks and whatever else
//! the extractor picks up. Headers are mapped to canonical field names
//! where known, numeric-looking cells are converted, and the table gets a
//! rough kind so downstream consumers can triage it.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::extraction::Table;

static NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(?:[.,]\d+)?$").unwrap());

static AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{1,3}(?:[ \u{00A0}\u{202F}\u{2009}]\d{3})*(?:[.,]\d{2})$").unwrap()
});

static HEADER_ALIASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    // Polish
    m.insert("lp", "lp");
    m.insert("poz", "lp");
    m.insert("nazwa", "description");
    m.insert("opis", "description");
    m.insert("towar", "description");
    m.insert("produkt", "description");
    m.insert("ilość", "qty");
    m.insert("ilosc", "qty");
    m.insert("jm", "unit");
    m.insert("jednostka", "unit");
    m.insert("cena netto", "unit_net_price");
    m.insert("netto cena", "unit_net_price");
    m.insert("wartość netto", "net_value");
    m.insert("netto wartość", "net_value");
    m.insert("stawka vat", "vat_rate");
    m.insert("vat %", "vat_rate");
    m.insert("kwota vat", "vat_value");
    m.insert("brutto", "gross_value");

    // English fallbacks
    m.insert("description", "description");
    m.insert("qty", "qty");
    m.insert("unit", "unit");
    m.insert("unit price net", "unit_net_price");
    m.insert("net value", "net_value");
    m.insert("vat rate", "vat_rate");
    m.insert("vat amount", "vat_value");
    m.insert("gross", "gross_value");

    m
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Items,
    VatSummary,
    Payments,
    Unknown,
    Empty,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenericTable {
    pub kind: TableKind,
    pub headers: Vec<String>,
    pub rows: Vec<Map<String, Value>>,
}

/// Normalize whitespace oddities common in extracted cells: NBSP variants
/// become plain spaces, soft hyphens vanish, runs collapse to one space.
pub fn clean_cell(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\u{00A0}' | '\u{202F}' | '\u{2009}' => out.push(' '),
            '\u{00AD}' => {}
            c => out.push(c),
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn to_number(s: &str) -> Option<f64> {
    let stripped: String = s
        .chars()
        .filter(|c| !matches!(c, ' ' | '\u{00A0}' | '\u{202F}' | '\u{2009}'))
        .collect();
    stripped.replace(',', ".").parse().ok()
}

fn normalize_header(cell: &str) -> String {
    let cleaned = clean_cell(cell).to_lowercase();
    let letters: String = cleaned
        .chars()
        .map(|c| match c {
            'a'..='z' | 'ą' | 'ć' | 'ę' | 'ł' | 'ń' | 'ó' | 'ś' | 'ź' | 'ż' | '%' | ' ' => c,
            _ => ' ',
        })
        .collect();
    let key = letters.split_whitespace().collect::<Vec<_>>().join(" ");
    match HEADER_ALIASES.get(key.as_str()) {
        Some(alias) => alias.to_string(),
        None => key,
    }
}

fn classify_kind(headers: &[String], rows: &[Map<String, Value>]) -> TableKind {
    let header_set: Vec<String> = headers.iter().map(|h| h.to_lowercase()).collect();
    let joined = rows
        .iter()
        .flat_map(|r| r.values())
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let items_keywords = [
        "lp",
        "description",
        "qty",
        "unit",
        "net_value",
        "vat_rate",
        "vat_value",
        "gross_value",
        "cena",
        "nazwa",
        "ilość",
    ];
    let items_score = items_keywords
        .iter()
        .filter(|kw| header_set.iter().any(|h| h == *kw) || joined.contains(*kw))
        .count();

    let vat_keywords = ["vat", "stawka", "podatek", "netto", "brutto", "suma", "razem"];
    let vat_score = vat_keywords.iter().filter(|kw| joined.contains(*kw)).count();

    let payment_keywords = ["płatność", "sposób płatności", "termin", "zapłaty", "paid", "method", "due"];
    let payment_score = payment_keywords.iter().filter(|kw| joined.contains(*kw)).count();

    if items_score >= 3 && headers.len() >= 3 {
        TableKind::Items
    } else if vat_score >= 3 && headers.len() <= 6 {
        TableKind::VatSummary
    } else if payment_score >= 2 {
        TableKind::Payments
    } else {
        TableKind::Unknown
    }
}

/// Clean, alias headers, convert numeric cells and tag the table kind.
pub fn normalize_table(table: &Table) -> GenericTable {
    let cleaned: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(|c| clean_cell(c)).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|c| !c.is_empty()))
        .collect();

    let Some((header_row, data_rows)) = cleaned.split_first() else {
        return GenericTable {
            kind: TableKind::Empty,
            headers: vec![],
            rows: vec![],
        };
    };

    let headers: Vec<String> = header_row.iter().map(|c| normalize_header(c)).collect();

    let mut rows = Vec::with_capacity(data_rows.len());
    for raw in data_rows {
        // Rows are padded to the header width; extra trailing cells are dropped
        let mut row = Map::new();
        for (i, header) in headers.iter().enumerate() {
            let cell = raw.get(i).map(String::as_str).unwrap_or("");
            let value = if NUMBER_RE.is_match(cell) || AMOUNT_RE.is_match(cell) {
                match to_number(cell).and_then(Number::from_f64) {
                    Some(n) => Value::Number(n),
                    None => Value::String(cell.to_string()),
                }
            } else {
                Value::String(cell.to_string())
            };
            let key = if header.is_empty() {
                format!("col_{i}")
            } else {
                header.clone()
            };
            row.insert(key, value);
        }
        rows.push(row);
    }

    let kind = classify_kind(&headers, &rows);
    GenericTable { kind, headers, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> Table {
        Table {
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn test_clean_cell_collapses_odd_spaces() {
        assert_eq!(clean_cell("1\u{00A0}234  zł\n x"), "1 234 zł x");
    }

    #[test]
    fn test_header_aliasing() {
        assert_eq!(normalize_header("Nazwa"), "description");
        assert_eq!(normalize_header("Stawka VAT"), "vat_rate");
        assert_eq!(normalize_header("Ilość"), "qty");
        assert_eq!(normalize_header("Coś innego"), "coś innego");
    }

    #[test]
    fn test_numeric_conversion() {
        let t = table(&[&["Nazwa", "Ilość", "Brutto"], &["Paliwo", "2", "1 234,56"]]);
        let g = normalize_table(&t);
        assert_eq!(g.rows[0]["qty"], Value::from(2.0));
        assert_eq!(g.rows[0]["gross_value"], Value::from(1234.56));
        assert_eq!(g.rows[0]["description"], Value::from("Paliwo"));
    }

    #[test]
    fn test_items_kind() {
        let t = table(&[
            &["Lp", "Nazwa", "Ilość", "Wartość netto"],
            &["1", "Transport", "1", "100,00"],
        ]);
        assert_eq!(normalize_table(&t).kind, TableKind::Items);
    }

    #[test]
    fn test_vat_summary_kind() {
        let t = table(&[
            &["Stawka", "Kwota"],
            &["VAT 23% netto", "100,00"],
            &["suma brutto razem", "123,00"],
        ]);
        assert_eq!(normalize_table(&t).kind, TableKind::VatSummary);
    }

    #[test]
    fn test_empty_table() {
        let t = table(&[&["", ""], &["", ""]]);
        assert_eq!(normalize_table(&t).kind, TableKind::Empty);
    }
}

pub mod layout;
pub mod normalize;

use std::sync::LazyLock;

use regex::Regex;

use crate::error::RowError;
use crate::extraction::Table;
use crate::model::{InvoiceMeta, ShipmentRecord};
use layout::{Layout, RefSource};
use normalize::{collapse_whitespace, normalize_numeric_text, parse_decimal_comma};

static DIMENSIONS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Wymiary\s+\S+").unwrap());

static INVOICED_WEIGHT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\d.,]+").unwrap());

static RECEIVER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r":\s*([^\d]+)").unwrap());

static RECEIPT_TIME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d.*").unwrap());

/// Parse one schema-matched shipment table into a record.
///
/// The table layout is fixed by the carrier: row 0 the header, row 1 the
/// shipment data, row 2 the sender/recipient blocks, row 3 the receipt
/// footer. The AWB/service cells and the party/footer rows parse
/// positionally and tolerate missing optional pieces; the composite data
/// cell goes through structural disambiguation and any failure there is
/// fatal for the row: the piece count, weight and the three amounts are
/// all recovered or the row is an error, never a partial record.
pub fn parse_shipment_table(
    table: &Table,
    invoice: &InvoiceMeta,
) -> Result<ShipmentRecord, RowError> {
    let awb_cell = table.cell(1, 0);
    let service_cell = table.cell(1, 2);
    let data_cell = table.cell(1, 3);

    // Line 1 of the AWB cell: "<awb> <dd/mm/yyyy>"
    let first_line = awb_cell.lines().next().unwrap_or("");
    let (awb, ship_date) = match first_line.split_once(' ') {
        Some((awb, date)) => (awb.to_string(), date.trim().to_string()),
        None => (first_line.to_string(), String::new()),
    };

    // Line 2, when present, may report package dimensions
    let dimensions = parse_dimensions(awb_cell.lines().nth(1).unwrap_or(""));

    let (service, invoiced_weight_kg) = parse_service_cell(service_cell);

    let ctx = RowContext {
        invoice: invoice.number.as_deref().unwrap_or("unknown"),
        awb: &awb,
        raw_cell: data_cell,
    };

    let normalized = normalize_numeric_text(data_cell);
    let layout = Layout::detect(&normalized);
    let positions = layout.positions().ok_or_else(|| ctx.unsupported())?;

    let collapsed = collapse_whitespace(&normalized);
    let tokens: Vec<&str> = collapsed.split_whitespace().collect();

    let pieces = int_at(&tokens, positions.pieces, &ctx)?;
    let actual_weight_kg = float_at(&tokens, positions.weight, &ctx)?;
    let vat_liable = float_at(&tokens, positions.amounts[0], &ctx)?;
    let vat_exempt = float_at(&tokens, positions.amounts[1], &ctx)?;
    let total = float_at(&tokens, positions.amounts[2], &ctx)?;

    let reference = match positions.reference {
        RefSource::None => None,
        RefSource::Joined(first, second) => Some(format!(
            "{}{}",
            token_at(&tokens, first, &ctx)?,
            token_at(&tokens, second, &ctx)?
        )),
        RefSource::Parenthesized(idx) => {
            Some(token_at(&tokens, idx, &ctx)?.replace(['(', ')'], ""))
        }
    };

    let sender = strip_party_label(table.cell(2, 0), "Nadawca ");
    let recipient = strip_party_label(table.cell(2, 2), "Odbiorca ");
    let (received_by, received_at) = parse_receipt_footer(table.cell(3, 0));

    Ok(ShipmentRecord {
        invoice_number: invoice.number.clone(),
        invoice_date: invoice.date.clone(),
        awb,
        ship_date,
        length_cm: dimensions.map(|d| d.0),
        width_cm: dimensions.map(|d| d.1),
        height_cm: dimensions.map(|d| d.2),
        service,
        invoiced_weight_kg,
        pieces,
        actual_weight_kg,
        reference,
        vat_liable,
        vat_exempt,
        total,
        sender,
        recipient,
        received_by,
        received_at,
    })
}

/// "Wymiary 30x20x10cm" -> (30.0, 20.0, 10.0). No marker, or a triple that
/// doesn't parse as three numbers, means no dimensions were reported.
fn parse_dimensions(line: &str) -> Option<(f64, f64, f64)> {
    if !DIMENSIONS_RE.is_match(line) {
        return None;
    }
    let after_marker = line.split_once("Wymiary")?.1;
    let triple = after_marker
        .split_once("cm")
        .map(|(before, _)| before)
        .unwrap_or(after_marker)
        .trim();

    let parts: Vec<&str> = triple.split('x').collect();
    if parts.len() != 3 {
        return None;
    }
    let length = parts[0].trim().parse().ok()?;
    let width = parts[1].trim().parse().ok()?;
    let height = parts[2].trim().parse().ok()?;
    Some((length, width, height))
}

/// Split the service cell on its "Waga zafakturowana" sub-label: the text
/// before is the service description, the first numeric run after it is the
/// invoiced weight. A cell without the sub-label yields no weight.
fn parse_service_cell(cell: &str) -> (String, Option<f64>) {
    match cell.split_once("Waga") {
        Some((before, after)) => {
            let weight = INVOICED_WEIGHT_RE
                .find(after)
                .and_then(|m| parse_decimal_comma(m.as_str()));
            (collapse_whitespace(before), weight)
        }
        None => (collapse_whitespace(cell), None),
    }
}

fn strip_party_label(cell: &str, label: &str) -> String {
    cell.replace('\n', " ").replace(label, "").trim().to_string()
}

/// "Odebrał: J. KOWALSKI 12/03/2024 14:32" -> (name, timestamp). Either
/// piece may be missing; that is not an error.
fn parse_receipt_footer(cell: &str) -> (Option<String>, Option<String>) {
    let received_by = RECEIVER_RE
        .captures(cell)
        .map(|c| c[1].trim().to_string())
        .filter(|s| !s.is_empty());
    let received_at = RECEIPT_TIME_RE.find(cell).map(|m| m.as_str().to_string());
    (received_by, received_at)
}

struct RowContext<'a> {
    invoice: &'a str,
    awb: &'a str,
    raw_cell: &'a str,
}

impl RowContext<'_> {
    fn unsupported(&self) -> RowError {
        RowError::UnsupportedLayout {
            invoice: self.invoice.to_string(),
            awb: self.awb.to_string(),
            raw_cell: self.raw_cell.to_string(),
        }
    }

    fn field(&self, reason: String) -> RowError {
        RowError::FieldParse {
            invoice: self.invoice.to_string(),
            awb: self.awb.to_string(),
            raw_cell: self.raw_cell.to_string(),
            reason,
        }
    }
}

fn token_at<'t>(tokens: &[&'t str], idx: usize, ctx: &RowContext) -> Result<&'t str, RowError> {
    tokens.get(idx).copied().ok_or_else(|| {
        ctx.field(format!(
            "cell has {} tokens but the layout needs at least {}",
            tokens.len(),
            idx + 1
        ))
    })
}

fn int_at(tokens: &[&str], idx: usize, ctx: &RowContext) -> Result<u32, RowError> {
    let token = token_at(tokens, idx, ctx)?;
    token
        .parse()
        .map_err(|_| ctx.field(format!("piece count '{token}' is not an integer")))
}

fn float_at(tokens: &[&str], idx: usize, ctx: &RowContext) -> Result<f64, RowError> {
    let token = token_at(tokens, idx, ctx)?;
    token
        .parse()
        .map_err(|_| ctx.field(format!("'{token}' is not a number")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_present() {
        assert_eq!(
            parse_dimensions("Wymiary 30x20x10cm"),
            Some((30.0, 20.0, 10.0))
        );
    }

    #[test]
    fn test_dimensions_absent_marker() {
        assert_eq!(parse_dimensions("Opis przesyłki"), None);
        assert_eq!(parse_dimensions(""), None);
    }

    #[test]
    fn test_dimensions_malformed_triple() {
        assert_eq!(parse_dimensions("Wymiary 30x20cm"), None);
        assert_eq!(parse_dimensions("Wymiary axbxccm"), None);
    }

    #[test]
    fn test_service_cell_split() {
        let (service, weight) = parse_service_cell("FedEx International\nPriority Waga zafakturowana 0,50kg");
        assert_eq!(service, "FedEx International Priority");
        assert_eq!(weight, Some(0.5));
    }

    #[test]
    fn test_service_cell_without_label() {
        let (service, weight) = parse_service_cell("FedEx Priority");
        assert_eq!(service, "FedEx Priority");
        assert_eq!(weight, None);
    }

    #[test]
    fn test_receipt_footer() {
        let (name, at) = parse_receipt_footer("Odebrał: A.NOWAK 12/03/2024 14:32");
        assert_eq!(name.as_deref(), Some("A.NOWAK"));
        assert_eq!(at.as_deref(), Some("12/03/2024 14:32"));
    }

    #[test]
    fn test_receipt_footer_empty() {
        let (name, at) = parse_receipt_footer("");
        assert_eq!(name, None);
        assert_eq!(at, None);
    }

    #[test]
    fn test_party_label_stripped() {
        assert_eq!(
            strip_party_label("Nadawca JAN KOWALSKI\nACME SP. Z O.O.\nWARSZAWA", "Nadawca "),
            "JAN KOWALSKI ACME SP. Z O.O. WARSZAWA"
        );
    }
}

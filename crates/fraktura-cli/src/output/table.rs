use fraktura_core::classify::generic::GenericTable;
use fraktura_core::model::DocumentOutcome;
use serde_json::Value;

pub fn print_outcome(outcome: &DocumentOutcome) {
    match (&outcome.invoice.number, &outcome.invoice.date) {
        (Some(number), Some(date)) => println!("Invoice {number} ({date})\n"),
        (Some(number), None) => println!("Invoice {number}\n"),
        _ => {}
    }

    if outcome.records.is_empty() && outcome.failed_rows.is_empty() {
        println!("No shipment tables found.");
        return;
    }

    for record in &outcome.records {
        println!("=== AWB {} ===", record.awb);
        println!("  shipped:    {}", record.ship_date);
        println!("  service:    {}", record.service);
        if let (Some(l), Some(w), Some(h)) = (record.length_cm, record.width_cm, record.height_cm)
        {
            println!("  dimensions: {l} x {w} x {h} cm");
        }
        if let Some(kg) = record.invoiced_weight_kg {
            println!("  invoiced:   {kg} kg");
        }
        println!("  pieces:     {}", record.pieces);
        println!("  weight:     {} kg", record.actual_weight_kg);
        if let Some(ref reference) = record.reference {
            println!("  reference:  {reference}");
        }
        println!(
            "  amounts:    VAT {:.2} / exempt {:.2} / total {:.2}",
            record.vat_liable, record.vat_exempt, record.total
        );
        println!("  sender:     {}", record.sender);
        println!("  recipient:  {}", record.recipient);
        if let Some(ref received_by) = record.received_by {
            let when = record.received_at.as_deref().unwrap_or("-");
            println!("  received:   {received_by} ({when})");
        }
        println!();
    }

    if !outcome.failed_rows.is_empty() {
        println!("Failed rows:");
        for failure in &outcome.failed_rows {
            println!("  - {failure}");
        }
    }
}

pub fn print_generic(tables: &[GenericTable]) {
    if tables.is_empty() {
        println!("No tables found.");
        return;
    }

    for (i, table) in tables.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("--- table {} ({:?}) ---", i + 1, table.kind);
        if table.headers.is_empty() {
            continue;
        }
        println!("{}", table.headers.join(" | "));
        for row in &table.rows {
            // Look cells up by header so the column order survives the map
            let cells: Vec<String> = table
                .headers
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    let key = if header.is_empty() {
                        format!("col_{i}")
                    } else {
                        header.clone()
                    };
                    row.get(&key).map(render_value).unwrap_or_default()
                })
                .collect();
            println!("{}", cells.join(" | "));
        }
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

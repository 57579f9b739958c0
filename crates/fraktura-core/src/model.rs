use serde::{Deserialize, Serialize};

/// One parsed shipment row, shaped for the external record store.
///
/// Serialized names are the store's column names, which follow the Polish
/// labels printed on the carrier invoice. The numeric fields `pieces`,
/// `actual_weight_kg` and the three amounts are mandatory: a row where any
/// of them failed to parse is reported as a [`crate::error::RowError`]
/// instead of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    #[serde(rename = "numer_faktury", default, skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
    #[serde(rename = "data_faktury", default, skip_serializing_if = "Option::is_none")]
    pub invoice_date: Option<String>,
    #[serde(rename = "AWB")]
    pub awb: String,
    /// Ship date as printed, `dd/mm/yyyy`.
    #[serde(rename = "data_wysylki")]
    pub ship_date: String,
    /// Package dimensions in centimeters. Always set or cleared together.
    #[serde(rename = "dlugosc", default, skip_serializing_if = "Option::is_none")]
    pub length_cm: Option<f64>,
    #[serde(rename = "szerokosc", default, skip_serializing_if = "Option::is_none")]
    pub width_cm: Option<f64>,
    #[serde(rename = "wysokosc", default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(rename = "usluga")]
    pub service: String,
    #[serde(rename = "waga_zafakturowana", default, skip_serializing_if = "Option::is_none")]
    pub invoiced_weight_kg: Option<f64>,
    #[serde(rename = "sztuki")]
    pub pieces: u32,
    #[serde(rename = "waga")]
    pub actual_weight_kg: f64,
    #[serde(rename = "numer_referencyjny", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(rename = "podlega_vat")]
    pub vat_liable: f64,
    #[serde(rename = "bez_vat")]
    pub vat_exempt: f64,
    #[serde(rename = "lacznie")]
    pub total: f64,
    #[serde(rename = "informacje_nadawca")]
    pub sender: String,
    #[serde(rename = "informacje_odbiorca")]
    pub recipient: String,
    #[serde(rename = "odebral", default, skip_serializing_if = "Option::is_none")]
    pub received_by: Option<String>,
    #[serde(rename = "czas_odebrania", default, skip_serializing_if = "Option::is_none")]
    pub received_at: Option<String>,
}

/// Invoice-level metadata read from the first page's running text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceMeta {
    pub number: Option<String>,
    pub date: Option<String>,
}

/// Everything produced from one document: the records that disambiguated
/// cleanly plus a log of rows that matched the shipment schema but failed
/// field extraction. Failed rows never suppress their siblings.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentOutcome {
    pub invoice: InvoiceMeta,
    pub records: Vec<ShipmentRecord>,
    pub failed_rows: Vec<String>,
}

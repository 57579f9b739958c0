//! Batched upsert client for the external record store (Airtable).
//!
//! Records go out as `{"fields": {...}}` envelopes, at most [`BATCH_SIZE`]
//! per request, keyed on the AWB column so re-uploading an invoice updates
//! rows instead of duplicating them. A failed batch is reported and does
//! not stop the remaining batches.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::config::SyncConfig;
use crate::error::FrakturaError;
use crate::model::ShipmentRecord;

/// The store accepts at most this many records per create/update call.
pub const BATCH_SIZE: usize = 10;

/// Column used as the upsert key; one row per airway bill.
pub const UPSERT_KEY: &str = "AWB";

#[derive(Debug, Clone, Serialize)]
pub struct RecordEnvelope<'a> {
    pub fields: &'a ShipmentRecord,
}

pub fn envelope_records(records: &[ShipmentRecord]) -> Vec<RecordEnvelope<'_>> {
    records.iter().map(|fields| RecordEnvelope { fields }).collect()
}

#[derive(Debug, Default, Serialize)]
pub struct SyncReport {
    pub created: usize,
    pub updated: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchOutcome {
    #[serde(default)]
    records: Vec<serde_json::Value>,
    #[serde(default)]
    created_records: Vec<serde_json::Value>,
    #[serde(default)]
    updated_records: Vec<serde_json::Value>,
}

pub struct StoreClient {
    http: reqwest::blocking::Client,
    config: SyncConfig,
}

impl StoreClient {
    pub fn new(config: SyncConfig) -> Self {
        StoreClient {
            http: reqwest::blocking::Client::new(),
            config,
        }
    }

    fn table_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.base_id,
            self.config.table
        )
    }

    /// Upsert all records, in batches. The returned report counts created,
    /// updated and failed records; batch errors are collected, not raised.
    pub fn push(&self, records: &[ShipmentRecord]) -> Result<SyncReport, FrakturaError> {
        let mut report = SyncReport::default();

        for (i, batch) in records.chunks(BATCH_SIZE).enumerate() {
            let payload = json!({
                "records": envelope_records(batch),
                "performUpsert": { "fieldsToMergeOn": [UPSERT_KEY] },
            });

            match self.push_batch(&payload) {
                Ok(outcome) => {
                    let created = outcome.created_records.len();
                    let updated = outcome.updated_records.len();
                    if created == 0 && updated == 0 {
                        // Stores without upsert accounting report plain records
                        report.created += outcome.records.len();
                    } else {
                        report.created += created;
                        report.updated += updated;
                    }
                    info!(batch = i + 1, records = batch.len(), "batch upserted");
                }
                Err(e) => {
                    report.failed += batch.len();
                    report.errors.push(format!("batch {} failed: {e}", i + 1));
                    warn!(batch = i + 1, error = %e, "batch failed");
                }
            }
        }

        Ok(report)
    }

    fn push_batch(&self, payload: &serde_json::Value) -> Result<BatchOutcome, FrakturaError> {
        let response = self
            .http
            .patch(self.table_url())
            .bearer_auth(&self.config.api_key)
            .json(payload)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(FrakturaError::StoreRejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json()?)
    }
}

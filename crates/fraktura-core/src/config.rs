use std::path::Path;

use serde::Deserialize;

use crate::error::FrakturaError;

pub const DEFAULT_ENDPOINT: &str = "https://api.airtable.com/v0";

/// Credentials and addressing for the record store. Loaded from a TOML
/// file, or from the `AIRTABLE_*` environment variables the way the hosted
/// deployment is configured.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    pub api_key: String,
    pub base_id: String,
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_table() -> String {
    "Invoices".to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl SyncConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FrakturaError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| FrakturaError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| FrakturaError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn from_env() -> Result<Self, FrakturaError> {
        let api_key = std::env::var("AIRTABLE_API_KEY").ok();
        let base_id = std::env::var("AIRTABLE_BASE_ID").ok();
        match (api_key, base_id) {
            (Some(api_key), Some(base_id)) => Ok(SyncConfig {
                api_key,
                base_id,
                table: std::env::var("AIRTABLE_TABLE_NAME").unwrap_or_else(|_| default_table()),
                endpoint: default_endpoint(),
            }),
            _ => Err(FrakturaError::MissingCredentials),
        }
    }
}

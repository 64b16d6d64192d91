//! Export Context: placeholders and provenance for exported artifacts
//!
//! Everything time- or account-specific lives here so the compilers stay
//! pure functions of the analysis record.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportContext {
    pub account_id: String,
    pub container_id: String,
    /// Public `GTM-XXXX` id shown in the import dialog
    pub public_id: String,
    pub container_version: String,
    /// When the export was produced
    pub exported_at: DateTime<Utc>,
}

impl ExportContext {
    pub fn new(exported_at: DateTime<Utc>) -> Self {
        Self {
            exported_at,
            ..Self::default()
        }
    }

    pub fn with_account(mut self, account_id: impl Into<String>, container_id: impl Into<String>) -> Self {
        self.account_id = account_id.into();
        self.container_id = container_id.into();
        self
    }

    /// `accounts/<account>/containers/<container>`
    pub fn container_path(&self) -> String {
        format!("accounts/{}/containers/{}", self.account_id, self.container_id)
    }

    /// Timestamp suffix used for output file names (`20240131_235959`)
    pub fn file_stamp(&self) -> String {
        self.exported_at.format("%Y%m%d_%H%M%S").to_string()
    }
}

impl Default for ExportContext {
    fn default() -> Self {
        Self {
            account_id: "YOUR_ACCOUNT_ID".to_string(),
            container_id: "YOUR_CONTAINER_ID".to_string(),
            public_id: "GTM-XXXXXXX".to_string(),
            container_version: "1".to_string(),
            exported_at: DateTime::<Utc>::default(),
        }
    }
}

//! Compiler settings
//!
//! Values written into the baseline configuration variable. The defaults
//! are the placeholders a site owner replaces after import.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use siteaudit_core::AuditError;

static MEASUREMENT_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^G-[A-Z0-9]+$").unwrap());
static CURRENCY_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{3}$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerSettings {
    /// GA4 measurement id (`G-XXXXXXXXXX` placeholder by default)
    pub measurement_id: String,

    /// ISO 4217 currency sent with every event
    pub currency: String,

    pub anonymize_ip: bool,

    pub enable_link_domains: bool,

    pub send_page_view: bool,
}

impl CompilerSettings {
    /// Load settings from YAML; missing keys keep their defaults
    pub fn from_yaml(yaml: &str) -> Result<Self, AuditError> {
        let settings: Self =
            serde_yaml::from_str(yaml).map_err(|e| AuditError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), AuditError> {
        if !MEASUREMENT_ID.is_match(&self.measurement_id) {
            return Err(AuditError::Config(format!(
                "measurement_id '{}' is not a GA4 id (G-XXXXXXXXXX)",
                self.measurement_id
            )));
        }
        if !CURRENCY_CODE.is_match(&self.currency) {
            return Err(AuditError::Config(format!(
                "currency '{}' is not a three-letter code",
                self.currency
            )));
        }
        Ok(())
    }
}

impl Default for CompilerSettings {
    fn default() -> Self {
        Self {
            measurement_id: "G-XXXXXXXXXX".to_string(),
            currency: "USD".to_string(),
            anonymize_ip: false,
            enable_link_domains: false,
            send_page_view: true,
        }
    }
}

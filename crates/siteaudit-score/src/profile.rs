//! Scoring profiles
//!
//! Point weights per signal. The standard profile is the published audit
//! scale: analytics 40, technical 30, conversion tracking 30.

use serde::{Deserialize, Serialize};
use siteaudit_core::AuditError;

/// Upper bound of any audit score
pub const MAX_SCORE: u32 = 100;

/// Points awarded per signal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringProfile {
    /// Profile name (e.g., "standard@1.0")
    pub name: String,

    // === Analytics ===

    /// Google Tag Manager installed
    pub gtm: u32,

    /// GA4 measurement id present
    pub ga4: u32,

    /// Consent management platform present
    pub consent: u32,

    // === Technical ===

    pub https: u32,

    /// `dataLayer` initialised on the page
    pub data_layer: u32,

    pub mobile_optimized: u32,

    pub schema_markup: u32,

    // === Conversion Tracking ===

    /// Scaled by the share of forms that already carry tracking
    pub conversion: u32,

    /// Award the full conversion weight when nothing was detected to track
    pub full_credit_without_opportunities: bool,
}

impl ScoringProfile {
    pub fn standard() -> Self {
        Self {
            name: "standard@1.0".to_string(),
            gtm: 15,
            ga4: 15,
            consent: 10,
            https: 10,
            data_layer: 10,
            mobile_optimized: 5,
            schema_markup: 5,
            conversion: 30,
            full_credit_without_opportunities: true,
        }
    }

    /// Load profile from YAML; missing weights keep their standard values
    pub fn from_yaml(yaml: &str) -> Result<Self, AuditError> {
        let profile: Self =
            serde_yaml::from_str(yaml).map_err(|e| AuditError::Config(e.to_string()))?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), AuditError> {
        let total = self.weights().iter().map(|w| u64::from(*w)).sum::<u64>();
        if total > u64::from(MAX_SCORE) {
            return Err(AuditError::Config(format!(
                "profile '{}' weights sum to {} (max {})",
                self.name, total, MAX_SCORE
            )));
        }
        Ok(())
    }

    fn weights(&self) -> [u32; 8] {
        [
            self.gtm,
            self.ga4,
            self.consent,
            self.https,
            self.data_layer,
            self.mobile_optimized,
            self.schema_markup,
            self.conversion,
        ]
    }

    pub fn analytics_total(&self) -> u32 {
        self.gtm.saturating_add(self.ga4).saturating_add(self.consent)
    }

    pub fn technical_total(&self) -> u32 {
        self.https
            .saturating_add(self.data_layer)
            .saturating_add(self.mobile_optimized)
            .saturating_add(self.schema_markup)
    }

    /// Highest score this profile can award (saturates; `validate` bounds it)
    pub fn total(&self) -> u32 {
        self.analytics_total()
            .saturating_add(self.technical_total())
            .saturating_add(self.conversion)
    }
}

impl Default for ScoringProfile {
    fn default() -> Self {
        Self::standard()
    }
}

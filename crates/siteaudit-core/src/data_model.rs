//! Data Model: AnalysisRecord and its sections
//!
//! One record describes one inspected site. Every section and field
//! defaults when absent, so a record where an upstream collector only
//! wrote an `error` key still deserializes.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use crate::error::AuditError;
use crate::opportunity::OpportunityKind;

/// CMS name used when no signature matched
pub const UNKNOWN_CMS: &str = "Unknown";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisRecord {
    /// Inspected URL
    pub url: String,
    /// Collection time as written by the collector
    pub timestamp: String,
    pub basic_info: BasicInfo,
    pub cms_detection: CmsDetection,
    pub analytics_detection: AnalyticsDetection,
    pub tracking_analysis: TrackingAnalysis,
    pub conversion_opportunities: ConversionOpportunities,
    pub technical_analysis: TechnicalAnalysis,
    pub recommendations: Vec<Recommendation>,
    /// Top-level collector failure, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisRecord {
    /// Parse a record from collector JSON
    pub fn from_json(json: &str) -> Result<Self, AuditError> {
        serde_json::from_str(json).map_err(|e| AuditError::Parse(e.to_string()))
    }

    /// Record for `url` with every section empty
    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// The record must at least say which site it describes
    pub fn validate(&self) -> Result<(), AuditError> {
        if self.url.trim().is_empty() {
            return Err(AuditError::Validation("URL is required".to_string()));
        }
        Ok(())
    }

    /// Whether the CMS detector recognised a platform
    pub fn cms_known(&self) -> bool {
        self.cms_detection.primary_cms != UNKNOWN_CMS
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicInfo {
    pub title: Option<String>,
    pub description: String,
    pub og_title: String,
    pub og_description: String,
    pub status_code: u16,
    /// Seconds
    pub response_time: f64,
    /// Bytes
    pub content_length: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CmsDetection {
    /// Highest-confidence CMS, `"Unknown"` when nothing matched
    pub primary_cms: String,
    pub detected_cms: Vec<String>,
    /// CMS name → matched-indicator ratio in [0, 1]
    pub confidence_scores: BTreeMap<String, f64>,
    /// `<meta name="generator">` content
    pub generator: String,
    /// Raw technology fingerprint map from the collector
    pub technologies: serde_json::Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Default for CmsDetection {
    fn default() -> Self {
        Self {
            primary_cms: UNKNOWN_CMS.to_string(),
            detected_cms: Vec::new(),
            confidence_scores: BTreeMap::new(),
            generator: String::new(),
            technologies: serde_json::Map::new(),
            error: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsDetection {
    pub has_gtm: bool,
    pub has_ga4: bool,
    pub has_consent_management: bool,
    /// `GTM-XXXX` container ids
    pub gtm_containers: Vec<String>,
    /// `G-XXXX` measurement ids
    pub ga4_measurement_ids: Vec<String>,
    /// Legacy `UA-N-N` property ids
    pub universal_analytics_ids: Vec<String>,
    pub facebook_pixels: Vec<String>,
    /// Third-party tool → present
    pub other_tracking: BTreeMap<String, bool>,
    /// Consent platform → present
    pub consent_management: BTreeMap<String, bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingAnalysis {
    pub forms_count: u32,
    pub forms_with_tracking: u32,
    pub forms_analysis: Vec<FormInfo>,
    pub tracked_buttons: Vec<TrackedButton>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormInfo {
    pub index: u32,
    pub action: String,
    pub method: String,
    pub inputs: Vec<FormInput>,
    pub has_tracking: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormInput {
    #[serde(rename = "type")]
    pub input_type: String,
    pub name: String,
    pub id: String,
    pub placeholder: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackedButton {
    pub text: String,
    pub href: String,
    pub onclick: String,
    pub has_tracking: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOpportunities {
    pub opportunities: Vec<Opportunity>,
    /// Count as reported by the collector
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_opportunities: Option<u32>,
    /// Deduplicated union of opportunity events as reported by the collector
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_events: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConversionOpportunities {
    /// Reported total, falling back to the number of listed opportunities
    pub fn total(&self) -> u32 {
        self.total_opportunities
            .unwrap_or(self.opportunities.len() as u32)
    }

    /// Set membership on opportunity type
    pub fn contains(&self, kind: &OpportunityKind) -> bool {
        self.opportunities.iter().any(|o| &o.kind == kind)
    }

    /// Reported events, or the sorted union of every opportunity's events
    pub fn recommended_events(&self) -> Vec<String> {
        if let Some(events) = &self.recommended_events {
            return events.clone();
        }
        self.opportunities
            .iter()
            .flat_map(|o| o.events.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    #[serde(rename = "type", default)]
    pub kind: OpportunityKind,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub description: String,
    /// Suggested GA4 event names, in collector order
    #[serde(default)]
    pub events: Vec<String>,
}

impl Opportunity {
    pub fn new(kind: OpportunityKind) -> Self {
        Self {
            kind,
            priority: String::new(),
            description: String::new(),
            events: Vec::new(),
        }
    }

    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn events(mut self, events: &[&str]) -> Self {
        self.events = events.iter().map(|e| e.to_string()).collect();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalAnalysis {
    pub is_https: bool,
    pub has_data_layer: bool,
    pub has_schema_markup: bool,
    pub schema_count: u32,
    pub is_mobile_optimized: bool,
    pub has_amp: bool,
    pub has_service_worker: bool,
    /// Seconds
    pub page_load_time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recommendation {
    pub category: String,
    /// Raw priority string; only `High`, `Medium` and `Low` are bucketed
    pub priority: String,
    pub title: String,
    pub description: String,
    pub action: String,
}

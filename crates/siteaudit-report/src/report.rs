//! Audit report model
//!
//! Sections serialize in declaration order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use siteaudit_core::{FormInfo, OpportunityKind, Recommendation};
use siteaudit_score::Check;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub metadata: ReportMetadata,
    pub executive_summary: ExecutiveSummary,
    pub technical_findings: TechnicalFindings,
    pub analytics_audit: AnalyticsAudit,
    pub conversion_opportunities: OpportunityReport,
    pub implementation_plan: ImplementationPlan,
    pub recommendations: RecommendationGroups,
    pub next_steps: NextSteps,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: String,
    pub report_version: String,
    pub website_url: String,
    pub analysis_timestamp: String,
}

// =============================================================================
// Executive summary
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutiveSummary {
    pub website_title: String,
    pub cms_platform: String,
    pub audit_score: u32,
    pub score_breakdown: Vec<Check>,
    /// Recommendations with priority exactly `High`
    pub critical_issues: usize,
    pub optimization_opportunities: u32,
    pub current_analytics_setup: AnalyticsSetup,
    /// At most five, in fixed precedence
    pub key_findings: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSetup {
    pub has_gtm: bool,
    pub has_ga4: bool,
    pub has_consent_management: bool,
}

// =============================================================================
// Technical findings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalFindings {
    pub website_performance: WebsitePerformance,
    pub cms_and_technology: CmsAndTechnology,
    pub technical_setup: TechnicalSetup,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebsitePerformance {
    pub page_load_time: f64,
    pub response_time: f64,
    pub content_length: u64,
    pub status_code: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CmsAndTechnology {
    pub detected_cms: Vec<String>,
    pub confidence_scores: BTreeMap<String, f64>,
    pub technologies: Map<String, Value>,
    pub generator: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicalSetup {
    pub is_https: bool,
    pub has_data_layer: bool,
    pub has_schema_markup: bool,
    pub schema_count: u32,
    pub is_mobile_optimized: bool,
    pub has_amp: bool,
    pub has_service_worker: bool,
}

// =============================================================================
// Analytics audit
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsAudit {
    pub current_implementation: CurrentImplementation,
    pub privacy_compliance: PrivacyCompliance,
    pub tracking_assessment: TrackingAssessment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentImplementation {
    pub google_tag_manager: TagManagerStatus,
    pub google_analytics: GoogleAnalyticsStatus,
    pub other_tracking: BTreeMap<String, bool>,
    pub facebook_pixel: PixelStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagManagerStatus {
    pub installed: bool,
    pub containers: Vec<String>,
    pub container_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleAnalyticsStatus {
    pub ga4_installed: bool,
    pub ga4_measurement_ids: Vec<String>,
    pub universal_analytics_ids: Vec<String>,
    pub using_legacy_ua: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelStatus {
    pub installed: bool,
    pub pixel_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacyCompliance {
    pub consent_management: BTreeMap<String, bool>,
    pub has_consent_solution: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingAssessment {
    pub total_forms: u32,
    pub forms_with_tracking: u32,
    pub tracked_buttons: usize,
    pub form_analysis: Vec<FormInfo>,
}

// =============================================================================
// Conversion opportunities
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpportunityReport {
    pub summary: OpportunitySummary,
    pub detailed_opportunities: Vec<DetailedOpportunity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpportunitySummary {
    pub total_opportunities: u32,
    pub recommended_events: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedOpportunity {
    #[serde(rename = "type")]
    pub kind: OpportunityKind,
    pub priority: String,
    pub description: String,
    pub recommended_events: Vec<String>,
    pub implementation_notes: Vec<String>,
}

// =============================================================================
// Implementation plan
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementationPlan {
    pub gtm_setup: GtmSetup,
    pub data_layer_structure: DataLayerStructure,
    pub testing_checklist: TestingChecklist,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GtmSetup {
    pub container_structure: ContainerStructure,
    pub implementation_steps: Vec<ImplementationStep>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerStructure {
    pub tags_count: usize,
    pub triggers_count: usize,
    pub variables_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImplementationStep {
    pub step: u32,
    pub title: String,
    pub description: String,
    pub estimated_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataLayerStructure {
    pub base_structure: BaseDataLayer,
    pub event_specific: Vec<EventDataLayer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseDataLayer {
    pub description: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDataLayer {
    pub event_type: String,
    pub description: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestingChecklist {
    pub basic_setup: Vec<String>,
    pub conversion_tracking: Vec<String>,
    pub privacy_compliance: Vec<String>,
    pub technical_validation: Vec<String>,
}

// =============================================================================
// Recommendations and next steps
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationGroups {
    pub high_priority: Vec<Recommendation>,
    pub medium_priority: Vec<Recommendation>,
    pub low_priority: Vec<Recommendation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextSteps {
    pub immediate_actions: Vec<ActionItem>,
    pub week_1_goals: Vec<Goal>,
    pub month_1_goals: Vec<Goal>,
    pub ongoing_optimization: Vec<OngoingActivity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    pub action: String,
    pub priority: String,
    pub estimated_effort: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub goal: String,
    pub deliverable: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OngoingActivity {
    pub activity: String,
    pub frequency: String,
}

pub(crate) fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

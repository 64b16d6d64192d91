//! siteaudit Report: structured audit report compiler
//!
//! Assembles the eight report sections from an `AnalysisRecord` and the
//! configuration compiled for it, and renders Markdown digests of the result.
//!
//! # Example
//!
//! ```
//! use siteaudit_core::AnalysisRecord;
//! use siteaudit_gtm::compile;
//! use siteaudit_report::{compile_report, render_summary};
//!
//! let record = AnalysisRecord::for_url("https://example.com");
//! let config = compile(&record);
//! let report = compile_report(&record, &config);
//!
//! assert_eq!(report.executive_summary.audit_score, 30);
//! let digest = render_summary(&report).unwrap();
//! assert!(digest.contains("https://example.com"));
//! ```

pub mod actions;
pub mod findings;
pub mod opportunities;
pub mod plan;
pub mod renderer;
pub mod report;
pub mod summary;
pub mod tables;
pub mod templates;

pub use renderer::TemplateRenderer;
pub use report::*;
pub use templates::TemplatesFile;

use chrono::{DateTime, SecondsFormat, Utc};
use siteaudit_core::{AnalysisRecord, AuditError};
use siteaudit_gtm::CompiledConfiguration;
use siteaudit_score::{Scorer, ScoringProfile};
use tracing::debug;

/// Report compiler. Holds only immutable settings; `compile` is pure.
#[derive(Debug, Clone, Default)]
pub struct ReportCompiler {
    generated_at: Option<String>,
    scorer: Scorer,
}

impl ReportCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp reports with `at` instead of the record's own timestamp
    pub fn generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at.to_rfc3339_opts(SecondsFormat::Secs, true));
        self
    }

    pub fn scoring_profile(mut self, profile: ScoringProfile) -> Self {
        self.scorer = Scorer::new(profile);
        self
    }

    pub fn compile(&self, record: &AnalysisRecord, config: &CompiledConfiguration) -> AuditReport {
        let report = AuditReport {
            metadata: ReportMetadata {
                generated_at: self
                    .generated_at
                    .clone()
                    .unwrap_or_else(|| record.timestamp.clone()),
                report_version: tables::REPORT_VERSION.to_string(),
                website_url: record.url.clone(),
                analysis_timestamp: record.timestamp.clone(),
            },
            executive_summary: summary::executive_summary(record, &self.scorer),
            technical_findings: findings::technical_findings(record),
            analytics_audit: findings::analytics_audit(record),
            conversion_opportunities: opportunities::opportunity_report(record),
            implementation_plan: plan::implementation_plan(record, config),
            recommendations: actions::recommendation_groups(record),
            next_steps: actions::next_steps(record),
        };

        debug!(
            url = %record.url,
            score = report.executive_summary.audit_score,
            findings = report.executive_summary.key_findings.len(),
            opportunities = report.conversion_opportunities.detailed_opportunities.len(),
            "compiled audit report"
        );

        report
    }
}

/// Compile with the standard profile, stamped with the record's timestamp
pub fn compile_report(record: &AnalysisRecord, config: &CompiledConfiguration) -> AuditReport {
    ReportCompiler::new().compile(record, config)
}

impl AuditReport {
    pub fn to_json_pretty(&self) -> Result<String, AuditError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Markdown digest through the bundled `audit_summary` template
pub fn render_summary(report: &AuditReport) -> Result<String, AuditError> {
    render_with(&TemplateRenderer::bundled()?, "audit_summary", report)
}

/// Markdown action plan through the bundled `next_steps` template
pub fn render_next_steps(report: &AuditReport) -> Result<String, AuditError> {
    render_with(&TemplateRenderer::bundled()?, "next_steps", report)
}

pub fn render_with(
    renderer: &TemplateRenderer,
    template_name: &str,
    report: &AuditReport,
) -> Result<String, AuditError> {
    let data = serde_json::to_value(report)?;
    renderer.render(template_name, &data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use siteaudit_core::{Opportunity, OpportunityKind};
    use siteaudit_gtm::compile;

    fn shop() -> AnalysisRecord {
        let mut record = AnalysisRecord::for_url("https://shop.example.com");
        record.timestamp = "2024-05-01T12:00:00".to_string();
        record.cms_detection.primary_cms = "Shopify".to_string();
        record
            .conversion_opportunities
            .opportunities
            .push(Opportunity::new(OpportunityKind::Ecommerce).priority("high"));
        record
    }

    #[test]
    fn test_section_order() {
        let record = shop();
        let json = serde_json::to_value(compile_report(&record, &compile(&record))).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "metadata",
                "executive_summary",
                "technical_findings",
                "analytics_audit",
                "conversion_opportunities",
                "implementation_plan",
                "recommendations",
                "next_steps",
            ]
        );
    }

    #[test]
    fn test_generated_at_defaults_to_record_timestamp() {
        let record = shop();
        let report = compile_report(&record, &compile(&record));
        assert_eq!(report.metadata.generated_at, "2024-05-01T12:00:00");
        assert_eq!(report.metadata.report_version, "1.0");

        let stamped = ReportCompiler::new()
            .generated_at(Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap())
            .compile(&record, &compile(&record));
        assert_eq!(stamped.metadata.generated_at, "2024-05-02T09:30:00Z");
        assert_eq!(stamped.metadata.analysis_timestamp, "2024-05-01T12:00:00");
    }

    #[test]
    fn test_custom_profile_changes_score() {
        let record = shop();
        let profile = ScoringProfile {
            full_credit_without_opportunities: false,
            ..ScoringProfile::standard()
        };
        let mut empty = record.clone();
        empty.conversion_opportunities.opportunities.clear();

        let standard = compile_report(&empty, &compile(&empty));
        let strict = ReportCompiler::new()
            .scoring_profile(profile)
            .compile(&empty, &compile(&empty));
        assert_eq!(standard.executive_summary.audit_score, 30);
        assert_eq!(strict.executive_summary.audit_score, 0);
    }

    #[test]
    fn test_render_summary() {
        let record = shop();
        let digest = render_summary(&compile_report(&record, &compile(&record))).unwrap();
        assert!(digest.contains("# Analytics Audit: https://shop.example.com"));
        assert!(digest.contains("- Platform: Shopify"));
        assert!(digest.contains("- Google Tag Manager: No"));
        assert!(digest.contains("Website built on Shopify platform"));
        assert!(digest.contains("6 tags, 7 triggers, 11 variables"));
    }

    #[test]
    fn test_render_next_steps() {
        let record = shop();
        let plan = render_next_steps(&compile_report(&record, &compile(&record))).unwrap();
        assert!(plan.contains("[Critical] Install Google Tag Manager (1-2 hours)"));
        assert!(plan.contains("Enhanced ecommerce tracking refinement (As needed)"));
    }
}

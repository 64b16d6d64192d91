//! Executive summary and key findings

use siteaudit_core::AnalysisRecord;
use siteaudit_score::Scorer;

use crate::report::{AnalyticsSetup, ExecutiveSummary};
use crate::tables::{KEY_FINDINGS_LIMIT, TITLE_NOT_FOUND};

pub fn executive_summary(record: &AnalysisRecord, scorer: &Scorer) -> ExecutiveSummary {
    let analytics = &record.analytics_detection;
    let card = scorer.evaluate(record);

    ExecutiveSummary {
        website_title: record
            .basic_info
            .title
            .clone()
            .unwrap_or_else(|| TITLE_NOT_FOUND.to_string()),
        cms_platform: record.cms_detection.primary_cms.clone(),
        audit_score: card.score,
        score_breakdown: card.checks,
        critical_issues: record
            .recommendations
            .iter()
            .filter(|r| r.priority == "High")
            .count(),
        optimization_opportunities: record.conversion_opportunities.total(),
        current_analytics_setup: AnalyticsSetup {
            has_gtm: analytics.has_gtm,
            has_ga4: analytics.has_ga4,
            has_consent_management: analytics.has_consent_management,
        },
        key_findings: key_findings(record),
    }
}

/// Findings in fixed precedence, cut to the first five
pub fn key_findings(record: &AnalysisRecord) -> Vec<String> {
    let analytics = &record.analytics_detection;
    let opportunities = record.conversion_opportunities.total();
    let mut findings = Vec::new();

    if record.cms_known() {
        findings.push(format!(
            "Website built on {} platform",
            record.cms_detection.primary_cms
        ));
    }
    if !analytics.has_gtm {
        findings.push("Google Tag Manager not implemented".to_string());
    }
    if !analytics.has_ga4 {
        findings.push("Google Analytics 4 not detected".to_string());
    }
    if opportunities > 0 {
        findings.push(format!(
            "{} conversion tracking opportunities identified",
            opportunities
        ));
    }
    if !analytics.has_consent_management {
        findings.push("No consent management solution detected".to_string());
    }
    if !record.technical_analysis.is_https {
        findings.push("Website not using HTTPS".to_string());
    }

    findings.truncate(KEY_FINDINGS_LIMIT);
    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use siteaudit_core::{Opportunity, OpportunityKind, Recommendation};

    #[test]
    fn test_all_six_findings_truncate_to_five() {
        let mut record = AnalysisRecord::for_url("https://example.com");
        record.cms_detection.primary_cms = "Wix".to_string();
        record
            .conversion_opportunities
            .opportunities
            .push(Opportunity::new(OpportunityKind::PhoneTracking));

        let findings = key_findings(&record);
        assert_eq!(
            findings,
            vec![
                "Website built on Wix platform",
                "Google Tag Manager not implemented",
                "Google Analytics 4 not detected",
                "1 conversion tracking opportunities identified",
                "No consent management solution detected",
            ]
        );
    }

    #[test]
    fn test_unknown_cms_leaves_room_for_https() {
        let record = AnalysisRecord::for_url("http://example.com");
        let findings = key_findings(&record);
        assert_eq!(findings.len(), 4);
        assert_eq!(findings.last().map(String::as_str), Some("Website not using HTTPS"));
    }

    #[test]
    fn test_clean_site_has_no_findings() {
        let mut record = AnalysisRecord::for_url("https://example.com");
        record.analytics_detection.has_gtm = true;
        record.analytics_detection.has_ga4 = true;
        record.analytics_detection.has_consent_management = true;
        record.technical_analysis.is_https = true;
        assert!(key_findings(&record).is_empty());
    }

    #[test]
    fn test_summary_counts() {
        let mut record = AnalysisRecord::for_url("https://example.com");
        for priority in ["High", "high", "High", "Medium"] {
            record.recommendations.push(Recommendation {
                priority: priority.to_string(),
                ..Recommendation::default()
            });
        }
        record.conversion_opportunities.total_opportunities = Some(3);

        let summary = executive_summary(&record, &Scorer::default());
        assert_eq!(summary.website_title, "Not found");
        assert_eq!(summary.cms_platform, "Unknown");
        assert_eq!(summary.critical_issues, 2);
        assert_eq!(summary.optimization_opportunities, 3);
        assert_eq!(summary.score_breakdown.len(), 8);
        assert_eq!(summary.audit_score, 0);
    }
}

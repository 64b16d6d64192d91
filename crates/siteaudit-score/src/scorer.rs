//! Audit score evaluation
//!
//! Walks the profile's signals in a fixed order and records one check per
//! signal with the points it earned.

use super::profile::{ScoringProfile, MAX_SCORE};
use serde::{Deserialize, Serialize};
use siteaudit_core::AnalysisRecord;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Block {
    Analytics,
    Technical,
    Conversion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Partial,
    Miss,
}

/// Single scored signal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    pub name: String,
    pub block: Block,
    pub status: CheckStatus,
    pub message: String,
    pub awarded: u32,
    pub possible: u32,
}

impl Check {
    fn flag(name: &str, block: Block, present: bool, possible: u32, what: &str) -> Self {
        let (status, awarded, message) = if present {
            (CheckStatus::Pass, possible, format!("{} detected", what))
        } else {
            (CheckStatus::Miss, 0, format!("{} not detected", what))
        };
        Self {
            name: name.to_string(),
            block,
            status,
            message,
            awarded,
            possible,
        }
    }
}

/// Score with its per-signal breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    /// 0-100
    pub score: u32,
    pub checks: Vec<Check>,
    pub profile: String,
}

impl ScoreCard {
    pub fn block_score(&self, block: Block) -> u32 {
        self.checks
            .iter()
            .filter(|c| c.block == block)
            .map(|c| c.awarded)
            .sum()
    }
}

#[derive(Debug, Clone)]
pub struct Scorer {
    profile: ScoringProfile,
}

impl Scorer {
    pub fn new(profile: ScoringProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &ScoringProfile {
        &self.profile
    }

    /// Score a record. Total over any record; missing sections score as absent.
    pub fn evaluate(&self, record: &AnalysisRecord) -> ScoreCard {
        let p = &self.profile;
        let analytics = &record.analytics_detection;
        let technical = &record.technical_analysis;

        let mut checks = vec![
            // === Analytics ===
            Check::flag("gtm", Block::Analytics, analytics.has_gtm, p.gtm, "Google Tag Manager"),
            Check::flag("ga4", Block::Analytics, analytics.has_ga4, p.ga4, "Google Analytics 4"),
            Check::flag(
                "consent",
                Block::Analytics,
                analytics.has_consent_management,
                p.consent,
                "Consent management",
            ),
            // === Technical ===
            Check::flag("https", Block::Technical, technical.is_https, p.https, "HTTPS"),
            Check::flag("data_layer", Block::Technical, technical.has_data_layer, p.data_layer, "Data layer"),
            Check::flag(
                "mobile_optimized",
                Block::Technical,
                technical.is_mobile_optimized,
                p.mobile_optimized,
                "Mobile viewport",
            ),
            Check::flag(
                "schema_markup",
                Block::Technical,
                technical.has_schema_markup,
                p.schema_markup,
                "Schema markup",
            ),
        ];

        // === Conversion Tracking ===
        checks.push(self.conversion_check(record));

        let score = checks.iter().map(|c| c.awarded).sum::<u32>().min(MAX_SCORE);

        debug!(url = %record.url, score, profile = %p.name, "scored record");

        ScoreCard {
            score,
            checks,
            profile: p.name.clone(),
        }
    }

    fn conversion_check(&self, record: &AnalysisRecord) -> Check {
        let possible = self.profile.conversion;
        let opportunities = record.conversion_opportunities.total();
        let tracking = &record.tracking_analysis;

        let (awarded, message) = if opportunities == 0 && self.profile.full_credit_without_opportunities {
            (possible, "No conversion opportunities to track".to_string())
        } else {
            // floor(possible * tracked / forms) with the ratio capped at 1
            let forms = tracking.forms_count.max(1);
            let tracked = tracking.forms_with_tracking.min(forms);
            let earned = u64::from(possible) * u64::from(tracked) / u64::from(forms);
            (
                // tracked <= forms, so earned <= possible
                earned as u32,
                format!(
                    "{} of {} forms tracked",
                    tracking.forms_with_tracking, tracking.forms_count
                ),
            )
        };

        let status = if awarded == possible {
            CheckStatus::Pass
        } else if awarded == 0 {
            CheckStatus::Miss
        } else {
            CheckStatus::Partial
        };

        Check {
            name: "conversion_tracking".to_string(),
            block: Block::Conversion,
            status,
            message,
            awarded,
            possible,
        }
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::new(ScoringProfile::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siteaudit_core::{Opportunity, OpportunityKind};

    fn all_flags() -> AnalysisRecord {
        let mut record = AnalysisRecord::for_url("https://example.com");
        record.analytics_detection.has_gtm = true;
        record.analytics_detection.has_ga4 = true;
        record.analytics_detection.has_consent_management = true;
        record.technical_analysis.is_https = true;
        record.technical_analysis.has_data_layer = true;
        record.technical_analysis.is_mobile_optimized = true;
        record.technical_analysis.has_schema_markup = true;
        record
    }

    fn with_forms(mut record: AnalysisRecord, count: u32, tracked: u32) -> AnalysisRecord {
        record
            .conversion_opportunities
            .opportunities
            .push(Opportunity::new(OpportunityKind::LeadGeneration));
        record.tracking_analysis.forms_count = count;
        record.tracking_analysis.forms_with_tracking = tracked;
        record
    }

    #[test]
    fn test_perfect_record() {
        let card = Scorer::default().evaluate(&all_flags());
        assert_eq!(card.score, 100);
        assert!(card.checks.iter().all(|c| c.status == CheckStatus::Pass));
        assert_eq!(card.checks.len(), 8);
    }

    #[test]
    fn test_empty_record_keeps_conversion_credit() {
        let card = Scorer::default().evaluate(&AnalysisRecord::for_url("https://example.com"));
        assert_eq!(card.score, 30);
        assert_eq!(card.block_score(Block::Analytics), 0);
        assert_eq!(card.block_score(Block::Technical), 0);
        assert_eq!(card.block_score(Block::Conversion), 30);
    }

    #[test]
    fn test_partial_form_tracking_floors() {
        let card = Scorer::default().evaluate(&with_forms(all_flags(), 3, 1));
        assert_eq!(card.block_score(Block::Conversion), 10);
        assert_eq!(card.score, 80);

        let card = Scorer::default().evaluate(&with_forms(all_flags(), 4, 3));
        assert_eq!(card.block_score(Block::Conversion), 22);
        assert_eq!(card.checks[7].status, CheckStatus::Partial);
    }

    #[test]
    fn test_no_forms_with_opportunities() {
        let card = Scorer::default().evaluate(&with_forms(all_flags(), 0, 0));
        assert_eq!(card.block_score(Block::Conversion), 0);
        assert_eq!(card.score, 70);
    }

    #[test]
    fn test_inconsistent_counts_are_capped() {
        let card = Scorer::default().evaluate(&with_forms(all_flags(), 2, 5));
        assert_eq!(card.block_score(Block::Conversion), 30);
        assert_eq!(card.score, 100);
    }

    #[test]
    fn test_huge_form_counts_do_not_overflow() {
        let card = Scorer::default().evaluate(&with_forms(all_flags(), u32::MAX, u32::MAX));
        assert_eq!(card.block_score(Block::Conversion), 30);

        let card = Scorer::default().evaluate(&with_forms(all_flags(), u32::MAX, u32::MAX / 2));
        assert_eq!(card.block_score(Block::Conversion), 14);
        assert_eq!(card.score, 84);
    }

    #[test]
    fn test_reported_total_drives_conversion_branch() {
        let mut record = all_flags();
        record.conversion_opportunities.total_opportunities = Some(2);
        record.tracking_analysis.forms_count = 2;
        let card = Scorer::default().evaluate(&record);
        assert_eq!(card.block_score(Block::Conversion), 0);
    }

    #[test]
    fn test_profile_without_free_credit() {
        let profile = ScoringProfile {
            full_credit_without_opportunities: false,
            ..ScoringProfile::standard()
        };
        let card = Scorer::new(profile).evaluate(&AnalysisRecord::for_url("https://example.com"));
        assert_eq!(card.score, 0);
    }
}

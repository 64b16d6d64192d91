//! siteaudit Score: weighted audit score
//!
//! Scores an `AnalysisRecord` from 0 to 100 across three blocks: analytics
//! tooling, technical setup and conversion tracking coverage.
//!
//! # Example
//!
//! ```
//! use siteaudit_core::AnalysisRecord;
//! use siteaudit_score::{score, Scorer, ScoringProfile};
//!
//! let record = AnalysisRecord::for_url("https://example.com");
//! assert_eq!(score(&record), 30);
//!
//! let card = Scorer::new(ScoringProfile::standard()).evaluate(&record);
//! println!("{} ({} checks)", card.score, card.checks.len());
//! ```

pub mod profile;
pub mod scorer;

pub use profile::{ScoringProfile, MAX_SCORE};
pub use scorer::{Block, Check, CheckStatus, ScoreCard, Scorer};

use siteaudit_core::AnalysisRecord;

/// Score with the standard profile
pub fn score(record: &AnalysisRecord) -> u32 {
    evaluate(record).score
}

/// Full score card with the standard profile
pub fn evaluate(record: &AnalysisRecord) -> ScoreCard {
    Scorer::default().evaluate(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use siteaudit_core::{Opportunity, OpportunityKind};

    #[test]
    fn test_single_ecommerce_all_flags_false() {
        let mut record = AnalysisRecord::for_url("https://shop.example.com");
        record
            .conversion_opportunities
            .opportunities
            .push(Opportunity::new(OpportunityKind::Ecommerce).priority("high"));

        assert_eq!(score(&record), 0);
    }

    #[test]
    fn test_score_card_serializes() {
        let card = evaluate(&AnalysisRecord::default());
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["score"], 30);
        assert_eq!(json["checks"][0]["block"], "analytics");
        assert_eq!(json["checks"][7]["status"], "pass");
        assert_eq!(json["profile"], "standard@1.0");
    }
}

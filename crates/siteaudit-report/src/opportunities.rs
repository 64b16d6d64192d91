//! Conversion opportunity section

use siteaudit_core::AnalysisRecord;

use crate::report::{owned, DetailedOpportunity, OpportunityReport, OpportunitySummary};
use crate::tables::implementation_notes;

pub fn opportunity_report(record: &AnalysisRecord) -> OpportunityReport {
    let opportunities = &record.conversion_opportunities;

    OpportunityReport {
        summary: OpportunitySummary {
            total_opportunities: opportunities.total(),
            recommended_events: opportunities.recommended_events(),
        },
        detailed_opportunities: opportunities
            .opportunities
            .iter()
            .map(|o| DetailedOpportunity {
                kind: o.kind.clone(),
                priority: o.priority.clone(),
                description: o.description.clone(),
                recommended_events: o.events.clone(),
                implementation_notes: owned(implementation_notes(&o.kind)),
            })
            .collect(),
    }
}

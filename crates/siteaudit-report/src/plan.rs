//! Implementation plan: container shape, rollout steps, data layer samples
//! and the QA checklist.

use siteaudit_core::AnalysisRecord;
use siteaudit_gtm::CompiledConfiguration;

use crate::report::{
    owned, BaseDataLayer, ContainerStructure, DataLayerStructure, EventDataLayer, GtmSetup,
    ImplementationPlan, ImplementationStep, TestingChecklist,
};
use crate::tables::{
    conversion_checklist, data_layer_sample, BASE_DATA_LAYER, CHECKLIST_BASIC_SETUP,
    CHECKLIST_PRIVACY, CHECKLIST_TECHNICAL, IMPLEMENTATION_STEPS,
};

pub fn implementation_plan(record: &AnalysisRecord, config: &CompiledConfiguration) -> ImplementationPlan {
    ImplementationPlan {
        gtm_setup: GtmSetup {
            container_structure: ContainerStructure {
                tags_count: config.tags.len(),
                triggers_count: config.triggers.len(),
                variables_count: config.variables.len(),
            },
            implementation_steps: IMPLEMENTATION_STEPS
                .iter()
                .zip(1..)
                .map(|((title, description, time), step)| ImplementationStep {
                    step,
                    title: title.to_string(),
                    description: description.to_string(),
                    estimated_time: time.to_string(),
                })
                .collect(),
        },
        data_layer_structure: data_layer_structure(record),
        testing_checklist: testing_checklist(record),
    }
}

/// One event sample per instrumented opportunity, repeated kinds included
fn data_layer_structure(record: &AnalysisRecord) -> DataLayerStructure {
    let event_specific = record
        .conversion_opportunities
        .opportunities
        .iter()
        .filter_map(|o| data_layer_sample(&o.kind))
        .map(|sample| EventDataLayer {
            event_type: sample.event_type.to_string(),
            description: sample.description.to_string(),
            code: sample.code.to_string(),
        })
        .collect();

    DataLayerStructure {
        base_structure: BaseDataLayer {
            description: BASE_DATA_LAYER.description.to_string(),
            code: BASE_DATA_LAYER.code.to_string(),
        },
        event_specific,
    }
}

fn testing_checklist(record: &AnalysisRecord) -> TestingChecklist {
    let conversion_tracking = record
        .conversion_opportunities
        .opportunities
        .iter()
        .flat_map(|o| conversion_checklist(&o.kind).iter())
        .map(|item| item.to_string())
        .collect();

    TestingChecklist {
        basic_setup: owned(CHECKLIST_BASIC_SETUP),
        conversion_tracking,
        privacy_compliance: owned(CHECKLIST_PRIVACY),
        technical_validation: owned(CHECKLIST_TECHNICAL),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siteaudit_core::{Opportunity, OpportunityKind};
    use siteaudit_gtm::compile;

    fn record_with(kinds: &[OpportunityKind]) -> AnalysisRecord {
        let mut record = AnalysisRecord::for_url("https://example.com");
        for kind in kinds {
            record
                .conversion_opportunities
                .opportunities
                .push(Opportunity::new(kind.clone()));
        }
        record
    }

    #[test]
    fn test_counts_come_from_config() {
        let record = record_with(&[OpportunityKind::Ecommerce]);
        let plan = implementation_plan(&record, &compile(&record));

        let structure = plan.gtm_setup.container_structure;
        assert_eq!(structure.tags_count, 6);
        assert_eq!(structure.triggers_count, 7);
        assert_eq!(structure.variables_count, 11);

        let steps = &plan.gtm_setup.implementation_steps;
        assert_eq!(steps.len(), 7);
        assert_eq!(steps[0].step, 1);
        assert_eq!(steps[6].title, "Publish Container");
    }

    #[test]
    fn test_samples_follow_input_order() {
        let record = record_with(&[
            OpportunityKind::LeadGeneration,
            OpportunityKind::PhoneTracking,
            OpportunityKind::Ecommerce,
        ]);
        let plan = implementation_plan(&record, &compile(&record));

        let events: Vec<&str> = plan
            .data_layer_structure
            .event_specific
            .iter()
            .map(|e| e.event_type.as_str())
            .collect();
        assert_eq!(events, vec!["Lead Generation Events", "E-commerce Events"]);
        assert!(plan.data_layer_structure.base_structure.code.starts_with("window.dataLayer"));

        let checklist = &plan.testing_checklist;
        assert_eq!(checklist.conversion_tracking.len(), 3 + 4);
        assert_eq!(checklist.conversion_tracking[0], "Form submission events tracked");
        assert_eq!(checklist.basic_setup.len(), 4);
        assert_eq!(checklist.privacy_compliance.len(), 3);
        assert_eq!(checklist.technical_validation.len(), 4);
    }

    #[test]
    fn test_no_opportunities_no_samples() {
        let record = record_with(&[]);
        let plan = implementation_plan(&record, &compile(&record));
        assert!(plan.data_layer_structure.event_specific.is_empty());
        assert!(plan.testing_checklist.conversion_tracking.is_empty());
    }
}

//! Opportunity-to-configuration compiler
//!
//! One pass over the fixed kind precedence builds variables, then triggers
//! (recording them in a `TriggerIndex`), then tags resolved through that
//! index. Ids are assigned per collection, starting at "1", in emission order.

use serde::{Deserialize, Serialize};
use siteaudit_core::{AnalysisRecord, AuditError, OpportunityKind};
use tracing::debug;

use crate::catalog::{
    self, TagSpec, TriggerSpec, VariableSpec, ALL_PAGES, BASELINE_TRIGGERS, CONFIG_VARIABLE,
};
use crate::entities::{
    reference, Condition, FiringOption, Parameter, Tag, TagKind, Trigger, TriggerKind, Variable,
    VariableKind,
};
use crate::index::TriggerIndex;
use crate::settings::CompilerSettings;

/// Sequential string ids for one collection
#[derive(Debug, Default)]
struct IdSequence(u32);

impl IdSequence {
    fn next_id(&mut self) -> String {
        self.0 += 1;
        self.0.to_string()
    }
}

/// The compiled container contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledConfiguration {
    pub variables: Vec<Variable>,
    pub triggers: Vec<Trigger>,
    pub tags: Vec<Tag>,
}

impl CompiledConfiguration {
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name == name)
    }

    pub fn trigger(&self, name: &str) -> Option<&Trigger> {
        self.triggers.iter().find(|t| t.name == name)
    }

    pub fn tag(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|t| t.name == name)
    }

    /// `(tag id, trigger id)` pairs whose trigger id is not in `triggers`
    pub fn dangling_references(&self) -> Vec<(String, String)> {
        self.tags
            .iter()
            .flat_map(|tag| {
                tag.firing_trigger_ids
                    .iter()
                    .filter(|id| !self.triggers.iter().any(|t| &t.id == *id))
                    .map(|id| (tag.id.clone(), id.clone()))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    pub fn to_json_pretty(&self) -> Result<String, AuditError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// blake3 of the compact JSON; stable for identical configurations
    pub fn fingerprint(&self) -> Result<String, AuditError> {
        let bytes = serde_json::to_vec(self)?;
        Ok(blake3::hash(&bytes).to_hex().to_string())
    }
}

/// Configuration compiler
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    settings: CompilerSettings,
}

impl Compiler {
    pub fn new(settings: CompilerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &CompilerSettings {
        &self.settings
    }

    /// Compile a record into variables, triggers and tags. Never fails.
    pub fn compile(&self, record: &AnalysisRecord) -> CompiledConfiguration {
        let opportunities = &record.conversion_opportunities;
        let kinds: Vec<OpportunityKind> = OpportunityKind::PRECEDENCE
            .into_iter()
            .filter(|kind| opportunities.contains(kind))
            .collect();

        for ignored in opportunities.opportunities.iter().filter(|o| !o.kind.is_known()) {
            debug!(kind = %ignored.kind, "unrecognized opportunity type ignored");
        }

        let variables = self.build_variables(&kinds);
        let (triggers, index) = build_triggers(&kinds);
        let tags = build_tags(&kinds, &index);

        debug!(
            url = %record.url,
            kinds = ?kinds.iter().map(OpportunityKind::as_str).collect::<Vec<_>>(),
            variables = variables.len(),
            triggers = triggers.len(),
            tags = tags.len(),
            "compiled container configuration"
        );

        CompiledConfiguration {
            variables,
            triggers,
            tags,
        }
    }

    fn build_variables(&self, kinds: &[OpportunityKind]) -> Vec<Variable> {
        let mut ids = IdSequence::default();
        let mut variables = vec![self.config_variable(ids.next_id())];

        for kind in kinds {
            for spec in catalog::rules_for(kind).variables {
                variables.push(data_layer_variable(ids.next_id(), spec));
            }
        }
        variables
    }

    fn config_variable(&self, id: String) -> Variable {
        let s = &self.settings;
        Variable {
            id,
            name: CONFIG_VARIABLE.to_string(),
            kind: VariableKind::GoogleTagSettings,
            parameters: vec![
                Parameter::template("configId", &s.measurement_id),
                Parameter::boolean("anonymizeIp", s.anonymize_ip),
                Parameter::boolean("enableLinkDomains", s.enable_link_domains),
                Parameter::map(
                    "customParameters",
                    vec![
                        Parameter::template("currency", &s.currency),
                        Parameter::template("send_page_view", s.send_page_view.to_string()),
                    ],
                ),
            ],
            data_layer_key: None,
        }
    }
}

/// Compile with default settings
pub fn compile(record: &AnalysisRecord) -> CompiledConfiguration {
    Compiler::default().compile(record)
}

fn data_layer_variable(id: String, spec: &VariableSpec) -> Variable {
    Variable {
        id,
        name: spec.name.to_string(),
        kind: VariableKind::DataLayer,
        parameters: vec![
            Parameter::integer("dataLayerVersion", 2),
            Parameter::boolean("setDefaultValue", false),
            Parameter::template("name", spec.key),
        ],
        data_layer_key: Some(spec.key.to_string()),
    }
}

fn build_triggers(kinds: &[OpportunityKind]) -> (Vec<Trigger>, TriggerIndex) {
    let mut ids = IdSequence::default();
    let mut index = TriggerIndex::new();
    let mut triggers = Vec::new();

    for spec in BASELINE_TRIGGERS {
        let trigger = trigger_from(ids.next_id(), spec);
        index.insert(&trigger.name, &trigger.id, None);
        triggers.push(trigger);
    }

    for kind in kinds {
        for spec in catalog::rules_for(kind).triggers {
            let trigger = trigger_from(ids.next_id(), spec);
            index.insert(&trigger.name, &trigger.id, Some(kind));
            triggers.push(trigger);
        }
    }

    (triggers, index)
}

fn trigger_from(id: String, spec: &TriggerSpec) -> Trigger {
    let condition = spec
        .rule
        .map(|rule| Condition::new(rule.operator, rule.subject, rule.operand));

    // Custom events filter on the event name; auto-events on the element
    let (custom_event_filter, filter) = match (spec.kind, condition) {
        (TriggerKind::CustomEvent, Some(c)) => (vec![c], Vec::new()),
        (_, Some(c)) => (Vec::new(), vec![c]),
        (_, None) => (Vec::new(), Vec::new()),
    };

    Trigger {
        id,
        name: spec.name.to_string(),
        kind: spec.kind,
        custom_event_filter,
        filter,
        wait_for_tags: spec.wait_for_tags,
        check_validation: spec.check_validation,
    }
}

fn build_tags(kinds: &[OpportunityKind], index: &TriggerIndex) -> Vec<Tag> {
    let mut ids = IdSequence::default();
    let config_ref = reference(CONFIG_VARIABLE);

    let mut tags = vec![
        Tag {
            id: ids.next_id(),
            name: "GA4 - Configuration".to_string(),
            kind: TagKind::GoogleTag,
            parameters: vec![Parameter::template("configId", &config_ref)],
            firing_trigger_ids: index.resolve("GA4 - Configuration", ALL_PAGES),
            firing_option: FiringOption::OncePerEvent,
        },
        Tag {
            id: ids.next_id(),
            name: "GA4 - Page View".to_string(),
            kind: TagKind::Ga4Event,
            parameters: vec![
                Parameter::template("measurementId", &config_ref),
                Parameter::template("eventName", "page_view"),
            ],
            firing_trigger_ids: index.resolve("GA4 - Page View", ALL_PAGES),
            firing_option: FiringOption::OncePerEvent,
        },
    ];

    for kind in kinds {
        for spec in catalog::rules_for(kind).tags {
            tags.push(event_tag(ids.next_id(), spec, &config_ref, index));
        }
    }
    tags
}

fn event_tag(id: String, spec: &TagSpec, config_ref: &str, index: &TriggerIndex) -> Tag {
    let event_parameters = spec
        .parameters
        .iter()
        .map(|(key, source)| Parameter::template(*key, reference(source.name())))
        .collect();

    Tag {
        id,
        name: spec.name.to_string(),
        kind: TagKind::Ga4Event,
        parameters: vec![
            Parameter::template("measurementId", config_ref),
            Parameter::template("eventName", spec.event),
            Parameter::map("eventParameters", event_parameters),
        ],
        firing_trigger_ids: index.resolve(spec.name, spec.trigger),
        firing_option: FiringOption::OncePerEvent,
    }
}

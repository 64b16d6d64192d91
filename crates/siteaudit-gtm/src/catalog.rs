//! Rule catalog: what each opportunity kind contributes to a container
//!
//! Every kind maps to one constant `KindRules` table. The compiler walks
//! these tables; it never branches on opportunity strings itself.

use siteaudit_core::OpportunityKind;

use crate::entities::{MatchOperator, TriggerKind};

/// Name of the baseline configuration variable every tag references
pub const CONFIG_VARIABLE: &str = "GA4 Configuration";

/// Name of the baseline trigger the baseline tags fire on
pub const ALL_PAGES: &str = "All Pages";

/// Click-URL regex for downloadable documents and media
pub const DOWNLOAD_PATTERN: &str = r"\.(pdf|doc|docx|xls|xlsx|zip|mp4|mp3)$";

/// A data-layer variable: display name and the key it reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableSpec {
    pub name: &'static str,
    pub key: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSpec {
    pub operator: MatchOperator,
    pub subject: &'static str,
    pub operand: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerSpec {
    pub name: &'static str,
    pub kind: TriggerKind,
    pub rule: Option<RuleSpec>,
    pub wait_for_tags: bool,
    pub check_validation: bool,
}

/// Where an event parameter takes its value from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    /// A variable emitted by the same kind's rules
    Variable(&'static str),
    /// A GTM built-in variable
    BuiltIn(&'static str),
}

impl ValueSource {
    pub fn name(&self) -> &'static str {
        match self {
            ValueSource::Variable(name) | ValueSource::BuiltIn(name) => name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagSpec {
    pub name: &'static str,
    pub event: &'static str,
    /// Trigger this tag fires on, resolved by name at compile time
    pub trigger: &'static str,
    pub parameters: &'static [(&'static str, ValueSource)],
}

/// Everything one opportunity kind adds to the container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindRules {
    pub variables: &'static [VariableSpec],
    pub triggers: &'static [TriggerSpec],
    pub tags: &'static [TagSpec],
}

impl KindRules {
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty() && self.triggers.is_empty() && self.tags.is_empty()
    }
}

const fn custom_event(name: &'static str, event: &'static str, wait_for_tags: bool) -> TriggerSpec {
    TriggerSpec {
        name,
        kind: TriggerKind::CustomEvent,
        rule: Some(RuleSpec {
            operator: MatchOperator::Equals,
            subject: "{{Event}}",
            operand: event,
        }),
        wait_for_tags,
        check_validation: false,
    }
}

const fn link_click(name: &'static str, operator: MatchOperator, operand: &'static str) -> TriggerSpec {
    TriggerSpec {
        name,
        kind: TriggerKind::LinkClick,
        rule: Some(RuleSpec {
            operator,
            subject: "{{Click URL}}",
            operand,
        }),
        wait_for_tags: true,
        check_validation: false,
    }
}

const fn page_trigger(name: &'static str, kind: TriggerKind) -> TriggerSpec {
    TriggerSpec {
        name,
        kind,
        rule: None,
        wait_for_tags: false,
        check_validation: false,
    }
}

// ============================================================================
// BASELINE
// ============================================================================

pub const BASELINE_TRIGGERS: &[TriggerSpec] = &[
    page_trigger(ALL_PAGES, TriggerKind::Pageview),
    page_trigger("DOM Ready", TriggerKind::DomReady),
    page_trigger("Window Loaded", TriggerKind::WindowLoaded),
];

// ============================================================================
// ECOMMERCE
// ============================================================================

const ECOMMERCE_PARAMS: &[(&str, ValueSource)] = &[
    ("currency", ValueSource::Variable("DLV - Currency")),
    ("value", ValueSource::Variable("DLV - Value")),
    ("item_id", ValueSource::Variable("DLV - Item ID")),
    ("item_name", ValueSource::Variable("DLV - Item Name")),
    ("item_category", ValueSource::Variable("DLV - Item Category")),
    ("quantity", ValueSource::Variable("DLV - Quantity")),
];

pub const ECOMMERCE: KindRules = KindRules {
    variables: &[
        VariableSpec { name: "DLV - Event Category", key: "event_category" },
        VariableSpec { name: "DLV - Event Action", key: "event_action" },
        VariableSpec { name: "DLV - Event Label", key: "event_label" },
        VariableSpec { name: "DLV - Value", key: "value" },
        VariableSpec { name: "DLV - Currency", key: "currency" },
        VariableSpec { name: "DLV - Item ID", key: "item_id" },
        VariableSpec { name: "DLV - Item Name", key: "item_name" },
        VariableSpec { name: "DLV - Item Category", key: "item_category" },
        VariableSpec { name: "DLV - Quantity", key: "quantity" },
        VariableSpec { name: "DLV - Price", key: "price" },
    ],
    triggers: &[
        custom_event("View Item", "view_item", false),
        custom_event("Add to Cart", "add_to_cart", false),
        custom_event("Begin Checkout", "begin_checkout", false),
        custom_event("Purchase", "purchase", false),
    ],
    tags: &[
        TagSpec { name: "GA4 - View Item", event: "view_item", trigger: "View Item", parameters: ECOMMERCE_PARAMS },
        TagSpec { name: "GA4 - Add to Cart", event: "add_to_cart", trigger: "Add to Cart", parameters: ECOMMERCE_PARAMS },
        TagSpec { name: "GA4 - Begin Checkout", event: "begin_checkout", trigger: "Begin Checkout", parameters: ECOMMERCE_PARAMS },
        TagSpec { name: "GA4 - Purchase", event: "purchase", trigger: "Purchase", parameters: ECOMMERCE_PARAMS },
    ],
};

// ============================================================================
// LEAD GENERATION
// ============================================================================

const LEAD_PARAMS: &[(&str, ValueSource)] = &[
    ("form_name", ValueSource::Variable("DLV - Form Name")),
    ("form_id", ValueSource::Variable("DLV - Form ID")),
    ("lead_type", ValueSource::Variable("DLV - Lead Type")),
];

pub const LEAD_GENERATION: KindRules = KindRules {
    variables: &[
        VariableSpec { name: "DLV - Form Name", key: "form_name" },
        VariableSpec { name: "DLV - Form ID", key: "form_id" },
        VariableSpec { name: "DLV - Lead Type", key: "lead_type" },
        VariableSpec { name: "DLV - Lead Source", key: "lead_source" },
    ],
    triggers: &[
        TriggerSpec {
            name: "Form Submit - All",
            kind: TriggerKind::FormSubmission,
            rule: None,
            wait_for_tags: true,
            check_validation: true,
        },
        custom_event("Lead Generated", "generate_lead", true),
        custom_event("Newsletter Signup", "sign_up", true),
    ],
    tags: &[
        TagSpec { name: "GA4 - Form Submit", event: "form_submit", trigger: "Form Submit - All", parameters: LEAD_PARAMS },
        TagSpec { name: "GA4 - Lead Generated", event: "generate_lead", trigger: "Lead Generated", parameters: LEAD_PARAMS },
    ],
};

// ============================================================================
// CLICK-BASED KINDS
// ============================================================================

pub const FILE_DOWNLOAD: KindRules = KindRules {
    variables: &[],
    triggers: &[link_click("File Download", MatchOperator::MatchesRegex, DOWNLOAD_PATTERN)],
    tags: &[TagSpec {
        name: "GA4 - File Download",
        event: "file_download",
        trigger: "File Download",
        parameters: &[
            ("file_name", ValueSource::BuiltIn("Click URL")),
            ("link_text", ValueSource::BuiltIn("Click Text")),
        ],
    }],
};

pub const PHONE_TRACKING: KindRules = KindRules {
    variables: &[],
    triggers: &[link_click("Phone Click", MatchOperator::StartsWith, "tel:")],
    tags: &[TagSpec {
        name: "GA4 - Phone Click",
        event: "phone_click",
        trigger: "Phone Click",
        parameters: &[
            ("phone_number", ValueSource::BuiltIn("Click URL")),
            ("link_text", ValueSource::BuiltIn("Click Text")),
        ],
    }],
};

/// Engagement is reported but needs no container entities
pub const ENGAGEMENT: KindRules = KindRules {
    variables: &[],
    triggers: &[],
    tags: &[],
};

pub const NO_RULES: KindRules = KindRules {
    variables: &[],
    triggers: &[],
    tags: &[],
};

/// Rules for one opportunity kind; unrecognized kinds contribute nothing
pub fn rules_for(kind: &OpportunityKind) -> &'static KindRules {
    match kind {
        OpportunityKind::Ecommerce => &ECOMMERCE,
        OpportunityKind::LeadGeneration => &LEAD_GENERATION,
        OpportunityKind::Engagement => &ENGAGEMENT,
        OpportunityKind::FileDownload => &FILE_DOWNLOAD,
        OpportunityKind::PhoneTracking => &PHONE_TRACKING,
        OpportunityKind::Unrecognized(_) => &NO_RULES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_sizes() {
        assert_eq!(ECOMMERCE.variables.len(), 10);
        assert_eq!(ECOMMERCE.triggers.len(), 4);
        assert_eq!(LEAD_GENERATION.variables.len(), 4);
        assert_eq!(LEAD_GENERATION.triggers.len(), 3);
        assert_eq!(FILE_DOWNLOAD.triggers.len(), 1);
        assert_eq!(PHONE_TRACKING.triggers.len(), 1);
        assert!(ENGAGEMENT.is_empty());
        assert!(rules_for(&OpportunityKind::parse("chatbot")).is_empty());
    }

    #[test]
    fn test_tags_name_triggers_of_their_own_kind() {
        for kind in OpportunityKind::PRECEDENCE.iter() {
            let rules = rules_for(kind);
            for tag in rules.tags {
                assert!(
                    rules.triggers.iter().any(|t| t.name == tag.trigger),
                    "{} names missing trigger {}",
                    tag.name,
                    tag.trigger
                );
            }
        }
    }

    #[test]
    fn test_tag_variables_belong_to_their_kind() {
        for kind in OpportunityKind::PRECEDENCE.iter() {
            let rules = rules_for(kind);
            for tag in rules.tags {
                for (_, source) in tag.parameters {
                    if let ValueSource::Variable(name) = source {
                        assert!(rules.variables.iter().any(|v| v.name == *name), "{} unknown", name);
                    }
                }
            }
        }
    }

    #[test]
    fn test_only_ecommerce_events_skip_wait_for_tags() {
        for kind in OpportunityKind::PRECEDENCE.iter() {
            for trigger in rules_for(kind).triggers {
                let expected = *kind != OpportunityKind::Ecommerce;
                assert_eq!(trigger.wait_for_tags, expected, "{}", trigger.name);
            }
        }
    }

    #[test]
    fn test_names_unique_across_catalog() {
        let mut names: Vec<&str> = BASELINE_TRIGGERS.iter().map(|t| t.name).collect();
        for kind in OpportunityKind::PRECEDENCE.iter() {
            names.extend(rules_for(kind).triggers.iter().map(|t| t.name));
        }
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }
}

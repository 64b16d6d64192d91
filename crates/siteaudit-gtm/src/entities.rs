//! Container entities: variables, triggers, tags
//!
//! Field names serialize to the GTM export format (`variableId`, `type`,
//! `parameter`, `firingTriggerId`, ...), so a compiled configuration can be
//! dropped straight into a container import.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

/// GTM reference syntax for a variable or built-in (`{{Click URL}}`)
pub fn reference(name: &str) -> String {
    format!("{{{{{}}}}}", name)
}

// ============================================================================
// PARAMETERS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParameterKind {
    Template,
    Boolean,
    Integer,
    Map,
}

/// A typed key/value pair, or a nested map of them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(rename = "type")]
    pub kind: ParameterKind,
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map: Option<Vec<Parameter>>,
}

impl Parameter {
    pub fn template(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: ParameterKind::Template,
            key: key.into(),
            value: Some(value.into()),
            map: None,
        }
    }

    pub fn boolean(key: impl Into<String>, value: bool) -> Self {
        Self {
            kind: ParameterKind::Boolean,
            key: key.into(),
            value: Some(value.to_string()),
            map: None,
        }
    }

    pub fn integer(key: impl Into<String>, value: i64) -> Self {
        Self {
            kind: ParameterKind::Integer,
            key: key.into(),
            value: Some(value.to_string()),
            map: None,
        }
    }

    pub fn map(key: impl Into<String>, entries: Vec<Parameter>) -> Self {
        Self {
            kind: ParameterKind::Map,
            key: key.into(),
            value: None,
            map: Some(entries),
        }
    }
}

/// Find a parameter by key in a flat list
pub fn find_parameter<'a>(parameters: &'a [Parameter], key: &str) -> Option<&'a Parameter> {
    parameters.iter().find(|p| p.key == key)
}

// ============================================================================
// VARIABLES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariableKind {
    /// Google tag configuration settings
    #[serde(rename = "gcs")]
    GoogleTagSettings,
    /// Data-layer variable
    #[serde(rename = "v")]
    DataLayer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "VariableRepr")]
pub struct Variable {
    #[serde(rename = "variableId")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: VariableKind,
    #[serde(rename = "parameter")]
    pub parameters: Vec<Parameter>,
    /// Data-layer field read by the variable; written only as the `name` parameter
    #[serde(skip_serializing)]
    pub data_layer_key: Option<String>,
}

/// Wire form of a variable; the data-layer key is recovered from `parameter`
#[derive(Deserialize)]
struct VariableRepr {
    #[serde(rename = "variableId")]
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: VariableKind,
    #[serde(rename = "parameter", default)]
    parameters: Vec<Parameter>,
}

impl From<VariableRepr> for Variable {
    fn from(repr: VariableRepr) -> Self {
        let data_layer_key = match repr.kind {
            VariableKind::DataLayer => {
                find_parameter(&repr.parameters, "name").and_then(|p| p.value.clone())
            }
            VariableKind::GoogleTagSettings => None,
        };
        Self {
            id: repr.id,
            name: repr.name,
            kind: repr.kind,
            parameters: repr.parameters,
            data_layer_key,
        }
    }
}

// ============================================================================
// TRIGGERS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerKind {
    Pageview,
    DomReady,
    WindowLoaded,
    CustomEvent,
    FormSubmission,
    LinkClick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchOperator {
    Equals,
    MatchesRegex,
    StartsWith,
}

/// Filter condition: `arg0` is the inspected value, `arg1` the operand
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(rename = "type")]
    pub operator: MatchOperator,
    #[serde(rename = "parameter")]
    pub parameters: Vec<Parameter>,
}

impl Condition {
    pub fn new(operator: MatchOperator, subject: &str, operand: &str) -> Self {
        Self {
            operator,
            parameters: vec![
                Parameter::template("arg0", subject),
                Parameter::template("arg1", operand),
            ],
        }
    }

    /// Inspected value, e.g. `{{Event}}`
    pub fn subject(&self) -> Option<&str> {
        find_parameter(&self.parameters, "arg0").and_then(|p| p.value.as_deref())
    }

    /// Value compared against, e.g. `purchase`
    pub fn operand(&self) -> Option<&str> {
        find_parameter(&self.parameters, "arg1").and_then(|p| p.value.as_deref())
    }

    /// Evaluate the condition against a concrete value, as GTM preview would
    pub fn matches(&self, value: &str) -> bool {
        let Some(operand) = self.operand() else {
            return false;
        };
        match self.operator {
            MatchOperator::Equals => value == operand,
            MatchOperator::StartsWith => value.starts_with(operand),
            MatchOperator::MatchesRegex => {
                compiled(operand).map_or(false, |re| re.is_match(value))
            }
        }
    }
}

/// Patterns compiled so far; an invalid pattern is cached as `None`
static PATTERNS: Lazy<Mutex<HashMap<String, Option<Regex>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

fn compiled(pattern: &str) -> Option<Regex> {
    let mut cache = PATTERNS.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    cache
        .entry(pattern.to_string())
        .or_insert_with(|| Regex::new(pattern).ok())
        .clone()
}

mod flag {
    //! GTM writes trigger flags as `{"type": "BOOLEAN", "value": "true"}`
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Repr {
        #[serde(rename = "type")]
        kind: String,
        value: String,
    }

    pub fn serialize<S: Serializer>(on: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        Repr {
            kind: "BOOLEAN".to_string(),
            value: on.to_string(),
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(Repr::deserialize(deserializer)?.value == "true")
    }

    pub fn is_off(on: &bool) -> bool {
        !*on
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    #[serde(rename = "triggerId")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TriggerKind,
    /// Event-name filter (custom-event triggers)
    #[serde(rename = "customEventFilter", default, skip_serializing_if = "Vec::is_empty")]
    pub custom_event_filter: Vec<Condition>,
    /// Auto-event filter (link-click triggers)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<Condition>,
    #[serde(rename = "waitForTags", with = "flag", default, skip_serializing_if = "flag::is_off")]
    pub wait_for_tags: bool,
    #[serde(rename = "checkValidation", with = "flag", default, skip_serializing_if = "flag::is_off")]
    pub check_validation: bool,
}

impl Trigger {
    /// The single condition deciding whether the trigger fires, if any
    pub fn match_rule(&self) -> Option<&Condition> {
        self.custom_event_filter
            .first()
            .or_else(|| self.filter.first())
    }
}

// ============================================================================
// TAGS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TagKind {
    /// Google tag (configuration)
    #[serde(rename = "gcs")]
    GoogleTag,
    /// GA4 event
    #[serde(rename = "gev")]
    Ga4Event,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FiringOption {
    OncePerEvent,
    OncePerLoad,
    Unlimited,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "tagId")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TagKind,
    #[serde(rename = "parameter")]
    pub parameters: Vec<Parameter>,
    #[serde(rename = "firingTriggerId")]
    pub firing_trigger_ids: Vec<String>,
    #[serde(rename = "tagFiringOption")]
    pub firing_option: FiringOption,
}

impl Tag {
    /// GA4 event name sent by the tag (`None` for the configuration tag)
    pub fn event_name(&self) -> Option<&str> {
        find_parameter(&self.parameters, "eventName").and_then(|p| p.value.as_deref())
    }

    /// Event parameter map entries as `(key, value)` pairs
    pub fn event_parameters(&self) -> Vec<(&str, &str)> {
        find_parameter(&self.parameters, "eventParameters")
            .and_then(|p| p.map.as_ref())
            .map(|entries| {
                entries
                    .iter()
                    .map(|e| (e.key.as_str(), e.value.as_deref().unwrap_or("")))
                    .collect()
            })
            .unwrap_or_default()
    }
}

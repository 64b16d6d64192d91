//! GTM container export envelope
//!
//! Wraps a compiled configuration in the document shape the Tag Manager
//! import dialog accepts.

use serde::{Deserialize, Serialize};
use siteaudit_core::{AnalysisRecord, AuditError, ExportContext};

use crate::compiler::CompiledConfiguration;
use crate::entities::{Tag, Trigger, Variable};

/// Version of the GTM export format produced
pub const EXPORT_FORMAT_VERSION: u32 = 2;

/// Built-in variables enabled in every exported container: (type, name)
pub const BUILT_IN_VARIABLES: &[(&str, &str)] = &[
    ("PAGE_URL", "Page URL"),
    ("PAGE_HOSTNAME", "Page Hostname"),
    ("PAGE_PATH", "Page Path"),
    ("REFERRER", "Referrer"),
    ("EVENT", "Event"),
    ("CLICK_ELEMENT", "Click Element"),
    ("CLICK_TEXT", "Click Text"),
    ("CLICK_URL", "Click URL"),
    ("FORM_ELEMENT", "Form Element"),
    ("FORM_TEXT", "Form Text"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerExport {
    pub export_format_version: u32,
    /// RFC 3339
    pub export_time: String,
    pub container_version: ContainerVersion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerVersion {
    pub path: String,
    pub account_id: String,
    pub container_id: String,
    pub container_version_id: String,
    pub name: String,
    pub description: String,
    pub container: ContainerInfo,
    pub tag: Vec<Scoped<Tag>>,
    pub trigger: Vec<Scoped<Trigger>>,
    pub variable: Vec<Scoped<Variable>>,
    pub built_in_variable: Vec<BuiltInVariable>,
}

/// An entity stamped with the account and container it is imported into
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scoped<T> {
    pub account_id: String,
    pub container_id: String,
    #[serde(flatten)]
    pub entity: T,
}

impl<T> Scoped<T> {
    fn all(entities: &[T], ctx: &ExportContext) -> Vec<Self>
    where
        T: Clone,
    {
        entities
            .iter()
            .map(|entity| Scoped {
                account_id: ctx.account_id.clone(),
                container_id: ctx.container_id.clone(),
                entity: entity.clone(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerInfo {
    pub path: String,
    pub account_id: String,
    pub container_id: String,
    pub name: String,
    pub public_id: String,
    pub usage_context: Vec<String>,
    pub fingerprint: String,
    pub tag_manager_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuiltInVariable {
    pub account_id: String,
    pub container_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
}

impl ContainerExport {
    /// Wrap `config` for import. The CMS name only feeds the display strings.
    pub fn build(
        config: &CompiledConfiguration,
        record: &AnalysisRecord,
        ctx: &ExportContext,
    ) -> Result<Self, AuditError> {
        let cms = &record.cms_detection.primary_cms;
        let container_path = ctx.container_path();

        let built_in_variable = BUILT_IN_VARIABLES
            .iter()
            .map(|(kind, name)| BuiltInVariable {
                account_id: ctx.account_id.clone(),
                container_id: ctx.container_id.clone(),
                kind: kind.to_string(),
                name: name.to_string(),
            })
            .collect();

        Ok(ContainerExport {
            export_format_version: EXPORT_FORMAT_VERSION,
            export_time: ctx.exported_at.to_rfc3339(),
            container_version: ContainerVersion {
                path: format!("{}/versions/{}", container_path, ctx.container_version),
                account_id: ctx.account_id.clone(),
                container_id: ctx.container_id.clone(),
                container_version_id: ctx.container_version.clone(),
                name: format!("Analytics Setup - {} Website", cms),
                description: format!(
                    "Auto-generated GTM setup for {} website with conversion tracking",
                    cms
                ),
                container: ContainerInfo {
                    path: container_path.clone(),
                    account_id: ctx.account_id.clone(),
                    container_id: ctx.container_id.clone(),
                    name: "Auto-Generated Container".to_string(),
                    public_id: ctx.public_id.clone(),
                    usage_context: vec!["WEB".to_string()],
                    fingerprint: config.fingerprint()?,
                    tag_manager_url: format!(
                        "https://tagmanager.google.com/#/container/{}/workspaces?apiLink=container",
                        container_path
                    ),
                },
                tag: Scoped::all(&config.tags, ctx),
                trigger: Scoped::all(&config.triggers, ctx),
                variable: Scoped::all(&config.variables, ctx),
                built_in_variable,
            },
        })
    }

    pub fn to_json_pretty(&self) -> Result<String, AuditError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_envelope_shape() {
        let mut record = AnalysisRecord::for_url("https://example.com");
        record.cms_detection.primary_cms = "Shopify".to_string();
        let config = compile(&record);
        let ctx = ExportContext::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());

        let export = ContainerExport::build(&config, &record, &ctx).unwrap();
        let json = serde_json::to_value(&export).unwrap();

        assert_eq!(json["exportFormatVersion"], 2);
        assert_eq!(json["exportTime"], "2024-05-01T12:00:00+00:00");
        let version = &json["containerVersion"];
        assert_eq!(version["name"], "Analytics Setup - Shopify Website");
        assert_eq!(
            version["path"],
            "accounts/YOUR_ACCOUNT_ID/containers/YOUR_CONTAINER_ID/versions/1"
        );
        assert_eq!(version["container"]["publicId"], "GTM-XXXXXXX");
        assert_eq!(version["builtInVariable"].as_array().unwrap().len(), 10);
        assert_eq!(version["tag"].as_array().unwrap().len(), 2);
        assert_eq!(version["variable"][0]["variableId"], "1");
    }

    #[test]
    fn test_entities_carry_account_and_container() {
        let mut record = AnalysisRecord::for_url("https://example.com");
        record
            .conversion_opportunities
            .opportunities
            .push(siteaudit_core::Opportunity::new(siteaudit_core::OpportunityKind::PhoneTracking));
        let config = compile(&record);
        let ctx = ExportContext::default().with_account("6001234567", "9876543");

        let export = ContainerExport::build(&config, &record, &ctx).unwrap();
        let json = serde_json::to_value(&export).unwrap();
        let version = &json["containerVersion"];

        for section in ["tag", "trigger", "variable"] {
            for entity in version[section].as_array().unwrap() {
                assert_eq!(entity["accountId"], "6001234567");
                assert_eq!(entity["containerId"], "9876543");
            }
        }
        let phone = &version["trigger"][3];
        assert_eq!(phone["name"], "Phone Click");
        assert_eq!(phone["filter"][0]["type"], "STARTS_WITH");

        let parsed: ContainerExport = serde_json::from_value(json).unwrap();
        let triggers: Vec<Trigger> = parsed.container_version.trigger.into_iter().map(|t| t.entity).collect();
        assert_eq!(triggers, config.triggers);
    }

    #[test]
    fn test_fingerprint_follows_configuration() {
        let record = AnalysisRecord::for_url("https://example.com");
        let config = compile(&record);
        let export = ContainerExport::build(&config, &record, &ExportContext::default()).unwrap();
        assert_eq!(export.container_version.container.fingerprint, config.fingerprint().unwrap());
    }
}

//! Template file loading
//!
//! Templates are a versioned YAML document of named handlebars templates:
//!
//! ```yaml
//! version: "1.0"
//! templates:
//!   audit_summary:
//!     description: Markdown digest
//!     template: "# {{metadata.website_url}}"
//! ```

use serde::Deserialize;
use siteaudit_core::AuditError;
use std::collections::BTreeMap;

/// Templates shipped with the crate
pub const BUNDLED_TEMPLATES: &str = include_str!("../templates/report.yaml");

#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesFile {
    pub version: String,
    pub templates: BTreeMap<String, Template>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Template {
    pub description: String,
    pub template: String,
}

impl TemplatesFile {
    pub fn from_yaml(yaml: &str) -> Result<Self, AuditError> {
        let file: Self = serde_yaml::from_str(yaml)
            .map_err(|e| AuditError::Config(format!("templates file: {}", e)))?;
        if file.templates.is_empty() {
            return Err(AuditError::Config("templates file defines no templates".to_string()));
        }
        Ok(file)
    }

    pub fn bundled() -> Result<Self, AuditError> {
        Self::from_yaml(BUNDLED_TEMPLATES)
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.templates.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_file_parses() {
        let file = TemplatesFile::bundled().unwrap();
        assert_eq!(file.version, "1.0");
        assert!(file.get("audit_summary").is_some());
        assert!(file.get("next_steps").is_some());
    }

    #[test]
    fn test_rejects_empty_or_malformed() {
        assert!(TemplatesFile::from_yaml("version: \"1.0\"\ntemplates: {}\n").is_err());
        assert!(TemplatesFile::from_yaml("template: \"Hello {{name}}\"\n").is_err());
    }
}

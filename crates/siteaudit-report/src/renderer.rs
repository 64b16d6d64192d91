//! Handlebars rendering of report digests
//!
//! Custom helpers:
//! - percent: ratio as a percentage (0.75 -> "75%")
//! - truncate: cut a string to a maximum number of characters
//! - join: join an array with a separator
//! - default: fallback for null or blank values
//! - yesno: boolean as "Yes"/"No"
//!
//! Output is Markdown, so HTML escaping is off.

use handlebars::{handlebars_helper, no_escape, Handlebars};
use serde_json::Value as Json;
use siteaudit_core::AuditError;

use crate::templates::TemplatesFile;

handlebars_helper!(percent: |ratio: f64| format!("{}%", (ratio * 100.0).round() as i64));

handlebars_helper!(truncate: |text: str, max: u64| {
    let max = max as usize;
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
});

handlebars_helper!(join: |items: array, separator: str| {
    items
        .iter()
        .map(|v| v.as_str().map(String::from).unwrap_or_else(|| v.to_string()))
        .collect::<Vec<_>>()
        .join(separator)
});

handlebars_helper!(default: |value: Json, fallback: str| match value {
    Json::Null => fallback.to_string(),
    Json::String(s) if s.trim().is_empty() => fallback.to_string(),
    Json::String(s) => s.clone(),
    other => other.to_string(),
});

handlebars_helper!(yesno: |flag: bool| if flag { "Yes" } else { "No" });

/// Registry with the helpers and every template of a templates file
pub struct TemplateRenderer {
    handlebars: Handlebars<'static>,
    templates: TemplatesFile,
}

impl TemplateRenderer {
    pub fn new(templates: TemplatesFile) -> Result<Self, AuditError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars.register_escape_fn(no_escape);

        handlebars.register_helper("percent", Box::new(percent));
        handlebars.register_helper("truncate", Box::new(truncate));
        handlebars.register_helper("join", Box::new(join));
        handlebars.register_helper("default", Box::new(default));
        handlebars.register_helper("yesno", Box::new(yesno));

        for (name, template) in &templates.templates {
            handlebars
                .register_template_string(name, &template.template)
                .map_err(|e| AuditError::Render(format!("template '{}': {}", name, e)))?;
        }

        Ok(Self { handlebars, templates })
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, AuditError> {
        Self::new(TemplatesFile::from_yaml(yaml)?)
    }

    pub fn bundled() -> Result<Self, AuditError> {
        Self::new(TemplatesFile::bundled()?)
    }

    pub fn render(&self, template_name: &str, data: &Json) -> Result<String, AuditError> {
        if self.templates.get(template_name).is_none() {
            return Err(AuditError::Render(format!("unknown template '{}'", template_name)));
        }
        self.handlebars
            .render(template_name, data)
            .map_err(|e| AuditError::Render(e.to_string()))
    }

    pub fn template_names(&self) -> Vec<&str> {
        self.templates.names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn renderer() -> TemplateRenderer {
        TemplateRenderer::from_yaml(
            r#"
version: "1.0"
templates:
  score:
    description: Score line
    template: "Coverage: {{percent ratio}}"
  events:
    description: Event list
    template: "Events: {{join events \", \"}}"
  title:
    description: Title with fallback
    template: "{{default title \"Not found\"}} ({{truncate url 12}})"
  flags:
    description: Flag line
    template: "GTM {{yesno gtm}} & GA4 {{yesno ga4}}"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_percent_helper() {
        let out = renderer().render("score", &json!({ "ratio": 0.75 })).unwrap();
        assert_eq!(out, "Coverage: 75%");
    }

    #[test]
    fn test_join_helper() {
        let out = renderer()
            .render("events", &json!({ "events": ["purchase", "add_to_cart"] }))
            .unwrap();
        assert_eq!(out, "Events: purchase, add_to_cart");
    }

    #[test]
    fn test_default_and_truncate() {
        let out = renderer()
            .render("title", &json!({ "title": null, "url": "https://example.com/shop" }))
            .unwrap();
        assert_eq!(out, "Not found (https://exam...)");
    }

    #[test]
    fn test_default_replaces_blank_strings() {
        let render = |title: &str| {
            renderer()
                .render("title", &json!({ "title": title, "url": "https://a.io" }))
                .unwrap()
        };
        assert_eq!(render(""), "Not found (https://a.io)");
        assert_eq!(render("   "), "Not found (https://a.io)");
        assert_eq!(render("Shop"), "Shop (https://a.io)");
    }

    #[test]
    fn test_no_html_escaping() {
        let out = renderer().render("flags", &json!({ "gtm": true, "ga4": false })).unwrap();
        assert_eq!(out, "GTM Yes & GA4 No");
    }

    #[test]
    fn test_unknown_template() {
        let err = renderer().render("missing", &json!({})).unwrap_err();
        assert!(matches!(err, AuditError::Render(_)));
    }
}

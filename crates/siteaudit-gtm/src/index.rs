//! Trigger index: the one place tags look up trigger ids
//!
//! Built once per compilation while triggers are emitted, then handed to tag
//! construction. A name that is not in the index resolves to an empty firing
//! list; it is never an error and never a dangling id.

use siteaudit_core::OpportunityKind;
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct TriggerIndex {
    by_name: HashMap<String, String>,
    by_kind: BTreeMap<OpportunityKind, Vec<String>>,
}

impl TriggerIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an emitted trigger. `origin` is `None` for baseline triggers.
    /// The first trigger registered under a name keeps it.
    pub fn insert(&mut self, name: &str, id: &str, origin: Option<&OpportunityKind>) {
        self.by_name
            .entry(name.to_string())
            .or_insert_with(|| id.to_string());
        if let Some(kind) = origin {
            self.by_kind
                .entry(kind.clone())
                .or_default()
                .push(id.to_string());
        }
    }

    pub fn id_of(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(String::as_str)
    }

    /// Ids of the triggers an opportunity kind contributed, in emission order
    pub fn ids_for(&self, kind: &OpportunityKind) -> &[String] {
        self.by_kind.get(kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Firing-trigger list for a tag that names `trigger`
    pub fn resolve(&self, tag: &str, trigger: &str) -> Vec<String> {
        match self.id_of(trigger) {
            Some(id) => vec![id.to_string()],
            None => {
                warn!(tag, trigger, "trigger not emitted in this pass; tag left without firing triggers");
                Vec::new()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_name() {
        let mut index = TriggerIndex::new();
        index.insert("All Pages", "1", None);
        index.insert("Purchase", "7", Some(&OpportunityKind::Ecommerce));

        assert_eq!(index.resolve("GA4 - Purchase", "Purchase"), vec!["7".to_string()]);
        assert_eq!(index.ids_for(&OpportunityKind::Ecommerce), &["7".to_string()]);
        assert!(index.ids_for(&OpportunityKind::PhoneTracking).is_empty());
    }

    #[test]
    fn test_missing_name_resolves_to_empty_list() {
        let mut index = TriggerIndex::new();
        index.insert("All Pages", "1", None);

        assert!(index.resolve("GA4 - Phone Click", "Phone Click").is_empty());
    }

    #[test]
    fn test_first_registration_wins() {
        let mut index = TriggerIndex::new();
        index.insert("Purchase", "4", None);
        index.insert("Purchase", "9", None);

        assert_eq!(index.id_of("Purchase"), Some("4"));
        assert_eq!(index.len(), 1);
    }
}

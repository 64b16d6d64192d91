//! Fixed report texts
//!
//! Everything the report says that does not come from the record lives here.

use siteaudit_core::OpportunityKind;

pub const REPORT_VERSION: &str = "1.0";

/// Shown when the page had no `<title>`
pub const TITLE_NOT_FOUND: &str = "Not found";

pub const KEY_FINDINGS_LIMIT: usize = 5;

// =============================================================================
// Implementation notes
// =============================================================================

const ECOMMERCE_NOTES: &[&str] = &[
    "Implement Enhanced Ecommerce data layer structure",
    "Track all funnel steps: view_item, add_to_cart, begin_checkout, purchase",
    "Include product details in event parameters",
    "Set up revenue and conversion value tracking",
];

const LEAD_GENERATION_NOTES: &[&str] = &[
    "Track form submissions with form identification",
    "Implement lead scoring if applicable",
    "Set up goal values for different lead types",
    "Track multi-step forms completion",
];

const ENGAGEMENT_NOTES: &[&str] = &[
    "Track video engagement milestones (25%, 50%, 75%, 100%)",
    "Monitor scroll depth for content engagement",
    "Track time on page for key content",
    "Implement custom engagement events",
];

const FILE_DOWNLOAD_NOTES: &[&str] = &[
    "Track all document downloads",
    "Categorize downloads by type",
    "Monitor popular downloads",
    "Set up conversion values for key downloads",
];

const PHONE_TRACKING_NOTES: &[&str] = &[
    "Track phone number clicks",
    "Implement call tracking if budget allows",
    "Monitor mobile vs desktop phone interactions",
    "Set up phone call conversions",
];

pub fn implementation_notes(kind: &OpportunityKind) -> &'static [&'static str] {
    match kind {
        OpportunityKind::Ecommerce => ECOMMERCE_NOTES,
        OpportunityKind::LeadGeneration => LEAD_GENERATION_NOTES,
        OpportunityKind::Engagement => ENGAGEMENT_NOTES,
        OpportunityKind::FileDownload => FILE_DOWNLOAD_NOTES,
        OpportunityKind::PhoneTracking => PHONE_TRACKING_NOTES,
        OpportunityKind::Unrecognized(_) => &[],
    }
}

// =============================================================================
// Implementation steps
// =============================================================================

/// (title, description, estimated time)
pub const IMPLEMENTATION_STEPS: &[(&str, &str, &str)] = &[
    ("Create GTM Container", "Create a new GTM container or use existing one", "5 minutes"),
    ("Import Container JSON", "Import the generated GTM container JSON file", "2 minutes"),
    (
        "Update Configuration Variables",
        "Update GA4 Configuration variable with actual Measurement ID",
        "3 minutes",
    ),
    ("Install GTM Code", "Add GTM code to website header and body", "10 minutes"),
    ("Implement Data Layer", "Add data layer structure to website pages", "30-60 minutes"),
    ("Test Implementation", "Test all tags and triggers using GTM Preview mode", "20 minutes"),
    ("Publish Container", "Publish the GTM container to production", "2 minutes"),
];

// =============================================================================
// Data layer samples
// =============================================================================

pub struct CodeSample {
    pub event_type: &'static str,
    pub description: &'static str,
    pub code: &'static str,
}

pub const BASE_DATA_LAYER: CodeSample = CodeSample {
    event_type: "Page View",
    description: "Basic data layer structure for all pages",
    code: "window.dataLayer = window.dataLayer || [];
dataLayer.push({
    'event': 'page_view',
    'page_title': document.title,
    'page_location': window.location.href,
    'page_path': window.location.pathname
});",
};

const ECOMMERCE_DATA_LAYER: CodeSample = CodeSample {
    event_type: "E-commerce Events",
    description: "Data layer structure for e-commerce tracking",
    code: "// Purchase Event
dataLayer.push({
    'event': 'purchase',
    'ecommerce': {
        'transaction_id': '12345',
        'value': 25.42,
        'currency': 'USD',
        'items': [{
            'item_id': 'SKU123',
            'item_name': 'Product Name',
            'category': 'Category',
            'quantity': 1,
            'price': 25.42
        }]
    }
});

// Add to Cart Event
dataLayer.push({
    'event': 'add_to_cart',
    'ecommerce': {
        'currency': 'USD',
        'value': 25.42,
        'items': [{
            'item_id': 'SKU123',
            'item_name': 'Product Name',
            'category': 'Category',
            'quantity': 1,
            'price': 25.42
        }]
    }
});",
};

const LEAD_GENERATION_DATA_LAYER: CodeSample = CodeSample {
    event_type: "Lead Generation Events",
    description: "Data layer structure for lead tracking",
    code: "// Form Submit Event
dataLayer.push({
    'event': 'generate_lead',
    'form_name': 'Contact Form',
    'form_id': 'contact-form-1',
    'lead_type': 'contact_inquiry',
    'lead_source': 'website_form'
});",
};

/// Event-specific sample for a kind, if the kind has one
pub fn data_layer_sample(kind: &OpportunityKind) -> Option<&'static CodeSample> {
    match kind {
        OpportunityKind::Ecommerce => Some(&ECOMMERCE_DATA_LAYER),
        OpportunityKind::LeadGeneration => Some(&LEAD_GENERATION_DATA_LAYER),
        _ => None,
    }
}

// =============================================================================
// Testing checklist
// =============================================================================

pub const CHECKLIST_BASIC_SETUP: &[&str] = &[
    "GTM container loads on all pages",
    "GA4 Configuration tag fires on page load",
    "Page view events are tracked in GA4",
    "Real-time reports show data in GA4",
];

pub const CHECKLIST_PRIVACY: &[&str] = &[
    "Consent banner appears on first visit",
    "Tags respect user consent choices",
    "Consent Mode v2 is properly configured",
];

pub const CHECKLIST_TECHNICAL: &[&str] = &[
    "No JavaScript errors in console",
    "All GTM tags fire correctly in Preview mode",
    "Data layer pushes are working",
    "Cross-domain tracking configured if needed",
];

const CHECKLIST_ECOMMERCE: &[&str] = &[
    "Purchase events tracked with correct revenue",
    "Add to cart events fire on button clicks",
    "Product data is captured correctly",
    "Enhanced ecommerce events appear in GA4",
];

const CHECKLIST_LEAD_GENERATION: &[&str] = &[
    "Form submission events tracked",
    "Lead data captured in GA4 events",
    "Goal conversions configured in GA4",
];

pub fn conversion_checklist(kind: &OpportunityKind) -> &'static [&'static str] {
    match kind {
        OpportunityKind::Ecommerce => CHECKLIST_ECOMMERCE,
        OpportunityKind::LeadGeneration => CHECKLIST_LEAD_GENERATION,
        _ => &[],
    }
}

// =============================================================================
// Next steps
// =============================================================================

/// (action, priority, estimated effort)
pub const INSTALL_GTM: (&str, &str, &str) = ("Install Google Tag Manager", "Critical", "1-2 hours");
pub const SETUP_GA4: (&str, &str, &str) = ("Set up Google Analytics 4", "Critical", "30 minutes");

/// (goal, deliverable)
pub const GOAL_CONVERSION_TRACKING: (&str, &str) = (
    "Implement conversion tracking for identified opportunities",
    "All conversion events tracked in GA4",
);
pub const GOAL_VALIDATION: (&str, &str) = (
    "Test and validate all tracking implementation",
    "QA report confirming accurate data collection",
);
pub const GOAL_DASHBOARD: (&str, &str) = (
    "Set up automated reporting dashboard",
    "Looker Studio dashboard with key metrics",
);
pub const GOAL_PRIVACY: (&str, &str) = (
    "Implement privacy compliance solution",
    "GDPR/CCPA compliant consent management",
);

/// (activity, frequency)
pub const ONGOING_OPTIMIZATION: &[(&str, &str)] = &[
    ("Monthly analytics audit and optimization", "Monthly"),
    ("Conversion rate optimization based on data insights", "Quarterly"),
    ("Enhanced ecommerce tracking refinement", "As needed"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_known_kind_has_four_notes() {
        for kind in OpportunityKind::PRECEDENCE {
            assert_eq!(implementation_notes(&kind).len(), 4, "{}", kind);
        }
        assert!(implementation_notes(&OpportunityKind::parse("chatbot")).is_empty());
    }

    #[test]
    fn test_samples_only_for_instrumented_kinds() {
        assert!(data_layer_sample(&OpportunityKind::Ecommerce).is_some());
        assert!(data_layer_sample(&OpportunityKind::LeadGeneration).is_some());
        assert!(data_layer_sample(&OpportunityKind::PhoneTracking).is_none());
        assert!(conversion_checklist(&OpportunityKind::Engagement).is_empty());
    }
}

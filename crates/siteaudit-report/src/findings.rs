//! Technical findings and analytics audit sections
//!
//! Straight projections of the record; no judgement happens here.

use siteaudit_core::AnalysisRecord;

use crate::report::{
    AnalyticsAudit, CmsAndTechnology, CurrentImplementation, GoogleAnalyticsStatus, PixelStatus,
    PrivacyCompliance, TagManagerStatus, TechnicalFindings, TechnicalSetup, TrackingAssessment,
    WebsitePerformance,
};

pub fn technical_findings(record: &AnalysisRecord) -> TechnicalFindings {
    let basic = &record.basic_info;
    let cms = &record.cms_detection;
    let technical = &record.technical_analysis;

    TechnicalFindings {
        website_performance: WebsitePerformance {
            page_load_time: technical.page_load_time,
            response_time: basic.response_time,
            content_length: basic.content_length,
            status_code: basic.status_code,
        },
        cms_and_technology: CmsAndTechnology {
            detected_cms: cms.detected_cms.clone(),
            confidence_scores: cms.confidence_scores.clone(),
            technologies: cms.technologies.clone(),
            generator: cms.generator.clone(),
        },
        technical_setup: TechnicalSetup {
            is_https: technical.is_https,
            has_data_layer: technical.has_data_layer,
            has_schema_markup: technical.has_schema_markup,
            schema_count: technical.schema_count,
            is_mobile_optimized: technical.is_mobile_optimized,
            has_amp: technical.has_amp,
            has_service_worker: technical.has_service_worker,
        },
    }
}

pub fn analytics_audit(record: &AnalysisRecord) -> AnalyticsAudit {
    let analytics = &record.analytics_detection;
    let tracking = &record.tracking_analysis;

    AnalyticsAudit {
        current_implementation: CurrentImplementation {
            google_tag_manager: TagManagerStatus {
                installed: analytics.has_gtm,
                containers: analytics.gtm_containers.clone(),
                container_count: analytics.gtm_containers.len(),
            },
            google_analytics: GoogleAnalyticsStatus {
                ga4_installed: analytics.has_ga4,
                ga4_measurement_ids: analytics.ga4_measurement_ids.clone(),
                universal_analytics_ids: analytics.universal_analytics_ids.clone(),
                using_legacy_ua: !analytics.universal_analytics_ids.is_empty(),
            },
            other_tracking: analytics.other_tracking.clone(),
            facebook_pixel: PixelStatus {
                installed: !analytics.facebook_pixels.is_empty(),
                pixel_ids: analytics.facebook_pixels.clone(),
            },
        },
        privacy_compliance: PrivacyCompliance {
            consent_management: analytics.consent_management.clone(),
            has_consent_solution: analytics.has_consent_management,
        },
        tracking_assessment: TrackingAssessment {
            total_forms: tracking.forms_count,
            forms_with_tracking: tracking.forms_with_tracking,
            tracked_buttons: tracking.tracked_buttons.len(),
            form_analysis: tracking.forms_analysis.clone(),
        },
    }
}

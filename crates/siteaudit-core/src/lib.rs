//! siteaudit core: the analysis record contract shared by every stage
//!
//! The record is produced by an external site-inspection collector. The
//! stages downstream (configuration compiler, scorer, report compiler) only
//! read it.

pub mod context;
pub mod data_model;
pub mod error;
pub mod opportunity;

pub use context::ExportContext;
pub use data_model::{
    AnalysisRecord, AnalyticsDetection, BasicInfo, CmsDetection, ConversionOpportunities,
    FormInfo, FormInput, Opportunity, Recommendation, TechnicalAnalysis, TrackedButton,
    TrackingAnalysis, UNKNOWN_CMS,
};
pub use error::AuditError;
pub use opportunity::OpportunityKind;

/// Engine version stamped into exported artifacts
pub const SITEAUDIT_VERSION: &str = "1.0.0";

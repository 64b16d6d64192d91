//! Opportunity taxonomy
//!
//! The collector reports opportunity types as strings. They are parsed once
//! into a closed enum; anything outside the five known kinds is kept as
//! `Unrecognized` and contributes nothing downstream.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OpportunityKind {
    Ecommerce,
    LeadGeneration,
    Engagement,
    FileDownload,
    PhoneTracking,
    Unrecognized(String),
}

impl OpportunityKind {
    /// Fixed emission order for everything derived from opportunities
    pub const PRECEDENCE: [OpportunityKind; 5] = [
        OpportunityKind::Ecommerce,
        OpportunityKind::LeadGeneration,
        OpportunityKind::Engagement,
        OpportunityKind::FileDownload,
        OpportunityKind::PhoneTracking,
    ];

    pub fn parse(raw: &str) -> Self {
        match raw {
            "ecommerce" => Self::Ecommerce,
            "lead_generation" => Self::LeadGeneration,
            "engagement" => Self::Engagement,
            "file_download" => Self::FileDownload,
            "phone_tracking" => Self::PhoneTracking,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Ecommerce => "ecommerce",
            Self::LeadGeneration => "lead_generation",
            Self::Engagement => "engagement",
            Self::FileDownload => "file_download",
            Self::PhoneTracking => "phone_tracking",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl Default for OpportunityKind {
    fn default() -> Self {
        Self::Unrecognized(String::new())
    }
}

impl From<String> for OpportunityKind {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<OpportunityKind> for String {
    fn from(kind: OpportunityKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for OpportunityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

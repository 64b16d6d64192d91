//! Unified Error Model
//!
//! The compilers themselves are total; these variants only surface at the
//! edges (record parsing, settings loading, serialization, rendering).
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuditError {
    #[error("VALIDATION/{0}")]
    Validation(String),

    #[error("PARSE/{0}")]
    Parse(String),

    #[error("CONFIG/{0}")]
    Config(String),

    #[error("SERIALIZE/{0}")]
    Serialize(String),

    #[error("RENDER/{0}")]
    Render(String),
}

impl From<serde_json::Error> for AuditError {
    fn from(err: serde_json::Error) -> Self {
        AuditError::Serialize(err.to_string())
    }
}

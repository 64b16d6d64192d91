//! siteaudit GTM: opportunity-to-configuration compiler
//!
//! Turns the conversion opportunities of an `AnalysisRecord` into a
//! consistent triple of variables, triggers and tags, with tag firing
//! triggers resolved inside the same pass.
//!
//! # Example
//!
//! ```
//! use siteaudit_core::{AnalysisRecord, Opportunity, OpportunityKind};
//! use siteaudit_gtm::compile;
//!
//! let mut record = AnalysisRecord::for_url("https://shop.example.com");
//! record
//!     .conversion_opportunities
//!     .opportunities
//!     .push(Opportunity::new(OpportunityKind::Ecommerce));
//!
//! let config = compile(&record);
//! assert_eq!(config.variables.len(), 11);
//! assert_eq!(config.triggers.len(), 7);
//! assert_eq!(config.tags.len(), 6);
//! ```

pub mod catalog;
pub mod compiler;
pub mod container;
pub mod entities;
pub mod index;
pub mod settings;

pub use compiler::{compile, CompiledConfiguration, Compiler};
pub use container::{ContainerExport, Scoped, BUILT_IN_VARIABLES};
pub use entities::{
    Condition, FiringOption, MatchOperator, Parameter, ParameterKind, Tag, TagKind, Trigger,
    TriggerKind, Variable, VariableKind,
};
pub use index::TriggerIndex;
pub use settings::CompilerSettings;

//! siteaudit: analytics-setup audit compiler
//!
//! Facade over the workspace crates. One `AuditPipeline::run` turns an
//! `AnalysisRecord` into a GTM container configuration, a score card and
//! the structured audit report.
//!
//! # Pipeline Flow
//!
//! ```text
//! AnalysisRecord → compile.gtm → score.audit → report.audit → AuditBundle
//!                      ↓              ↓              ↓
//!                  variables,     ScoreCard     AuditReport
//!                  triggers, tags
//! ```
//!
//! # Example
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use siteaudit::{output_file_names, AnalysisRecord, AuditPipeline, ExportContext};
//!
//! let record = AnalysisRecord::for_url("https://example.com");
//! let bundle = AuditPipeline::new().run(&record).unwrap();
//!
//! let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
//! let export = bundle.export(&ExportContext::new(at)).unwrap();
//! assert_eq!(export.export_format_version, 2);
//!
//! let files = output_file_names(at);
//! assert_eq!(files.container, "gtm_container_20240501_120000.json");
//! ```

mod pipeline;
mod stage;

pub use pipeline::{AuditBundle, AuditPipeline, StageProof};
pub use stage::{CompileStage, ReportInput, ReportStage, ScoreStage, Stage};

pub use siteaudit_core::{AnalysisRecord, AuditError, ExportContext, Opportunity, OpportunityKind};
pub use siteaudit_gtm::{compile, CompiledConfiguration, CompilerSettings, ContainerExport};
pub use siteaudit_report::{compile_report, render_summary, AuditReport, ReportCompiler};
pub use siteaudit_score::{score, ScoreCard, ScoringProfile};

use chrono::{DateTime, Utc};

/// File names a caller writes the two JSON documents under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    pub container: String,
    pub report: String,
}

pub fn output_file_names(at: DateTime<Utc>) -> OutputFiles {
    let stamp = at.format("%Y%m%d_%H%M%S");
    OutputFiles {
        container: format!("gtm_container_{}.json", stamp),
        report: format!("audit_report_{}.json", stamp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_output_file_names() {
        let files = output_file_names(Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 5).unwrap());
        assert_eq!(files.container, "gtm_container_20231231_235905.json");
        assert_eq!(files.report, "audit_report_20231231_235905.json");
    }

    #[test]
    fn test_file_names_match_export_stamp() {
        let at = Utc.with_ymd_and_hms(2024, 2, 29, 8, 0, 0).unwrap();
        let stamp = ExportContext::new(at).file_stamp();
        assert!(output_file_names(at).report.contains(&stamp));
    }
}

//! Stage contract and the three audit stages

use serde::Serialize;
use siteaudit_core::AnalysisRecord;
use siteaudit_gtm::{CompiledConfiguration, Compiler};
use siteaudit_report::{AuditReport, ReportCompiler};
use siteaudit_score::{ScoreCard, Scorer};

/// One pure step of the audit pipeline
pub trait Stage<I: Serialize + ?Sized>: Send + Sync {
    type Output: Serialize;

    /// Stable stage id (e.g. "compile.gtm.v1")
    fn id(&self) -> &'static str;

    fn deterministic(&self) -> bool {
        true
    }

    fn run(&self, input: &I) -> Self::Output;
}

/// Record + compiled configuration, the report stage's input
#[derive(Debug, Serialize)]
pub struct ReportInput<'a> {
    pub record: &'a AnalysisRecord,
    pub config: &'a CompiledConfiguration,
}

#[derive(Debug, Clone, Default)]
pub struct CompileStage {
    pub compiler: Compiler,
}

impl Stage<AnalysisRecord> for CompileStage {
    type Output = CompiledConfiguration;

    fn id(&self) -> &'static str {
        "compile.gtm.v1"
    }

    fn run(&self, record: &AnalysisRecord) -> CompiledConfiguration {
        self.compiler.compile(record)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScoreStage {
    pub scorer: Scorer,
}

impl Stage<AnalysisRecord> for ScoreStage {
    type Output = ScoreCard;

    fn id(&self) -> &'static str {
        "score.audit.v1"
    }

    fn run(&self, record: &AnalysisRecord) -> ScoreCard {
        self.scorer.evaluate(record)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReportStage {
    pub compiler: ReportCompiler,
}

impl<'a> Stage<ReportInput<'a>> for ReportStage {
    type Output = AuditReport;

    fn id(&self) -> &'static str {
        "report.audit.v1"
    }

    fn run(&self, input: &ReportInput<'a>) -> AuditReport {
        self.compiler.compile(input.record, input.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_ids_are_distinct() {
        let ids = [
            Stage::<AnalysisRecord>::id(&CompileStage::default()),
            Stage::<AnalysisRecord>::id(&ScoreStage::default()),
            Stage::<ReportInput<'_>>::id(&ReportStage::default()),
        ];
        assert_eq!(ids, ["compile.gtm.v1", "score.audit.v1", "report.audit.v1"]);
    }

    #[test]
    fn test_report_stage_uses_given_config() {
        let record = AnalysisRecord::for_url("https://example.com");
        let config = CompileStage::default().run(&record);
        let report = ReportStage::default().run(&ReportInput {
            record: &record,
            config: &config,
        });
        assert_eq!(report.implementation_plan.gtm_setup.container_structure.tags_count, 2);
    }
}

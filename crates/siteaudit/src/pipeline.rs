//! Audit pipeline: compile → score → report, with a hash proof per stage

use serde::{Deserialize, Serialize};
use siteaudit_core::{AnalysisRecord, AuditError, ExportContext};
use siteaudit_gtm::{CompiledConfiguration, Compiler, CompilerSettings, ContainerExport};
use siteaudit_report::{render_summary, AuditReport, ReportCompiler};
use siteaudit_score::{ScoreCard, Scorer, ScoringProfile};
use std::time::Instant;
use tracing::info;

use crate::stage::{CompileStage, ReportInput, ReportStage, ScoreStage, Stage};

/// Per-stage execution record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageProof {
    pub id: String,
    /// `blake3:<hex>` of the stage input's JSON
    pub in_hash: String,
    /// `blake3:<hex>` of the stage output's JSON
    pub out_hash: String,
    pub deterministic: bool,
    pub latency_ms: u64,
}

/// Everything one audit run produces
#[derive(Debug, Clone)]
pub struct AuditBundle {
    pub record: AnalysisRecord,
    pub config: CompiledConfiguration,
    pub score: ScoreCard,
    pub report: AuditReport,
    pub proofs: Vec<StageProof>,
}

impl AuditBundle {
    /// Importable GTM container for the compiled configuration
    pub fn export(&self, ctx: &ExportContext) -> Result<ContainerExport, AuditError> {
        ContainerExport::build(&self.config, &self.record, ctx)
    }

    pub fn config_json(&self) -> Result<String, AuditError> {
        self.config.to_json_pretty()
    }

    pub fn report_json(&self) -> Result<String, AuditError> {
        self.report.to_json_pretty()
    }

    pub fn summary(&self) -> Result<String, AuditError> {
        render_summary(&self.report)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuditPipeline {
    compile: CompileStage,
    score: ScoreStage,
    report: ReportStage,
}

impl AuditPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(mut self, settings: CompilerSettings) -> Self {
        self.compile.compiler = Compiler::new(settings);
        self
    }

    /// Profile used by both the score stage and the report's summary
    pub fn with_profile(mut self, profile: ScoringProfile) -> Self {
        self.score.scorer = Scorer::new(profile.clone());
        self.report.compiler = self.report.compiler.scoring_profile(profile);
        self
    }

    pub fn with_report_compiler(mut self, compiler: ReportCompiler) -> Self {
        self.report.compiler = compiler;
        self
    }

    /// Run all stages. Fails only on a record without a URL or on a
    /// serialization error while hashing.
    pub fn run(&self, record: &AnalysisRecord) -> Result<AuditBundle, AuditError> {
        record.validate()?;

        let mut proofs = Vec::with_capacity(3);
        let config = run_stage(&self.compile, record, &mut proofs)?;
        let score = run_stage(&self.score, record, &mut proofs)?;
        let report = run_stage(
            &self.report,
            &ReportInput {
                record,
                config: &config,
            },
            &mut proofs,
        )?;

        Ok(AuditBundle {
            record: record.clone(),
            config,
            score,
            report,
            proofs,
        })
    }
}

fn run_stage<I, S>(stage: &S, input: &I, proofs: &mut Vec<StageProof>) -> Result<S::Output, AuditError>
where
    I: Serialize + ?Sized,
    S: Stage<I>,
{
    let start = Instant::now();
    let in_hash = hash_json(input)?;

    let output = stage.run(input);

    let out_hash = hash_json(&output)?;
    let latency_ms = start.elapsed().as_millis() as u64;

    info!(stage = stage.id(), %out_hash, latency_ms, "stage complete");

    proofs.push(StageProof {
        id: stage.id().to_string(),
        in_hash,
        out_hash,
        deterministic: stage.deterministic(),
        latency_ms,
    });
    Ok(output)
}

fn hash_json<T: Serialize + ?Sized>(value: &T) -> Result<String, AuditError> {
    let bytes = serde_json::to_vec(value)?;
    Ok(format!("blake3:{}", blake3::hash(&bytes)))
}

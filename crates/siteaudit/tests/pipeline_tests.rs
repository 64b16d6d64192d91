//! End-to-end pipeline tests over recorded analysis fixtures.

use chrono::{TimeZone, Utc};
use siteaudit::{AnalysisRecord, AuditPipeline, CompilerSettings, ExportContext};

const FIXTURES_DIR: &str = "testing/fixtures/records";

fn load_record(name: &str) -> AnalysisRecord {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = std::path::Path::new(&manifest_dir).parent().unwrap().parent().unwrap();
    let json = std::fs::read_to_string(workspace_root.join(FIXTURES_DIR).join(name)).unwrap();
    AnalysisRecord::from_json(&json).unwrap()
}

#[test]
fn test_ecommerce_scenario() {
    let bundle = AuditPipeline::new().run(&load_record("ecommerce_site.json")).unwrap();

    assert_eq!(bundle.config.variables.len(), 11);
    assert_eq!(bundle.config.triggers.len(), 7);
    assert_eq!(bundle.config.tags.len(), 6);
    assert_eq!(bundle.score.score, 0);
    assert_eq!(bundle.report.executive_summary.audit_score, 0);
    assert_eq!(bundle.proofs.len(), 3);
}

#[test]
fn test_every_fixture_runs_clean() {
    for name in ["ecommerce_site.json", "full_flags.json", "sparse_with_errors.json"] {
        let bundle = AuditPipeline::new().run(&load_record(name)).unwrap();
        assert!(bundle.config.dangling_references().is_empty(), "{}", name);
        assert!(bundle.report.executive_summary.key_findings.len() <= 5);
        assert!(bundle.summary().unwrap().contains(&bundle.record.url));
    }
}

#[test]
fn test_runs_are_byte_identical() {
    let record = load_record("full_flags.json");
    let a = AuditPipeline::new().run(&record).unwrap();
    let b = AuditPipeline::new().run(&record).unwrap();

    assert_eq!(a.config_json().unwrap(), b.config_json().unwrap());
    assert_eq!(a.report_json().unwrap(), b.report_json().unwrap());
}

#[test]
fn test_export_with_custom_settings() {
    let settings = CompilerSettings::from_yaml("measurement_id: G-LIVE42\n").unwrap();
    let bundle = AuditPipeline::new()
        .with_settings(settings)
        .run(&load_record("ecommerce_site.json"))
        .unwrap();

    let ctx = ExportContext::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
    let export = bundle.export(&ctx).unwrap();
    let json = serde_json::to_value(&export).unwrap();

    let version = &json["containerVersion"];
    assert_eq!(version["name"], "Analytics Setup - Shopify Website");
    assert_eq!(version["variable"][0]["parameter"][0]["value"], "G-LIVE42");
    assert_eq!(version["container"]["fingerprint"], bundle.config.fingerprint().unwrap());
    assert_eq!(version["tag"].as_array().unwrap().len(), 6);
    assert_eq!(version["tag"][0]["accountId"], "YOUR_ACCOUNT_ID");
}

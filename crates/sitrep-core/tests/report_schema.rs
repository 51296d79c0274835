//! Serde roundtrip and JsonSchema validation for the published report types.

use chrono::Utc;
use schemars::schema_for;
use sitrep_core::entities::{Bug, Epic, Initiative, Risk, Sprint};
use sitrep_core::enums::Priority;
use sitrep_core::{Diagnostics, PageMeta, SituationReport, Summary, Warning};

fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

fn sample_report() -> SituationReport {
    SituationReport {
        page: PageMeta {
            title: "Situation Wall".into(),
            version: 42,
            last_modified: Some("2026-01-30T12:00:00Z".into()),
        },
        sprints: vec![Sprint {
            name: "Sprint 185".into(),
            number: 185,
            start_date: "January 26".into(),
            end_date: "February 06".into(),
            release_date: Some("18 de fev. de 2026".into()),
            is_current: true,
        }],
        initiatives: vec![Initiative {
            external_key: "BEESIP-10009".into(),
            title: "Revamp pricing".into(),
            status: "In Implementation".into(),
            priority: Priority::High,
            team: "CATALOG".into(),
            category: Some("Delivery".into()),
            kickoff_date: None,
            zone_approval: None,
            url: "https://tracker.example.net/browse/BEESIP-10009".into(),
        }],
        epics: vec![Epic {
            external_key: "BEESCAD-20494".into(),
            initiative_key: Some("BEESIP-10009".into()),
            title: String::new(),
            status: String::new(),
            size: "XXL".into(),
            sprint_ref: Some("SP-185".into()),
            team: Some("CATALOG".into()),
            milestones: None,
            url: "https://tracker.example.net/browse/BEESCAD-20494".into(),
        }],
        risks: vec![Risk {
            external_key: "BEESCAD-1".into(),
            title: "Vendor feed delay".into(),
            assignee: "Ana".into(),
            status: "Open".into(),
            priority: "High".into(),
            gut_score: 64,
            url: "https://tracker.example.net/browse/BEESCAD-1".into(),
        }],
        bugs: vec![Bug {
            external_key: "BEESCAD-2".into(),
            title: "Preview broken".into(),
            priority: "Medium".into(),
            status: "To Do".into(),
            team: "CMS".into(),
            url: "https://tracker.example.net/browse/BEESCAD-2".into(),
        }],
        risk_query: Some("project = BEESCAD AND labels = risk".into()),
        bug_query: None,
        diagnostics: Diagnostics {
            initiatives_titled: 1,
            epics_titled: 0,
            failed_lookup_chunks: 0,
            warnings: vec![Warning::missing_section("bugs")],
        },
        parsed_at: Utc::now(),
        filtered_by: None,
    }
}

#[test]
fn report_roundtrips_and_matches_schema() {
    let report = sample_report();
    let json = serde_json::to_string_pretty(&report).unwrap();
    let recovered: SituationReport = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, report);

    let schema = serde_json::to_value(schema_for!(SituationReport)).unwrap();
    let instance = serde_json::to_value(&report).unwrap();
    let errors = validate_against_schema(&schema, &instance);
    assert!(errors.is_empty(), "schema validation failed: {errors:?}");
}

#[test]
fn summary_matches_schema() {
    let summary = Summary::from_report(&sample_report());
    let schema = serde_json::to_value(schema_for!(Summary)).unwrap();
    let instance = serde_json::to_value(&summary).unwrap();
    let errors = validate_against_schema(&schema, &instance);
    assert!(errors.is_empty(), "schema validation failed: {errors:?}");
    assert_eq!(summary.open_risks, 1);
    assert_eq!(summary.initiatives_by_team.get("CATALOG"), Some(&1));
}

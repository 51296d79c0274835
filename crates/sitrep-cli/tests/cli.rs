//! End-to-end runs of the `sitrep` binary against the captured page.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../sitrep-parser/tests/fixtures/situation_wall.xml")
}

/// The binary, isolated from user config and `SITREP_*` variables.
fn sitrep(dir: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_sitrep"));
    command
        .current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"));
    for (key, _) in std::env::vars_os() {
        if key.to_string_lossy().starts_with("SITREP_") {
            command.env_remove(key);
        }
    }
    command
}

fn json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn parse_prints_report_json() {
    let dir = TempDir::new().unwrap();
    let output = sitrep(dir.path()).arg("parse").arg(fixture()).output().unwrap();
    let report = json(&output);

    assert_eq!(report["sprints"].as_array().unwrap().len(), 3);
    assert_eq!(report["initiatives"][0]["external_key"], "BEESIP-10009");
    assert_eq!(report["initiatives"][0]["priority"], "High");
    assert_eq!(report["epics"].as_array().unwrap().len(), 3);
    assert!(report["risk_query"].as_str().unwrap().contains("labels = risk"));
    assert!(!dir.path().join(".sitrep/snapshot.json").exists());
}

#[test]
fn parse_with_team_filter() {
    let dir = TempDir::new().unwrap();
    let output = sitrep(dir.path())
        .args(["--teams", "dam", "parse"])
        .arg(fixture())
        .output()
        .unwrap();
    let report = json(&output);

    let teams: Vec<&str> = report["initiatives"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["team"].as_str().unwrap())
        .collect();
    assert_eq!(teams, vec!["DAM"]);
    assert_eq!(report["filtered_by"][0], "dam");
    assert_eq!(report["epics"].as_array().unwrap().len(), 3);
}

#[test]
fn sync_then_summary_and_report() {
    let dir = TempDir::new().unwrap();
    let output = sitrep(dir.path())
        .args(["--quiet", "sync", "--no-enrich", "--file"])
        .arg(fixture())
        .output()
        .unwrap();
    json(&output);

    let snapshot: Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join(".sitrep/snapshot.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(snapshot["last_sync"]["state"], "completed");
    assert_eq!(snapshot["last_sync"]["items_synced"], 9);

    let summary = json(&sitrep(dir.path()).arg("summary").output().unwrap());
    assert_eq!(summary["current_sprint"]["number"], 185);
    assert_eq!(summary["initiatives"], 3);
    assert_eq!(summary["initiatives_by_team"]["CATALOG"], 1);

    let output = sitrep(dir.path())
        .args(["report", "--output", "-"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let markdown = String::from_utf8_lossy(&output.stdout);
    assert!(markdown.starts_with("# Work Status"));
    assert!(markdown.contains("**Sprint 185**"));

    let output = sitrep(dir.path()).args(["--quiet", "report"]).output().unwrap();
    assert!(output.status.success());
    assert!(dir.path().join(".sitrep/WORK-STATUS.md").exists());
}

#[test]
fn sync_without_tracker_warns() {
    let dir = TempDir::new().unwrap();
    let output = sitrep(dir.path())
        .args(["--quiet", "sync", "--no-save", "--file"])
        .arg(fixture())
        .output()
        .unwrap();
    let report = json(&output);

    assert_eq!(report["diagnostics"]["warnings"][0]["kind"], "enrichment_unavailable");
    assert_eq!(report["diagnostics"]["warnings"][0]["stage"], "tracker");
    assert!(!dir.path().join(".sitrep/snapshot.json").exists());
}

#[test]
fn failed_sync_keeps_previous_report() {
    let dir = TempDir::new().unwrap();
    json(
        &sitrep(dir.path())
            .args(["--quiet", "sync", "--no-enrich", "--file"])
            .arg(fixture())
            .output()
            .unwrap(),
    );

    let output = sitrep(dir.path())
        .args(["--quiet", "sync", "--no-enrich", "--file", "missing.xml"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("sitrep error: sync failed"));

    let snapshot: Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join(".sitrep/snapshot.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(snapshot["last_sync"]["state"], "failed");
    assert_eq!(snapshot["report"]["initiatives"].as_array().unwrap().len(), 3);
}

#[test]
fn summary_without_snapshot_fails() {
    let dir = TempDir::new().unwrap();
    let output = sitrep(dir.path()).arg("summary").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("run `sitrep sync` first"));
}

#[test]
fn schema_needs_no_configuration() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".sitrep")).unwrap();
    std::fs::write(dir.path().join(".sitrep/config.toml"), "[jira]\nbatch_size = 0\n").unwrap();

    let schema = json(&sitrep(dir.path()).args(["schema", "summary"]).output().unwrap());
    assert_eq!(schema["title"], "Summary");

    let output = sitrep(dir.path()).arg("config").output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn config_masks_secrets() {
    let dir = TempDir::new().unwrap();
    let output = sitrep(dir.path())
        .env("SITREP_ATLASSIAN__API_TOKEN", "very-secret")
        .arg("config")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("very-secret"));
    assert!(stdout.contains("[confluence]"));
}

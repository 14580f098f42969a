//! Smoke tests for the evseq CLI
//!
//! These tests verify basic CLI functionality and exit codes.

#![allow(deprecated)] // Allow deprecated Command::cargo_bin until assert_cmd is updated
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command for the evseq binary
fn evseq() -> Command {
    let mut cmd = Command::cargo_bin("evseq").expect("evseq binary should exist");
    cmd.env_remove("EVSEQ_CONFIG").env_remove("RUST_LOG");
    cmd
}

const MOUSE_TAP: &str = r#"{
  "platform": "Skia",
  "device": "Mouse",
  "shape": "Element",
  "records": [
    {"kind": "Entered"},
    {"kind": "Moved"},
    {"kind": "Pressed"},
    {"kind": "Released"},
    {"kind": "Tapped"},
    {"kind": "Exited"}
  ]
}"#;

fn write_trace(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("trace.json");
    fs::write(&path, contents).expect("write trace");
    path
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    evseq()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.4.0"));
}

#[test]
fn test_help_flag() {
    evseq()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("grammar"))
        .stdout(predicate::str::contains("table"))
        .stdout(predicate::str::contains("lint"));
}

#[test]
fn test_no_args_is_usage_error() {
    evseq().assert().code(2);
}

// ============================================================================
// Validate Tests
// ============================================================================

#[test]
fn test_validate_success() {
    let dir = TempDir::new().unwrap();
    let trace = write_trace(&dir, MOUSE_TAP);
    evseq()
        .args(["--color", "never", "validate"])
        .arg(&trace)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("SUCCESS"));
}

#[test]
fn test_validate_failure_exit_code() {
    let dir = TempDir::new().unwrap();
    let trace = write_trace(&dir, MOUSE_TAP);
    evseq()
        .args(["--color", "never", "validate", "--device", "touch"])
        .arg(&trace)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("FAILED"))
        .stdout(predicate::str::contains("expected Pressed, found Moved"));
}

#[test]
fn test_validate_json_output() {
    let dir = TempDir::new().unwrap();
    let trace = write_trace(&dir, MOUSE_TAP);
    let output = evseq()
        .args(["validate", "--format", "json"])
        .arg(&trace)
        .output()
        .unwrap();
    assert!(output.status.success());
    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["verdict"], "SUCCESS");
    assert_eq!(summary["records"].as_array().unwrap().len(), 6);
}

#[test]
fn test_validate_with_config_override() {
    let dir = TempDir::new().unwrap();
    let trace = write_trace(&dir, MOUSE_TAP);
    let config = dir.path().join("evseq.yaml");
    fs::write(
        &config,
        "overrides:\n  - profile: Hover\n    shape: Element\n    grammar: \"Entered Moved Pressed Released Tapped Exited\"\n",
    )
    .unwrap();
    evseq()
        .args(["--color", "never", "validate", "--config"])
        .arg(&config)
        .arg(&trace)
        .assert()
        .code(0);
}

#[test]
fn test_validate_missing_trace_is_error() {
    evseq()
        .args(["validate", "/nonexistent/trace.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to load trace"));
}

#[test]
fn test_validate_malformed_trace_is_error() {
    let dir = TempDir::new().unwrap();
    let trace = write_trace(&dir, r#"{"shape":"Element","records":[{"kind":"Hovered"}]}"#);
    evseq().arg("validate").arg(&trace).assert().code(2);
}

// ============================================================================
// Grammar / Table / Lint Tests
// ============================================================================

#[test]
fn test_grammar_command() {
    evseq()
        .args(["grammar", "--device", "touch", "--shape", "list-item", "--platform", "android"])
        .assert()
        .success()
        .stdout(predicate::str::diff("Activated\n"));
}

#[test]
fn test_grammar_pen_on_ios_is_contact() {
    evseq()
        .args(["grammar", "--device", "pen", "--shape", "element", "--platform", "ios"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Entered Pressed Moved* Released Tapped Exited",
        ));
}

#[test]
fn test_table_command() {
    evseq()
        .args(["--color", "never", "table", "--platform", "windows"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Hyperlink"))
        .stdout(predicate::str::contains("Entered Activated Tapped Exited"));
}

#[test]
fn test_lint_clean() {
    evseq()
        .args(["--color", "never", "lint", "Entered Moved+ Pressed Exited"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("no ambiguous terms"));
}

#[test]
fn test_lint_ambiguous() {
    evseq()
        .args(["--color", "never", "lint", "Entered Moved* Moved Exited"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("FAILED"));
}

#[test]
fn test_lint_unparseable() {
    evseq()
        .args(["lint", "Entered Wiggled"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid argument"));
}

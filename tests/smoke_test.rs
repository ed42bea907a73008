//! Smoke tests for the pup CLI.
//!
//! These tests verify basic CLI functionality:
//! - `pup --version` outputs version info
//! - `pup --help` outputs help text
//! - `pup` (no args) outputs a JSON status

mod common;

use assert_cmd::Command;
use common::TestEnv;
use predicates::prelude::*;

/// Get a Command for the pup binary.
fn pup() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pup"))
}

#[test]
fn test_version_flag() {
    pup()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pup"))
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_help_flag() {
    pup()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("Options:"));
}

#[test]
fn test_no_args_outputs_json() {
    let env = TestEnv::new();
    let status = env.json(&[]);
    assert_eq!(status["total_locations"], 3);
    assert_eq!(status["visible_locations"], 3);
    assert_eq!(status["plans"], 0);
}

#[test]
fn test_human_readable_flag() {
    let env = TestEnv::new();
    env.pup()
        .arg("-H")
        .assert()
        .success()
        .stdout(predicate::str::contains("pupcrawl"))
        .stdout(predicate::str::contains("3 visible of 3"));
}

#[test]
fn test_builtin_dataset_loads() {
    let env = TestEnv::new();
    let output = env.pup().env_remove("PUP_DATASET").output().unwrap();
    assert!(output.status.success());
    let status: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(status["total_locations"].as_u64().unwrap() > 0);
}

#[test]
fn test_plan_help() {
    pup()
        .args(["plan", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("share"))
        .stdout(predicate::str::contains("export"));
}

#[test]
fn test_invalid_command() {
    pup()
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_missing_dataset_is_an_error() {
    let env = TestEnv::new();
    env.pup()
        .args(["--dataset", "/nonexistent/breweries.json", "location", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\"error\""));
}

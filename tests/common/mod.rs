//! Shared test helpers for integration tests
//!
//! This module provides common utilities used across all test files.

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

/// Helper to get a pagewarden command with logging and root overrides cleared
pub fn pagewarden() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("pagewarden"));
    cmd.env_remove("PAGEWARDEN_ROOT").env_remove("PAGEWARDEN_LOG");
    cmd
}

/// Helper to create a test workspace in a temp directory
pub fn setup_test_workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    pagewarden()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success();
    tmp
}

/// Helper to create a project in `module`
pub fn create_test_project(tmp: &TempDir, name: &str, module: &str, selector: &str) {
    pagewarden()
        .current_dir(tmp.path())
        .args(["project", "new", name, "--selector", selector, "--module", module])
        .assert()
        .success();
}

/// Names in `module`, in display order
pub fn module_order(tmp: &TempDir, module: &str) -> Vec<String> {
    let output = pagewarden()
        .current_dir(tmp.path())
        .args(["project", "list", "--module", module, "-o", "id"])
        .output()
        .unwrap();
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

/// Raw persisted snapshot
pub fn read_state(tmp: &TempDir) -> Value {
    let content = std::fs::read_to_string(tmp.path().join(".pagewarden/state.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

/// Order stored for a project
pub fn stored_order(tmp: &TempDir, name: &str) -> Option<i64> {
    read_state(tmp)["customProjects"][name]["order"].as_i64()
}

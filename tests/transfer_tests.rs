//! Import/export, clear, stylesheet, apply and stats tests

mod common;

use common::{create_test_project, module_order, pagewarden, read_state, setup_test_workspace};
use predicates::prelude::*;
use serde_json::{json, Value};

// ============================================================================
// Export / Import
// ============================================================================

#[test]
fn test_export_document_shape() {
    let tmp = setup_test_workspace();
    create_test_project(&tmp, "Ads", "Marketing", ".ad");
    create_test_project(&tmp, "Admin", "Ops", ".admin");

    let output = pagewarden()
        .current_dir(tmp.path())
        .arg("export")
        .output()
        .unwrap();
    assert!(output.status.success());

    let document: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(document["_metadata"]["version"], "1.0.0");
    assert_eq!(document["_metadata"]["projectCount"], 2);
    assert!(document["_metadata"]["exportDate"]
        .as_str()
        .unwrap()
        .ends_with('Z'));
    assert_eq!(document["projects"]["Ads"]["module"], "Marketing");
    assert_eq!(document["projects"]["Ads"]["order"], 0);
    assert_eq!(document["projects"]["Ads"]["behavior"], "hide");
}

#[test]
fn test_export_import_round_trip_between_workspaces() {
    let source = setup_test_workspace();
    create_test_project(&source, "A", "Sales", ".a");
    create_test_project(&source, "B", "Sales", ".b");
    create_test_project(&source, "X", "Ops", ".x");
    pagewarden()
        .current_dir(source.path())
        .args(["project", "reorder", "Sales", "1", "0"])
        .assert()
        .success();

    let file = source.path().join("export.json");
    pagewarden()
        .current_dir(source.path())
        .args(["export", "--file", file.to_str().unwrap()])
        .assert()
        .success();

    let target = setup_test_workspace();
    pagewarden()
        .current_dir(target.path())
        .args(["import", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 3 project(s)"));

    assert_eq!(module_order(&target, "Sales"), vec!["B", "A"]);
    assert_eq!(module_order(&target, "Ops"), vec!["X"]);
}

#[test]
fn test_import_legacy_shape_merges_and_normalizes() {
    let tmp = setup_test_workspace();
    create_test_project(&tmp, "A", "Sales", ".a");

    let file = tmp.path().join("legacy.json");
    std::fs::write(
        &file,
        json!({
            "A": {"selector": ".replaced", "module": "Sales", "order": 4},
            "Z": {"selector": ".z", "module": "Sales", "order": 9},
            "Loose": {"selector": ".loose"}
        })
        .to_string(),
    )
    .unwrap();

    pagewarden()
        .current_dir(tmp.path())
        .args(["import", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 replaced"));

    let state = read_state(&tmp);
    assert_eq!(state["customProjects"]["A"]["selector"], ".replaced");
    assert_eq!(state["customProjects"]["A"]["order"], 0);
    assert_eq!(state["customProjects"]["Z"]["order"], 1);
    assert_eq!(state["customProjects"]["Loose"]["module"], "Uncategorized");
    assert_eq!(state["customProjects"]["Loose"]["enabled"], true);
}

#[test]
fn test_import_unknown_behavior_rejects_document() {
    let tmp = setup_test_workspace();
    create_test_project(&tmp, "A", "Sales", ".a");
    let before = read_state(&tmp);

    let file = tmp.path().join("bad.json");
    std::fs::write(
        &file,
        json!({
            "_metadata": {"version": "1.0.0"},
            "projects": {
                "Ok": {"selector": ".ok"},
                "Bad": {"selector": ".bad", "behavior": "explode"}
            }
        })
        .to_string(),
    )
    .unwrap();

    pagewarden()
        .current_dir(tmp.path())
        .args(["import", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid import format"));

    assert_eq!(read_state(&tmp), before);
}

#[test]
fn test_import_malformed_json_fails() {
    let tmp = setup_test_workspace();
    let file = tmp.path().join("broken.json");
    std::fs::write(&file, "{ nope").unwrap();

    pagewarden()
        .current_dir(tmp.path())
        .args(["import", file.to_str().unwrap()])
        .assert()
        .failure();
}

// ============================================================================
// Clear
// ============================================================================

#[test]
fn test_clear_removes_everything() {
    let tmp = setup_test_workspace();
    create_test_project(&tmp, "A", "Sales", ".a");
    pagewarden()
        .current_dir(tmp.path())
        .args(["module", "new", "Empty"])
        .assert()
        .success();

    pagewarden()
        .current_dir(tmp.path())
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared"));

    let state = read_state(&tmp);
    assert!(state["customProjects"].as_object().unwrap().is_empty());
    assert!(state["createdModules"].as_array().unwrap().is_empty());
}

// ============================================================================
// Stylesheet / Apply
// ============================================================================

#[test]
fn test_css_respects_url_pattern_and_enabled() {
    let tmp = setup_test_workspace();
    create_test_project(&tmp, "Ads", "Marketing", ".ad, #banner");
    create_test_project(&tmp, "Off", "Marketing", ".off");
    pagewarden()
        .current_dir(tmp.path())
        .args([
            "project",
            "new",
            "Admin",
            "--selector",
            ".admin",
            "--behavior",
            "blur",
            "--url-pattern",
            "^/admin",
        ])
        .assert()
        .success();
    pagewarden()
        .current_dir(tmp.path())
        .args(["project", "disable", "Off"])
        .assert()
        .success();

    pagewarden()
        .current_dir(tmp.path())
        .args(["css", "--url", "https://example.com/home"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".ad { display: none !important; }"))
        .stdout(predicate::str::contains("#banner"))
        .stdout(predicate::str::contains(".off").not())
        .stdout(predicate::str::contains(".admin").not());

    pagewarden()
        .current_dir(tmp.path())
        .args(["css", "--url", "https://example.com/ADMIN/users"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".admin { filter: blur(5px)"));
}

#[test]
fn test_apply_caches_repeated_payload() {
    let tmp = setup_test_workspace();
    create_test_project(&tmp, "Ads", "Marketing", ".ad");

    pagewarden()
        .current_dir(tmp.path())
        .args(["apply", "--url", "https://example.com/", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"success\": true"))
        .stdout(predicate::str::contains("cached").not());

    pagewarden()
        .current_dir(tmp.path())
        .args(["apply", "--url", "https://example.com/", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"cached\": true"));

    pagewarden()
        .current_dir(tmp.path())
        .args(["apply", "--url", "https://example.com/", "--lang", "de", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cached").not());
}

#[test]
fn test_apply_after_change_is_not_cached() {
    let tmp = setup_test_workspace();
    create_test_project(&tmp, "Ads", "Marketing", ".ad");

    pagewarden()
        .current_dir(tmp.path())
        .args(["apply", "--url", "https://example.com/"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".ad { display: none"));

    create_test_project(&tmp, "More", "Marketing", ".more");

    pagewarden()
        .current_dir(tmp.path())
        .args(["apply", "--url", "https://example.com/"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".more"));
}

#[test]
fn test_apply_force_ignores_fingerprint() {
    let tmp = setup_test_workspace();
    create_test_project(&tmp, "Ads", "Marketing", ".ad");

    pagewarden()
        .current_dir(tmp.path())
        .args(["apply", "--url", "https://example.com/"])
        .assert()
        .success();

    pagewarden()
        .current_dir(tmp.path())
        .args(["apply", "--url", "https://example.com/", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".ad"));
}

// ============================================================================
// Stats
// ============================================================================

#[test]
fn test_stats_counts() {
    let tmp = setup_test_workspace();
    create_test_project(&tmp, "A", "Sales", ".a");
    create_test_project(&tmp, "B", "Ops", ".b");
    pagewarden()
        .current_dir(tmp.path())
        .args(["project", "disable", "B"])
        .assert()
        .success();

    let output = pagewarden()
        .current_dir(tmp.path())
        .args(["stats", "-o", "json"])
        .output()
        .unwrap();
    let stats: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["total"], 2);
    assert_eq!(stats["enabled"], 1);
    assert_eq!(stats["disabled"], 1);
    assert_eq!(stats["modules"], 2);
    assert!(stats.get("unmatchedUrl").is_none());
}

#[test]
fn test_stats_with_page_report() {
    let tmp = setup_test_workspace();
    pagewarden()
        .current_dir(tmp.path())
        .args([
            "project",
            "new",
            "Admin",
            "--selector",
            ".admin",
            "--url-pattern",
            "^/admin",
        ])
        .assert()
        .success();
    create_test_project(&tmp, "Ads", "Marketing", ".ad");

    let report = tmp.path().join("page.json");
    std::fs::write(
        &report,
        json!({
            "url": "https://example.com/home",
            "title": "Home",
            "projects": [{"name": "Ads", "elementCount": 4}],
            "totalElementCount": 4
        })
        .to_string(),
    )
    .unwrap();

    pagewarden()
        .current_dir(tmp.path())
        .args(["stats", "--page-info", report.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 project(s) not effective"));
}

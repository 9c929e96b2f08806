//! CLI and basic command tests

mod common;

use common::{create_test_project, module_order, pagewarden, read_state, setup_test_workspace};
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    pagewarden()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("page elements"));
}

#[test]
fn test_version_displays() {
    pagewarden()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pagewarden"));
}

#[test]
fn test_unknown_command_fails() {
    pagewarden()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_completions_generate() {
    pagewarden()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pagewarden"));
}

// ============================================================================
// Init Command Tests
// ============================================================================

#[test]
fn test_init_creates_workspace() {
    let tmp = TempDir::new().unwrap();

    pagewarden()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));

    assert!(tmp.path().join(".pagewarden").is_dir());
    assert!(tmp.path().join(".pagewarden/config.yaml").exists());
    assert!(tmp.path().join(".pagewarden/state.json").exists());
}

#[test]
fn test_init_twice_fails() {
    let tmp = setup_test_workspace();
    pagewarden()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn test_command_outside_workspace_fails() {
    let tmp = TempDir::new().unwrap();
    pagewarden()
        .current_dir(tmp.path())
        .args(["project", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a pagewarden workspace"));
}

#[test]
fn test_root_flag_selects_workspace() {
    let tmp = setup_test_workspace();
    let elsewhere = TempDir::new().unwrap();
    create_test_project(&tmp, "Ads", "Marketing", ".ad");

    pagewarden()
        .current_dir(elsewhere.path())
        .args(["--root", tmp.path().to_str().unwrap(), "project", "list", "-o", "id"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ads"));
}

#[test]
fn test_discovers_workspace_from_subdirectory() {
    let tmp = setup_test_workspace();
    let nested = tmp.path().join("deep/er");
    std::fs::create_dir_all(&nested).unwrap();

    pagewarden()
        .current_dir(&nested)
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects found"));
}

// ============================================================================
// Project Command Tests
// ============================================================================

#[test]
fn test_project_new_appends_to_module() {
    let tmp = setup_test_workspace();

    pagewarden()
        .current_dir(tmp.path())
        .args(["project", "new", "Ads", "--selector", ".ad", "--module", "Marketing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("position 0"));

    pagewarden()
        .current_dir(tmp.path())
        .args(["project", "new", "Banner", "--selector", "#banner", "--module", "Marketing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("position 1"));

    assert_eq!(module_order(&tmp, "Marketing"), vec!["Ads", "Banner"]);
}

#[test]
fn test_project_new_without_module_is_uncategorized() {
    let tmp = setup_test_workspace();

    pagewarden()
        .current_dir(tmp.path())
        .args(["project", "new", "Loose", "--selector", ".x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Uncategorized"));

    assert_eq!(
        read_state(&tmp)["customProjects"]["Loose"]["module"],
        "Uncategorized"
    );
}

#[test]
fn test_project_new_rejects_empty_selector() {
    let tmp = setup_test_workspace();

    pagewarden()
        .current_dir(tmp.path())
        .args(["project", "new", "Bad", "--selector", " , "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("selector cannot be empty"));

    assert!(read_state(&tmp)["customProjects"]
        .as_object()
        .unwrap()
        .is_empty());
}

#[test]
fn test_project_new_rejects_invalid_url_pattern() {
    let tmp = setup_test_workspace();

    pagewarden()
        .current_dir(tmp.path())
        .args([
            "project",
            "new",
            "Bad",
            "--selector",
            ".x",
            "--url-pattern",
            "(unclosed",
        ])
        .assert()
        .failure();
}

#[test]
fn test_project_new_rejects_duplicate_name() {
    let tmp = setup_test_workspace();
    create_test_project(&tmp, "Ads", "Marketing", ".ad");

    pagewarden()
        .current_dir(tmp.path())
        .args(["project", "new", "Ads", "--selector", ".other"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Ads"));
}

#[test]
fn test_project_new_uses_configured_default_behavior() {
    let tmp = setup_test_workspace();
    std::fs::write(
        tmp.path().join(".pagewarden/config.yaml"),
        "default_behavior: blur\n",
    )
    .unwrap();
    create_test_project(&tmp, "Secret", "Ops", ".secret");

    assert_eq!(read_state(&tmp)["customProjects"]["Secret"]["behavior"], "blur");
}

#[test]
fn test_project_show_formats() {
    let tmp = setup_test_workspace();
    create_test_project(&tmp, "Ads", "Marketing", ".ad, #banner");

    pagewarden()
        .current_dir(tmp.path())
        .args(["project", "show", "Ads"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#banner"))
        .stdout(predicate::str::contains("Marketing"));

    pagewarden()
        .current_dir(tmp.path())
        .args(["project", "show", "Ads", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"module\": \"Marketing\""));
}

#[test]
fn test_project_show_unknown_fails() {
    let tmp = setup_test_workspace();
    pagewarden()
        .current_dir(tmp.path())
        .args(["project", "show", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_project_edit_module_change_appends_and_compacts() {
    let tmp = setup_test_workspace();
    create_test_project(&tmp, "A", "Sales", ".a");
    create_test_project(&tmp, "B", "Sales", ".b");
    create_test_project(&tmp, "C", "Sales", ".c");
    create_test_project(&tmp, "X", "Ops", ".x");

    pagewarden()
        .current_dir(tmp.path())
        .args(["project", "edit", "A", "--module", "Ops"])
        .assert()
        .success();

    assert_eq!(module_order(&tmp, "Sales"), vec!["B", "C"]);
    assert_eq!(module_order(&tmp, "Ops"), vec!["X", "A"]);
    let state = read_state(&tmp);
    assert_eq!(state["customProjects"]["B"]["order"], 0);
    assert_eq!(state["customProjects"]["C"]["order"], 1);
    assert_eq!(state["customProjects"]["A"]["order"], 1);
}

#[test]
fn test_project_edit_rename_keeps_position() {
    let tmp = setup_test_workspace();
    create_test_project(&tmp, "A", "Sales", ".a");
    create_test_project(&tmp, "B", "Sales", ".b");

    pagewarden()
        .current_dir(tmp.path())
        .args(["project", "edit", "A", "--name", "Alpha"])
        .assert()
        .success();

    assert_eq!(module_order(&tmp, "Sales"), vec!["Alpha", "B"]);
    assert!(read_state(&tmp)["customProjects"].get("A").is_none());
}

#[test]
fn test_project_copy_is_disabled() {
    let tmp = setup_test_workspace();
    create_test_project(&tmp, "Ads", "Marketing", ".ad");

    pagewarden()
        .current_dir(tmp.path())
        .args(["project", "copy", "Ads", "-o", "id"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ads Copy"));

    let state = read_state(&tmp);
    assert_eq!(state["customProjects"]["Ads Copy"]["enabled"], false);
    assert_eq!(state["customProjects"]["Ads Copy"]["selector"], ".ad");
}

#[test]
fn test_project_delete() {
    let tmp = setup_test_workspace();
    create_test_project(&tmp, "Ads", "Marketing", ".ad");

    pagewarden()
        .current_dir(tmp.path())
        .args(["project", "delete", "Ads"])
        .assert()
        .success();
    pagewarden()
        .current_dir(tmp.path())
        .args(["project", "delete", "Ads"])
        .assert()
        .failure();
}

#[test]
fn test_project_enable_disable_from_stdin() {
    let tmp = setup_test_workspace();
    create_test_project(&tmp, "A", "Sales", ".a");
    create_test_project(&tmp, "B", "Sales", ".b");

    pagewarden()
        .current_dir(tmp.path())
        .args(["project", "disable"])
        .write_stdin("A\nB\nGhost\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Ghost"))
        .stdout(predicate::str::contains("Disabled 2 project(s)"));

    let state = read_state(&tmp);
    assert_eq!(state["customProjects"]["A"]["enabled"], false);
    assert_eq!(state["customProjects"]["B"]["enabled"], false);

    pagewarden()
        .current_dir(tmp.path())
        .args(["project", "enable", "B"])
        .assert()
        .success();
    assert_eq!(read_state(&tmp)["customProjects"]["B"]["enabled"], true);
}

#[test]
fn test_project_disable_counts_repeated_names_once() {
    let tmp = setup_test_workspace();
    create_test_project(&tmp, "A", "Sales", ".a");
    create_test_project(&tmp, "B", "Sales", ".b");

    pagewarden()
        .current_dir(tmp.path())
        .args(["project", "disable"])
        .write_stdin("A\nA\nB\nGhost\nGhost\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Disabled 2 project(s)"));
}

#[test]
fn test_project_behavior() {
    let tmp = setup_test_workspace();
    create_test_project(&tmp, "A", "Sales", ".a");

    pagewarden()
        .current_dir(tmp.path())
        .args(["project", "behavior", "A", "restrict"])
        .assert()
        .success();
    assert_eq!(read_state(&tmp)["customProjects"]["A"]["behavior"], "restrict");

    pagewarden()
        .current_dir(tmp.path())
        .args(["project", "behavior", "A", "explode"])
        .assert()
        .failure();
}

#[test]
fn test_project_list_formats() {
    let tmp = setup_test_workspace();
    create_test_project(&tmp, "Ads", "Marketing", ".ad");
    create_test_project(&tmp, "Admin", "Ops", ".admin");

    pagewarden()
        .current_dir(tmp.path())
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("MODULE"))
        .stdout(predicate::str::contains("Ads"));

    pagewarden()
        .current_dir(tmp.path())
        .args(["project", "list", "-o", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("module,order,name"));

    pagewarden()
        .current_dir(tmp.path())
        .args(["project", "list", "--count"])
        .assert()
        .success()
        .stdout("2\n");
}

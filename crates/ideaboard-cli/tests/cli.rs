//! Binary-level tests. None of these reach the network: they either have no
//! projects or fail before the first request.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const EMPTY_README: &str = "# Ideas

<!-- PROJECT_LIST_START -->
<!-- PROJECT_LIST_END -->

<!-- PROJECT_TABLE_START -->
stale content
<!-- PROJECT_TABLE_END -->

<!-- LATEST_CHANGES_START -->
<!-- LATEST_CHANGES_END -->
";

fn ideaboard(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("ideaboard").unwrap();
    cmd.current_dir(dir)
        .env_remove("GITHUB_TOKEN")
        .env_remove("GITLAB_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help() {
    let dir = tempdir().unwrap();
    ideaboard(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--readme"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_empty_project_list_updates_readme_and_state() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("README.md"), EMPTY_README).unwrap();

    ideaboard(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("0 project(s)"));

    let readme = fs::read_to_string(dir.path().join("README.md")).unwrap();
    assert!(readme.contains(concat!(
        "<!-- PROJECT_TABLE_START -->\n",
        "| Project | Status | Todo | Last Update |\n",
        "| --- | --- | --- | --- |\n",
        "<!-- PROJECT_TABLE_END -->"
    )));
    assert!(readme.contains(
        "<!-- LATEST_CHANGES_START -->\n- No changes since last run.\n<!-- LATEST_CHANGES_END -->"
    ));
    assert!(!readme.contains("stale content"));

    let state = fs::read_to_string(dir.path().join("data/state.json")).unwrap();
    assert_eq!(state, "{\n  \"projects\": {}\n}\n");
}

#[test]
fn test_explicit_paths() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("IDEAS.md"), EMPTY_README).unwrap();

    ideaboard(dir.path())
        .args(["--readme", "IDEAS.md", "--state", "out/s.json"])
        .assert()
        .success();

    assert!(dir.path().join("out/s.json").exists());
    assert!(!dir.path().join("data").exists());
}

#[test]
fn test_dry_run_prints_document_and_writes_nothing() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("README.md"), EMPTY_README).unwrap();

    ideaboard(dir.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("- No changes since last run."));

    assert_eq!(
        fs::read_to_string(dir.path().join("README.md")).unwrap(),
        EMPTY_README
    );
    assert!(!dir.path().join("data/state.json").exists());
}

#[test]
fn test_info_logs_go_to_stderr_by_default() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("README.md"), EMPTY_README).unwrap();

    ideaboard(dir.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stderr(predicate::str::contains("dry run, leaving files untouched"))
        .stdout(predicate::str::contains("dry run").not());
}

#[test]
fn test_missing_markers_fail_and_leave_state_untouched() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("README.md"), "# Nothing to see\n").unwrap();
    fs::create_dir_all(dir.path().join("data")).unwrap();
    fs::write(dir.path().join("data/state.json"), "{\"projects\": {}}").unwrap();

    ideaboard(dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("markers not found"));

    assert_eq!(
        fs::read_to_string(dir.path().join("data/state.json")).unwrap(),
        "{\"projects\": {}}"
    );
}

#[test]
fn test_unsupported_host_aborts_run() {
    let dir = tempdir().unwrap();
    let readme = EMPTY_README.replace(
        "<!-- PROJECT_LIST_START -->\n",
        concat!(
            "<!-- PROJECT_LIST_START -->\n",
            "- name: Elsewhere\n",
            "  repo: https://bitbucket.org/acme/widget\n",
        ),
    );
    fs::write(dir.path().join("README.md"), &readme).unwrap();

    ideaboard(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported repo host"));

    assert_eq!(fs::read_to_string(dir.path().join("README.md")).unwrap(), readme);
    assert!(!dir.path().join("data/state.json").exists());
}

#[test]
fn test_missing_readme_fails() {
    let dir = tempdir().unwrap();
    ideaboard(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("README.md"));
}

#[test]
fn test_config_file_is_discovered() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("NOTES.md"), EMPTY_README).unwrap();
    fs::write(
        dir.path().join("ideaboard.yml"),
        "readme: NOTES.md\nstate: tracking/state.json\n",
    )
    .unwrap();

    ideaboard(dir.path()).assert().success();

    assert!(dir.path().join("tracking/state.json").exists());
}

#[test]
fn test_invalid_config_file_fails() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("README.md"), EMPTY_README).unwrap();
    fs::write(dir.path().join("ideaboard.yml"), "unknown_key: true\n").unwrap();

    ideaboard(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("ideaboard.yml"));
}

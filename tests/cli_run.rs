//! End-to-end tests for `pmend run` / `pmend check`.

use assert_cmd::prelude::*;
use assert_fs::prelude::*;
use predicates::prelude::*;
use serde_json::Value;
use std::process::Command;

mod util;
use util::{DIRECTIVE, make_fixture};

fn pmend() -> Command
{
    Command::cargo_bin("pmend").expect("pmend binary")
}

// Test: full batch rewrites files in place and reports counts.
#[test]
fn run_rewrites_prompts_in_place()
{
    let tmp = make_fixture();

    pmend()
        .args(["--no-color", "run"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("processed: 3 / 3"))
        .stdout(predicate::str::contains("modified: 2"))
        .stdout(predicate::str::contains("removed: Refuse to write code"));

    tmp.child("prompts/assistant.txt")
        .assert(format!("Title\n{DIRECTIVE}\n\nmore text\n"));
    tmp.child("prompts/clean.txt")
        .assert(format!("Header\n{DIRECTIVE}\nbody\n"));
    tmp.child("prompts/empty.txt")
        .assert(DIRECTIVE);
    tmp.child("prompts/notes.md")
        .assert("[[draft]] untouched\n");
}

// Test: a second run is a no-op, which is what `check` verifies.
#[test]
fn second_run_changes_nothing()
{
    let tmp = make_fixture();

    pmend().arg("run").arg(tmp.path()).assert().success();
    let snapshot = std::fs::read_to_string(tmp.path().join("prompts/assistant.txt")).unwrap();

    pmend()
        .args(["check", "--format", "json"])
        .arg(tmp.path())
        .assert()
        .success();

    pmend().arg("run").arg(tmp.path()).assert().success();
    tmp.child("prompts/assistant.txt").assert(snapshot);
}

// Test: check fails on pending work and never writes.
#[test]
fn check_reports_pending_changes_without_writing()
{
    let tmp = make_fixture();

    pmend()
        .args(["--no-color", "check", "--diff"])
        .arg(tmp.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Summary (dry run)"))
        .stdout(predicate::str::contains(format!("+{DIRECTIVE}")))
        .stdout(predicate::str::contains("-some text with Refuse to write code in it"));

    tmp.child("prompts/empty.txt").assert("");
}

// Test: global --dry-run makes `run` read-only too.
#[test]
fn dry_run_writes_nothing()
{
    let tmp = make_fixture();

    pmend()
        .args(["--dry-run", "run"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("would modify: 2"));

    tmp.child("prompts/empty.txt").assert("");
}

// Test: JSON output carries per-file details and the summary.
#[test]
fn json_report_shape()
{
    let tmp = make_fixture();

    let assert = pmend()
        .args(["run", "--format", "json"])
        .arg(tmp.path())
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8");
    let v: Value = serde_json::from_str(&stdout).expect("json");

    insta::assert_yaml_snapshot!(v["summary"], @r"
    discovered: 3
    failed: 0
    markers_removed: 1
    modified: 2
    processed: 3
    ");

    let files = v["files"].as_array().expect("files array");
    assert_eq!(files.len(), 3);
    assert_eq!(files[0]["name"], "assistant.txt");
    assert_eq!(files[0]["removed_markers"][0], "Refuse to write code");
    assert_eq!(files[0]["blank_lines_collapsed"], 2);
    assert_eq!(files[0]["directive_added"], true);
    assert_eq!(files[1]["modified"], false);
    assert_eq!(files[1]["written"], false);
}

// Test: a missing prompt directory is fatal and touches nothing.
#[test]
fn missing_prompt_dir_fails_fast()
{
    let tmp = assert_fs::TempDir::new().unwrap();
    tmp.child("promptmend.toml").write_str(util::CONFIG).unwrap();

    pmend()
        .arg("run")
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("prompt directory not found"));
}

// Test: an empty prompt directory is a successful no-op.
#[test]
fn empty_prompt_dir_is_success()
{
    let tmp = assert_fs::TempDir::new().unwrap();
    tmp.child("promptmend.toml").write_str(util::CONFIG).unwrap();
    tmp.child("prompts").create_dir_all().unwrap();

    pmend()
        .args(["--no-color", "run"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("processed: 0 / 0"));
}

// Test: no config means no catalog, which is a configuration error.
#[test]
fn missing_config_is_reported()
{
    let tmp = assert_fs::TempDir::new().unwrap();
    tmp.child("prompts/a.txt").write_str("x\n").unwrap();

    pmend()
        .arg("run")
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("marker catalog is empty"));

    tmp.child("prompts/a.txt").assert("x\n");
}

// Test: environment overrides the configured prompt directory.
#[test]
fn env_overrides_prompt_dir()
{
    let tmp = make_fixture();
    tmp.child("other/x.txt").write_str("Only line").unwrap();

    pmend()
        .env("PROMPTMEND_PROMPT_DIR", "other")
        .args(["--quiet", "--no-color", "run"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("processed: 1 / 1"));

    tmp.child("other/x.txt").assert(format!("Only line\n{DIRECTIVE}"));
    tmp.child("prompts/empty.txt").assert("");
}

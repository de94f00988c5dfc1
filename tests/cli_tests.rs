mod common;

use common::*;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const MKDIR_AND_WRITE: &str = r#"
[[action]]
kind = "mkdir"
path = "x"

[[action]]
kind = "write"
path = "x/a.txt"
content = "hi"
"#;

#[test]
fn test_apply_creates_and_logs_in_order() {
    let temp = TempDir::new().unwrap();
    let plan = write_plan(temp.path(), MKDIR_AND_WRITE);

    run_apply(temp.path(), &plan, &["--yes"])
        .success()
        .stdout(predicate::str::contains("~ mkdir x"))
        .stdout(predicate::str::contains("~ Writing x/a.txt"))
        .stdout(predicate::str::is_match("(?s)~ mkdir x.*~ Writing x/a.txt").unwrap());

    assert_eq!(
        fs::read_to_string(temp.path().join("x/a.txt")).unwrap(),
        "hi"
    );
}

#[test]
fn test_dry_run_changes_nothing() {
    let temp = TempDir::new().unwrap();
    let plan = write_plan(temp.path(), MKDIR_AND_WRITE);

    run_apply(temp.path(), &plan, &["--dry-run"])
        .success()
        .stdout(predicate::str::contains("DRY RUN"))
        .stdout(predicate::str::contains("~ mkdir x"));

    assert!(!temp.path().join("x").exists());
}

#[test]
fn test_validation_failure_exits_non_zero() {
    let temp = TempDir::new().unwrap();
    let plan = write_plan(
        temp.path(),
        r#"
[[action]]
kind = "mkdir"
path = "made"

[[action]]
kind = "rm"
path = "missing.txt"
"#,
    );

    run_apply(temp.path(), &plan, &["--yes"])
        .failure()
        .stderr(predicate::str::contains("target does not exist"));

    assert!(!temp.path().join("made").exists());
}

#[test]
fn test_unknown_kind_is_rejected() {
    let temp = TempDir::new().unwrap();
    let plan = write_plan(temp.path(), "[[action]]\nkind = \"chmod\"\npath = \"x\"\n");

    run_apply(temp.path(), &plan, &["--yes"])
        .failure()
        .stderr(predicate::str::contains("unknown kind `chmod`"));
}

#[test]
fn test_missing_parameter_is_rejected() {
    let temp = TempDir::new().unwrap();
    let plan = write_plan(temp.path(), "[[action]]\nkind = \"write\"\npath = \"a.txt\"\n");

    run_apply(temp.path(), &plan, &["--yes"])
        .failure()
        .stderr(predicate::str::contains("WriteFile: content must not be empty"));
}

#[test]
fn test_non_interactive_without_yes_cancels() {
    let temp = TempDir::new().unwrap();
    let plan = write_plan(temp.path(), MKDIR_AND_WRITE);

    run_apply(temp.path(), &plan, &[])
        .failure()
        .stderr(predicate::str::contains("cancelled"));

    assert!(!temp.path().join("x").exists());
}

#[test]
fn test_commit_failure_reports_partial_state() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("exists")).unwrap();
    let plan = write_plan(
        temp.path(),
        r#"
[[action]]
kind = "write"
path = "first.txt"
content = "1"

[[action]]
kind = "mkdir"
path = "exists"

[[action]]
kind = "write"
path = "third.txt"
content = "3"
"#,
    );

    run_apply(temp.path(), &plan, &["--yes"])
        .failure()
        .stderr(predicate::str::contains("not rolled back"));

    assert!(temp.path().join("first.txt").exists());
    assert!(!temp.path().join("third.txt").exists());
}

#[test]
fn test_soft_commit_outside_repository() {
    let temp = TempDir::new().unwrap();
    let plan = write_plan(
        temp.path(),
        r#"
[[action]]
kind = "git-commit"
root = "."
message = "nothing here"
soft = true
program = "fs-batch-no-such-vcs"

[[action]]
kind = "log"
message = "carried on"
"#,
    );

    run_apply(temp.path(), &plan, &["--yes"])
        .success()
        .stdout(predicate::str::contains("carried on"));
}

#[test]
fn test_vcs_flag_sets_default_program() {
    let temp = TempDir::new().unwrap();
    let plan = write_plan(
        temp.path(),
        "[[action]]\nkind = \"git-add\"\nroot = \".\"\npaths = [\"a\"]\n",
    );

    run_apply(temp.path(), &plan, &["--dry-run", "--vcs", "jj"])
        .success()
        .stdout(predicate::str::contains("~ jj add a"));
}

#[test]
fn test_show_normalizes_plan() {
    let temp = TempDir::new().unwrap();
    let plan = write_plan(
        temp.path(),
        "# comment\n[[action]]\nkind = \"git-commit\"\nroot = \".\"\nmessage = \"m\"\nprogram = \"git\"\n",
    );

    run_show(temp.path(), &plan)
        .success()
        .stdout(predicate::str::contains("kind = \"git-commit\""))
        .stdout(predicate::str::contains("program = \"git\""))
        .stdout(predicate::str::contains("comment").not());
}

#[test]
fn test_show_output_keeps_program_when_reapplied() {
    let temp = TempDir::new().unwrap();
    let plan = write_plan(
        temp.path(),
        "[[action]]\nkind = \"git-commit\"\nroot = \".\"\nmessage = \"m\"\nprogram = \"git\"\n",
    );

    let shown = run_show(temp.path(), &plan).success().get_output().stdout.clone();
    let normalized = write_plan(temp.path(), &String::from_utf8(shown).unwrap());

    let mut cmd = cargo_bin_cmd!("fs-batch");
    cmd.args(["apply", "--dry-run"])
        .arg(&normalized)
        .current_dir(temp.path())
        .env("FS_BATCH_VCS", "hg");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("~ git commit -m \"m\""))
        .stdout(predicate::str::contains("~ hg").not());
}

#[test]
fn test_empty_plan() {
    let temp = TempDir::new().unwrap();
    let plan = write_plan(temp.path(), "");

    run_apply(temp.path(), &plan, &["--yes"])
        .success()
        .stdout(predicate::str::contains("No actions in plan"));
}

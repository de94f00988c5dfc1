//! Shared helpers for fs-batch integration tests.

use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Writes `content` to `plan.toml` inside `dir` and returns its path.
#[allow(unused)]
pub fn write_plan(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("plan.toml");
    fs::write(&path, content).unwrap();
    path
}

/// Runs `fs-batch apply <plan>` with extra arguments from `cwd`.
#[allow(unused)]
pub fn run_apply(cwd: &Path, plan: &Path, extra_args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = cargo_bin_cmd!("fs-batch");
    cmd.arg("apply")
        .arg(plan)
        .args(extra_args)
        .env_remove("FS_BATCH_VCS")
        .current_dir(cwd);

    cmd.assert()
}

/// Runs `fs-batch show <plan>`.
#[allow(unused)]
pub fn run_show(cwd: &Path, plan: &Path) -> assert_cmd::assert::Assert {
    let mut cmd = cargo_bin_cmd!("fs-batch");
    cmd.arg("show")
        .arg(plan)
        .current_dir(cwd)
        .env_remove("FS_BATCH_VCS");
    cmd.assert()
}

/// Returns true if a usable `git` is on PATH.
#[allow(unused)]
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Initializes a git repository with a local identity so commits work in CI.
#[allow(unused)]
pub fn init_repo(root: &Path) {
    for args in [
        &["init", "-q"][..],
        &["config", "user.email", "tests@example.com"][..],
        &["config", "user.name", "fs-batch tests"][..],
        &["config", "commit.gpgsign", "false"][..],
    ] {
        let status = Command::new("git")
            .args(args)
            .current_dir(root)
            .status()
            .unwrap();
        assert!(status.success(), "git {:?} failed", args);
    }
}

/// Output of `git <args>` in `root`, trimmed.
#[allow(unused)]
pub fn git_output(root: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(root)
        .output()
        .unwrap();
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

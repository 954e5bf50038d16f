#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command as ProcessCommand;
use tempfile::TempDir;

fn git(path: &Path, args: &[&str]) {
    let output = ProcessCommand::new("git")
        .args([
            "-c",
            "user.name=Repo Health",
            "-c",
            "user.email=repo-health@example.com",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .current_dir(path)
        .output()
        .expect("git should run");
    assert!(output.status.success(), "git {args:?} should succeed");
}

fn init_git_repo(path: &Path) {
    git(path, &["init", "-q"]);
}

fn healthy_repo() -> TempDir {
    let repo = TempDir::new().expect("temp dir should be created");
    init_git_repo(repo.path());
    fs::write(repo.path().join("README.md"), "# Sample\n").expect("readme should write");
    fs::write(repo.path().join("LICENSE"), "MIT License\n").expect("license should write");
    fs::write(repo.path().join(".gitignore"), "target/\n").expect("gitignore should write");
    fs::create_dir_all(repo.path().join("tests")).expect("tests dir should create");
    fs::write(repo.path().join("tests/README.md"), "tests live here\n").expect("tests readme");
    git(repo.path(), &["add", "."]);
    git(
        repo.path(),
        &["commit", "-q", "-m", "Add project skeleton and license"],
    );
    repo
}

fn repo_health() -> Command {
    Command::cargo_bin("repo-health").expect("binary should compile")
}

#[test]
fn analyze_requires_git_repository() {
    let repo = TempDir::new().expect("temp dir should be created");

    repo_health()
        .arg(repo.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a git repository"));
}

#[test]
fn empty_git_repo_scores_zero_without_failing() {
    let repo = TempDir::new().expect("temp dir should be created");
    init_git_repo(repo.path());

    repo_health()
        .arg(repo.path())
        .arg("-q")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score: 0/100 (Critical)"));
}

#[test]
fn healthy_repo_scores_full_marks_in_json() {
    let repo = healthy_repo();

    let output = repo_health()
        .arg(repo.path())
        .args(["--format", "json"])
        .output()
        .expect("binary should run");
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be json");
    assert_eq!(report["health_score"], 100);
    assert_eq!(report["category"], "Excellent");
    assert_eq!(report["history"]["total_commits"], 1);
    assert_eq!(report["breakdown"]["base_score"], 100);
}

#[test]
fn check_flags_limit_which_reports_run() {
    let repo = healthy_repo();
    fs::write(
        repo.path().join(".env"),
        "API_KEY=sk-AbCdEfGhIjKlMnOpQrStUvWxYz1234567890\n",
    )
    .expect("env file should write");

    let output = repo_health()
        .arg(repo.path())
        .args(["--check-security", "--format", "json"])
        .output()
        .expect("binary should run");
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be json");
    assert_eq!(report["breakdown"]["security"], -20);
    assert_eq!(report["health_score"], 80);
    assert!(report.get("coverage").is_none());
    assert!(report["breakdown"].get("commit_quality").is_none());
}

#[test]
fn bad_commit_messages_are_penalized() {
    let repo = healthy_repo();
    fs::write(repo.path().join("notes.txt"), "scratch\n").expect("notes should write");
    git(repo.path(), &["add", "."]);
    git(repo.path(), &["commit", "-q", "-m", "wip"]);

    repo_health()
        .arg(repo.path())
        .arg("--check-commits")
        .assert()
        .success()
        .stdout(predicate::str::contains("(contains 'wip')"))
        .stdout(predicate::str::contains("Very short commit message"))
        .stdout(predicate::str::contains("Score: 80/100 (Good)"));
}

#[test]
fn config_file_selects_format_and_checks() {
    let repo = healthy_repo();
    fs::write(
        repo.path().join("repo-health.toml"),
        r#"
[checks]
language = true

[output]
format = "markdown"
"#,
    )
    .expect("config should write");

    repo_health()
        .arg(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("# Git Repository Health Report"))
        .stdout(predicate::str::contains("## Language Checks"))
        .stdout(predicate::str::contains("## Security").not());
}

#[test]
fn invalid_config_is_an_input_error() {
    let repo = healthy_repo();
    fs::write(repo.path().join("repo-health.toml"), "[output]\nformat = \"pdf\"\n")
        .expect("config should write");

    repo_health()
        .arg(repo.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config parse error"));
}

#[test]
fn unreadable_config_is_an_input_error() {
    let repo = TempDir::new().expect("temp dir should be created");
    init_git_repo(repo.path());
    fs::create_dir_all(repo.path().join("repo-health.toml")).expect("config dir should create");

    repo_health()
        .arg(repo.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("config parse error"))
        .stderr(predicate::str::contains("repo-health.toml"));
}

#[test]
fn output_flag_writes_report_file() {
    let repo = healthy_repo();
    let out_dir = TempDir::new().expect("output dir should be created");
    let out_file = out_dir.path().join("report.yaml");

    repo_health()
        .arg(repo.path())
        .args(["--format", "yaml", "--output"])
        .arg(&out_file)
        .assert()
        .success()
        .stderr(predicate::str::contains("report saved to"));

    let written = fs::read_to_string(&out_file).expect("report should be written");
    assert!(written.contains("health_score: 100"));
}

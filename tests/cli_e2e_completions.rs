//! End-to-end tests for the `mirrorconf completions` command.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_completions_help() {
    let mut cmd = cargo_bin_cmd!("mirrorconf");
    cmd.arg("completions")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generate shell completion scripts"))
        .stdout(predicate::str::contains("bash"))
        .stdout(predicate::str::contains("zsh"));
}

#[test]
fn test_completions_bash() {
    let mut cmd = cargo_bin_cmd!("mirrorconf");
    cmd.arg("completions")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("_mirrorconf()"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_completions_zsh() {
    let mut cmd = cargo_bin_cmd!("mirrorconf");
    cmd.arg("completions")
        .arg("zsh")
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef mirrorconf"));
}

#[test]
fn test_completions_invalid_shell() {
    let mut cmd = cargo_bin_cmd!("mirrorconf");
    cmd.arg("completions").arg("tcsh").assert().failure();
}

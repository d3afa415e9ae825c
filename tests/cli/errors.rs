//! Tests for error handling and CLI flags.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_help() {
    let t = Test::new();

    t.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("KEY=VALUE"));
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    t.cmd().arg("unknown-command").assert().failure();
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    t.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("stackplan"));
}

#[test]
fn test_missing_env_is_fatal_with_hint() {
    let t = Test::new();

    let output = t.run(&["prefix=ACME"], &["plan"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "context 'env' is not set");
    assert_stderr_contains(&output, "stackplan -c env=dev plan");
    assert!(stdout(&output).trim().is_empty());
}

#[test]
fn test_empty_env_is_fatal() {
    let t = Test::new();

    t.cmd()
        .args(["-c", "env=", "context"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("context 'env' is not set"));
}

#[test]
fn test_malformed_context_pair() {
    let t = Test::new();

    t.cmd()
        .args(["-c", "env", "context"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed context parameter 'env'"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_unknown_lookup_rejected() {
    let t = Test::new();

    t.cmd()
        .args(["-c", "env=dev", "plan", "--lookup", "vault"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value 'vault'"));
}

#[test]
fn test_config_not_found() {
    let t = Test::new();

    let output = t.run(&["env=dev", "config_filepath=missing.json"], &["plan"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "missing.json does not exist");
    assert!(stdout(&output).trim().is_empty());
}

#[test]
fn test_config_invalid_json() {
    let t = Test::with_config("{bad");

    let output = t.plan_json();
    assert_failure(&output);
    assert_stderr_contains(&output, "is not a valid JSON");
    assert!(stdout(&output).trim().is_empty());
}

#[test]
fn test_completions_bash_outputs_script() {
    let t = Test::new();

    t.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_stackplan").or(predicate::str::contains("complete")));
}

#[test]
fn test_completions_zsh() {
    let t = Test::new();

    t.cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("#compdef"));
}

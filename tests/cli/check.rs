//! Tests for the check command.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_check_valid_config() {
    let t = Test::with_config(NETWORK_CONFIG).with_fallback_db();

    let output = t.check();
    assert_success(&output);
    assert_stdout_contains(&output, "RDV1-dev-DeviceManagerAPIStack");
    assert_stdout_contains(&output, "vpc-0123456789 (2 security groups)");
    assert_stdout_contains(&output, "credentials via environment fallback");
}

#[test]
fn test_check_partial_network_lists_missing_key() {
    let t = Test::with_config(PARTIAL_NETWORK_CONFIG);

    let output = t.check();
    assert_failure(&output);
    assert_stderr_contains(&output, "missing network config: security_group_ids");
}

#[test]
fn test_check_missing_parameter_name() {
    let t = Test::with_config(r#"{"database": {"credentials": {"provider": "ssm"}}}"#);

    let output = t.check();
    assert_failure(&output);
    assert_stderr_contains(&output, "parameter_name required");
    assert_stderr_contains(&output, "add \"parameter_name\"");
}

#[test]
fn test_check_incomplete_plaintext_warns() {
    let t = Test::with_config(INCOMPLETE_PLAINTEXT_CONFIG);

    let output = t.check();
    assert_success(&output);
    assert_stderr_contains(&output, "missing required database credentials: password");
}

#[test]
fn test_check_strict_fails() {
    let t = Test::with_config(INCOMPLETE_PLAINTEXT_CONFIG);

    t.cmd()
        .args(["-c", "env=dev", "-c", "config_filepath=dev.json", "check", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("incomplete database credentials"))
        .stdout(predicate::str::contains("credentials via").not());
}

#[test]
fn test_check_warning_printed_once() {
    let t = Test::with_config(INCOMPLETE_PLAINTEXT_CONFIG);

    t.cmd()
        .args(["-c", "env=dev", "-c", "config_filepath=dev.json", "check"])
        .assert()
        .success()
        .stderr(predicate::str::contains("missing required database credentials").count(1));
}

#[test]
fn test_check_never_prints_values() {
    let t = Test::with_config(PLAINTEXT_CONFIG);

    let output = t.check();
    assert_success(&output);
    assert_output_excludes(&output, "plaintext-pw-71ad");
}

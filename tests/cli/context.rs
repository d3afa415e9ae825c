//! Tests for the context command.

use crate::support::*;

#[test]
fn test_context_default_prefix() {
    let t = Test::new();

    let output = t.run(&["env=dev"], &["context", "--json"]);
    assert_success(&output);
    let value = stdout_json(&output);
    assert_eq!(value["context"]["environment"], "dev");
    assert_eq!(value["context"]["prefix"], "RDV1");
    assert!(value["config_filepath"].is_null());
}

#[test]
fn test_context_prefix_from_environment() {
    let t = Test::new().env("DEVICE_MANAGER__DEFAULT_PREFIX", "CORP");

    let output = t.run(&["env=prod"], &["context", "--json"]);
    assert_success(&output);
    assert_eq!(stdout_json(&output)["context"]["prefix"], "CORP");
}

#[test]
fn test_context_explicit_prefix_wins() {
    let t = Test::new().env("DEVICE_MANAGER__DEFAULT_PREFIX", "CORP");

    let output = t.run(&["env=prod", "prefix=ACME"], &["context", "--json"]);
    assert_success(&output);
    assert_eq!(stdout_json(&output)["context"]["prefix"], "ACME");
}

#[test]
fn test_context_human_output() {
    let t = Test::new().env("AWS_REGION", "eu-west-1");

    let output = t.run(&["env=dev", "config_filepath=dev.json"], &["context"]);
    assert_success(&output);
    assert_stdout_contains(&output, "RDV1");
    assert_stdout_contains(&output, "eu-west-1");
    assert_stdout_contains(&output, "dev.json");
}

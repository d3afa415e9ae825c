//! Tests for the plan command.

use crate::support::*;

#[test]
fn test_plan_runtime_retrieval_json() {
    let t = Test::with_config(SSM_CONFIG)
        .env("AWS_REGION", "eu-west-1")
        .env("AWS_ACCOUNT_ID", "123456789012");

    let output = t.plan_json();
    assert_success(&output);
    let plan = stdout_json(&output);

    assert_eq!(plan["credentials"]["strategy"], "runtime_retrieval");
    let env = &plan["credentials"]["environment"];
    assert_eq!(env["PARAMETERS_PROVIDER_NAME"], "ssm");
    assert_eq!(env["PARAMETERS_PROVIDER_DECRYPT"], "true");
    // Sensitive by name, so masked unless --reveal
    assert_eq!(env["DATABASE_CREDENTIALS_PARAMETER"], "********");

    let grants = plan["credentials"]["grants"].as_array().unwrap();
    assert_eq!(grants.len(), 1);
    assert_eq!(grants[0]["action"], "GetParameter");
    assert_eq!(grants[0]["resource_identifier"], "device-manager/dev/db");

    assert_eq!(plan["policy"][0]["action"], "ssm:GetParameter");
    assert_eq!(
        plan["policy"][0]["resource"],
        "arn:aws:ssm:eu-west-1:123456789012:parameter/device-manager/dev/db"
    );
}

#[test]
fn test_plan_reveal_shows_values() {
    let t = Test::with_config(SSM_CONFIG);

    let output = t.run(
        &["env=dev", "config_filepath=dev.json"],
        &["plan", "--json", "--reveal"],
    );
    assert_success(&output);
    let plan = stdout_json(&output);
    assert_eq!(
        plan["credentials"]["environment"]["DATABASE_CREDENTIALS_PARAMETER"],
        "device-manager/dev/db"
    );
}

#[test]
fn test_plan_direct_exposure_dynamic_reference() {
    let t = Test::with_config(EXPOSED_SECRET_CONFIG);

    let output = t.run(
        &["env=dev", "config_filepath=dev.json"],
        &["plan", "--json", "--reveal"],
    );
    assert_success(&output);
    let plan = stdout_json(&output);

    assert_eq!(plan["credentials"]["strategy"], "direct_exposure");
    assert_eq!(
        plan["credentials"]["environment"]["DATABASE_CREDENTIALS"],
        "{{resolve:secretsmanager:device-manager/dev/db}}"
    );
    assert!(plan["credentials"]["grants"].as_array().unwrap().is_empty());
    assert!(plan["policy"].as_array().unwrap().is_empty());
}

#[test]
fn test_plan_plaintext_masks_password() {
    let t = Test::with_config(PLAINTEXT_CONFIG);

    let output = t.plan_json();
    assert_success(&output);
    assert_output_excludes(&output, "plaintext-pw-71ad");

    let plan = stdout_json(&output);
    let env = &plan["credentials"]["environment"];
    assert_eq!(env["POSTGRES_PORT"], "5433");
    assert_eq!(env["POSTGRES_HOST"], "db.internal");
    assert_eq!(env["POSTGRES_PASSWORD"], "********");
}

#[test]
fn test_plan_environment_fallback() {
    let t = Test::new().with_fallback_db();

    let output = t.run(&["env=dev"], &["plan", "--json", "--reveal"]);
    assert_success(&output);
    let plan = stdout_json(&output);

    assert_eq!(plan["credentials"]["strategy"], "environment_fallback");
    let env = &plan["credentials"]["environment"];
    assert_eq!(env["POSTGRES_DB"], "devices");
    assert_eq!(env["POSTGRES_PORT"], "5432");
    assert_eq!(env["POSTGRES_PASSWORD"], "fallback-pw-9f2c");
}

#[test]
fn test_plan_missing_fallback_warns_but_succeeds() {
    let t = Test::new();

    let output = t.run(&["env=dev"], &["plan", "--json"]);
    assert_success(&output);
    assert_stderr_contains(&output, "DEVICE_MANAGER__DATABASE_PASSWORD");

    let plan = stdout_json(&output);
    assert!(plan["credentials"]["environment"]
        .as_object()
        .unwrap()
        .is_empty());
    assert_eq!(plan["warnings"][0]["kind"], "missing_env_vars");
}

#[test]
fn test_plan_strict_fails_on_missing_credentials() {
    let t = Test::with_config(INCOMPLETE_PLAINTEXT_CONFIG);

    let output = t.run(
        &["env=dev", "config_filepath=dev.json"],
        &["plan", "--strict"],
    );
    assert_failure(&output);
    assert_stderr_contains(&output, "incomplete database credentials");
    assert_stderr_contains(&output, "password");
}

#[test]
fn test_plan_strict_from_environment() {
    let t = Test::with_config(INCOMPLETE_PLAINTEXT_CONFIG).env("STACKPLAN_STRICT", "true");

    let output = t.plan_json();
    assert_failure(&output);
}

#[test]
fn test_plan_network_and_names() {
    let t = Test::with_config(NETWORK_CONFIG).with_fallback_db();

    let output = t.run(
        &["env=stg", "prefix=ACME", "config_filepath=dev.json"],
        &["plan", "--json"],
    );
    assert_success(&output);
    let plan = stdout_json(&output);

    assert_eq!(plan["network"]["vpc_id"], "vpc-0123456789");
    assert_eq!(plan["network"]["subnet_policy"], "private_with_egress");
    assert_eq!(plan["resources"]["stack"], "ACME-stg-DeviceManagerAPIStack");
    assert_eq!(plan["resources"]["stage"], "stg");
    assert_eq!(plan["resources"]["vpc"], "ACME-stg-PrivateVPC");
    assert_eq!(
        plan["resources"]["security_groups"],
        serde_json::json!(["ACME-stg-security-group-1", "ACME-stg-security-group-2"])
    );
}

#[test]
fn test_plan_human_summary() {
    let t = Test::with_config(NETWORK_CONFIG).with_fallback_db();

    let output = t.run(&["env=dev", "config_filepath=dev.json"], &["plan"]);
    assert_success(&output);
    assert_stdout_contains(&output, "RDV1-dev-DeviceManagerAPIFunction");
    assert_stdout_contains(&output, "environment fallback");
    assert_stdout_contains(&output, "private subnets with egress");
    assert_output_excludes(&output, "fallback-pw-9f2c");
}

#[test]
fn test_plan_powertools_arn_with_region() {
    let t = Test::new().with_fallback_db().env("AWS_REGION", "us-east-2");

    let output = t.run(&["env=dev"], &["plan", "--json"]);
    assert_success(&output);
    let plan = stdout_json(&output);
    assert_eq!(
        plan["function"]["powertools_layer_arn"],
        "arn:aws:lambda:us-east-2:017000801446:layer:AWSLambdaPowertoolsPythonV3-python312-arm64:23"
    );
}

#[cfg(not(feature = "aws"))]
#[test]
fn test_plan_aws_lookup_without_feature() {
    let t = Test::with_config(EXPOSED_SECRET_CONFIG);

    let output = t.run(
        &["env=dev", "config_filepath=dev.json"],
        &["plan", "--lookup", "aws"],
    );
    assert_failure(&output);
    assert_stderr_contains(&output, "--features aws");
}

//! Context command - show the resolved environment and prefix.

use serde_json::json;

use crate::cli::output;
use crate::core::constants;
use crate::core::context::{DeploymentContext, Params, Target};
use crate::core::env::ProcessEnv;
use crate::error::Result;

/// Resolve the deployment context and print it.
pub fn execute(mut params: Params, json: bool) -> Result<()> {
    let ctx = DeploymentContext::resolve(&mut params, &ProcessEnv)?;
    let target = Target::from_env(&ProcessEnv);
    let config = params.get_non_empty(constants::PARAM_CONFIG_FILEPATH);

    if json {
        let value = json!({
            "context": ctx,
            "target": target,
            "config_filepath": config,
        });
        output::raw(&serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    output::section("Context");
    output::kv("environment", ctx.environment());
    output::kv("prefix     ", ctx.prefix());
    output::kv("config     ", config.unwrap_or("none"));
    output::kv("region     ", target.region_or_pseudo());
    output::kv("account    ", target.account_or_pseudo());
    Ok(())
}

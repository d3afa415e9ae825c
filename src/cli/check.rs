//! Check command.
//!
//! Validates context and configuration and reports credential problems
//! without printing any values.

use crate::cli::output;
use crate::core::context::Params;
use crate::core::credentials::{self, CredentialOptions};
use crate::core::env::ProcessEnv;
use crate::core::network;
use crate::core::plan;
use crate::core::reference::DynamicReference;
use crate::error::Result;

/// Validate the configuration.
pub fn execute(mut params: Params, strict: bool) -> Result<()> {
    let (ctx, config) = plan::load(&mut params, &ProcessEnv)?;
    output::success(&format!(
        "context {}",
        output::key(&ctx.qualify("DeviceManagerAPIStack"))
    ));

    match network::resolve(&config)? {
        Some(network) => output::success(&format!(
            "network {} ({} security group{})",
            network.vpc_id,
            network.security_group_ids.len(),
            if network.security_group_ids.len() == 1 { "" } else { "s" }
        )),
        None => output::dimmed("no network config"),
    };

    // Dynamic references never touch AWS, so checking stays offline.
    let resolution = credentials::resolve(
        &config,
        &ProcessEnv,
        &DynamicReference,
        CredentialOptions { strict },
    )?;
    for warning in &resolution.warnings {
        output::warn(&warning.to_string());
    }
    output::success(&format!(
        "credentials via {}",
        resolution.plan.strategy().label()
    ));
    Ok(())
}

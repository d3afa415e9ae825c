//! Plan command.
//!
//! Runs the full pipeline and prints the provisioning plan.

use crate::cli::output;
use crate::core::context::Params;
use crate::core::credentials::CredentialOptions;
use crate::core::env::ProcessEnv;
use crate::core::plan::{self, PlanOptions, ProvisioningPlan};
use crate::core::reference::Lookup;
use crate::error::Result;

/// Build and print the provisioning plan.
pub fn execute(
    mut params: Params,
    json: bool,
    reveal: bool,
    strict: bool,
    lookup: Lookup,
) -> Result<()> {
    let resolver = lookup.resolver()?;
    let options = PlanOptions {
        credentials: CredentialOptions { strict },
    };
    let plan = plan::build(&mut params, &ProcessEnv, resolver.as_ref(), options)?;
    let plan = if reveal { plan } else { plan.masked() };

    for warning in &plan.warnings {
        output::warn(&warning.to_string());
    }

    if json {
        output::raw(&serde_json::to_string_pretty(&plan)?);
    } else {
        print_summary(&plan);
    }
    Ok(())
}

fn print_summary(plan: &ProvisioningPlan) {
    output::section("Context");
    output::kv("environment", plan.context.environment());
    output::kv("prefix     ", plan.context.prefix());
    output::kv("region     ", plan.target.region_or_pseudo());
    output::kv("account    ", plan.target.account_or_pseudo());

    output::section("Resources");
    let names = &plan.resources;
    output::kv("stack      ", &names.stack);
    output::kv("function   ", &names.function);
    output::kv("layer      ", &names.layer);
    output::kv("api        ", format!("{} (stage {})", names.api, names.stage));
    output::kv(
        "runtime    ",
        format!(
            "{} {} {}MB {}s",
            plan.function.runtime,
            plan.function.architecture,
            plan.function.memory_mb,
            plan.function.timeout_secs
        ),
    );
    if let Some(arn) = &plan.function.powertools_layer_arn {
        output::kv("powertools ", arn);
    }

    output::section("Network");
    match &plan.network {
        Some(network) => {
            output::kv("vpc        ", &network.vpc_id);
            output::kv("zones      ", network.availability_zones.join(", "));
            output::kv("subnets    ", network.private_subnet_ids.join(", "));
            output::kv("groups     ", network.security_group_ids.join(", "));
            output::kv("placement  ", "private subnets with egress");
        }
        None => output::dimmed("no VPC attachment"),
    }

    output::section("Database credentials");
    output::kv("strategy   ", plan.credentials.strategy().label());
    if plan.credentials.environment().is_empty() {
        output::dimmed("no database environment");
    }
    for (key, value) in plan.credentials.environment() {
        output::list_item(&format!("{}={}", output::key(key), value));
    }
    for statement in &plan.policy {
        output::list_item(&format!("allow {} on {}", statement.action, statement.resource));
    }
}

//! Provisioning plan assembly.
//!
//! Runs the resolvers in order and gathers their output:
//!
//! ```text
//! context ──▶ config ──┬──▶ network ─────┬──▶ names ──▶ ProvisioningPlan
//!                      └──▶ credentials ─┘
//! ```
//!
//! Any fatal error stops the pipeline before a plan exists, so a partial
//! plan is never handed to the declaration layer.

use serde::Serialize;
use tracing::debug;

use crate::core::config;
use crate::core::constants;
use crate::core::context::{DeploymentContext, Params, Target};
use crate::core::credentials::{self, CredentialOptions, CredentialPlan, CredentialWarning};
use crate::core::env::EnvReader;
use crate::core::naming::{FunctionSettings, PolicyStatement, ResourceNames};
use crate::core::network::{self, NetworkDescriptor};
use crate::core::reference::ParameterResolver;
use crate::error::Result;

/// Options for [`build`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanOptions {
    pub credentials: CredentialOptions,
}

/// Everything the declaration layer needs for one stack.
#[derive(Debug, Clone, Serialize)]
pub struct ProvisioningPlan {
    pub context: DeploymentContext,
    pub target: Target,
    pub resources: ResourceNames,
    pub function: FunctionSettings,
    pub network: Option<NetworkDescriptor>,
    pub credentials: CredentialPlan,
    pub policy: Vec<PolicyStatement>,
    pub warnings: Vec<CredentialWarning>,
}

impl ProvisioningPlan {
    /// Copy with sensitive environment values masked.
    pub fn masked(&self) -> Self {
        Self {
            credentials: self.credentials.masked(),
            ..self.clone()
        }
    }
}

/// Resolve the context and load the config file named by `config_filepath`.
///
/// # Errors
///
/// Returns context or config errors.
pub fn load(
    params: &mut Params,
    env: &dyn EnvReader,
) -> Result<(DeploymentContext, config::RawConfig)> {
    let ctx = DeploymentContext::resolve(params, env)?;
    let config = config::load_optional(params.get_non_empty(constants::PARAM_CONFIG_FILEPATH))?;
    Ok((ctx, config))
}

/// Build the provisioning plan.
///
/// # Errors
///
/// Returns the first fatal error from any resolver.
pub fn build(
    params: &mut Params,
    env: &dyn EnvReader,
    resolver: &dyn ParameterResolver,
    options: PlanOptions,
) -> Result<ProvisioningPlan> {
    let (ctx, config) = load(params, env)?;
    let target = Target::from_env(env);

    let network = network::resolve(&config)?;
    let resolution = credentials::resolve(&config, env, resolver, options.credentials)?;

    let resources = ResourceNames::derive(&ctx, network.as_ref());
    let function = FunctionSettings::for_target(&target);
    let policy = resolution
        .plan
        .grants()
        .iter()
        .map(|grant| PolicyStatement::for_grant(grant, &target))
        .collect();

    debug!(
        stack = %resources.stack,
        vpc = network.is_some(),
        strategy = resolution.plan.strategy().label(),
        "plan built"
    );

    Ok(ProvisioningPlan {
        context: ctx,
        target,
        resources,
        function,
        network,
        credentials: resolution.plan,
        policy,
        warnings: resolution.warnings,
    })
}

//! Resource names and identifiers derived from the deployment context.
//!
//! Every name follows `{prefix}-{env}-{Resource}` so stacks for different
//! environments and teams can live side by side in one account.

use serde::Serialize;

use crate::core::constants;
use crate::core::context::{DeploymentContext, Target};
use crate::core::credentials::{AccessGrant, ResourceKind};
use crate::core::network::NetworkDescriptor;

/// Names of the resources declared for one stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceNames {
    pub stack: String,
    pub function: String,
    pub layer: String,
    pub powertools_layer: String,
    pub api: String,
    pub stage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub security_groups: Vec<String>,
}

impl ResourceNames {
    /// Derive all names; network references only when a network is attached.
    pub fn derive(ctx: &DeploymentContext, network: Option<&NetworkDescriptor>) -> Self {
        let (vpc, security_groups) = match network {
            Some(network) => (
                Some(ctx.qualify("PrivateVPC")),
                (1..=network.security_group_ids.len())
                    .map(|n| ctx.qualify(&format!("security-group-{}", n)))
                    .collect(),
            ),
            None => (None, Vec::new()),
        };

        Self {
            stack: ctx.qualify("DeviceManagerAPIStack"),
            function: ctx.qualify("DeviceManagerAPIFunction"),
            layer: ctx.qualify("DeviceManagerAPILayer"),
            powertools_layer: ctx.qualify("LambdaPowerToolsLayer"),
            api: ctx.qualify("DeviceManagerAPI"),
            stage: ctx.environment().to_string(),
            vpc,
            security_groups,
        }
    }
}

/// Fixed settings of the compute function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionSettings {
    pub runtime: &'static str,
    pub architecture: &'static str,
    pub handler: &'static str,
    pub code_path: &'static str,
    pub memory_mb: u32,
    pub timeout_secs: u32,
    pub routes: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub powertools_layer_arn: Option<String>,
}

impl FunctionSettings {
    /// Settings for the Device Manager function in `target`.
    pub fn for_target(target: &Target) -> Self {
        let architecture = "arm64";
        Self {
            runtime: "python3.12",
            architecture,
            handler: "lambda_function.lambda_handler",
            code_path: "functions/product_manager/app",
            memory_mb: 512,
            timeout_secs: 60,
            routes: vec!["ANY /", "ANY /{proxy+}"],
            powertools_layer_arn: target.region.as_deref().map(|region| {
                PowertoolsLayer {
                    architecture,
                    ..PowertoolsLayer::default()
                }
                .arn(region)
            }),
        }
    }
}

/// Coordinates of a published Lambda Powertools layer version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PowertoolsLayer {
    pub version: u32,
    pub architecture: &'static str,
    pub package: &'static str,
    pub python: &'static str,
}

impl Default for PowertoolsLayer {
    fn default() -> Self {
        Self {
            version: 23,
            architecture: "x86_64",
            package: "V3",
            python: "python312",
        }
    }
}

impl PowertoolsLayer {
    /// Layer ARN in `region`.
    ///
    /// Example: `arn:aws:lambda:us-east-2:017000801446:layer:AWSLambdaPowertoolsPythonV3-python312-x86_64:23`
    pub fn arn(&self, region: &str) -> String {
        format!(
            "arn:aws:lambda:{}:{}:layer:AWSLambdaPowertoolsPython{}-{}-{}:{}",
            region,
            constants::POWERTOOLS_ACCOUNT_ID,
            self.package,
            self.python,
            self.architecture,
            self.version
        )
    }
}

/// IAM policy statement for one grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyStatement {
    pub action: &'static str,
    pub resource: String,
}

impl PolicyStatement {
    /// Render `grant` against `target`.
    pub fn for_grant(grant: &AccessGrant, target: &Target) -> Self {
        let region = target.region_or_pseudo();
        let account = target.account_or_pseudo();
        let resource = match grant.resource_kind {
            ResourceKind::Parameter => format!(
                "arn:aws:ssm:{}:{}:parameter/{}",
                region, account, grant.resource_identifier
            ),
            ResourceKind::Secret => format!(
                "arn:aws:secretsmanager:{}:{}:secret:{}",
                region, account, grant.resource_identifier
            ),
        };
        Self {
            action: grant.action.iam_action(),
            resource,
        }
    }
}

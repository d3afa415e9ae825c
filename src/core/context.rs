//! Deployment context resolution.
//!
//! The context is the pair (environment name, resource prefix) that every
//! generated resource name is built from. Parameters arrive as `key=value`
//! pairs on the command line, mirroring `cdk -c env=dev -c prefix=ACME`.

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

use crate::core::constants;
use crate::core::env::EnvReader;
use crate::error::{ContextError, Result};

/// Primary parameter source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: BTreeMap<String, String>,
}

impl Params {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `key=value` pairs.
    ///
    /// Later pairs override earlier ones with the same key.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::MalformedParam` for a pair without `=` or with
    /// an empty key.
    pub fn parse<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut params = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            match pair.split_once('=') {
                Some((key, value)) if !key.trim().is_empty() => {
                    params.set(key.trim(), value.trim());
                }
                _ => return Err(ContextError::MalformedParam(pair.to_string()).into()),
            }
        }
        Ok(params)
    }

    /// Raw value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Value for `key`, treating an empty string as unset.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Set `key` to `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// All parameters.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Environment name and resource prefix for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentContext {
    environment: String,
    prefix: String,
}

impl DeploymentContext {
    /// Resolve the context from parameters, falling back to the environment
    /// for the prefix.
    ///
    /// The prefix actually used is written back into `params` under
    /// `prefix`, so later readers of the parameters see the same value.
    ///
    /// # Errors
    ///
    /// Returns `ContextError::Missing` if `env` is absent or empty.
    pub fn resolve(params: &mut Params, env: &dyn EnvReader) -> Result<Self> {
        let environment = params
            .get_non_empty(constants::PARAM_ENV)
            .ok_or(ContextError::Missing {
                param: constants::PARAM_ENV,
            })?
            .to_string();

        let prefix = match params.get_non_empty(constants::PARAM_PREFIX) {
            Some(prefix) => prefix.to_string(),
            None => {
                let prefix = env
                    .non_empty(constants::ENV_DEFAULT_PREFIX)
                    .unwrap_or_else(|| constants::DEFAULT_PREFIX.to_string());
                debug!(prefix = %prefix, "prefix not in context, using default");
                prefix
            }
        };
        params.set(constants::PARAM_PREFIX, prefix.clone());

        debug!(environment = %environment, prefix = %prefix, "context resolved");
        Ok(Self {
            environment,
            prefix,
        })
    }

    /// Deployment environment name (e.g. `dev`).
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Resource naming prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Qualify a resource name as `{prefix}-{env}-{name}`.
    pub fn qualify(&self, name: &str) -> String {
        format!("{}-{}-{}", self.prefix, self.environment, name)
    }
}

/// Account and region the stack is deployed into.
///
/// Both are optional; unresolved values are rendered as CloudFormation
/// pseudo parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Target {
    pub account: Option<String>,
    pub region: Option<String>,
}

impl Target {
    /// Read `AWS_ACCOUNT_ID` and `AWS_REGION`.
    pub fn from_env(env: &dyn EnvReader) -> Self {
        Self {
            account: env.non_empty(constants::ENV_AWS_ACCOUNT_ID),
            region: env.non_empty(constants::ENV_AWS_REGION),
        }
    }

    /// Account id or `${AWS::AccountId}`.
    pub fn account_or_pseudo(&self) -> &str {
        self.account.as_deref().unwrap_or("${AWS::AccountId}")
    }

    /// Region or `${AWS::Region}`.
    pub fn region_or_pseudo(&self) -> &str {
        self.region.as_deref().unwrap_or("${AWS::Region}")
    }
}

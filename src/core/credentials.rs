//! Database credential provisioning.
//!
//! Decides how the function receives its database credentials. Exactly one
//! of four strategies applies:
//!
//! | Strategy              | Trigger                                   | Output                          |
//! |-----------------------|-------------------------------------------|---------------------------------|
//! | A: direct exposure    | provider `ssm`/`secret`, `expose` truthy  | `DATABASE_CREDENTIALS`          |
//! | B: runtime retrieval  | provider `ssm`/`secret`, otherwise        | parameter reference + one grant |
//! | C: direct plaintext   | any other provider                        | `POSTGRES_*` from config        |
//! | D: environment        | no `database.credentials`                 | `POSTGRES_*` from environment   |
//!
//! Resolution is pure: missing plaintext or fallback credentials produce
//! [`CredentialWarning`]s next to the plan instead of being printed here.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;
use zeroize::Zeroize;

use crate::core::config::{self, RawConfig};
use crate::core::constants;
use crate::core::env::EnvReader;
use crate::core::redact;
use crate::core::reference::ParameterResolver;
use crate::error::{CredentialError, Result};

/// Keys required for plaintext credentials in the config.
pub const REQUIRED_CONFIG_KEYS: [&str; 4] = ["dbname", "host", "username", "password"];

/// Environment variables required for the fallback strategy.
pub const REQUIRED_ENV_VARS: [&str; 4] = [
    constants::ENV_DATABASE_NAME,
    constants::ENV_DATABASE_HOST,
    constants::ENV_DATABASE_USER,
    constants::ENV_DATABASE_PASSWORD,
];

/// Managed store holding the credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// SSM Parameter Store
    Ssm,
    /// Secrets Manager
    Secret,
}

impl Provider {
    /// Parse the `provider` field. Any other value is not a managed store.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ssm" => Some(Self::Ssm),
            "secret" => Some(Self::Secret),
            _ => None,
        }
    }

    /// Name as written in the config.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ssm => "ssm",
            Self::Secret => "secret",
        }
    }

    fn grant(&self) -> (ResourceKind, Action) {
        match self {
            Self::Ssm => (ResourceKind::Parameter, Action::GetParameter),
            Self::Secret => (ResourceKind::Secret, Action::GetSecretValue),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which strategy produced a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    DirectExposure,
    RuntimeRetrieval,
    DirectPlaintext,
    EnvironmentFallback,
}

impl Strategy {
    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::DirectExposure => "direct exposure",
            Self::RuntimeRetrieval => "runtime retrieval",
            Self::DirectPlaintext => "direct plaintext",
            Self::EnvironmentFallback => "environment fallback",
        }
    }
}

/// Kind of resource an access grant targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Parameter,
    Secret,
}

/// Action an access grant allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Action {
    GetParameter,
    GetSecretValue,
}

impl Action {
    /// Fully qualified IAM action.
    pub fn iam_action(&self) -> &'static str {
        match self {
            Self::GetParameter => "ssm:GetParameter",
            Self::GetSecretValue => "secretsmanager:GetSecretValue",
        }
    }
}

/// Minimal permission for the function role: one resource, one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessGrant {
    pub resource_kind: ResourceKind,
    pub resource_identifier: String,
    pub action: Action,
}

/// Environment assignments and grants for the function.
///
/// A credential is either present as a value or reachable through a grant,
/// never both. Values are wiped when the plan is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialPlan {
    strategy: Strategy,
    environment: BTreeMap<String, String>,
    grants: Vec<AccessGrant>,
}

impl CredentialPlan {
    fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            environment: BTreeMap::new(),
            grants: Vec::new(),
        }
    }

    fn set(&mut self, key: &str, value: impl Into<String>) {
        self.environment.insert(key.to_string(), value.into());
    }

    /// Strategy that produced this plan.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Environment variable assignments.
    pub fn environment(&self) -> &BTreeMap<String, String> {
        &self.environment
    }

    /// Access grants for the function role.
    pub fn grants(&self) -> &[AccessGrant] {
        &self.grants
    }

    /// Copy with sensitive values replaced by a mask.
    pub fn masked(&self) -> Self {
        let mut plan = self.clone();
        for (key, value) in plan.environment.iter_mut() {
            if redact::is_sensitive(key) {
                value.zeroize();
                value.push_str(constants::MASK);
            }
        }
        plan
    }
}

impl Drop for CredentialPlan {
    fn drop(&mut self) {
        for value in self.environment.values_mut() {
            value.zeroize();
        }
    }
}

/// Non-fatal problem found while resolving credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "missing", rename_all = "snake_case")]
pub enum CredentialWarning {
    /// Plaintext credentials in the config lack required keys.
    MissingConfigKeys(Vec<&'static str>),
    /// Fallback environment variables are not set.
    MissingEnvVars(Vec<&'static str>),
}

impl fmt::Display for CredentialWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingConfigKeys(keys) => {
                write!(f, "missing required database credentials: {}", keys.join(", "))
            }
            Self::MissingEnvVars(vars) => write!(
                f,
                "missing environment variables: {}; these are required when no database config is provided",
                vars.join(", ")
            ),
        }
    }
}

/// Plan plus the warnings raised while building it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialResolution {
    pub plan: CredentialPlan,
    pub warnings: Vec<CredentialWarning>,
}

/// Options for [`resolve`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CredentialOptions {
    /// Fail instead of warning when credentials are incomplete.
    pub strict: bool,
}

/// Where the credentials come from, decided from the config alone.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Source<'a> {
    Expose {
        provider: Provider,
        parameter: &'a str,
    },
    Retrieve {
        provider: Provider,
        parameter: &'a str,
        decrypt: bool,
    },
    Plaintext(&'a RawConfig),
    Environment,
}

impl<'a> Source<'a> {
    fn classify(config: &'a RawConfig) -> Result<Self> {
        let database = config::section(config, "database").map_err(|found| {
            CredentialError::Malformed {
                field: "database",
                reason: format!("expected an object, found {}", found),
            }
        })?;
        let credentials = match database.map(|db| config::section(db, "credentials")) {
            None | Some(Ok(None)) => return Ok(Self::Environment),
            Some(Ok(Some(credentials))) => credentials,
            Some(Err(found)) => {
                return Err(CredentialError::Malformed {
                    field: "database.credentials",
                    reason: format!("expected an object, found {}", found),
                }
                .into());
            }
        };

        let provider = credentials
            .get("provider")
            .and_then(Value::as_str)
            .and_then(Provider::parse);

        match provider {
            Some(provider) => {
                let parameter = credentials
                    .get("parameter_name")
                    .and_then(Value::as_str)
                    .filter(|name| !name.is_empty())
                    .ok_or(CredentialError::MissingParameterName {
                        provider: provider.as_str(),
                    })?;

                if config::truthy(credentials.get("expose")) {
                    Ok(Self::Expose {
                        provider,
                        parameter,
                    })
                } else {
                    Ok(Self::Retrieve {
                        provider,
                        parameter,
                        decrypt: config::truthy(credentials.get("decrypt")),
                    })
                }
            }
            None => Ok(Self::Plaintext(credentials)),
        }
    }
}

/// Resolve the credential plan for the function.
///
/// `env` is consulted only for the environment fallback; `resolver` only
/// when credentials are exposed directly.
///
/// # Errors
///
/// Returns `CredentialError::MissingParameterName` when a managed provider
/// has no `parameter_name`, `CredentialError::Malformed` when `database` or
/// `database.credentials` is not an object, `CredentialError::Incomplete`
/// in strict mode when credentials are missing, and any error from the
/// resolver.
pub fn resolve(
    config: &RawConfig,
    env: &dyn EnvReader,
    resolver: &dyn ParameterResolver,
    options: CredentialOptions,
) -> Result<CredentialResolution> {
    let mut warnings = Vec::new();

    let plan = match Source::classify(config)? {
        Source::Expose {
            provider,
            parameter,
        } => {
            debug!(%provider, resolver = resolver.name(), "exposing credentials directly");
            let mut plan = CredentialPlan::new(Strategy::DirectExposure);
            plan.set(
                constants::DATABASE_CREDENTIALS,
                resolver.resolve(provider, parameter)?,
            );
            plan
        }
        Source::Retrieve {
            provider,
            parameter,
            decrypt,
        } => {
            let normalized = normalize_parameter_name(parameter);
            if normalized.is_empty() {
                return Err(CredentialError::MissingParameterName {
                    provider: provider.as_str(),
                }
                .into());
            }
            if normalized != parameter {
                debug!(
                    trimmed = parameter.len() - normalized.len(),
                    "normalized parameter name"
                );
            }

            let mut plan = CredentialPlan::new(Strategy::RuntimeRetrieval);
            plan.set(constants::PARAMETERS_PROVIDER_NAME, provider.as_str());
            plan.set(constants::DATABASE_CREDENTIALS_PARAMETER, normalized);
            if decrypt {
                plan.set(constants::PARAMETERS_PROVIDER_DECRYPT, "true");
            }

            let (resource_kind, action) = provider.grant();
            plan.grants.push(AccessGrant {
                resource_kind,
                resource_identifier: normalized.to_string(),
                action,
            });
            plan
        }
        Source::Plaintext(credentials) => {
            let mut plan = CredentialPlan::new(Strategy::DirectPlaintext);
            let missing: Vec<&'static str> = REQUIRED_CONFIG_KEYS
                .iter()
                .copied()
                .filter(|key| scalar(credentials.get(*key)).is_none())
                .collect();

            if missing.is_empty() {
                let get = |key: &str| scalar(credentials.get(key)).unwrap_or_default();
                plan.set(constants::POSTGRES_DB, get("dbname"));
                plan.set(constants::POSTGRES_HOST, get("host"));
                plan.set(
                    constants::POSTGRES_PORT,
                    scalar(credentials.get("port"))
                        .unwrap_or_else(|| constants::DEFAULT_DATABASE_PORT.to_string()),
                );
                plan.set(constants::POSTGRES_USER, get("username"));
                plan.set(constants::POSTGRES_PASSWORD, get("password"));
            } else {
                warnings.push(CredentialWarning::MissingConfigKeys(missing));
            }
            plan
        }
        Source::Environment => {
            let mut plan = CredentialPlan::new(Strategy::EnvironmentFallback);
            let missing: Vec<&'static str> = REQUIRED_ENV_VARS
                .iter()
                .copied()
                .filter(|var| env.non_empty(var).is_none())
                .collect();

            if missing.is_empty() {
                let get = |var: &str| env.non_empty(var).unwrap_or_default();
                plan.set(constants::POSTGRES_DB, get(constants::ENV_DATABASE_NAME));
                plan.set(constants::POSTGRES_HOST, get(constants::ENV_DATABASE_HOST));
                plan.set(
                    constants::POSTGRES_PORT,
                    env.non_empty(constants::ENV_DATABASE_PORT)
                        .unwrap_or_else(|| constants::DEFAULT_DATABASE_PORT.to_string()),
                );
                plan.set(constants::POSTGRES_USER, get(constants::ENV_DATABASE_USER));
                plan.set(
                    constants::POSTGRES_PASSWORD,
                    get(constants::ENV_DATABASE_PASSWORD),
                );
            } else {
                warnings.push(CredentialWarning::MissingEnvVars(missing));
            }
            plan
        }
    };

    for warning in &warnings {
        debug!(%warning, "credential warning");
    }
    if options.strict {
        if let Some(warning) = warnings.first() {
            return Err(CredentialError::Incomplete(warning.to_string()).into());
        }
    }

    debug!(
        strategy = plan.strategy.label(),
        entries = plan.environment.len(),
        grants = plan.grants.len(),
        "credential plan resolved"
    );
    redact::log_entries(plan.environment());

    Ok(CredentialResolution { plan, warnings })
}

/// Strip leading and trailing `/` from a parameter name.
pub fn normalize_parameter_name(name: &str) -> &str {
    name.trim_matches('/')
}

/// Render a scalar config value as a string; `null` and containers are
/// treated as missing.
fn scalar(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

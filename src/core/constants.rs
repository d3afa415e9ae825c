//! Constants used throughout stackplan.
//!
//! Centralizes parameter keys, environment variable names and fixed values.

/// Context parameter holding the deployment environment name.
pub const PARAM_ENV: &str = "env";

/// Context parameter holding the resource naming prefix.
pub const PARAM_PREFIX: &str = "prefix";

/// Context parameter holding the configuration file path.
pub const PARAM_CONFIG_FILEPATH: &str = "config_filepath";

/// Prefix used when neither the context nor the environment provides one.
pub const DEFAULT_PREFIX: &str = "RDV1";

/// Environment variable overriding [`DEFAULT_PREFIX`].
pub const ENV_DEFAULT_PREFIX: &str = "DEVICE_MANAGER__DEFAULT_PREFIX";

/// Fallback database connection variables.
pub const ENV_DATABASE_NAME: &str = "DEVICE_MANAGER__DATABASE_NAME";
pub const ENV_DATABASE_HOST: &str = "DEVICE_MANAGER__DATABASE_HOST";
pub const ENV_DATABASE_USER: &str = "DEVICE_MANAGER__DATABASE_USER";
pub const ENV_DATABASE_PASSWORD: &str = "DEVICE_MANAGER__DATABASE_PASSWORD";
pub const ENV_DATABASE_PORT: &str = "DEVICE_MANAGER__DATABASE_PORT";

/// Target account and region.
pub const ENV_AWS_ACCOUNT_ID: &str = "AWS_ACCOUNT_ID";
pub const ENV_AWS_REGION: &str = "AWS_REGION";

/// Port used when the credentials do not name one.
pub const DEFAULT_DATABASE_PORT: &str = "5432";

/// Function environment variables produced by the credential plan.
pub const POSTGRES_DB: &str = "POSTGRES_DB";
pub const POSTGRES_HOST: &str = "POSTGRES_HOST";
pub const POSTGRES_PORT: &str = "POSTGRES_PORT";
pub const POSTGRES_USER: &str = "POSTGRES_USER";
pub const POSTGRES_PASSWORD: &str = "POSTGRES_PASSWORD";
pub const DATABASE_CREDENTIALS: &str = "DATABASE_CREDENTIALS";
pub const DATABASE_CREDENTIALS_PARAMETER: &str = "DATABASE_CREDENTIALS_PARAMETER";
pub const PARAMETERS_PROVIDER_NAME: &str = "PARAMETERS_PROVIDER_NAME";
pub const PARAMETERS_PROVIDER_DECRYPT: &str = "PARAMETERS_PROVIDER_DECRYPT";

/// Key fragments that mark an environment entry as sensitive.
pub const SENSITIVE_FRAGMENTS: &[&str] = &["password", "secret", "credential"];

/// Replacement shown for sensitive values.
pub const MASK: &str = "********";

/// Account publishing the Lambda Powertools layers.
pub const POWERTOOLS_ACCOUNT_ID: &str = "017000801446";

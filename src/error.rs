//! Error types for stackplan.
//!
//! Each concern gets its own error enum; [`Error`] wraps them so the CLI can
//! match on the kind and attach a hint.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Context(#[from] ContextError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Credentials(#[from] CredentialError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Deployment context errors.
#[derive(Error, Debug)]
pub enum ContextError {
    #[error("context '{param}' is not set (dev, stg, prod); provide it with: -c {param}=<env_name>")]
    Missing { param: &'static str },

    #[error("malformed context parameter '{0}': expected key=value")]
    MalformedParam(String),
}

/// Configuration file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file {} does not exist", path.display())]
    NotFound { path: PathBuf },

    #[error("configuration file {} is not a valid JSON: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },

    #[error("failed to read configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Network block errors.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("missing network config: {}", missing.join(", "))]
    Invalid { missing: Vec<&'static str> },

    #[error("invalid network config '{field}': {reason}")]
    Malformed { field: &'static str, reason: String },
}

/// Database credential errors.
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("parameter_name required for provider '{provider}'")]
    MissingParameterName { provider: &'static str },

    #[error("invalid database config '{field}': {reason}")]
    Malformed { field: &'static str, reason: String },

    #[error("incomplete database credentials: {0}")]
    Incomplete(String),

    #[error("failed to resolve '{name}': {reason}")]
    Lookup { name: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

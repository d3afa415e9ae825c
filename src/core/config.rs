//! Configuration file loading.
//!
//! The configuration is a free-form JSON object. Only the sub-keys each
//! resolver reads are validated, and that happens in the resolver.

use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

use crate::error::{ConfigError, Result};

/// Parsed configuration document.
pub type RawConfig = Map<String, Value>;

/// Load a JSON configuration file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file doesn't exist,
/// `ConfigError::Invalid` if it is not a JSON object, or
/// `ConfigError::Read` for any other I/O failure.
pub fn load(path: impl AsRef<Path>) -> Result<RawConfig> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading config");

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }
            .into());
        }
    };

    let value: Value = serde_json::from_str(&contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    match value {
        Value::Object(config) => {
            debug!(keys = config.len(), "config loaded");
            Ok(config)
        }
        other => Err(ConfigError::Invalid {
            path: path.to_path_buf(),
            reason: format!("expected an object at top level, found {}", kind(&other)),
        }
        .into()),
    }
}

/// Load a configuration file if a path is given, otherwise an empty config.
///
/// # Errors
///
/// Same as [`load`].
pub fn load_optional(path: Option<&str>) -> Result<RawConfig> {
    match path {
        Some(path) => load(path),
        None => {
            debug!("no config_filepath given, using empty config");
            Ok(RawConfig::new())
        }
    }
}

/// Name of a JSON value's type, for error messages.
pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Truthiness of a JSON value: `null`, `false`, `0`, `""`, `[]` and `{}`
/// are false.
pub(crate) fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(a)) => !a.is_empty(),
        Some(Value::Object(o)) => !o.is_empty(),
    }
}

/// Look up an optional sub-object.
///
/// `null` and `{}` count as absent.
///
/// # Errors
///
/// Returns the `kind` of the value when it is present but not an object.
pub(crate) fn section<'a>(
    parent: &'a RawConfig,
    key: &str,
) -> std::result::Result<Option<&'a RawConfig>, &'static str> {
    match parent.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) if map.is_empty() => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(kind(other)),
    }
}

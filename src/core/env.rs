//! Environment variable access.
//!
//! Resolvers read the process environment through [`EnvReader`] so tests can
//! hand them a plain map instead of mutating global state.

use std::collections::{BTreeMap, HashMap};

/// Read-only view of environment variables.
pub trait EnvReader {
    /// Value of `name`, or `None` if unset.
    fn var(&self, name: &str) -> Option<String>;

    /// Value of `name`, treating an empty string as unset.
    fn non_empty(&self, name: &str) -> Option<String> {
        self.var(name).filter(|v| !v.is_empty())
    }
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvReader for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvReader for BTreeMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl EnvReader for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<T: EnvReader + ?Sized> EnvReader for &T {
    fn var(&self, name: &str) -> Option<String> {
        (**self).var(name)
    }
}

/// Build a map-backed environment from string pairs.
pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> BTreeMap<String, String> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// An environment with no variables set.
pub fn no_env() -> BTreeMap<String, String> {
    BTreeMap::new()
}

//! Keeping credentials out of logs.

use std::collections::BTreeMap;
use tracing::debug;

use crate::core::constants;

/// Whether an environment key names a sensitive value.
///
/// Matches `password`, `secret` or `credential` anywhere in the key,
/// case-insensitively.
pub fn is_sensitive(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    constants::SENSITIVE_FRAGMENTS
        .iter()
        .any(|fragment| key.contains(fragment))
}

/// Log environment entries at debug level, skipping sensitive keys
/// entirely.
pub fn log_entries(entries: &BTreeMap<String, String>) {
    let mut suppressed = 0usize;
    for (key, value) in entries {
        if is_sensitive(key) {
            suppressed += 1;
            continue;
        }
        debug!(key = %key, value = %value, "environment entry");
    }
    if suppressed > 0 {
        debug!(suppressed, "sensitive environment entries not logged");
    }
}

//! Network attachment resolution.
//!
//! The function runs outside a VPC unless the configuration carries a
//! `network` block. When it does, the block must name an existing VPC, its
//! availability zones, the private subnets and the security groups.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::core::config::{self, RawConfig};
use crate::error::{Error, NetworkError, Result};

/// Keys required in the `network` block, in reporting order.
pub const REQUIRED_KEYS: [&str; 4] = [
    "vpc_id",
    "availability_zones",
    "private_subnet_ids",
    "security_group_ids",
];

/// Which subnets of the VPC the function attaches to.
///
/// Fixed: the function is never placed in public subnets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubnetPolicy {
    #[default]
    PrivateWithEgress,
}

/// Validated network attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkDescriptor {
    pub vpc_id: String,
    pub availability_zones: Vec<String>,
    pub private_subnet_ids: Vec<String>,
    pub security_group_ids: Vec<String>,
    pub subnet_policy: SubnetPolicy,
}

/// Resolve the optional `network` block.
///
/// Returns `Ok(None)` when the block is absent, `null` or empty.
///
/// # Errors
///
/// Returns `NetworkError::Invalid` listing every missing key, or
/// `NetworkError::Malformed` if a key holds a value of the wrong type.
pub fn resolve(config: &RawConfig) -> Result<Option<NetworkDescriptor>> {
    let network = match config::section(config, "network") {
        Ok(Some(network)) => network,
        Ok(None) => {
            debug!("no network config, function runs outside a VPC");
            return Ok(None);
        }
        Err(found) => {
            return Err(NetworkError::Malformed {
                field: "network",
                reason: format!("expected an object, found {}", found),
            }
            .into());
        }
    };

    let missing: Vec<&'static str> = REQUIRED_KEYS
        .iter()
        .copied()
        .filter(|key| !network.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        return Err(NetworkError::Invalid { missing }.into());
    }

    let descriptor = NetworkDescriptor {
        vpc_id: string(network, "vpc_id")?,
        availability_zones: strings(network, "availability_zones")?,
        private_subnet_ids: strings(network, "private_subnet_ids")?,
        security_group_ids: strings(network, "security_group_ids")?,
        subnet_policy: SubnetPolicy::PrivateWithEgress,
    };

    debug!(
        vpc_id = %descriptor.vpc_id,
        zones = descriptor.availability_zones.len(),
        subnets = descriptor.private_subnet_ids.len(),
        security_groups = descriptor.security_group_ids.len(),
        "network config resolved"
    );
    Ok(Some(descriptor))
}

fn string(network: &RawConfig, field: &'static str) -> Result<String> {
    match network.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(NetworkError::Malformed {
            field,
            reason: format!("expected a string, found {}", config::kind(other)),
        }
        .into()),
        None => Err(NetworkError::Invalid {
            missing: vec![field],
        }
        .into()),
    }
}

fn strings(network: &RawConfig, field: &'static str) -> Result<Vec<String>> {
    let value = network.get(field).ok_or(NetworkError::Invalid {
        missing: vec![field],
    })?;
    Vec::<String>::deserialize(value).map_err(|e| {
        Error::from(NetworkError::Malformed {
            field,
            reason: e.to_string(),
        })
    })
}

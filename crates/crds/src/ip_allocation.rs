//! IPAllocation CRD
//!
//! Records an address allocated by the IPAM backend for one logical
//! interface. The injector only consumes the status.

use std::collections::BTreeMap;

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default label carrying the logical interface name of an allocation.
pub const INTERFACE_LABEL: &str = "nephio.org/interface";

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, Default)]
#[kube(
    group = "ipam.nephio.org",
    version = "v1alpha1",
    kind = "IPAllocation",
    namespaced,
    status = "IPAllocationStatus"
)]
#[serde(rename_all = "camelCase")]
pub struct IPAllocationSpec {
    /// Prefix kind (e.g., "network", "loopback", "pool")
    #[serde(default, rename = "kind")]
    pub prefix_kind: String,

    /// Address family ("ipv4" or "ipv6")
    #[serde(default)]
    pub address_family: String,

    /// Requested prefix (hint, not guarantee)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Requested prefix length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix_length: Option<u8>,

    /// Selects the network instance the allocation is taken from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<AllocationSelector>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationSelector {
    #[serde(default)]
    pub match_labels: BTreeMap<String, String>,
}

/// Allocation result written by the IPAM backend.
///
/// Field names are lower-case on the wire. Missing or null fields read as
/// empty strings so partially-filled statuses can still be inspected.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq)]
pub struct IPAllocationStatus {
    /// Allocated prefix in CIDR notation
    #[serde(default, rename = "allocatedprefix", deserialize_with = "null_as_empty")]
    #[schemars(with = "String")]
    pub allocated_prefix: String,

    /// Gateway address for the allocated prefix
    #[serde(default, deserialize_with = "null_as_empty")]
    #[schemars(with = "String")]
    pub gateway: String,
}

/// Reads `null` (e.g. a bare `gateway:` in YAML) as an empty string.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

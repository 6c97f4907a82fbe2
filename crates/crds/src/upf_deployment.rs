//! UPFDeployment CRD
//!
//! Describes a User Plane Function deployment and the interfaces it
//! attaches to. Interface addresses are filled in from IPAllocations.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Uplink (N3) interface list field.
pub const N3_INTERFACES: &str = "n3Interfaces";
/// Control-plane (N4) interface list field.
pub const N4_INTERFACES: &str = "n4Interfaces";
/// Data-network (N6) interface list field.
pub const N6_INTERFACES: &str = "n6Interfaces";
/// Inter-UPF (N9) interface list field.
pub const N9_INTERFACES: &str = "n9Interfaces";

/// Every interface list a UPFDeployment spec may carry.
pub const ENDPOINT_INTERFACE_FIELDS: [&str; 4] =
    [N3_INTERFACES, N4_INTERFACES, N6_INTERFACES, N9_INTERFACES];

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[kube(
    group = "nf.nephio.org",
    version = "v1alpha1",
    kind = "UPFDeployment",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct UPFDeploymentSpec {
    /// Throughput the UPF is dimensioned for
    #[serde(default)]
    pub capacity: UPFCapacity,

    /// N3 (uplink, towards the RAN) interfaces
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub n3_interfaces: Vec<InterfaceConfig>,

    /// N4 (control plane, towards the SMF) interfaces
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub n4_interfaces: Vec<InterfaceConfig>,

    /// N6 (data network) interfaces
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub n6_interfaces: Vec<N6InterfaceConfig>,

    /// N9 (inter-UPF) interfaces
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub n9_interfaces: Vec<InterfaceConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UPFCapacity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uplink_throughput: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub downlink_throughput: Option<String>,
}

/// One network attachment point of the UPF.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq)]
pub struct InterfaceConfig {
    /// Logical interface name, matched against allocation labels
    pub name: String,

    /// Interface addresses in CIDR notation
    #[serde(default)]
    pub ips: Vec<String>,

    /// Gateway addresses
    #[serde(default, rename = "gatewayIPs")]
    pub gateway_ips: Vec<String>,
}

/// A data-network attachment: the interface plus the UE address pool
/// served on that data network.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq, Eq)]
pub struct N6InterfaceConfig {
    /// Data network name
    pub dnn: String,

    /// UE address pool in CIDR notation
    #[serde(default, rename = "ueIPPool")]
    pub ue_ip_pool: String,

    pub interface: InterfaceConfig,
}

impl UPFDeploymentSpec {
    /// Reads the typed spec out of an untyped resource document.
    ///
    /// A document without `spec` yields the default (empty) spec.
    pub fn from_object(object: &serde_json::Value) -> Result<Self, serde_json::Error> {
        match object.get("spec") {
            Some(spec) if !spec.is_null() => Self::deserialize(spec),
            _ => Ok(Self::default()),
        }
    }
}

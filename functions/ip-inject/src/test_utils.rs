//! Test utilities for collector and patcher tests
//!
//! Fixtures are built from the typed CRDs and converted to the untyped
//! trees the function operates on.

use std::collections::BTreeMap;

use crds::*;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde_json::Value;

use crate::collector::AllocationMapping;

/// Helper to create an IPAllocation item labelled with `interface`
pub fn create_test_allocation(name: &str, interface: &str, prefix: &str, gateway: &str) -> Value {
    let allocation = IPAllocation {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some("default".to_string()),
            labels: Some(BTreeMap::from([(INTERFACE_LABEL.to_string(), interface.to_string())])),
            ..Default::default()
        },
        spec: IPAllocationSpec {
            prefix_kind: "network".to_string(),
            address_family: "ipv4".to_string(),
            ..Default::default()
        },
        status: Some(IPAllocationStatus {
            allocated_prefix: prefix.to_string(),
            gateway: gateway.to_string(),
        }),
    };
    serde_json::to_value(allocation).expect("Failed to serialize IPAllocation")
}

/// Helper to create a UPFDeployment item
pub fn create_test_upf(name: &str, spec: UPFDeploymentSpec) -> Value {
    let mut upf = UPFDeployment::new(name, spec);
    upf.metadata.namespace = Some("default".to_string());
    serde_json::to_value(upf).expect("Failed to serialize UPFDeployment")
}

/// Helper to create an interface with the given addresses
pub fn create_test_interface(name: &str, ips: &[&str], gateway_ips: &[&str]) -> InterfaceConfig {
    InterfaceConfig {
        name: name.to_string(),
        ips: ips.iter().map(|s| s.to_string()).collect(),
        gateway_ips: gateway_ips.iter().map(|s| s.to_string()).collect(),
    }
}

/// Helper to create a data-network interface
pub fn create_test_n6_interface(dnn: &str, pool: &str, interface: InterfaceConfig) -> N6InterfaceConfig {
    N6InterfaceConfig {
        dnn: dnn.to_string(),
        ue_ip_pool: pool.to_string(),
        interface,
    }
}

/// Helper to create a mapping from (interface, prefix, gateway) triples
pub fn create_test_mapping(entries: &[(&str, &str, &str)]) -> AllocationMapping {
    entries
        .iter()
        .map(|(interface, prefix, gateway)| {
            (
                interface.to_string(),
                IPAllocationStatus {
                    allocated_prefix: prefix.to_string(),
                    gateway: gateway.to_string(),
                },
            )
        })
        .collect()
}

/// Reads back the typed spec of a patched UPFDeployment item
pub fn typed_spec(item: &Value) -> UPFDeploymentSpec {
    UPFDeploymentSpec::from_object(item).expect("Failed to read UPFDeployment spec")
}

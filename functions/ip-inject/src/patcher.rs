//! Interface patching.
//!
//! Writes resolved allocations into the interface lists of every
//! UPFDeployment. The untyped spec tree is edited in place so fields the
//! typed model does not know about survive unchanged, and a field is only
//! written when its value differs, which keeps repeated runs byte-identical.

use crds::{ENDPOINT_INTERFACE_FIELDS, N6_INTERFACES, UPFDeployment};
use kube::core::ResourceExt;
use krm_fn::{decode_object, is_resource, FunctionResult};
use serde_json::{Map, Value};
use tracing::{debug, error, info};

use crate::collector::AllocationMapping;
use crate::error::InjectError;

const NAME: &str = "name";
const IPS: &str = "ips";
const GATEWAY_IPS: &str = "gatewayIPs";
const DNN: &str = "dnn";
const UE_IP_POOL: &str = "ueIPPool";
const INTERFACE: &str = "interface";

/// Outcome of one patch pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PatchSummary {
    /// UPFDeployments with at least one changed field
    pub objects_patched: usize,
    /// Interface entries with at least one changed field
    pub entries_patched: usize,
}

/// Patches the interfaces of every UPFDeployment in `items` from `mapping`.
///
/// Items that cannot be decoded are skipped silently; the collector has
/// already reported them. Problems with a single interface list are
/// reported to `results` and the remaining lists are still patched.
pub fn patch(
    items: &mut [Value],
    mapping: &AllocationMapping,
    results: &mut Vec<FunctionResult>,
) -> PatchSummary {
    let mut summary = PatchSummary::default();

    for (index, item) in items.iter_mut().enumerate() {
        let object = match decode_object(item) {
            Ok(object) => object,
            Err(e) => {
                debug!("Skipping unreadable item {}: {}", index, e);
                continue;
            }
        };
        if !is_resource::<UPFDeployment>(&object) {
            continue;
        }

        let name = object.name_any();
        let spec = match item.get_mut("spec") {
            None | Some(Value::Null) => {
                debug!("UPFDeployment {} has no spec", name);
                continue;
            }
            Some(Value::Object(spec)) => spec,
            Some(other) => {
                error!("UPFDeployment {} spec is a {}, expected a mapping", name, type_name(other));
                results.push(
                    FunctionResult::error(format!(
                        "UPFDeployment {} spec is a {}, expected a mapping",
                        name,
                        type_name(other)
                    ))
                    .with_resource(&object)
                    .with_field("spec"),
                );
                continue;
            }
        };

        let mut entries_patched = 0;
        for field in ENDPOINT_INTERFACE_FIELDS {
            match patch_interface_list(spec, field, mapping) {
                Ok(patched) => entries_patched += patched,
                Err(e) => {
                    error!("UPFDeployment {}: {}", name, e);
                    results.push(
                        FunctionResult::error(e.to_string())
                            .with_resource(&object)
                            .with_field(format!("spec.{}", field)),
                    );
                }
            }
        }

        if entries_patched > 0 {
            info!("Patched {} interface entries in UPFDeployment {}", entries_patched, name);
            summary.objects_patched += 1;
            summary.entries_patched += entries_patched;
        } else {
            debug!("UPFDeployment {} already up to date", name);
        }
    }

    summary
}

/// Patches one interface list of a spec, returning the number of changed entries.
///
/// An absent or null list is not an error.
fn patch_interface_list(
    spec: &mut Map<String, Value>,
    field: &str,
    mapping: &AllocationMapping,
) -> Result<usize, InjectError> {
    let entries = match spec.get_mut(field) {
        None | Some(Value::Null) => return Ok(0),
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            return Err(InjectError::InvalidInterfaceList(format!(
                "{} is a {}, expected a list",
                field,
                type_name(other)
            )));
        }
    };

    let mut patched = 0;
    for entry in entries.iter_mut().filter_map(Value::as_object_mut) {
        let changed = if field == N6_INTERFACES {
            patch_data_network(entry, mapping)
        } else {
            patch_endpoint(entry, mapping)
        };
        if changed {
            patched += 1;
        }
    }
    Ok(patched)
}

/// Sets `ips` and `gatewayIPs` of an endpoint whose name has an allocation.
fn patch_endpoint(entry: &mut Map<String, Value>, mapping: &AllocationMapping) -> bool {
    let Some(status) = entry
        .get(NAME)
        .and_then(Value::as_str)
        .and_then(|name| mapping.get(name))
    else {
        return false;
    };

    let ips = set_field(entry, IPS, Value::Array(vec![Value::String(status.allocated_prefix.clone())]));
    let gateways = set_field(entry, GATEWAY_IPS, Value::Array(vec![Value::String(status.gateway.clone())]));
    ips || gateways
}

/// Patches a data-network entry.
///
/// The UE pool is matched on `dnn` and the nested interface on its own
/// name; the two lookups are independent. Pools carry no gateway.
fn patch_data_network(entry: &mut Map<String, Value>, mapping: &AllocationMapping) -> bool {
    let mut changed = false;

    if let Some(status) = entry
        .get(DNN)
        .and_then(Value::as_str)
        .and_then(|dnn| mapping.get(dnn))
    {
        changed |= set_field(entry, UE_IP_POOL, Value::String(status.allocated_prefix.clone()));
    }

    if let Some(interface) = entry.get_mut(INTERFACE).and_then(Value::as_object_mut) {
        changed |= patch_endpoint(interface, mapping);
    }

    changed
}

/// Writes `value` under `key` unless it is already there.
fn set_field(entry: &mut Map<String, Value>, key: &str, value: Value) -> bool {
    if entry.get(key) == Some(&value) {
        return false;
    }
    entry.insert(key.to_string(), value);
    true
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}

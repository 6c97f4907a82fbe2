//! Allocation collection.
//!
//! Builds the logical-interface-name to allocation mapping from the
//! IPAllocation objects of one ResourceList. The mapping is rebuilt on
//! every invocation.

use std::collections::BTreeMap;

use crds::{IPAllocation, IPAllocationStatus};
use kube::core::{DynamicObject, ResourceExt};
use krm_fn::{decode_object, is_resource, FunctionResult};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Resolved allocations keyed by logical interface name
pub type AllocationMapping = BTreeMap<String, IPAllocationStatus>;

/// Scans `items` for IPAllocations and maps their interface label to their status.
///
/// Unreadable items and unusable allocations are reported to `results` and
/// skipped. `null` items are placeholders left by the ResourceList for
/// items it could not read and are skipped without a new result. When two allocations carry the same interface name the later
/// one wins. `items` is not modified.
pub fn collect(
    items: &[Value],
    interface_label: &str,
    results: &mut Vec<FunctionResult>,
) -> AllocationMapping {
    let mut mapping = AllocationMapping::new();

    for (index, item) in items.iter().enumerate() {
        // Placeholder for an item the envelope could not read; already reported
        if item.is_null() {
            debug!("Skipping unreadable item {}", index);
            continue;
        }
        let object = match decode_object(item) {
            Ok(object) => object,
            Err(e) => {
                warn!("Skipping unreadable item {}: {}", index, e);
                results.push(
                    FunctionResult::error(format!("Failed to read item {}: {}", index, e))
                        .with_index(index),
                );
                continue;
            }
        };
        if !is_resource::<IPAllocation>(&object) {
            continue;
        }

        let name = object.name_any();
        let Some(interface) = object
            .labels()
            .get(interface_label)
            .filter(|l| !l.is_empty())
            .cloned()
        else {
            warn!("IPAllocation {} has no {} label, skipping", name, interface_label);
            results.push(
                FunctionResult::warning(format!(
                    "IPAllocation {} has no {} label and cannot be matched to an interface",
                    name, interface_label
                ))
                .with_resource(&object),
            );
            continue;
        };

        let status = match read_status(&object) {
            Ok(status) => status,
            Err(e) => {
                warn!("IPAllocation {} has an unreadable status: {}", name, e);
                results.push(
                    FunctionResult::error(format!("Failed to read status of IPAllocation {}: {}", name, e))
                        .with_resource(&object)
                        .with_field("status"),
                );
                continue;
            }
        };

        debug!(
            "IPAllocation {} provides interface {}: prefix '{}', gateway '{}'",
            name, interface, status.allocated_prefix, status.gateway
        );
        if mapping.insert(interface.clone(), status).is_some() {
            warn!(
                "IPAllocation {} overrides an earlier allocation for interface {}",
                name, interface
            );
        }
    }

    mapping
}

/// Reads the allocation status; an absent status reads as empty.
fn read_status(object: &DynamicObject) -> Result<IPAllocationStatus, serde_json::Error> {
    match object.data.get("status") {
        None | Some(Value::Null) => Ok(IPAllocationStatus::default()),
        Some(status) => IPAllocationStatus::deserialize(status),
    }
}

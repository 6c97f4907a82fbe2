//! Typed access to ResourceList items.

use kube::core::{DynamicObject, Resource};
use serde::Deserialize;
use serde_json::Value;

use crate::error::KrmError;

/// Decodes an untyped item into a [`DynamicObject`].
///
/// The item must be a mapping carrying `apiVersion`, `kind` and `metadata`.
/// The item itself is left untouched.
pub fn decode_object(item: &Value) -> Result<DynamicObject, KrmError> {
    let object = DynamicObject::deserialize(item)?;
    match &object.types {
        Some(types) if !types.api_version.is_empty() && !types.kind.is_empty() => Ok(object),
        _ => Err(KrmError::InvalidObject(
            "object is missing apiVersion or kind".to_string(),
        )),
    }
}

/// Returns true when `object` has the apiVersion and kind of resource `K`.
pub fn is_resource<K>(object: &DynamicObject) -> bool
where
    K: Resource<DynamicType = ()>,
{
    object
        .types
        .as_ref()
        .is_some_and(|t| t.api_version == K::api_version(&()) && t.kind == K::kind(&()))
}

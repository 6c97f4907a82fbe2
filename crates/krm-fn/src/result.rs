//! Function result records.
//!
//! Results are appended to the ResourceList instead of aborting the
//! function, so one bad item never hides the outcome for the others.

use kube::core::{DynamicObject, ResourceExt};
use serde::{Deserialize, Serialize};

/// Result severity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
    Warning,
    Info,
}

/// Reference to the object a result is about
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRef {
    pub api_version: String,

    pub kind: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

impl ResourceRef {
    pub fn from_object(object: &DynamicObject) -> Self {
        let (api_version, kind) = object
            .types
            .as_ref()
            .map(|t| (t.api_version.clone(), t.kind.clone()))
            .unwrap_or_default();
        Self {
            api_version,
            kind,
            name: object.name_any(),
            namespace: object.namespace(),
        }
    }
}

/// Field a result is about, as a dotted path
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Field {
    pub path: String,
}

/// Location of the item within the ResourceList
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct File {
    pub index: usize,
}

/// A diagnostic record reported back to the function caller
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResult {
    pub message: String,

    #[serde(default)]
    pub severity: Severity,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_ref: Option<ResourceRef>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<Field>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<File>,
}

impl FunctionResult {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity,
            resource_ref: None,
            field: None,
            file: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    #[must_use]
    pub fn with_resource(mut self, object: &DynamicObject) -> Self {
        self.resource_ref = Some(ResourceRef::from_object(object));
        self
    }

    #[must_use]
    pub fn with_field(mut self, path: impl Into<String>) -> Self {
        self.field = Some(Field { path: path.into() });
        self
    }

    #[must_use]
    pub fn with_index(mut self, index: usize) -> Self {
        self.file = Some(File { index });
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

//! ResourceList envelope.
//!
//! Items are kept as untyped trees: a single malformed item must not stop
//! the list from being read, and fields unknown to any typed model must
//! round-trip unchanged.

use std::collections::BTreeMap;
use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::KrmError;
use crate::result::FunctionResult;

/// ResourceList apiVersion written by current orchestrators
pub const API_VERSION: &str = "config.kubernetes.io/v1";
/// ResourceList apiVersion still emitted by older orchestrators
pub const LEGACY_API_VERSION: &str = "config.kubernetes.io/v1alpha1";
/// ResourceList kind
pub const KIND: &str = "ResourceList";

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceList {
    pub api_version: String,

    pub kind: String,

    /// Resources the function operates on, in input order.
    ///
    /// Items that could not be read are held as `null` placeholders and
    /// written back exactly as they were read.
    pub items: Vec<Value>,

    /// Function configuration supplied by the orchestrator
    pub function_config: Option<Value>,

    /// Diagnostics produced by this and earlier functions
    pub results: Vec<FunctionResult>,

    /// Original form of unreadable items, keyed by item index
    unreadable: BTreeMap<usize, serde_yaml::Value>,
}

/// Wire form read from the orchestrator
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResourceList {
    #[serde(default)]
    api_version: String,

    #[serde(default)]
    kind: String,

    #[serde(default)]
    items: Vec<serde_yaml::Value>,

    #[serde(default)]
    function_config: Option<serde_yaml::Value>,

    #[serde(default)]
    results: Vec<FunctionResult>,
}

/// Wire form written back to the orchestrator
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResourceListOut<'a> {
    api_version: &'a str,

    kind: &'a str,

    items: Vec<serde_yaml::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    function_config: Option<&'a Value>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    results: &'a Vec<FunctionResult>,
}

impl Default for ResourceList {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ResourceList {
    /// Creates a ResourceList holding `items`.
    pub fn new(items: Vec<Value>) -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            items,
            function_config: None,
            results: Vec::new(),
            unreadable: BTreeMap::new(),
        }
    }

    /// Parses a ResourceList from its YAML form.
    ///
    /// Each item is converted on its own. An item that has no JSON form
    /// (a tagged node, a non-string key) or is empty is reported as an
    /// error result and kept verbatim for output.
    pub fn from_yaml(input: &str) -> Result<Self, KrmError> {
        let raw: RawResourceList = serde_yaml::from_str(input)?;
        validate(&raw.api_version, &raw.kind)?;

        let function_config = raw
            .function_config
            .map(Value::deserialize)
            .transpose()?;

        let mut rl = Self {
            api_version: raw.api_version,
            kind: raw.kind,
            items: Vec::with_capacity(raw.items.len()),
            function_config,
            results: raw.results,
            unreadable: BTreeMap::new(),
        };

        for (index, item) in raw.items.into_iter().enumerate() {
            match convert_item(&item) {
                Ok(value) => rl.items.push(value),
                Err(message) => {
                    warn!("Item {} cannot be read: {}", index, message);
                    rl.results.push(
                        FunctionResult::error(format!("Failed to read item {}: {}", index, message))
                            .with_index(index),
                    );
                    rl.items.push(Value::Null);
                    rl.unreadable.insert(index, item);
                }
            }
        }

        debug!("Parsed ResourceList with {} items", rl.items.len());
        Ok(rl)
    }

    /// Renders the ResourceList as YAML.
    pub fn to_yaml(&self) -> Result<String, KrmError> {
        let items = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| match (item, self.unreadable.get(&index)) {
                (Value::Null, Some(original)) => Ok(original.clone()),
                _ => serde_yaml::to_value(item),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let out = ResourceListOut {
            api_version: &self.api_version,
            kind: &self.kind,
            items,
            function_config: self.function_config.as_ref(),
            results: &self.results,
        };
        Ok(serde_yaml::to_string(&out)?)
    }

    /// Reads a ResourceList from `reader` until EOF.
    pub fn read(mut reader: impl Read) -> Result<Self, KrmError> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Self::from_yaml(&input)
    }

    /// Writes the ResourceList to `writer`.
    pub fn write(&self, mut writer: impl Write) -> Result<(), KrmError> {
        writer.write_all(self.to_yaml()?.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Appends a result record.
    pub fn push_result(&mut self, result: FunctionResult) {
        self.results.push(result);
    }

    /// Returns true when any result has error severity.
    pub fn has_errors(&self) -> bool {
        self.results.iter().any(FunctionResult::is_error)
    }

    /// Returns true when the item at `index` could not be read and is
    /// only carried through to the output.
    pub fn is_unreadable(&self, index: usize) -> bool {
        self.unreadable.contains_key(&index)
    }
}

fn convert_item(item: &serde_yaml::Value) -> Result<Value, String> {
    if item.is_null() {
        return Err("item is empty".to_string());
    }
    Value::deserialize(item).map_err(|e| e.to_string())
}

fn validate(api_version: &str, kind: &str) -> Result<(), KrmError> {
    if kind != KIND {
        return Err(KrmError::InvalidResourceList(format!(
            "expected kind {}, got '{}'",
            KIND, kind
        )));
    }
    if api_version != API_VERSION && api_version != LEGACY_API_VERSION {
        return Err(KrmError::InvalidResourceList(format!(
            "unsupported apiVersion '{}'",
            api_version
        )));
    }
    Ok(())
}

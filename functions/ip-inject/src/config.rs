//! Function configuration.
//!
//! Sources, lowest to highest precedence:
//! 1. Built-in default (`nephio.org/interface`)
//! 2. `IP_INJECT_INTERFACE_LABEL` environment variable
//! 3. `data.interfaceLabel` of a ConfigMap passed as `functionConfig`

use std::env;

use crds::INTERFACE_LABEL;
use k8s_openapi::api::core::v1::ConfigMap;
use krm_fn::{decode_object, is_resource};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::InjectError;

/// Environment variable overriding the interface label key
pub const INTERFACE_LABEL_ENV: &str = "IP_INJECT_INTERFACE_LABEL";

/// functionConfig data key overriding the interface label key
pub const INTERFACE_LABEL_KEY: &str = "interfaceLabel";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectConfig {
    /// Label on IPAllocation objects holding the logical interface name
    pub interface_label: String,
}

impl Default for InjectConfig {
    fn default() -> Self {
        Self {
            interface_label: INTERFACE_LABEL.to_string(),
        }
    }
}

impl InjectConfig {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_env_value(env::var(INTERFACE_LABEL_ENV).ok())
    }

    fn from_env_value(label: Option<String>) -> Self {
        match label.filter(|l| !l.is_empty()) {
            Some(interface_label) => Self { interface_label },
            None => Self::default(),
        }
    }

    /// Overlays the ResourceList `functionConfig`, if any.
    ///
    /// Only ConfigMaps are accepted. An empty or null functionConfig leaves
    /// the configuration unchanged.
    pub fn with_function_config(mut self, function_config: Option<&Value>) -> Result<Self, InjectError> {
        let Some(function_config) = function_config else {
            return Ok(self);
        };
        match function_config {
            Value::Null => return Ok(self),
            Value::Object(map) if map.is_empty() => return Ok(self),
            _ => {}
        }

        let object = decode_object(function_config)
            .map_err(|e| InjectError::InvalidConfig(format!("functionConfig: {}", e)))?;
        if !is_resource::<ConfigMap>(&object) {
            return Err(InjectError::InvalidConfig(format!(
                "functionConfig must be a v1 ConfigMap, got {}",
                object.types.map(|t| format!("{}/{}", t.api_version, t.kind)).unwrap_or_default()
            )));
        }

        let config_map = ConfigMap::deserialize(function_config)
            .map_err(|e| InjectError::InvalidConfig(format!("functionConfig: {}", e)))?;
        if let Some(label) = config_map.data.as_ref().and_then(|d| d.get(INTERFACE_LABEL_KEY)) {
            if label.is_empty() {
                return Err(InjectError::InvalidConfig(format!(
                    "functionConfig data.{} must not be empty",
                    INTERFACE_LABEL_KEY
                )));
            }
            debug!("Interface label overridden by functionConfig: {}", label);
            self.interface_label = label.clone();
        }
        Ok(self)
    }
}

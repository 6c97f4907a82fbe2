//! KRM function SDK errors

use thiserror::Error;

/// Errors that can occur while reading, processing or writing a ResourceList
#[derive(Debug, Error)]
pub enum KrmError {
    /// YAML (de)serialization of the envelope failed
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An item could not be converted to or from a typed object
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading stdin or writing stdout failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input document is not a ResourceList
    #[error("Invalid ResourceList: {0}")]
    InvalidResourceList(String),

    /// An item is not a well-formed Kubernetes object
    #[error("Invalid object: {0}")]
    InvalidObject(String),

    /// The function failed as a whole
    #[error("Processing failed: {0}")]
    Processing(String),
}

//! Function-specific error types.
//!
//! Per-object problems never surface as these errors: they are recorded as
//! results on the ResourceList. These cover what stops an invocation.

use krm_fn::KrmError;
use thiserror::Error;

/// Errors that can occur in the IP injection function.
#[derive(Debug, Error)]
pub enum InjectError {
    /// ResourceList envelope or I/O error
    #[error("KRM error: {0}")]
    Krm(#[from] KrmError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// An interface list field could not be read
    #[error("Invalid interface list: {0}")]
    InvalidInterfaceList(String),

    /// The function ran but reported error results
    #[error("{0} error result(s) reported")]
    ResultsContainErrors(usize),
}

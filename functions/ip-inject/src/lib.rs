//! IP Injection Function
//!
//! KRM function that wires IPAM results into network-function deployments.
//!
//! For every ResourceList it:
//! 1. Collects `IPAllocation` statuses keyed by their interface label
//! 2. Writes the allocated prefix and gateway into the matching
//!    `UPFDeployment` interfaces (N3, N4, N9) and the allocated pool into
//!    matching data networks (N6)
//!
//! Nothing is cached between invocations.

pub mod collector;
pub mod config;
pub mod error;
pub mod patcher;
pub mod transformer;

#[cfg(test)]
mod test_utils;

pub use collector::{collect, AllocationMapping};
pub use config::InjectConfig;
pub use error::InjectError;
pub use patcher::{patch, PatchSummary};
pub use transformer::IpInjector;

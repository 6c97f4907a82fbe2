//! IP injection CRD definitions
//!
//! Typed views of the two resource kinds the injector correlates:
//! - `IPAllocation`: address allocations produced by an IPAM backend
//! - `UPFDeployment`: UPF network-function deployments whose interfaces
//!   receive those addresses

pub mod ip_allocation;
pub mod upf_deployment;

pub use ip_allocation::*;
pub use upf_deployment::*;

//! Prints the IPAllocation and UPFDeployment CRD manifests.
//!
//! Usage: `cargo run -p crds --bin crdgen > crds.yaml`

use crds::{IPAllocation, UPFDeployment};
use kube::core::CustomResourceExt;

fn main() -> anyhow::Result<()> {
    print!("{}", serde_yaml::to_string(&IPAllocation::crd())?);
    println!("---");
    print!("{}", serde_yaml::to_string(&UPFDeployment::crd())?);
    Ok(())
}

//! ResourceList processor wiring collection and patching together.

use krm_fn::{KrmError, ResourceList, ResourceListProcessor};
use tracing::info;

use crate::collector::collect;
use crate::config::InjectConfig;
use crate::patcher::patch;

/// Injects IPAllocation results into UPFDeployment interfaces.
#[derive(Debug, Clone, Default)]
pub struct IpInjector {
    config: InjectConfig,
}

impl IpInjector {
    /// Creates an injector with the given base configuration.
    ///
    /// The ResourceList `functionConfig` is overlaid on every invocation.
    pub fn new(config: InjectConfig) -> Self {
        Self { config }
    }
}

impl ResourceListProcessor for IpInjector {
    fn process(&self, rl: &mut ResourceList) -> Result<(), KrmError> {
        let config = self
            .config
            .clone()
            .with_function_config(rl.function_config.as_ref())
            .map_err(|e| KrmError::Processing(e.to_string()))?;

        info!("Injecting IP allocations into {} items", rl.items.len());

        let mapping = collect(&rl.items, &config.interface_label, &mut rl.results);
        info!("Collected {} interface allocations", mapping.len());

        let summary = patch(&mut rl.items, &mapping, &mut rl.results);
        info!(
            "Patched {} interface entries across {} UPFDeployments",
            summary.entries_patched, summary.objects_patched
        );

        Ok(())
    }
}

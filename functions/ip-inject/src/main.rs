//! IP Injection Function
//!
//! Reads a ResourceList from stdin, injects IPAllocation results into
//! UPFDeployment interfaces and writes the ResourceList to stdout.
//! Logs go to stderr.

use ip_inject::{InjectConfig, InjectError, IpInjector};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), InjectError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting IP injection function");

    // Load configuration from environment variables
    let config = InjectConfig::from_env();

    info!("Configuration:");
    info!("  Interface label: {}", config.interface_label);

    let injector = IpInjector::new(config);
    let rl = krm_fn::run(&injector, std::io::stdin().lock(), std::io::stdout().lock())?;

    let errors = rl.results.iter().filter(|r| r.is_error()).count();
    if errors > 0 {
        return Err(InjectError::ResultsContainErrors(errors));
    }

    Ok(())
}

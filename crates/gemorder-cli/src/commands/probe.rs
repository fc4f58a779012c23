//! Handler for `gemorder probe`.

use miette::Result;

use gemorder_registry::client::GemClient;
use gemorder_registry::config::RegistryConfig;
use gemorder_registry::probe::{ExistenceProber, ProbeCache};

pub fn exec(config: &RegistryConfig, name: &str) -> Result<()> {
    let prober = ExistenceProber::new(
        GemClient::new(&config.gem_bin),
        ProbeCache::new(&config.probe_cache_dir),
    );
    if prober.probe(name) {
        println!("{name} is a fetchable gem");
    } else {
        println!("{name} is not a fetchable gem");
    }
    Ok(())
}

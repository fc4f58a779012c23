//! Command dispatch and shared argument handling.

use miette::Result;

use gemorder_registry::client::GemClient;
use gemorder_registry::config::RegistryConfig;
use gemorder_resolver::{GemResolver, Seed};

use crate::cli::{Cli, Command};

mod order;
mod probe;
mod resolve;
mod versions;

pub fn dispatch(cli: Cli) -> Result<()> {
    let config = build_config(&cli)?;
    match cli.command {
        Command::Resolve { ref gems, json } => {
            resolve::exec(&resolver_for(&config), &parse_seed(gems), json)
        }
        Command::Order { ref gems } => order::exec(&resolver_for(&config), &parse_seed(gems)),
        Command::Versions { ref gems } => {
            versions::exec(&resolver_for(&config), &parse_seed(gems))
        }
        Command::Probe { ref name } => probe::exec(&config, name),
    }
}

/// Load the user config and apply CLI overrides on top.
fn build_config(cli: &Cli) -> Result<RegistryConfig> {
    let mut config = RegistryConfig::load()?;
    if let Some(ref gem_bin) = cli.gem_bin {
        config.gem_bin = gem_bin.clone();
    }
    if let Some(ref dir) = cli.probe_cache_dir {
        config.probe_cache_dir = dir.clone();
    }
    if cli.include_development {
        config.runtime_deps_only = false;
    }
    Ok(config)
}

fn resolver_for(config: &RegistryConfig) -> GemResolver {
    let resolver = GemResolver::new(GemClient::new(&config.gem_bin));
    if config.runtime_deps_only {
        resolver
    } else {
        resolver.with_development_deps()
    }
}

/// Turn `NAME` / `NAME@REQS` arguments into a normalized seed set.
fn parse_seed(gems: &[String]) -> Seed {
    let mut seed = Seed::new();
    for gem in gems {
        match gem.split_once('@') {
            Some((name, requirements)) => seed.insert(name, &[requirements]),
            None => seed.insert_name(gem),
        }
    }
    seed
}

//! Dependency resolution engine for gemorder: resolves single gems to
//! concrete versions, expands transitive closures over the worklist, and
//! orders the result so dependencies precede their dependents.

pub mod graph;
pub mod resolver;
pub mod sort;

use std::collections::BTreeMap;

use gemorder_util::errors::GemorderResult;

pub use graph::DependencyGraph;
pub use resolver::{resolve_all, GemResolver, GemSource, Seed};
pub use sort::topological_order;

/// Resolve the closure of `seed` and return a dependency-respecting
/// install order.
pub fn sorted_order<S: GemSource>(source: &S, seed: &Seed) -> GemorderResult<Vec<String>> {
    let graph = resolve_all(source, seed)?;
    topological_order(&graph)
}

/// Resolve only the seed entries and report the concrete version each
/// one settles on.
pub fn exact_versions<S: GemSource>(
    source: &S,
    seed: &Seed,
) -> GemorderResult<BTreeMap<String, String>> {
    let mut versions = BTreeMap::new();
    for (name, requirements) in seed.iter() {
        let release = source.resolve(name, requirements)?;
        versions.insert(name.clone(), release.version);
    }
    Ok(versions)
}

//! The accumulated, not-yet-ordered dependency closure.

use std::collections::BTreeMap;

use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;

/// Mapping from each resolved gem to its direct dependencies, where every
/// edge carries the union of all requirement strings observed for it
/// across every resolution path.
///
/// Built fresh per top-level resolution request; entries accumulate and
/// never overwrite requirement lists for existing edges.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct DependencyGraph {
    edges: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `deps` into the entry for `package`.
    ///
    /// Requirement lists accumulate with duplicates dropped, preserving
    /// first-seen order within each edge.
    pub fn insert(&mut self, package: &str, deps: &BTreeMap<String, Vec<String>>) {
        let entry = self.edges.entry(package.to_string()).or_default();
        for (dep, requirements) in deps {
            let list = entry.entry(dep.clone()).or_default();
            for requirement in requirements {
                if !list.contains(requirement) {
                    list.push(requirement.clone());
                }
            }
        }
    }

    pub fn contains(&self, package: &str) -> bool {
        self.edges.contains_key(package)
    }

    /// Direct dependencies of a package, with their requirement lists.
    pub fn deps_of(&self, package: &str) -> Option<&BTreeMap<String, Vec<String>>> {
        self.edges.get(package)
    }

    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.edges.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeMap<String, Vec<String>>)> {
        self.edges.iter()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Petgraph view over the package names, for cycle diagnosis.
    pub(crate) fn to_digraph(&self) -> DiGraph<&str, ()> {
        let mut graph = DiGraph::new();
        let mut indices: BTreeMap<&str, NodeIndex> = BTreeMap::new();
        for (package, deps) in &self.edges {
            let from = *indices
                .entry(package.as_str())
                .or_insert_with(|| graph.add_node(package.as_str()));
            for dep in deps.keys() {
                let to = *indices
                    .entry(dep.as_str())
                    .or_insert_with(|| graph.add_node(dep.as_str()));
                graph.add_edge(from, to, ());
            }
        }
        graph
    }
}

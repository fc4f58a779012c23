//! Topological ordering of a resolved dependency graph.

use std::collections::{BTreeMap, BTreeSet};

use petgraph::algo::tarjan_scc;
use tracing::debug;

use gemorder_util::errors::{GemorderError, GemorderResult};

use crate::graph::DependencyGraph;

/// Order the graph so every gem appears after all gems it depends on.
///
/// Kahn-style peeling: each pass collects the gems with no unresolved
/// dependencies left (the ready set, in lexicographic order), appends
/// them to the output, and strips them from the other gems' dependency
/// lists. A pass that finds nothing ready while gems remain means the
/// graph cannot be ordered; the error reports the unresolved remainder,
/// naming any cycles and any dependencies absent from the graph.
pub fn topological_order(graph: &DependencyGraph) -> GemorderResult<Vec<String>> {
    let mut remaining: BTreeMap<String, BTreeSet<String>> = graph
        .iter()
        .map(|(package, deps)| (package.clone(), deps.keys().cloned().collect()))
        .collect();
    let mut order = Vec::with_capacity(remaining.len());

    while !remaining.is_empty() {
        let ready: Vec<String> = remaining
            .iter()
            .filter(|(_, deps)| deps.is_empty())
            .map(|(package, _)| package.clone())
            .collect();

        if ready.is_empty() {
            return Err(cycle_error(graph, &remaining).into());
        }
        debug!(ready = ready.len(), "peeling ready set");

        for package in &ready {
            remaining.remove(package);
            order.push(package.clone());
        }
        for deps in remaining.values_mut() {
            for handled in &ready {
                deps.remove(handled);
            }
        }
    }

    Ok(order)
}

fn cycle_error(
    graph: &DependencyGraph,
    remaining: &BTreeMap<String, BTreeSet<String>>,
) -> GemorderError {
    let mut remainder = remaining
        .iter()
        .map(|(package, deps)| {
            format!(
                "{package} -> [{}]",
                deps.iter().cloned().collect::<Vec<_>>().join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("; ");

    // Name the strongly connected components so the culprit edges are
    // visible without staring at the whole remainder.
    let digraph = graph.to_digraph();
    let cycles: Vec<String> = tarjan_scc(&digraph)
        .into_iter()
        .filter(|component| {
            component.len() > 1
                || component
                    .first()
                    .is_some_and(|&idx| digraph.contains_edge(idx, idx))
        })
        .map(|component| {
            component
                .iter()
                .map(|&idx| digraph[idx])
                .collect::<Vec<_>>()
                .join(" -> ")
        })
        .collect();
    if !cycles.is_empty() {
        remainder.push_str(&format!(" (cycles: {})", cycles.join("; ")));
    }

    // A stall without any cycle means some dependency name never became
    // a graph entry of its own; name those instead.
    let missing: Vec<String> = remaining
        .values()
        .flatten()
        .filter(|dep| !graph.contains(dep))
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    if !missing.is_empty() {
        remainder.push_str(&format!(" (missing from the graph: {})", missing.join(", ")));
    }

    GemorderError::Cycle { remainder }
}

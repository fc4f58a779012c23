//! Single-gem resolution and the worklist closure over it.
//!
//! `GemResolver` turns one gem name plus version requirements into a
//! concrete release by shelling out to `gem dependency`, auto-installing
//! once on failure. `resolve_all` expands a seed set into the full
//! transitive closure, resolving every reachable gem exactly once with
//! the union of all requirements collected for it.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{info, warn};

use gemorder_registry::client::{is_valid_name, GemClient};
use gemorder_registry::metadata::{parse_dependency_output, GemRelease};
use gemorder_registry::version::{normalize_requirements, GemVersion, Requirement};
use gemorder_util::errors::{GemorderError, GemorderResult};

use crate::graph::DependencyGraph;

/// Anything that can resolve a single gem name plus version requirements
/// to a concrete release. The closure engine is generic over this so it
/// can run against in-memory sources in tests.
pub trait GemSource {
    fn resolve(&self, name: &str, requirements: &[String]) -> GemorderResult<GemRelease>;
}

/// Normalized seed set: gem name mapped to its accumulated requirement
/// list. The single entry point for the name / (name, requirements) /
/// list / map input shapes callers start from.
#[derive(Debug, Clone, Default)]
pub struct Seed {
    entries: BTreeMap<String, Vec<String>>,
}

impl Seed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a gem with requirements, merging with any prior entry.
    ///
    /// Each requirement may be a combined comma-separated string; all
    /// forms normalize to the flat comma-free list.
    pub fn insert<S: AsRef<str>>(&mut self, name: impl Into<String>, requirements: &[S]) {
        let entry = self.entries.entry(name.into()).or_default();
        for requirement in normalize_requirements(requirements) {
            if !entry.contains(&requirement) {
                entry.push(requirement);
            }
        }
    }

    /// Add a gem without version constraints.
    pub fn insert_name(&mut self, name: impl Into<String>) {
        self.entries.entry(name.into()).or_default();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.entries.iter()
    }
}

impl<S: Into<String>> FromIterator<S> for Seed {
    fn from_iter<I: IntoIterator<Item = S>>(names: I) -> Self {
        let mut seed = Seed::new();
        for name in names {
            seed.insert_name(name);
        }
        seed
    }
}

/// Resolver backed by the local `gem` command.
pub struct GemResolver {
    client: GemClient,
    runtime_deps_only: bool,
}

impl GemResolver {
    pub fn new(client: GemClient) -> Self {
        Self {
            client,
            runtime_deps_only: true,
        }
    }

    /// Also follow dependencies declared for development.
    pub fn with_development_deps(mut self) -> Self {
        self.runtime_deps_only = false;
        self
    }

    /// Resolve `name` to the highest version satisfying every requirement,
    /// together with that version's declared dependency map.
    ///
    /// If the metadata command fails the gem is assumed missing locally:
    /// it is installed once (forwarding a single version requirement when
    /// exactly one is given) and the metadata command retried.
    pub fn resolve(&self, name: &str, requirements: &[String]) -> GemorderResult<GemRelease> {
        if !is_valid_name(name) {
            return Err(GemorderError::InvalidName {
                name: name.to_string(),
            }
            .into());
        }
        let requirements = normalize_requirements(requirements);
        let parsed = requirements
            .iter()
            .map(|r| Requirement::parse(r))
            .collect::<Result<Vec<_>, _>>()?;

        let mut captured = self.client.dependency(name)?;
        if !captured.success {
            warn!(gem = name, "failed to resolve via 'gem dependency', auto-installing");
            self.auto_install(name, &requirements)?;
            captured = self.client.dependency(name)?;
        }

        let releases = parse_dependency_output(name, &captured.stdout, self.runtime_deps_only);
        select_release(name, releases, &requirements, &parsed)
    }

    fn auto_install(&self, name: &str, requirements: &[String]) -> GemorderResult<()> {
        if requirements.len() > 1 {
            return Err(GemorderError::UnsupportedConstraint {
                gem: name.to_string(),
                requirements: requirements.to_vec(),
            }
            .into());
        }
        let captured = self
            .client
            .install(name, requirements.first().map(String::as_str))?;
        if !captured.success {
            // Best effort; the retried metadata command has the last word
            warn!(gem = name, "auto-install failed");
        }
        Ok(())
    }
}

impl GemSource for GemResolver {
    fn resolve(&self, name: &str, requirements: &[String]) -> GemorderResult<GemRelease> {
        GemResolver::resolve(self, name, requirements)
    }
}

/// Pick the highest release satisfying every requirement. Ties break to
/// the later entry, matching the registry's ascending output order.
fn select_release(
    name: &str,
    releases: Vec<GemRelease>,
    requirements: &[String],
    parsed: &[Requirement],
) -> GemorderResult<GemRelease> {
    let mut best: Option<(GemVersion, GemRelease)> = None;
    for release in releases {
        let version = GemVersion::parse(&release.version);
        if !parsed.iter().all(|r| r.satisfied_by(&version)) {
            continue;
        }
        match &best {
            Some((best_version, _)) if version < *best_version => {}
            _ => best = Some((version, release)),
        }
    }
    match best {
        Some((_, release)) => Ok(release),
        None => Err(GemorderError::Unsatisfiable {
            gem: name.to_string(),
            requirements: requirements.to_vec(),
        }
        .into()),
    }
}

/// Expand a seed set into the full transitive dependency graph.
///
/// Iterative worklist: each pass resolves every pending gem with all the
/// requirements accumulated for it so far, merges the discovered
/// dependencies into the graph, and queues unseen dependency names for
/// the next pass. Each reachable gem is resolved exactly once; if several
/// paths contribute jointly unsatisfiable requirement sets, the single
/// merged resolution fails the whole closure.
pub fn resolve_all<S: GemSource>(source: &S, seed: &Seed) -> GemorderResult<DependencyGraph> {
    let mut graph = DependencyGraph::new();
    let mut handled: BTreeSet<String> = BTreeSet::new();
    let mut remaining: BTreeMap<String, Vec<String>> = seed
        .iter()
        .map(|(name, requirements)| (name.clone(), requirements.clone()))
        .collect();

    while !remaining.is_empty() {
        info!(pending = remaining.len(), "resolution pass");
        let mut discovered: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for (name, requirements) in &remaining {
            let release = source.resolve(name, requirements)?;
            handled.insert(name.clone());
            graph.insert(name, &release.deps);

            for (dep, dep_requirements) in &release.deps {
                if handled.contains(dep) {
                    continue;
                }
                let entry = discovered.entry(dep.clone()).or_default();
                for requirement in dep_requirements {
                    if !entry.contains(requirement) {
                        entry.push(requirement.clone());
                    }
                }
            }
        }

        remaining.retain(|name, _| !handled.contains(name));
        for (name, requirements) in discovered {
            if handled.contains(&name) {
                continue;
            }
            let entry = remaining.entry(name).or_default();
            for requirement in requirements {
                if !entry.contains(&requirement) {
                    entry.push(requirement);
                }
            }
        }
    }

    Ok(graph)
}

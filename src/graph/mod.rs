// rimsort-rs: RimWorld Mod Load-Order Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Dependency graphs over active package ids.
//!
//! ```text
//! ActiveMods (uuid list + MetadataSource)
//!        |
//!        v
//! build_dependency_graphs
//!    forward: node -> {must load before node}   (from load_after)
//!    reverse: node -> {must load after node}    (from load_before)
//! ```
//!
//! Both graphs hold one key per active package id, even when the edge set is
//! empty. Rule targets that are not active never appear.

#[cfg(test)]
mod tests;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::metadata::{MetadataSource, ModMetadata, ModUuid, PackageId, RuleEntry};

/// The active mod set resolved against a metadata source.
///
/// Package ids map back to the last active instance carrying them.
#[derive(Debug, Clone)]
pub struct ActiveMods<'a> {
    uuids: Vec<ModUuid>,
    by_package: BTreeMap<PackageId, &'a ModMetadata>,
}

impl<'a> ActiveMods<'a> {
    /// Look up every UUID in `source`.
    ///
    /// UUIDs without metadata are logged and dropped. When two instances
    /// share a package id, the later one wins and the shadowed UUID is
    /// dropped as well.
    pub fn collect<S>(uuids: &[ModUuid], source: &'a S) -> Self
    where
        S: MetadataSource + ?Sized,
    {
        let mut kept = Vec::with_capacity(uuids.len());
        let mut by_package: BTreeMap<PackageId, &'a ModMetadata> = BTreeMap::new();

        for uuid in uuids {
            let Some(record) = source.lookup(uuid) else {
                tracing::error!(%uuid, "Active mod has no metadata, skipping");
                continue;
            };
            if let Some(previous) = by_package.insert(record.package_id.clone(), record) {
                warn!(
                    package_id = %record.package_id,
                    shadowed = %previous.uuid,
                    kept = %record.uuid,
                    "Duplicate package id among active mods"
                );
            }
            kept.push(uuid.clone());
        }

        let mut winners: BTreeSet<&ModUuid> = by_package.values().map(|m| &m.uuid).collect();
        kept.retain(|uuid| winners.remove(uuid));

        Self {
            uuids: kept,
            by_package,
        }
    }

    /// One UUID per active package id, in input order.
    #[must_use]
    pub fn uuids(&self) -> &[ModUuid] {
        &self.uuids
    }

    pub fn package_ids(&self) -> impl Iterator<Item = &PackageId> {
        self.by_package.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_package.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_package.is_empty()
    }

    #[must_use]
    pub fn contains(&self, package_id: &PackageId) -> bool {
        self.by_package.contains_key(package_id)
    }

    #[must_use]
    pub fn metadata(&self, package_id: &PackageId) -> Option<&'a ModMetadata> {
        self.by_package.get(package_id).copied()
    }

    #[must_use]
    pub fn uuid_of(&self, package_id: &PackageId) -> Option<&'a ModUuid> {
        self.metadata(package_id).map(|m| &m.uuid)
    }

    /// Display name, or the package id itself for unknown ids.
    #[must_use]
    pub fn name_of<'p>(&self, package_id: &'p PackageId) -> &'p str
    where
        'a: 'p,
    {
        match self.metadata(package_id) {
            Some(record) => record.display_name(),
            None => package_id.as_str(),
        }
    }

    /// Case-insensitive name ordering key, ties broken by package id.
    #[must_use]
    pub fn sort_key(&self, package_id: &PackageId) -> (String, PackageId) {
        (self.name_of(package_id).to_lowercase(), package_id.clone())
    }

    /// Sort package ids by [`ActiveMods::sort_key`], ascending.
    pub fn sort_by_name(&self, ids: &mut [PackageId]) {
        ids.sort_by_cached_key(|id| self.sort_key(id));
    }
}

/// Mapping from package id to the package ids that must load before it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DependencyGraph {
    edges: BTreeMap<PackageId, BTreeSet<PackageId>>,
}

impl DependencyGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure `node` is a key.
    pub fn add_node(&mut self, node: PackageId) {
        self.edges.entry(node).or_default();
    }

    /// Record that `before` must load before `node`. Adds `node` as a key.
    pub fn add_edge(&mut self, node: PackageId, before: PackageId) {
        self.edges.entry(node).or_default().insert(before);
    }

    /// Returns `true` if the edge existed.
    pub fn remove_edge(&mut self, node: &PackageId, before: &PackageId) -> bool {
        self.edges
            .get_mut(node)
            .is_some_and(|deps| deps.remove(before))
    }

    #[must_use]
    pub fn contains_node(&self, node: &PackageId) -> bool {
        self.edges.contains_key(node)
    }

    #[must_use]
    pub fn contains_edge(&self, node: &PackageId, before: &PackageId) -> bool {
        self.edges
            .get(node)
            .is_some_and(|deps| deps.contains(before))
    }

    #[must_use]
    pub fn dependencies(&self, node: &PackageId) -> Option<&BTreeSet<PackageId>> {
        self.edges.get(node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &PackageId> {
        self.edges.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PackageId, &BTreeSet<PackageId>)> {
        self.edges.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum()
    }

    /// Sub-graph with keys in `members` and only edges between members.
    #[must_use]
    pub fn restricted_to(&self, members: &BTreeSet<PackageId>) -> Self {
        let edges = self
            .edges
            .iter()
            .filter(|(node, _)| members.contains(*node))
            .map(|(node, deps)| {
                let kept = deps
                    .iter()
                    .filter(|dep| members.contains(*dep))
                    .cloned()
                    .collect();
                (node.clone(), kept)
            })
            .collect();
        Self { edges }
    }

    /// Every node reachable from `start` by following edges, excluding `start`
    /// unless it lies on a cycle through itself.
    #[must_use]
    pub fn closure(&self, start: &PackageId) -> BTreeSet<PackageId> {
        let mut seen = BTreeSet::new();
        let mut stack: Vec<&PackageId> = self.dependencies(start).into_iter().flatten().collect();
        while let Some(node) = stack.pop() {
            if seen.insert(node.clone()) {
                stack.extend(self.dependencies(node).into_iter().flatten());
            }
        }
        seen
    }
}

impl FromIterator<(PackageId, PackageId)> for DependencyGraph {
    fn from_iter<I: IntoIterator<Item = (PackageId, PackageId)>>(iter: I) -> Self {
        let mut graph = Self::new();
        for (node, before) in iter {
            graph.add_node(before.clone());
            graph.add_edge(node, before);
        }
        graph
    }
}

/// Build the forward and reverse dependency graphs of the active set.
///
/// Malformed rule entries are logged and skipped.
#[must_use]
pub fn build_dependency_graphs(active: &ActiveMods<'_>) -> (DependencyGraph, DependencyGraph) {
    let mut forward = DependencyGraph::new();
    let mut reverse = DependencyGraph::new();

    for package_id in active.package_ids() {
        forward.add_node(package_id.clone());
        reverse.add_node(package_id.clone());
    }

    for record in active.by_package.values() {
        let owner = &record.package_id;
        add_rules(&mut forward, active, owner, &record.load_after);
        add_rules(&mut reverse, active, owner, &record.load_before);
    }

    debug!(
        nodes = forward.len(),
        forward_edges = forward.edge_count(),
        reverse_edges = reverse.edge_count(),
        "Built dependency graphs"
    );
    (forward, reverse)
}

fn add_rules(
    graph: &mut DependencyGraph,
    active: &ActiveMods<'_>,
    owner: &PackageId,
    entries: &[RuleEntry],
) {
    for entry in entries {
        let rule = match entry.to_rule(owner) {
            Ok(rule) => rule,
            Err(e) => {
                warn!(error = %e, "Skipping load order rule");
                continue;
            }
        };
        if rule.target == *owner {
            debug!(package_id = %owner, "Ignoring rule that targets its own mod");
            continue;
        }
        if !active.contains(&rule.target) {
            trace!(package_id = %owner, target = %rule.target, "Rule target not active");
            continue;
        }
        graph.add_edge(owner.clone(), rule.target);
    }
}

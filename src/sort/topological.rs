// rimsort-rs: RimWorld Mod Load-Order Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{SortError, SortResult};
use crate::graph::{ActiveMods, DependencyGraph};
use crate::metadata::PackageId;

/// Split `graph` into Kahn layers.
///
/// Layer `n` holds every node whose dependencies all sit in layers `< n`.
/// Dependencies that are not keys of the graph are treated as nodes without
/// dependencies of their own.
///
/// # Errors
///
/// Returns [`SortError::CycleDetected`] listing every node that could not be
/// layered.
pub fn topological_layers(graph: &DependencyGraph) -> SortResult<Vec<Vec<PackageId>>> {
    let mut pending: BTreeMap<&PackageId, usize> = BTreeMap::new();
    let mut dependents: BTreeMap<&PackageId, Vec<&PackageId>> = BTreeMap::new();

    for (node, deps) in graph.iter() {
        pending.insert(node, deps.len());
        for dep in deps {
            pending.entry(dep).or_insert(0);
            dependents.entry(dep).or_default().push(node);
        }
    }

    let mut ready: Vec<&PackageId> = pending
        .iter()
        .filter(|&(_, &count)| count == 0)
        .map(|(&node, _)| node)
        .collect();
    let mut layers = Vec::new();
    let mut placed = 0;

    while !ready.is_empty() {
        let mut next = Vec::new();
        for &node in &ready {
            for &dependent in dependents.get(node).into_iter().flatten() {
                if let Some(count) = pending.get_mut(dependent) {
                    *count -= 1;
                    if *count == 0 {
                        next.push(dependent);
                    }
                }
            }
        }
        placed += ready.len();
        layers.push(ready.into_iter().cloned().collect());
        ready = next;
    }

    if placed < pending.len() {
        let nodes: BTreeSet<&PackageId> = pending
            .iter()
            .filter(|&(_, &count)| count > 0)
            .map(|(&node, _)| node)
            .collect();
        return Err(SortError::CycleDetected {
            tier: None,
            nodes: nodes.iter().map(ToString::to_string).collect(),
        });
    }
    Ok(layers)
}

/// Kahn layers concatenated, each layer sorted by display name.
///
/// # Errors
///
/// Returns [`SortError::CycleDetected`] when `graph` is not acyclic.
pub fn order_topological(
    graph: &DependencyGraph,
    active: &ActiveMods<'_>,
) -> SortResult<Vec<PackageId>> {
    let layers = topological_layers(graph)?;
    tracing::trace!(layers = layers.len(), "Layered dependency graph");

    let mut ordered = Vec::with_capacity(graph.len());
    for mut layer in layers {
        active.sort_by_name(&mut layer);
        ordered.extend(layer);
    }
    Ok(ordered)
}

// rimsort-rs: RimWorld Mod Load-Order Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Simple-cycle enumeration and reporting.

use std::collections::{BTreeMap, BTreeSet};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::warn;

use super::CycleNotifier;
use crate::error::SortError;
use crate::graph::DependencyGraph;
use crate::metadata::PackageId;

/// Upper bound on enumerated cycles; dense components grow exponentially.
const MAX_CYCLES: usize = 1000;

/// Enumerate the simple cycles of `graph`.
///
/// Each cycle starts at its smallest package id and lists every node once;
/// the result is sorted.
#[must_use]
pub fn find_cycles(graph: &DependencyGraph) -> Vec<Vec<PackageId>> {
    let mut digraph: DiGraph<&PackageId, ()> = DiGraph::new();
    let mut indices: BTreeMap<&PackageId, NodeIndex> = BTreeMap::new();

    for node in graph.nodes() {
        indices.insert(node, digraph.add_node(node));
    }
    for (node, deps) in graph.iter() {
        for dep in deps {
            let to = *indices.entry(dep).or_insert_with(|| digraph.add_node(dep));
            digraph.add_edge(indices[node], to, ());
        }
    }

    let mut cycles = Vec::new();
    for component in tarjan_scc(&digraph) {
        let members: BTreeSet<&PackageId> = component.iter().map(|&ix| digraph[ix]).collect();
        let cyclic = members.len() > 1
            || members
                .first()
                .is_some_and(|&node| graph.contains_edge(node, node));
        if !cyclic {
            continue;
        }
        for &start in &members {
            cycles_from(start, &members, graph, &mut cycles);
            if cycles.len() >= MAX_CYCLES {
                warn!(limit = MAX_CYCLES, "Cycle enumeration truncated");
                cycles.sort();
                return cycles;
            }
        }
    }

    cycles.sort();
    cycles
}

/// Cycles through `start` whose other nodes are all greater than `start`.
fn cycles_from(
    start: &PackageId,
    members: &BTreeSet<&PackageId>,
    graph: &DependencyGraph,
    out: &mut Vec<Vec<PackageId>>,
) {
    let mut path: Vec<&PackageId> = vec![start];
    let mut stack = vec![successors(graph, members, start)];

    while let Some(pending) = stack.last_mut() {
        let Some(next) = pending.pop() else {
            stack.pop();
            path.pop();
            continue;
        };
        if next == start {
            out.push(path.iter().map(|&node| node.clone()).collect());
            if out.len() >= MAX_CYCLES {
                return;
            }
        } else if next > start && !path.contains(&next) {
            path.push(next);
            stack.push(successors(graph, members, next));
        }
    }
}

/// In-component successors of `node`, reversed so `pop` yields ascending ids.
fn successors<'g>(
    graph: &'g DependencyGraph,
    members: &BTreeSet<&PackageId>,
    node: &PackageId,
) -> Vec<&'g PackageId> {
    let mut next: Vec<&PackageId> = graph
        .dependencies(node)
        .into_iter()
        .flatten()
        .filter(|dep| members.contains(dep))
        .collect();
    next.reverse();
    next
}

/// Render a cycle as `a -> b -> a`.
#[must_use]
pub fn format_cycle(cycle: &[PackageId]) -> String {
    let mut rendered: Vec<&str> = cycle.iter().map(PackageId::as_str).collect();
    if let Some(&first) = rendered.first() {
        rendered.push(first);
    }
    rendered.join(" -> ")
}

/// Turns a cycle failure into one notification.
pub struct CycleReporter<'n> {
    notifier: &'n dyn CycleNotifier,
}

impl<'n> CycleReporter<'n> {
    pub fn new(notifier: &'n dyn CycleNotifier) -> Self {
        Self { notifier }
    }

    /// Enumerate the cycles of `graph` and notify once.
    ///
    /// Errors other than [`SortError::CycleDetected`] are ignored.
    pub fn report(&self, graph: &DependencyGraph, error: &SortError) {
        let SortError::CycleDetected { tier, nodes } = error else {
            return;
        };

        let cycles = find_cycles(graph);
        let scope = tier.map_or_else(|| "load order".to_string(), |t| format!("{t} tier"));
        let summary = format!(
            "Found {} circular dependency chain(s) in the {scope}. \
             Remove one of the rules involved to resolve it.",
            cycles.len()
        );
        let details = if cycles.is_empty() {
            format!("Unorderable mods: {}", nodes.join(", "))
        } else {
            cycles
                .iter()
                .map(|cycle| format_cycle(cycle))
                .collect::<Vec<_>>()
                .join("\n")
        };

        self.notifier
            .report_cycles("Dependency cycle detected", &summary, &details);
    }
}

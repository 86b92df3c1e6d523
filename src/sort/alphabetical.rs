// rimsort-rs: RimWorld Mod Load-Order Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Name order with forced insertion of dependencies.
//!
//! ```text
//! base:   Apple(c)  Banana(a)  Cherry(b)        c depends on a
//!
//! c  -> [c]          append, anchor 0
//!       [a, c]       a force-inserted at anchor
//! a  -> placed
//! b  -> [a, c, b]
//! ```
//!
//! Each dependency `d` of a node `p` is inserted right after the last
//! element in `[anchor(p), index(p))` that `d` itself depends on, or at
//! `anchor(p)` when there is none. Dependencies of `d` then use `d`'s
//! position as their anchor.
//!
//! Insertion only looks at direct dependencies inside the window, so a
//! dependency of `d` already placed further right in that window stays after
//! `d`, even on an acyclic graph:
//!
//! ```text
//! base:   A(m7)  B(m3)  ...  H(m1)     m3 <- m1, m5 <- m3, m7 <- {m4, m5},
//!                                      m4 <- {m0, m1}
//! result: m3  m5  m0  m1  m4  m7  m6  m2     m3 ahead of m1
//! ```
//!
//! Every such edge is logged as a warning once the order is built.

use std::collections::BTreeMap;

use tracing::warn;

use crate::graph::{ActiveMods, DependencyGraph};
use crate::metadata::PackageId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Placed,
}

struct Frame {
    node: PackageId,
    anchor: usize,
    /// Unvisited dependencies, ascending by name; popped from the back.
    pending: Vec<PackageId>,
}

impl Frame {
    fn new(
        node: PackageId,
        anchor: usize,
        graph: &DependencyGraph,
        active: &ActiveMods<'_>,
    ) -> Self {
        let mut pending: Vec<PackageId> = graph
            .dependencies(&node)
            .into_iter()
            .flatten()
            .cloned()
            .collect();
        active.sort_by_name(&mut pending);
        Self {
            node,
            anchor,
            pending,
        }
    }
}

/// Order `graph` by name, pulling dependencies in front of their dependents.
///
/// Never fails. A dependency edge back to a node still being inserted closes
/// a cycle; such edges are logged and skipped. Edges the insertion leaves
/// unsatisfied are logged as well.
#[must_use]
pub fn order_alphabetical(graph: &DependencyGraph, active: &ActiveMods<'_>) -> Vec<PackageId> {
    let mut base: Vec<PackageId> = graph.nodes().cloned().collect();
    active.sort_by_name(&mut base);

    let mut result: Vec<PackageId> = Vec::with_capacity(base.len());
    let mut marks: BTreeMap<PackageId, Mark> = BTreeMap::new();

    for package_id in base {
        if marks.contains_key(&package_id) {
            continue;
        }
        let anchor = result.len();
        result.push(package_id.clone());
        marks.insert(package_id.clone(), Mark::InProgress);

        let mut stack = vec![Frame::new(package_id, anchor, graph, active)];
        while let Some(frame) = stack.last_mut() {
            let Some(dep) = frame.pending.pop() else {
                if let Some(done) = stack.pop() {
                    marks.insert(done.node, Mark::Placed);
                }
                continue;
            };

            match marks.get(&dep) {
                Some(Mark::Placed) => continue,
                Some(Mark::InProgress) => {
                    warn!(
                        package_id = %frame.node,
                        dependency = %dep,
                        "Dependency cycle in alphabetical order, skipping edge"
                    );
                    continue;
                }
                None => {}
            }

            let anchor = frame.anchor;
            let end = result
                .iter()
                .position(|placed| *placed == frame.node)
                .unwrap_or(result.len());
            let at = result[anchor..end]
                .iter()
                .rposition(|candidate| graph.contains_edge(&dep, candidate))
                .map_or(anchor, |offset| anchor + offset + 1);

            result.insert(at, dep.clone());
            marks.insert(dep.clone(), Mark::InProgress);
            stack.push(Frame::new(dep, at, graph, active));
        }
    }

    for (package_id, dependency) in misplaced_dependencies(graph, &result) {
        warn!(
            package_id = %package_id,
            dependency = %dependency,
            "Dependency placed after its dependent in alphabetical order"
        );
    }

    result
}

/// Edges `(node, dependency)` of `graph` whose dependency comes after the
/// node in `order`.
pub(super) fn misplaced_dependencies(
    graph: &DependencyGraph,
    order: &[PackageId],
) -> Vec<(PackageId, PackageId)> {
    let positions: BTreeMap<&PackageId, usize> = order
        .iter()
        .enumerate()
        .map(|(index, package_id)| (package_id, index))
        .collect();

    let mut misplaced = Vec::new();
    for (node, deps) in graph.iter() {
        let Some(&node_at) = positions.get(node) else {
            continue;
        };
        for dep in deps {
            if positions.get(dep).is_some_and(|&dep_at| dep_at > node_at) {
                misplaced.push((node.clone(), dep.clone()));
            }
        }
    }
    misplaced
}

// rimsort-rs: RimWorld Mod Load-Order Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Cycle handling around the ordering strategies.
//!
//! ```text
//! tier graph --CycleMitigator--> mitigated copy --strategy--> order
//!                                      |                        |
//!                                      |            CycleDetected?
//!                                      v                        v
//!                               find_cycles  <------  CycleReporter --> CycleNotifier
//! ```

mod report;


pub use report::{CycleReporter, find_cycles, format_cycle};

use tracing::debug;

use crate::graph::DependencyGraph;
use crate::metadata::PackageId;

/// Edges dropped by default: Harmony and Prepatcher declare each other.
pub const DEFAULT_IGNORED_EDGES: &[(&str, &str)] = &[("brrainz.harmony", "zetrith.prepatcher")];

/// Removes a fixed set of known-problematic edges before ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleMitigator {
    ignored: Vec<(PackageId, PackageId)>,
}

impl CycleMitigator {
    /// Each pair is `(node, dependency)`: the edge meaning `dependency` must
    /// load before `node`.
    pub fn new(ignored: impl IntoIterator<Item = (PackageId, PackageId)>) -> Self {
        Self {
            ignored: ignored.into_iter().collect(),
        }
    }

    /// A mitigator that removes nothing.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            ignored: Vec::new(),
        }
    }

    #[must_use]
    pub fn ignored(&self) -> &[(PackageId, PackageId)] {
        &self.ignored
    }

    /// Copy of `graph` without the ignored edges.
    #[must_use]
    pub fn mitigate(&self, graph: &DependencyGraph) -> DependencyGraph {
        let mut mitigated = graph.clone();
        for (node, dependency) in &self.ignored {
            if mitigated.remove_edge(node, dependency) {
                debug!(from = %node, to = %dependency, "Dropped ignored dependency edge");
            }
        }
        mitigated
    }
}

impl Default for CycleMitigator {
    fn default() -> Self {
        Self::new(
            DEFAULT_IGNORED_EDGES
                .iter()
                .map(|&(from, to)| (PackageId::new(from), PackageId::new(to))),
        )
    }
}

/// Receiver of cycle reports.
///
/// Called at most once per failed ordering. Implementations must not fail.
pub trait CycleNotifier {
    fn report_cycles(&self, title: &str, summary: &str, details: &str);
}

/// Reports cycles as `error` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl CycleNotifier for TracingNotifier {
    fn report_cycles(&self, title: &str, summary: &str, details: &str) {
        tracing::error!(summary, "{title}\n{details}");
    }
}

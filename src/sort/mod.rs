// rimsort-rs: RimWorld Mod Load-Order Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Ordering strategies for one tier.
//!
//! ```text
//! SortStrategy ──impl──> OrderingStrategy::order(graph, active) -> [PackageId]
//!   ├─ Topological   Kahn layers, each layer by name
//!   ├─ Alphabetical  name order with dependencies forced in front
//!   └─ Custom(fn)    caller-supplied
//! ```
//!
//! [`order`] maps the resulting package ids back to instance UUIDs.

mod alphabetical;
mod topological;

#[cfg(test)]
mod tests;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SortResult;
use crate::graph::{ActiveMods, DependencyGraph};
use crate::metadata::{ModUuid, PackageId};

pub use alphabetical::order_alphabetical;
pub use topological::{order_topological, topological_layers};

/// Signature of a caller-supplied ordering function.
pub type OrderFn = fn(&DependencyGraph, &ActiveMods<'_>) -> SortResult<Vec<PackageId>>;

/// Produces a total order of the nodes of a dependency graph.
pub trait OrderingStrategy {
    /// Order every node of `graph`; `active` supplies names for tie-breaks.
    ///
    /// # Errors
    ///
    /// Implementations may fail with [`crate::error::SortError::CycleDetected`]
    /// when the graph cannot be ordered.
    fn order(&self, graph: &DependencyGraph, active: &ActiveMods<'_>) -> SortResult<Vec<PackageId>>;
}

/// Built-in strategy selection.
#[derive(Clone, Copy, Default)]
pub enum SortStrategy {
    #[default]
    Topological,
    Alphabetical,
    Custom(OrderFn),
}

impl SortStrategy {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Topological => "topological",
            Self::Alphabetical => "alphabetical",
            Self::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for SortStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Topological => "Topological",
            Self::Alphabetical => "Alphabetical",
            Self::Custom(_) => "Custom(..)",
        })
    }
}

impl fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl OrderingStrategy for SortStrategy {
    fn order(
        &self,
        graph: &DependencyGraph,
        active: &ActiveMods<'_>,
    ) -> SortResult<Vec<PackageId>> {
        match self {
            Self::Topological => order_topological(graph, active),
            Self::Alphabetical => Ok(order_alphabetical(graph, active)),
            Self::Custom(order_fn) => order_fn(graph, active),
        }
    }
}

/// Configurable sort method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortMethod {
    #[default]
    Topological,
    Alphabetical,
}

impl fmt::Display for SortMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(SortStrategy::from(*self).name())
    }
}

impl From<SortMethod> for SortStrategy {
    fn from(method: SortMethod) -> Self {
        match method {
            SortMethod::Topological => Self::Topological,
            SortMethod::Alphabetical => Self::Alphabetical,
        }
    }
}

/// Order `graph` with `strategy` and map the result back to UUIDs.
///
/// Package ids without an active instance are dropped.
///
/// # Errors
///
/// Propagates the strategy's error.
pub fn order<S>(
    strategy: &S,
    graph: &DependencyGraph,
    active: &ActiveMods<'_>,
) -> SortResult<Vec<ModUuid>>
where
    S: OrderingStrategy + ?Sized,
{
    let ordered = strategy.order(graph, active)?;
    Ok(ordered
        .iter()
        .filter_map(|package_id| {
            let uuid = active.uuid_of(package_id);
            if uuid.is_none() {
                tracing::debug!(%package_id, "No active instance for ordered package id");
            }
            uuid.cloned()
        })
        .collect())
}

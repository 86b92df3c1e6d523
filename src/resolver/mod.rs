// rimsort-rs: RimWorld Mod Load-Order Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Load-order resolution across tiers.
//!
//! ```text
//! resolve(strategy, uuids)
//!   |
//!   v
//! plan: ActiveMods -> build_dependency_graphs -> partition_tiers
//!   |
//!   v
//! for tier in First, Middle, Last:
//!     mitigate(tier graph) -> order(strategy) --CycleDetected--> CycleReporter, abort
//!   |
//!   v
//! concatenate, keep first occurrence
//! ```


use std::collections::BTreeSet;

use tracing::{debug, info_span};

use crate::cycles::{CycleMitigator, CycleNotifier, CycleReporter, TracingNotifier};
use crate::error::SortResult;
use crate::graph::{ActiveMods, DependencyGraph, build_dependency_graphs};
use crate::metadata::{MetadataSource, ModUuid};
use crate::sort::{OrderingStrategy, order};
use crate::tiers::{TierPartition, TierSeeds, partition_tiers};

/// Graphs and tiers of one active set, before ordering.
#[derive(Debug, Clone)]
pub struct ResolvePlan<'a> {
    pub active: ActiveMods<'a>,
    pub forward: DependencyGraph,
    pub reverse: DependencyGraph,
    pub tiers: TierPartition,
}

/// Resolves active mod lists against one metadata source.
pub struct Resolver<'a> {
    source: &'a dyn MetadataSource,
    seeds: TierSeeds,
    mitigator: CycleMitigator,
    notifier: &'a dyn CycleNotifier,
}

impl<'a> Resolver<'a> {
    /// Resolver with the default seeds and mitigation table, reporting
    /// cycles through [`TracingNotifier`].
    pub fn new(source: &'a dyn MetadataSource) -> Self {
        Self {
            source,
            seeds: TierSeeds::default(),
            mitigator: CycleMitigator::default(),
            notifier: &TracingNotifier,
        }
    }

    #[must_use]
    pub fn with_seeds(mut self, seeds: TierSeeds) -> Self {
        self.seeds = seeds;
        self
    }

    #[must_use]
    pub fn with_mitigator(mut self, mitigator: CycleMitigator) -> Self {
        self.mitigator = mitigator;
        self
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: &'a dyn CycleNotifier) -> Self {
        self.notifier = notifier;
        self
    }

    #[must_use]
    pub const fn seeds(&self) -> &TierSeeds {
        &self.seeds
    }

    #[must_use]
    pub const fn mitigator(&self) -> &CycleMitigator {
        &self.mitigator
    }

    /// Build the graphs and tier partition for `uuids`.
    #[must_use]
    pub fn plan(&self, uuids: &[ModUuid]) -> ResolvePlan<'a> {
        let active = ActiveMods::collect(uuids, self.source);
        let (forward, reverse) = build_dependency_graphs(&active);
        let tiers = partition_tiers(&forward, &reverse, &active, &self.seeds);
        ResolvePlan {
            active,
            forward,
            reverse,
            tiers,
        }
    }

    /// Order `uuids` tier by tier.
    ///
    /// Every tier graph is mitigated before ordering. The result holds each
    /// UUID at most once.
    ///
    /// # Errors
    ///
    /// Returns the first strategy error. A
    /// [`crate::error::SortError::CycleDetected`] is reported to the notifier
    /// before it is returned; no partial order is produced.
    pub fn resolve<S>(&self, strategy: &S, uuids: &[ModUuid]) -> SortResult<Vec<ModUuid>>
    where
        S: OrderingStrategy + ?Sized,
    {
        let plan = self.plan(uuids);
        let mut seen = BTreeSet::new();
        let mut ordered = Vec::with_capacity(plan.active.len());

        for (tier, slice) in plan.tiers.iter() {
            let _span =
                info_span!("tier", tier = tier.name(), mods = slice.members.len()).entered();
            let graph = self.mitigator.mitigate(&slice.graph);

            let tier_order = order(strategy, &graph, &plan.active).map_err(|e| {
                let e = e.in_tier(tier);
                if e.is_cycle() {
                    CycleReporter::new(self.notifier).report(&graph, &e);
                }
                e
            })?;

            debug!(mods = tier_order.len(), "Ordered tier");
            for uuid in tier_order {
                if seen.insert(uuid.clone()) {
                    ordered.push(uuid);
                }
            }
        }

        Ok(ordered)
    }
}

// rimsort-rs: RimWorld Mod Load-Order Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tier partitioning of the active mod set.
//!
//! ```text
//! active ----------------------------------------------+
//!   | first seeds --closure(forward)--> Tier::First     |
//!   | last seeds  --closure(reverse)--> Tier::Last      |  minus First
//!   | (+ load_bottom mods)                              |
//!   +--> everything else -------------> Tier::Middle    |
//!
//! each tier graph = forward graph restricted to the tier's members
//! ```
//!
//! A mod claimed by [`Tier::First`] is never considered for [`Tier::Last`].

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;
use wax::{Glob, Program};

use crate::error::ConfigError;
use crate::graph::{ActiveMods, DependencyGraph};
use crate::metadata::PackageId;

/// Ordering partition a mod is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    First,
    Middle,
    Last,
}

impl Tier {
    /// Returns all tiers in load order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::First, Self::Middle, Self::Last]
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Middle => "middle",
            Self::Last => "last",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Package id patterns that seed the first and last tiers.
///
/// Patterns are matched case-insensitively; an exact match is tried before
/// the pattern is interpreted as a glob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierSeeds {
    first: Vec<String>,
    last: Vec<String>,
}

impl TierSeeds {
    /// Create seeds, validating every pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a pattern that is not a
    /// valid glob.
    pub fn new(first: &[String], last: &[String]) -> Result<Self, ConfigError> {
        Ok(Self {
            first: normalize_patterns("first", first)?,
            last: normalize_patterns("last", last)?,
        })
    }

    #[must_use]
    pub fn first(&self) -> &[String] {
        &self.first
    }

    #[must_use]
    pub fn last(&self) -> &[String] {
        &self.last
    }
}

impl Default for TierSeeds {
    fn default() -> Self {
        Self {
            first: owned(DEFAULT_FIRST_SEEDS),
            last: owned(DEFAULT_LAST_SEEDS),
        }
    }
}

/// Foundational packages that always load first.
pub const DEFAULT_FIRST_SEEDS: &[&str] = &[
    "zetrith.prepatcher",
    "brrainz.harmony",
    "ludeon.rimworld",
    "ludeon.rimworld.royalty",
    "ludeon.rimworld.ideology",
    "ludeon.rimworld.biotech",
    "ludeon.rimworld.anomaly",
    "unlimitedhugs.hugslib",
];

/// Packages known to belong at the very end.
pub const DEFAULT_LAST_SEEDS: &[&str] = &["krkr.rocketman"];

fn owned(patterns: &[&str]) -> Vec<String> {
    patterns.iter().map(ToString::to_string).collect()
}

fn normalize_patterns(key: &str, patterns: &[String]) -> Result<Vec<String>, ConfigError> {
    patterns
        .iter()
        .map(|pattern| {
            let lowered = pattern.trim().to_lowercase();
            Glob::new(&lowered).map_err(|e| ConfigError::InvalidValue {
                section: "tiers".to_string(),
                key: key.to_string(),
                message: format!("invalid pattern '{pattern}': {e}"),
            })?;
            Ok(lowered)
        })
        .collect()
}

/// Active package ids matching any of `patterns`.
fn matching_seeds(patterns: &[String], active: &ActiveMods<'_>) -> BTreeSet<PackageId> {
    let mut matched = BTreeSet::new();
    for pattern in patterns {
        let exact = PackageId::new(pattern);
        if active.contains(&exact) {
            matched.insert(exact);
            continue;
        }
        // Patterns are validated on construction; a failure here only means
        // the pattern cannot match anything.
        let Ok(glob) = Glob::new(pattern) else {
            continue;
        };
        matched.extend(
            active
                .package_ids()
                .filter(|id| glob.is_match(id.as_str()))
                .cloned(),
        );
    }
    matched
}

/// Members of one tier plus its dependency graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TierSlice {
    pub members: BTreeSet<PackageId>,
    pub graph: DependencyGraph,
}

impl TierSlice {
    fn new(members: BTreeSet<PackageId>, forward: &DependencyGraph) -> Self {
        let graph = forward.restricted_to(&members);
        Self { members, graph }
    }
}

/// The three tiers of one active set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TierPartition {
    pub first: TierSlice,
    pub middle: TierSlice,
    pub last: TierSlice,
}

impl TierPartition {
    #[must_use]
    pub const fn tier(&self, tier: Tier) -> &TierSlice {
        match tier {
            Tier::First => &self.first,
            Tier::Middle => &self.middle,
            Tier::Last => &self.last,
        }
    }

    /// Tier a package id was assigned to, if it is active.
    #[must_use]
    pub fn tier_of(&self, package_id: &PackageId) -> Option<Tier> {
        Tier::all()
            .iter()
            .copied()
            .find(|&tier| self.tier(tier).members.contains(package_id))
    }

    /// Tiers with their slices, in load order.
    pub fn iter(&self) -> impl Iterator<Item = (Tier, &TierSlice)> {
        Tier::all().iter().map(|&tier| (tier, self.tier(tier)))
    }
}

/// Split the active set into first, middle and last tiers.
///
/// `forward` maps a node to the nodes that must load before it; `reverse`
/// maps a node to the nodes that must load after it.
#[must_use]
pub fn partition_tiers(
    forward: &DependencyGraph,
    reverse: &DependencyGraph,
    active: &ActiveMods<'_>,
    seeds: &TierSeeds,
) -> TierPartition {
    let mut first = BTreeSet::new();
    for seed in matching_seeds(seeds.first(), active) {
        first.extend(forward.closure(&seed));
        first.insert(seed);
    }

    let mut last_seeds = matching_seeds(seeds.last(), active);
    last_seeds.extend(
        active
            .package_ids()
            .filter(|id| active.metadata(id).is_some_and(|m| m.load_bottom))
            .cloned(),
    );

    let mut last = BTreeSet::new();
    for seed in last_seeds {
        if first.contains(&seed) {
            debug!(package_id = %seed, "Last-tier seed already claimed by first tier");
            continue;
        }
        let mut stack = vec![seed];
        while let Some(node) = stack.pop() {
            if first.contains(&node) || !last.insert(node.clone()) {
                continue;
            }
            stack.extend(reverse.dependencies(&node).into_iter().flatten().cloned());
        }
    }

    let middle: BTreeSet<PackageId> = active
        .package_ids()
        .filter(|id| !first.contains(*id) && !last.contains(*id))
        .cloned()
        .collect();

    debug!(
        first = first.len(),
        middle = middle.len(),
        last = last.len(),
        "Partitioned active mods into tiers"
    );

    TierPartition {
        first: TierSlice::new(first, forward),
        middle: TierSlice::new(middle, forward),
        last: TierSlice::new(last, forward),
    }
}

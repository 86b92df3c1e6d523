// rimsort-rs: RimWorld Mod Load-Order Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeSet;

use super::{Tier, TierSeeds, partition_tiers};
use crate::error::ConfigError;
use crate::graph::{ActiveMods, build_dependency_graphs};
use crate::metadata::{MetadataStore, ModMetadata, ModUuid, PackageId};

fn ids(list: &[&str]) -> BTreeSet<PackageId> {
    list.iter().map(|id| PackageId::new(id)).collect()
}

fn seeds(first: &[&str], last: &[&str]) -> TierSeeds {
    let owned = |list: &[&str]| list.iter().map(ToString::to_string).collect::<Vec<_>>();
    TierSeeds::new(&owned(first), &owned(last)).unwrap()
}

fn all_uuids(store: &MetadataStore) -> Vec<ModUuid> {
    store.uuids()
}

#[test]
fn test_tier_names() {
    let names: Vec<_> = Tier::all().iter().map(Tier::name).collect();
    assert_eq!(names, ["first", "middle", "last"]);
    assert_eq!(Tier::Last.to_string(), "last");
}

#[test]
fn test_default_seeds() {
    let seeds = TierSeeds::default();
    assert!(seeds.first().iter().any(|s| s == "brrainz.harmony"));
    assert!(seeds.first().iter().any(|s| s == "ludeon.rimworld"));
    assert_eq!(seeds.last(), ["krkr.rocketman"]);
}

#[test]
fn test_seed_patterns_are_lowercased() {
    let seeds = seeds(&["Ludeon.RimWorld.*"], &[]);
    assert_eq!(seeds.first(), ["ludeon.rimworld.*"]);
}

#[test]
fn test_invalid_seed_pattern() {
    let err = TierSeeds::new(&["harmony{a,b".to_string()], &[]).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "first"));
}

#[test]
fn test_first_tier_pulls_in_dependencies() {
    let store: MetadataStore = [
        ModMetadata::new("u1", "brrainz.harmony", "Harmony").with_load_after("lib.core"),
        ModMetadata::new("u2", "lib.core", "Core Lib").with_load_after("lib.base"),
        ModMetadata::new("u3", "lib.base", "Base Lib"),
        ModMetadata::new("u4", "some.mod", "Some Mod").with_load_after("brrainz.harmony"),
    ]
    .into_iter()
    .collect();
    let active = ActiveMods::collect(&all_uuids(&store), &store);
    let (forward, reverse) = build_dependency_graphs(&active);

    let seeds = seeds(&["brrainz.harmony"], &[]);
    let tiers = partition_tiers(&forward, &reverse, &active, &seeds);

    assert_eq!(
        tiers.first.members,
        ids(&["brrainz.harmony", "lib.core", "lib.base"])
    );
    assert_eq!(tiers.middle.members, ids(&["some.mod"]));
    assert!(tiers.last.members.is_empty());

    // Edges to other tiers are dropped from the tier graph.
    let some_mod = PackageId::new("some.mod");
    assert_eq!(
        tiers.middle.graph.dependencies(&some_mod),
        Some(&BTreeSet::new())
    );
    assert_eq!(tiers.first.graph.edge_count(), 2);
}

#[test]
fn test_last_tier_from_load_bottom_and_reverse_rules() {
    let store: MetadataStore = [
        ModMetadata::new("u1", "tail", "Tail")
            .with_load_bottom(true)
            .with_load_before("after.tail"),
        ModMetadata::new("u2", "after.tail", "After Tail"),
        ModMetadata::new("u3", "krkr.rocketman", "RocketMan"),
        ModMetadata::new("u4", "plain", "Plain"),
    ]
    .into_iter()
    .collect();
    let active = ActiveMods::collect(&all_uuids(&store), &store);
    let (forward, reverse) = build_dependency_graphs(&active);

    let tiers = partition_tiers(&forward, &reverse, &active, &TierSeeds::default());

    assert!(tiers.first.members.is_empty());
    assert_eq!(
        tiers.last.members,
        ids(&["tail", "after.tail", "krkr.rocketman"])
    );
    assert_eq!(tiers.middle.members, ids(&["plain"]));
    assert_eq!(
        tiers.tier_of(&PackageId::new("after.tail")),
        Some(Tier::Last)
    );
    assert_eq!(tiers.tier_of(&PackageId::new("unknown")), None);
}

#[test]
fn test_first_tier_wins_over_last() {
    let store: MetadataStore = [
        ModMetadata::new("u1", "brrainz.harmony", "Harmony").with_load_after("shared"),
        ModMetadata::new("u2", "shared", "Shared").with_load_bottom(true),
        ModMetadata::new("u3", "tail", "Tail")
            .with_load_bottom(true)
            .with_load_before("brrainz.harmony"),
    ]
    .into_iter()
    .collect();
    let active = ActiveMods::collect(&all_uuids(&store), &store);
    let (forward, reverse) = build_dependency_graphs(&active);

    let tiers = partition_tiers(&forward, &reverse, &active, &TierSeeds::default());

    assert_eq!(tiers.first.members, ids(&["brrainz.harmony", "shared"]));
    // The reverse closure stops at first-tier members.
    assert_eq!(tiers.last.members, ids(&["tail"]));
    assert!(tiers.middle.members.is_empty());
}

#[test]
fn test_glob_seeds() {
    let store: MetadataStore = [
        ModMetadata::new("u1", "ludeon.rimworld", "Core"),
        ModMetadata::new("u2", "ludeon.rimworld.biotech", "Biotech"),
        ModMetadata::new("u3", "other.mod", "Other"),
    ]
    .into_iter()
    .collect();
    let active = ActiveMods::collect(&all_uuids(&store), &store);
    let (forward, reverse) = build_dependency_graphs(&active);

    let tiers = partition_tiers(&forward, &reverse, &active, &seeds(&["Ludeon.*"], &[]));

    assert_eq!(
        tiers.first.members,
        ids(&["ludeon.rimworld", "ludeon.rimworld.biotech"])
    );
    let order: Vec<_> = tiers
        .iter()
        .map(|(tier, slice)| (tier, slice.members.len()))
        .collect();
    assert_eq!(
        order,
        [(Tier::First, 2), (Tier::Middle, 1), (Tier::Last, 0)]
    );
}

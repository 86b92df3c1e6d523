// rimsort-rs: RimWorld Mod Load-Order Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::BTreeSet;

use super::{ActiveMods, DependencyGraph, build_dependency_graphs};
use crate::metadata::{MetadataStore, ModMetadata, ModUuid, PackageId, RuleEntry};

fn pid(id: &str) -> PackageId {
    PackageId::new(id)
}

fn ids(list: &[&str]) -> BTreeSet<PackageId> {
    list.iter().map(|id| pid(id)).collect()
}

fn uuids(list: &[&str]) -> Vec<ModUuid> {
    list.iter().map(|u| ModUuid::from(*u)).collect()
}

fn sample_store() -> MetadataStore {
    let mut broken = ModMetadata::new("u4", "d", "Delta").with_load_after("A");
    broken
        .load_after
        .push(RuleEntry::Malformed(serde_json::json!({"id": "b"})));
    broken.load_after.push(RuleEntry::new("d", true));

    [
        ModMetadata::new("u1", "A", "Alpha"),
        ModMetadata::new("u2", "b", "Bravo")
            .with_load_after("a")
            .with_load_after("missing.mod"),
        ModMetadata::new("u3", "c", "charlie").with_load_before("B"),
        broken,
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_active_mods_skips_unknown_uuid() {
    let store = sample_store();
    let active = ActiveMods::collect(&uuids(&["u1", "ghost", "u2"]), &store);

    assert_eq!(active.uuids(), uuids(&["u1", "u2"]).as_slice());
    assert_eq!(active.len(), 2);
    assert!(active.contains(&pid("a")));
    assert!(!active.contains(&pid("c")));
}

#[test]
fn test_active_mods_duplicate_package_id_last_wins() {
    let store: MetadataStore = [
        ModMetadata::new("first", "same.mod", "Same"),
        ModMetadata::new("second", "SAME.MOD", "Same (copy)"),
    ]
    .into_iter()
    .collect();
    let active = ActiveMods::collect(&uuids(&["first", "second"]), &store);

    assert_eq!(active.len(), 1);
    assert_eq!(
        active.uuid_of(&pid("same.mod")),
        Some(&ModUuid::from("second"))
    );
    assert_eq!(active.uuids(), [ModUuid::from("second")]);
}

#[test]
fn test_active_mods_uuids_match_len() {
    let store: MetadataStore = [
        ModMetadata::new("u1", "a", "A"),
        ModMetadata::new("u2", "b", "B"),
        ModMetadata::new("u3", "A", "A (copy)"),
    ]
    .into_iter()
    .collect();
    let active = ActiveMods::collect(&uuids(&["u1", "u2", "u2", "u3", "ghost"]), &store);

    assert_eq!(active.len(), 2);
    assert_eq!(active.uuids(), uuids(&["u2", "u3"]).as_slice());
}

#[test]
fn test_sort_by_name_is_case_insensitive() {
    let store = sample_store();
    let active = ActiveMods::collect(&uuids(&["u1", "u2", "u3", "u4"]), &store);

    let mut list = vec![pid("d"), pid("c"), pid("b"), pid("a"), pid("zzz.unknown")];
    active.sort_by_name(&mut list);

    // "charlie" sorts between "Bravo" and "Delta"; unknown ids sort by id.
    assert_eq!(
        list,
        vec![pid("a"), pid("b"), pid("c"), pid("d"), pid("zzz.unknown")]
    );
}

#[test]
fn test_build_dependency_graphs() {
    let store = sample_store();
    let active = ActiveMods::collect(&uuids(&["u1", "u2", "u3", "u4"]), &store);

    let (forward, reverse) = build_dependency_graphs(&active);

    // One key per active mod, even without edges.
    assert_eq!(
        forward.nodes().cloned().collect::<BTreeSet<_>>(),
        ids(&["a", "b", "c", "d"])
    );
    assert_eq!(
        reverse.nodes().cloned().collect::<BTreeSet<_>>(),
        ids(&["a", "b", "c", "d"])
    );

    assert_eq!(forward.dependencies(&pid("b")), Some(&ids(&["a"])));
    assert_eq!(forward.dependencies(&pid("d")), Some(&ids(&["a"])));
    assert_eq!(forward.dependencies(&pid("a")), Some(&BTreeSet::new()));
    assert_eq!(forward.edge_count(), 2);

    assert_eq!(reverse.dependencies(&pid("c")), Some(&ids(&["b"])));
    assert_eq!(reverse.edge_count(), 1);
}

#[test]
fn test_build_filters_inactive_targets() {
    let store = sample_store();
    let active = ActiveMods::collect(&uuids(&["u2", "u3"]), &store);

    let (forward, reverse) = build_dependency_graphs(&active);

    // "a" is not active, so b's rule disappears.
    assert_eq!(forward.dependencies(&pid("b")), Some(&BTreeSet::new()));
    assert_eq!(reverse.dependencies(&pid("c")), Some(&ids(&["b"])));
    assert!(!forward.contains_node(&pid("a")));
}

#[test]
fn test_restricted_to_drops_outside_edges() {
    let graph: DependencyGraph = [
        (pid("a"), pid("b")),
        (pid("a"), pid("c")),
        (pid("b"), pid("c")),
    ]
    .into_iter()
    .collect();

    let sub = graph.restricted_to(&ids(&["a", "b"]));
    assert_eq!(sub.len(), 2);
    assert_eq!(sub.dependencies(&pid("a")), Some(&ids(&["b"])));
    assert_eq!(sub.dependencies(&pid("b")), Some(&BTreeSet::new()));
    // Source untouched.
    assert_eq!(graph.edge_count(), 3);
}

#[test]
fn test_closure_follows_edges_transitively() {
    let graph: DependencyGraph = [
        (pid("a"), pid("b")),
        (pid("b"), pid("c")),
        (pid("c"), pid("d")),
        (pid("x"), pid("a")),
    ]
    .into_iter()
    .collect();

    assert_eq!(graph.closure(&pid("a")), ids(&["b", "c", "d"]));
    assert_eq!(graph.closure(&pid("d")), BTreeSet::new());
    assert_eq!(graph.closure(&pid("unknown")), BTreeSet::new());
}

#[test]
fn test_edge_mutation() {
    let mut graph = DependencyGraph::new();
    graph.add_edge(pid("a"), pid("b"));

    assert!(graph.contains_edge(&pid("a"), &pid("b")));
    assert!(graph.remove_edge(&pid("a"), &pid("b")));
    assert!(!graph.remove_edge(&pid("a"), &pid("b")));
    assert!(graph.contains_node(&pid("a")));
}

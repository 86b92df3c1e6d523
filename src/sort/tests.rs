// rimsort-rs: RimWorld Mod Load-Order Resolver
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::alphabetical::misplaced_dependencies;
use super::{
    OrderingStrategy, SortMethod, SortStrategy, order, order_alphabetical, order_topological,
    topological_layers,
};
use crate::error::{SortError, SortResult};
use crate::graph::{ActiveMods, DependencyGraph};
use crate::metadata::{MetadataStore, ModMetadata, ModUuid, PackageId};

fn pid(id: &str) -> PackageId {
    PackageId::new(id)
}

fn pids(list: &[&str]) -> Vec<PackageId> {
    list.iter().map(|id| pid(id)).collect()
}

/// Store with one instance per `(package_id, name)`; the UUID is `u-<package_id>`.
fn store(mods: &[(&str, &str)]) -> MetadataStore {
    mods.iter()
        .map(|&(id, name)| ModMetadata::new(format!("u-{id}"), id, name))
        .collect()
}

/// Graph with every listed node as a key plus the given edges.
fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> DependencyGraph {
    let mut graph = DependencyGraph::new();
    for node in nodes {
        graph.add_node(pid(node));
    }
    for &(node, before) in edges {
        graph.add_edge(pid(node), pid(before));
    }
    graph
}

fn position(order: &[PackageId], id: &str) -> usize {
    order.iter().position(|p| *p == pid(id)).unwrap()
}

#[test]
fn test_topological_tie_break_by_name() {
    let store = store(&[("z", "Zeta"), ("a", "alpha"), ("m", "Mu")]);
    let active = ActiveMods::collect(&store.uuids(), &store);

    let ordered = order_topological(&graph(&["z", "a", "m"], &[]), &active).unwrap();
    assert_eq!(ordered, pids(&["a", "m", "z"]));
}

#[test]
fn test_topological_layers() {
    let graph = graph(
        &["a", "b", "c", "d"],
        &[("b", "a"), ("c", "a"), ("d", "b"), ("d", "c")],
    );
    let layers = topological_layers(&graph).unwrap();
    assert_eq!(layers, vec![pids(&["a"]), pids(&["b", "c"]), pids(&["d"])]);
}

#[test]
fn test_topological_satisfies_dependencies() {
    let store = store(&[
        ("a", "Zulu"),
        ("b", "Yankee"),
        ("c", "Alpha"),
        ("d", "Bravo"),
    ]);
    let active = ActiveMods::collect(&store.uuids(), &store);
    let graph = graph(&["a", "b", "c", "d"], &[("c", "b"), ("b", "a"), ("d", "a")]);

    let ordered = order_topological(&graph, &active).unwrap();

    assert_eq!(ordered.len(), 4);
    for (node, deps) in graph.iter() {
        for dep in deps {
            assert!(position(&ordered, dep.as_str()) < position(&ordered, node.as_str()));
        }
    }
    // Layer 0 is just "a"; layer 1 holds Bravo(d) and Yankee(b).
    assert_eq!(ordered, pids(&["a", "d", "b", "c"]));
}

#[test]
fn test_topological_implicit_dependency_nodes() {
    let store = store(&[("a", "A")]);
    let active = ActiveMods::collect(&store.uuids(), &store);
    let graph: DependencyGraph = [(pid("a"), pid("ghost"))].into_iter().collect();

    let ordered = order_topological(&graph, &active).unwrap();
    assert_eq!(ordered, pids(&["ghost", "a"]));
}

#[test]
fn test_topological_cycle_detected() {
    let store = store(&[("x", "X"), ("y", "Y"), ("w", "W"), ("free", "Free")]);
    let active = ActiveMods::collect(&store.uuids(), &store);
    let graph = graph(
        &["x", "y", "w", "free"],
        &[("x", "y"), ("y", "x"), ("w", "x")],
    );

    let err = order_topological(&graph, &active).unwrap_err();
    assert!(err.is_cycle());
    insta::assert_snapshot!(err.to_string(), @"dependency cycle detected among 3 mods: w, x, y");
}

#[test]
fn test_alphabetical_forced_insertion() {
    let store = store(&[("a", "Banana"), ("b", "Cherry"), ("c", "Apple")]);
    let active = ActiveMods::collect(&store.uuids(), &store);

    let ordered = order_alphabetical(&graph(&["a", "b", "c"], &[("c", "a")]), &active);
    assert_eq!(ordered, pids(&["a", "c", "b"]));
}

#[test]
fn test_alphabetical_deeper_dependencies_first() {
    let store = store(&[("p", "Apple"), ("q", "Zed"), ("r", "Mango")]);
    let active = ActiveMods::collect(&store.uuids(), &store);
    let graph = graph(&["p", "q", "r"], &[("p", "q"), ("p", "r"), ("r", "q")]);

    let ordered = order_alphabetical(&graph, &active);
    assert_eq!(ordered, pids(&["q", "r", "p"]));
}

#[test]
fn test_alphabetical_leaves_nested_dependency_behind() {
    let store = store(&[
        ("m7", "A"),
        ("m3", "B"),
        ("m6", "C"),
        ("m0", "D"),
        ("m5", "E"),
        ("m2", "F"),
        ("m4", "G"),
        ("m1", "H"),
    ]);
    let active = ActiveMods::collect(&store.uuids(), &store);
    let graph = graph(
        &["m0", "m1", "m2", "m3", "m4", "m5", "m6", "m7"],
        &[
            ("m3", "m1"),
            ("m5", "m3"),
            ("m7", "m4"),
            ("m7", "m5"),
            ("m4", "m0"),
            ("m4", "m1"),
        ],
    );

    // m1 is placed right of the window m3 is inserted into, so m3 stays first
    let ordered = order_alphabetical(&graph, &active);
    assert_eq!(
        ordered,
        pids(&["m3", "m5", "m0", "m1", "m4", "m7", "m6", "m2"])
    );
    assert_eq!(
        misplaced_dependencies(&graph, &ordered),
        [(pid("m3"), pid("m1"))]
    );

    let topological = order_topological(&graph, &active).unwrap();
    assert!(misplaced_dependencies(&graph, &topological).is_empty());
}

#[test]
fn test_alphabetical_without_rules_is_name_order() {
    let store = store(&[("x", "charlie"), ("y", "Alpha"), ("z", "bravo")]);
    let active = ActiveMods::collect(&store.uuids(), &store);

    let ordered = order_alphabetical(&graph(&["x", "y", "z"], &[]), &active);
    assert_eq!(ordered, pids(&["y", "z", "x"]));
}

#[test]
fn test_alphabetical_terminates_on_cycle() {
    let store = store(&[("a", "A"), ("b", "B"), ("c", "C")]);
    let active = ActiveMods::collect(&store.uuids(), &store);
    let graph = graph(&["a", "b", "c"], &[("a", "b"), ("b", "a")]);

    let ordered = order_alphabetical(&graph, &active);
    assert_eq!(ordered, pids(&["b", "a", "c"]));
}

#[test]
fn test_strategy_dispatch() {
    fn reversed(graph: &DependencyGraph, _active: &ActiveMods<'_>) -> SortResult<Vec<PackageId>> {
        let mut ids: Vec<PackageId> = graph.nodes().cloned().collect();
        ids.reverse();
        Ok(ids)
    }
    fn failing(_graph: &DependencyGraph, _active: &ActiveMods<'_>) -> SortResult<Vec<PackageId>> {
        Err(SortError::Strategy {
            strategy: "failing".to_string(),
            message: "always".to_string(),
        })
    }

    let store = store(&[("a", "B"), ("b", "A")]);
    let active = ActiveMods::collect(&store.uuids(), &store);
    let graph = graph(&["a", "b"], &[]);

    assert_eq!(
        SortStrategy::Topological.order(&graph, &active).unwrap(),
        pids(&["b", "a"])
    );
    assert_eq!(
        SortStrategy::Alphabetical.order(&graph, &active).unwrap(),
        pids(&["b", "a"])
    );
    assert_eq!(
        SortStrategy::Custom(reversed).order(&graph, &active).unwrap(),
        pids(&["b", "a"])
    );
    assert!(matches!(
        SortStrategy::Custom(failing).order(&graph, &active),
        Err(SortError::Strategy { .. })
    ));
    assert_eq!(
        format!("{:?}", SortStrategy::Custom(reversed)),
        "Custom(..)"
    );
}

#[test]
fn test_order_maps_to_uuids() {
    fn with_unknown(
        graph: &DependencyGraph,
        _active: &ActiveMods<'_>,
    ) -> SortResult<Vec<PackageId>> {
        let mut ids: Vec<PackageId> = graph.nodes().cloned().collect();
        ids.push(PackageId::new("not.active"));
        Ok(ids)
    }

    let store = store(&[("a", "A"), ("b", "B")]);
    let active = ActiveMods::collect(&store.uuids(), &store);
    let graph = graph(&["a", "b"], &[("a", "b")]);

    let uuids = order(&SortStrategy::Topological, &graph, &active).unwrap();
    assert_eq!(uuids, vec![ModUuid::from("u-b"), ModUuid::from("u-a")]);

    let uuids = order(&SortStrategy::Custom(with_unknown), &graph, &active).unwrap();
    assert_eq!(uuids, vec![ModUuid::from("u-a"), ModUuid::from("u-b")]);
}

#[test]
fn test_sort_method() {
    assert_eq!(
        SortStrategy::from(SortMethod::Alphabetical).name(),
        "alphabetical"
    );
    assert_eq!(SortMethod::default().to_string(), "topological");

    let method: SortMethod = serde_json::from_str(r#""alphabetical""#).unwrap();
    assert_eq!(method, SortMethod::Alphabetical);
}

//! File-backed input and configuration

use std::fs;

use ordo::emit::{render, Format};
use ordo::input::{load_dependency_map, load_reference_graph, InputError};
use ordo::util::config::{load_from, save_to, Config};
use ordo::{sort, sort_levels, Order, Traversal, VisitedSet};

const PACKAGES: &str = r#"{
    "Newtonsoft.Json": ["System.Runtime", "System.Text"],
    "System.Text": ["System.Runtime"],
    "System.Runtime": []
}"#;

#[test]
fn test_sort_loaded_map() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("packages.json");
    fs::write(&path, PACKAGES).unwrap();

    let map = load_dependency_map(&path).unwrap();
    let order = sort(&map).unwrap();
    assert_eq!(order, vec!["System.Runtime", "System.Text", "Newtonsoft.Json"]);

    let text = render(&order, Format::Alias).unwrap();
    assert_eq!(
        text.lines().next(),
        Some("using Runtime = System.Runtime;")
    );

    let levels = sort_levels(&map).unwrap();
    assert_eq!(levels.len(), 3);
}

#[test]
fn test_traverse_loaded_graph_with_every_key_as_root() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("types.json");
    fs::write(
        &path,
        r#"{"Order": ["Customer", "Line"], "Customer": ["Address"], "Invoice": ["Customer"]}"#,
    )
    .unwrap();

    let graph = load_reference_graph(&path).unwrap();
    let roots: Vec<String> = graph.keys().cloned().collect();
    let mut visited = VisitedSet::new();
    let nodes: Vec<String> = Traversal::forest(roots, &graph, Order::PostOrder, &mut visited)
        .map(Result::unwrap)
        .collect();

    assert_eq!(nodes, vec!["Address", "Customer", "Line", "Order", "Invoice"]);
}

#[test]
fn test_null_dependency_is_invalid_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{"A": ["B", null]}"#).unwrap();

    match load_dependency_map(&path) {
        Err(InputError::InvalidNode { entry, .. }) => assert_eq!(entry, "A"),
        other => panic!("expected InvalidNode, got {:?}", other),
    }
}

#[test]
fn test_config_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ordo.ron");

    let mut config = Config::default();
    config.traverse.order = Order::InOrder;
    save_to(&path, &config).unwrap();

    assert_eq!(load_from(&path).unwrap().traverse.order, Order::InOrder);
}

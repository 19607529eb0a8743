//! Graph model unit tests

use crate::graph::{DependencyMap, IndexedGraph, NodeIndex, NodeTable};

#[cfg(test)]
mod node_table_tests {
    use super::*;

    #[test]
    fn test_node_index_display() {
        assert_eq!(format!("{}", NodeIndex(7)), "#7");
    }

    #[test]
    fn test_intern_is_idempotent() {
        let mut table = NodeTable::new();
        let a = table.intern("a");
        let b = table.intern("b");
        assert_eq!(table.intern("a"), a);
        assert_eq!(a, NodeIndex(0));
        assert_eq!(b, NodeIndex(1));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_index_of_and_get() {
        let mut table = NodeTable::new();
        let x = table.intern("x".to_string());
        let y = table.intern("y".to_string());
        assert_eq!(table.index_of("y"), Some(y));
        assert_eq!(table.index_of("z"), None);
        assert_eq!(table.get(x).map(String::as_str), Some("x"));
        assert_eq!(table.get(NodeIndex(9)), None);
    }
}

#[cfg(test)]
mod dependency_map_tests {
    use super::*;

    #[test]
    fn test_empty_map() {
        let map: DependencyMap<&str> = DependencyMap::new();
        assert!(map.is_empty());
        assert_eq!(map.num_nodes(), 0);
        assert_eq!(map.num_edges(), 0);
    }

    #[test]
    fn test_duplicate_edges_collapse() {
        let mut map = DependencyMap::new();
        assert!(map.add_dependency("a", "b"));
        assert!(!map.add_dependency("a", "b"));
        map.insert("a", ["b", "c", "c"]);
        assert_eq!(map.num_edges(), 2);
        assert_eq!(
            map.dependencies(&"a").unwrap().iter().copied().collect::<Vec<_>>(),
            vec!["b", "c"]
        );
    }

    #[test]
    fn test_first_seen_node_order() {
        let map: DependencyMap<_> = [("a", vec!["c", "b"]), ("d", vec!["a"]), ("b", vec![])]
            .into_iter()
            .collect();
        let nodes: Vec<_> = map.nodes().copied().collect();
        assert_eq!(nodes, vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn test_implicit_leaves() {
        let map: DependencyMap<_> = [("a", vec!["b"]), ("c", vec![])].into_iter().collect();
        assert!(map.contains_node(&"b"));
        assert!(!map.contains_key(&"b"));
        let leaves: Vec<_> = map.leaves().copied().collect();
        assert_eq!(leaves, vec!["b", "c"]);
    }

    #[test]
    fn test_reversed_flips_edges_and_keeps_nodes() {
        let map: DependencyMap<_> = [("a", vec!["b", "c"]), ("b", vec!["c"]), ("d", vec![])]
            .into_iter()
            .collect();
        let flipped = map.reversed();
        assert!(flipped.has_edge(&"c", &"a"));
        assert!(flipped.has_edge(&"c", &"b"));
        assert!(flipped.has_edge(&"b", &"a"));
        assert!(!flipped.has_edge(&"a", &"b"));
        assert_eq!(flipped.num_edges(), map.num_edges());
        assert!(flipped.contains_key(&"d"));
        assert_eq!(flipped.reversed().num_edges(), 3);
    }

    #[test]
    fn test_edges_iteration() {
        let map: DependencyMap<_> = [(1, vec![2, 3]), (2, vec![3])].into_iter().collect();
        let edges: Vec<_> = map.edges().map(|(a, b)| (*a, *b)).collect();
        assert_eq!(edges, vec![(1, 2), (1, 3), (2, 3)]);
    }
}

#[cfg(test)]
mod indexed_graph_tests {
    use super::*;

    #[test]
    fn test_build_assigns_first_seen_indices() {
        let map: DependencyMap<_> = [("a", vec!["b"]), ("b", vec!["c"]), ("c", vec![])]
            .into_iter()
            .collect();
        let graph = IndexedGraph::build(&map);
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.index_of(&"a"), Some(NodeIndex(0)));
        assert_eq!(graph.index_of(&"c"), Some(NodeIndex(2)));
        assert_eq!(graph.node(NodeIndex(1)), Some(&"b"));
    }

    #[test]
    fn test_adjacency_both_directions() {
        let map: DependencyMap<_> = [("a", vec!["b", "c"]), ("b", vec!["c"])]
            .into_iter()
            .collect();
        let graph = IndexedGraph::build(&map);
        let a = graph.index_of(&"a").unwrap();
        let b = graph.index_of(&"b").unwrap();
        let c = graph.index_of(&"c").unwrap();
        assert_eq!(graph.dependencies(a), &[b, c]);
        assert_eq!(graph.dependents(c), &[a, b]);
        assert!(graph.dependencies(c).is_empty());
        assert_eq!(graph.resolve(&[c, a]), vec!["c", "a"]);
    }
}

//! Sorter unit tests


use crate::graph::DependencyMap;
use crate::sort::{find_cycle, sort, sort_batch, sort_levels, SortError};

fn map_of(entries: &[(&'static str, &[&'static str])]) -> DependencyMap<&'static str> {
    entries
        .iter()
        .map(|(node, deps)| (*node, deps.iter().copied()))
        .collect()
}

fn position(
    order: &[&str],
    node: &str,
) -> usize {
    order.iter().position(|n| *n == node).unwrap()
}

#[cfg(test)]
mod sort_tests {
    use super::*;

    #[test]
    fn test_chain() {
        let map = map_of(&[("A", &["B"]), ("B", &["C"]), ("C", &[])]);
        assert_eq!(sort(&map).unwrap(), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_empty_map() {
        let map: DependencyMap<&str> = DependencyMap::new();
        assert_eq!(sort(&map).unwrap(), Vec::<&str>::new());
    }

    #[test]
    fn test_two_node_cycle() {
        let map = map_of(&[("A", &["B"]), ("B", &["A"])]);
        let err = sort(&map).unwrap_err();
        let SortError::CycleDetected { cycle } = err;
        assert_eq!(cycle, vec!["A", "B"]);
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let map = map_of(&[("A", &["A"])]);
        assert_eq!(
            sort(&map),
            Err(SortError::CycleDetected { cycle: vec!["A"] })
        );
    }

    #[test]
    fn test_dependency_only_nodes_are_leaves() {
        let map = map_of(&[("app", &["serde", "log"])]);
        let order = sort(&map).unwrap();
        assert_eq!(order, vec!["serde", "log", "app"]);
    }

    #[test]
    fn test_tie_break_follows_first_seen_order() {
        let map = map_of(&[("z", &[]), ("y", &[]), ("x", &[])]);
        assert_eq!(sort(&map).unwrap(), vec!["z", "y", "x"]);

        let map = map_of(&[("x", &[]), ("y", &[]), ("z", &[])]);
        assert_eq!(sort(&map).unwrap(), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_tie_break_among_released_nodes() {
        // d and b both become eligible once a is out; b was seen first.
        let map = map_of(&[("c", &["b", "d"]), ("b", &["a"]), ("d", &["a"]), ("a", &[])]);
        assert_eq!(sort(&map).unwrap(), vec!["a", "b", "d", "c"]);
    }

    #[test]
    fn test_diamond_respects_every_edge() {
        let map = map_of(&[
            ("app", &["http", "db"]),
            ("http", &["io", "log"]),
            ("db", &["io"]),
            ("io", &["log"]),
        ]);
        let order = sort(&map).unwrap();
        assert_eq!(order.len(), 5);
        for (node, dep) in map.edges() {
            assert!(position(&order, dep) < position(&order, node));
        }
    }

    #[test]
    fn test_cycle_deep_inside_a_dag_fails() {
        let map = map_of(&[
            ("app", &["lib"]),
            ("lib", &["core"]),
            ("core", &["util"]),
            ("util", &["core"]),
            ("extra", &[]),
        ]);
        let err = sort(&map).unwrap_err();
        assert_eq!(err.cycle(), &["core", "util"]);
        assert!(err.to_string().contains("cycle"));
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let map = map_of(&[("a", &["c", "b"]), ("b", &["c"]), ("d", &[])]);
        let first = sort(&map).unwrap();
        for _ in 0..5 {
            assert_eq!(sort(&map).unwrap(), first);
        }
    }

    #[test]
    fn test_reversed_reading_puts_dependents_first() {
        let map = map_of(&[("A", &["B"]), ("B", &["C"]), ("C", &[])]);
        let dependents = map.reversed();
        assert_eq!(sort(&dependents).unwrap(), vec!["A", "B", "C"]);
    }
}

#[cfg(test)]
mod levels_tests {
    use super::*;

    #[test]
    fn test_levels_of_diamond() {
        let map = map_of(&[("top", &["left", "right"]), ("left", &["base"]), ("right", &["base"])]);
        assert_eq!(
            sort_levels(&map).unwrap(),
            vec![vec!["base"], vec!["left", "right"], vec!["top"]]
        );
    }

    #[test]
    fn test_levels_flatten_to_a_valid_order() {
        let map = map_of(&[("a", &["b", "c"]), ("b", &["d"]), ("c", &["d"]), ("e", &[])]);
        let flat: Vec<_> = sort_levels(&map).unwrap().into_iter().flatten().collect();
        for (node, dep) in map.edges() {
            assert!(position(&flat, dep) < position(&flat, node));
        }
    }

    #[test]
    fn test_levels_empty_and_cyclic() {
        let empty: DependencyMap<&str> = DependencyMap::new();
        assert!(sort_levels(&empty).unwrap().is_empty());

        let looped = map_of(&[("a", &["b"]), ("b", &["a"])]);
        assert!(sort_levels(&looped).is_err());
    }
}

#[cfg(test)]
mod cycle_tests {
    use super::*;

    #[test]
    fn test_no_cycle_in_dag() {
        let map = map_of(&[("a", &["b", "c"]), ("b", &["c"])]);
        assert_eq!(find_cycle(&map), None);
    }

    #[test]
    fn test_finished_node_revisit_is_not_a_cycle() {
        // c is reached twice, the second time already resolved.
        let map = map_of(&[("a", &["b", "c"]), ("b", &["c"]), ("c", &[])]);
        assert_eq!(find_cycle(&map), None);
        assert!(sort(&map).is_ok());
    }

    #[test]
    fn test_self_loop() {
        let map = map_of(&[("x", &["x"])]);
        assert_eq!(find_cycle(&map), Some(vec!["x"]));
    }

    #[test]
    fn test_cycle_entries_are_edges() {
        let map = map_of(&[("a", &["b"]), ("b", &["c"]), ("c", &["d"]), ("d", &["b"])]);
        let cycle = find_cycle(&map).unwrap();
        assert_eq!(cycle, vec!["b", "c", "d"]);
        for i in 0..cycle.len() {
            let next = cycle[(i + 1) % cycle.len()];
            assert!(map.has_edge(&cycle[i], &next));
        }
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let mut map = DependencyMap::new();
        for i in 0..200_000u32 {
            map.add_dependency(i, i + 1);
        }
        assert_eq!(find_cycle(&map), None);
        map.add_dependency(200_000, 0);
        assert_eq!(find_cycle(&map).map(|c| c.len()), Some(200_001));
    }
}

#[cfg(test)]
mod batch_tests {
    use super::*;

    #[test]
    fn test_batch_keeps_input_order() {
        let maps = vec![
            map_of(&[("A", &["B"]), ("B", &[])]),
            map_of(&[("A", &["B"]), ("B", &["A"])]),
            DependencyMap::new(),
        ];
        let results = sort_batch(&maps);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0], Ok(vec!["B", "A"]));
        assert!(results[1].is_err());
        assert_eq!(results[2], Ok(vec![]));
    }
}

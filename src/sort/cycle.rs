//! Cycle search by three-colour depth-first search
//!
//! White nodes are untouched, gray nodes sit on the active path and black
//! nodes are fully resolved. Reaching a gray node closes a cycle. The search
//! keeps its own stack so graph depth never hits the call stack.

use std::fmt;
use std::hash::Hash;

use tracing::{debug, warn};

use crate::graph::{DependencyMap, IndexedGraph, NodeIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    White,
    Gray,
    Black,
}

/// Find one dependency cycle in `map`.
///
/// The cycle is returned as the nodes along it: every entry depends on the
/// next one and the last entry depends on the first. A self-dependency comes
/// back as a single node. Returns `None` for an acyclic map.
///
/// # Examples
///
/// ```
/// use ordo::graph::DependencyMap;
/// use ordo::sort::find_cycle;
///
/// let map: DependencyMap<_> = [("a", vec!["b"]), ("b", vec!["c"]), ("c", vec!["a"])]
///     .into_iter()
///     .collect();
/// assert_eq!(find_cycle(&map), Some(vec!["a", "b", "c"]));
///
/// let dag: DependencyMap<_> = [("a", vec!["b"])].into_iter().collect();
/// assert_eq!(find_cycle(&dag), None);
/// ```
pub fn find_cycle<N>(map: &DependencyMap<N>) -> Option<Vec<N>>
where
    N: Eq + Hash + Clone + fmt::Debug,
{
    let graph = IndexedGraph::build(map);
    let cycle = search(&graph, graph.indices())?;
    let cycle = graph.resolve(&cycle);
    warn!(length = cycle.len(), "dependency cycle: {:?}", cycle);
    Some(cycle)
}

/// Run the search from each start in turn and return the first cycle found.
pub(crate) fn search<N>(
    graph: &IndexedGraph<'_, N>,
    starts: impl IntoIterator<Item = NodeIndex>,
) -> Option<Vec<NodeIndex>>
where
    N: Eq + Hash,
{
    let mut marks = vec![Mark::White; graph.len()];
    // (node, position of the next dependency to look at)
    let mut stack: Vec<(NodeIndex, usize)> = Vec::new();

    for start in starts {
        if marks[start.0] != Mark::White {
            continue;
        }
        marks[start.0] = Mark::Gray;
        stack.push((start, 0));

        while let Some(frame) = stack.last_mut() {
            let (node, position) = *frame;
            match graph.dependencies(node).get(position) {
                Some(&dep) => {
                    frame.1 += 1;
                    match marks[dep.0] {
                        Mark::White => {
                            marks[dep.0] = Mark::Gray;
                            stack.push((dep, 0));
                        }
                        Mark::Gray => {
                            // Gray nodes are exactly the ones on the stack.
                            let begin = stack.iter().position(|&(n, _)| n == dep).unwrap_or(0);
                            debug!(from = %node, to = %dep, "back edge closes a cycle");
                            return Some(stack[begin..].iter().map(|&(n, _)| n).collect());
                        }
                        Mark::Black => {}
                    }
                }
                None => {
                    marks[node.0] = Mark::Black;
                    stack.pop();
                }
            }
        }
    }

    None
}

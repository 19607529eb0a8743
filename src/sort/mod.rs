//! Topological sorting of dependency maps
//!
//! [`sort`] orders every node referenced by a [`DependencyMap`] so that each
//! dependency precedes its dependents, or fails with
//! [`SortError::CycleDetected`]. It never hands back a partial order.
//!
//! The ordering is Kahn's algorithm over distinct unresolved dependencies.
//! Among nodes that become eligible at the same time the one first seen in
//! the map wins, so results are reproducible for a given key order. When the
//! eligible set runs dry with nodes left over, the three-colour search in
//! [`cycle`] pulls a concrete cycle out of the remainder for the error.

pub mod cycle;

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;
use std::hash::Hash;

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::graph::{DependencyMap, IndexedGraph, NodeIndex};

pub use cycle::find_cycle;

/// Errors produced by the sorter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError<N: fmt::Debug> {
    /// The map contains a cycle. `cycle` lists the nodes along one of them,
    /// each depending on the next and the last on the first.
    #[error("dependency cycle detected: {cycle:?}")]
    CycleDetected { cycle: Vec<N> },
}

impl<N: fmt::Debug> SortError<N> {
    /// The offending cycle.
    pub fn cycle(&self) -> &[N] {
        match self {
            SortError::CycleDetected { cycle } => cycle,
        }
    }
}

/// Sort a dependency map topologically.
///
/// On success every node referenced as key or dependency appears exactly
/// once, and for every edge `A -> B` the dependency `B` comes before `A`.
///
/// # Examples
///
/// ```
/// use ordo::graph::DependencyMap;
/// use ordo::sort::sort;
///
/// let map: DependencyMap<_> = [("A", vec!["B"]), ("B", vec!["C"]), ("C", vec![])]
///     .into_iter()
///     .collect();
/// assert_eq!(sort(&map).unwrap(), vec!["C", "B", "A"]);
///
/// let looped: DependencyMap<_> = [("A", vec!["B"]), ("B", vec!["A"])].into_iter().collect();
/// assert!(sort(&looped).is_err());
/// ```
///
/// # Errors
///
/// Returns `SortError::CycleDetected` if no total order exists, including
/// when a node depends on itself.
pub fn sort<N>(map: &DependencyMap<N>) -> Result<Vec<N>, SortError<N>>
where
    N: Eq + Hash + Clone + fmt::Debug,
{
    let graph = IndexedGraph::build(map);
    debug!(
        nodes = graph.len(),
        edges = map.num_edges(),
        "sorting dependency map"
    );

    let mut pending = pending_counts(&graph);
    let mut ready: BinaryHeap<Reverse<NodeIndex>> = graph
        .indices()
        .filter(|index| pending[index.0] == 0)
        .map(Reverse)
        .collect();

    let mut order = Vec::with_capacity(graph.len());
    while let Some(Reverse(index)) = ready.pop() {
        trace!(node = %index, "resolved");
        order.push(index);
        for &dependent in graph.dependents(index) {
            pending[dependent.0] -= 1;
            if pending[dependent.0] == 0 {
                ready.push(Reverse(dependent));
            }
        }
    }

    if order.len() < graph.len() {
        return Err(cycle_error(&graph, &pending));
    }

    debug!(nodes = order.len(), "dependency map sorted");
    Ok(graph.resolve(&order))
}

/// Sort a dependency map into dependency levels.
///
/// Level 0 holds the nodes without dependencies; a node sits in level `k`
/// when its deepest dependency sits in level `k - 1`. Nodes in one level do
/// not depend on each other and keep first-seen order. Concatenating the
/// levels gives a valid topological order.
///
/// # Examples
///
/// ```
/// use ordo::graph::DependencyMap;
/// use ordo::sort::sort_levels;
///
/// let map: DependencyMap<_> = [("app", vec!["json", "log"]), ("json", vec!["log"])]
///     .into_iter()
///     .collect();
/// assert_eq!(
///     sort_levels(&map).unwrap(),
///     vec![vec!["log"], vec!["json"], vec!["app"]]
/// );
/// ```
///
/// # Errors
///
/// Returns `SortError::CycleDetected` under the same conditions as [`sort`].
pub fn sort_levels<N>(map: &DependencyMap<N>) -> Result<Vec<Vec<N>>, SortError<N>>
where
    N: Eq + Hash + Clone + fmt::Debug,
{
    let graph = IndexedGraph::build(map);
    let mut pending = pending_counts(&graph);
    let mut current: Vec<NodeIndex> = graph
        .indices()
        .filter(|index| pending[index.0] == 0)
        .collect();

    let mut levels = Vec::new();
    let mut resolved = 0;
    while !current.is_empty() {
        resolved += current.len();
        let mut next = Vec::new();
        for &index in &current {
            for &dependent in graph.dependents(index) {
                pending[dependent.0] -= 1;
                if pending[dependent.0] == 0 {
                    next.push(dependent);
                }
            }
        }
        next.sort_unstable();
        levels.push(graph.resolve(&current));
        current = next;
    }

    if resolved < graph.len() {
        return Err(cycle_error(&graph, &pending));
    }

    debug!(levels = levels.len(), nodes = resolved, "dependency levels built");
    Ok(levels)
}

/// Sort many independent maps in parallel.
///
/// Results come back in input order, one per map.
pub fn sort_batch<N>(maps: &[DependencyMap<N>]) -> Vec<Result<Vec<N>, SortError<N>>>
where
    N: Eq + Hash + Clone + fmt::Debug + Send + Sync,
{
    maps.par_iter().map(sort).collect()
}

fn pending_counts<N: Eq + Hash>(graph: &IndexedGraph<'_, N>) -> Vec<usize> {
    graph
        .indices()
        .map(|index| graph.dependencies(index).len())
        .collect()
}

/// Build the error from the nodes Kahn's algorithm could not resolve.
///
/// Every unresolved node still has an unresolved dependency, so a search
/// started from any of them runs into a cycle.
fn cycle_error<N>(
    graph: &IndexedGraph<'_, N>,
    pending: &[usize],
) -> SortError<N>
where
    N: Eq + Hash + Clone + fmt::Debug,
{
    let unresolved = graph.indices().filter(|index| pending[index.0] > 0);
    let cycle = cycle::search(graph, unresolved)
        .map(|cycle| graph.resolve(&cycle))
        .unwrap_or_default();
    warn!(length = cycle.len(), "dependency cycle: {:?}", cycle);
    SortError::CycleDetected { cycle }
}

#[cfg(test)]
mod tests;

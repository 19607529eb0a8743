//! Dependency graph model
//!
//! This module provides the data structures the ordering algorithms consume.
//! Nothing here is persistent: a graph is built from caller data for one call
//! and dropped afterwards.
//!
//! # Architecture
//!
//! - [`DependencyMap`] - node -> set of nodes it directly depends on
//! - [`NodeIndex`](node::NodeIndex) - dense index of an interned node
//! - [`NodeTable`](node::NodeTable) - first-seen interning table
//! - [`IndexedGraph`] - interned adjacency built from a [`DependencyMap`]
//! - [`ReferenceGraph`](reference::ReferenceGraph) - node -> ordered children,
//!   the structural side walked by [`crate::traverse`]
//!
//! # Direction
//!
//! An edge `A -> B` always means "A depends on B". Data held the other way
//! round ("B is depended on by A") must be flipped with
//! [`DependencyMap::reversed`] before sorting.

pub mod node;
pub mod reference;

use std::hash::Hash;

use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;

pub use node::{NodeIndex, NodeTable};
pub use reference::ReferenceGraph;

/// Adjacency list entry. Most real nodes have only a handful of edges.
pub type Adjacency = SmallVec<[NodeIndex; 4]>;

/// Mapping from a node to the set of nodes it directly depends on.
///
/// Keys keep insertion order and every dependency set keeps its own
/// insertion order. Dependencies that never appear as keys are leaves.
///
/// # Examples
///
/// ```
/// use ordo::graph::DependencyMap;
///
/// let mut map = DependencyMap::new();
/// map.add_dependency("app", "log");
/// map.add_dependency("app", "json");
/// map.add_dependency("json", "log");
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.num_nodes(), 3);
/// assert_eq!(map.num_edges(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyMap<N: Eq + Hash> {
    entries: IndexMap<N, IndexSet<N>>,
}

impl<N: Eq + Hash> DependencyMap<N> {
    /// Create an empty map.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Create an empty map with room for `capacity` keys.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Add a node as a key without dependencies.
    ///
    /// Does nothing if the node is already a key.
    pub fn add_node(
        &mut self,
        node: N,
    ) {
        self.entries.entry(node).or_default();
    }

    /// Record that `node` depends on `dependency`.
    ///
    /// Returns `false` if the edge was already present.
    pub fn add_dependency(
        &mut self,
        node: N,
        dependency: N,
    ) -> bool {
        self.entries.entry(node).or_default().insert(dependency)
    }

    /// Insert a key together with its dependencies.
    ///
    /// If the key exists the sets are merged; duplicate edges collapse.
    pub fn insert<I>(
        &mut self,
        node: N,
        dependencies: I,
    ) where
        I: IntoIterator<Item = N>,
    {
        self.entries.entry(node).or_default().extend(dependencies);
    }

    /// Direct dependencies of a key, if it is a key.
    #[inline]
    pub fn dependencies(
        &self,
        node: &N,
    ) -> Option<&IndexSet<N>> {
        self.entries.get(node)
    }

    /// Check if the node is a key of the map.
    #[inline]
    pub fn contains_key(
        &self,
        node: &N,
    ) -> bool {
        self.entries.contains_key(node)
    }

    /// Check if the node is referenced anywhere, as key or dependency.
    pub fn contains_node(
        &self,
        node: &N,
    ) -> bool {
        self.contains_key(node) || self.entries.values().any(|deps| deps.contains(node))
    }

    /// Check if `node -> dependency` is an edge.
    pub fn has_edge(
        &self,
        node: &N,
        dependency: &N,
    ) -> bool {
        self.entries
            .get(node)
            .map(|deps| deps.contains(dependency))
            .unwrap_or(false)
    }

    /// Number of keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map has no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct nodes referenced as key or dependency.
    pub fn num_nodes(&self) -> usize {
        self.nodes().count()
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.entries.values().map(IndexSet::len).sum()
    }

    /// Iterate over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &N> + '_ {
        self.entries.keys()
    }

    /// Iterate over `(key, dependencies)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&N, &IndexSet<N>)> + '_ {
        self.entries.iter()
    }

    /// Iterate over every `(node, dependency)` edge.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N)> + '_ {
        self.entries
            .iter()
            .flat_map(|(node, deps)| deps.iter().map(move |dep| (node, dep)))
    }

    /// Iterate over every distinct node in first-seen order.
    ///
    /// First-seen order visits each key, then that key's dependencies, before
    /// moving on to the next key.
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        let mut seen: IndexSet<&N> = IndexSet::with_capacity(self.entries.len());
        for (node, deps) in &self.entries {
            seen.insert(node);
            seen.extend(deps.iter());
        }
        seen.into_iter()
    }

    /// Nodes without dependencies, in first-seen order.
    pub fn leaves(&self) -> impl Iterator<Item = &N> + '_ {
        self.nodes().filter(move |node| {
            self.entries
                .get(*node)
                .map(IndexSet::is_empty)
                .unwrap_or(true)
        })
    }
}

impl<N: Eq + Hash + Clone> DependencyMap<N> {
    /// Flip every edge.
    ///
    /// The result maps each node to the set of nodes that depend on it.
    /// Every node of `self` becomes a key, in first-seen order, so isolated
    /// nodes survive the round trip.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordo::graph::DependencyMap;
    ///
    /// let map: DependencyMap<_> = [("a", vec!["b"])].into_iter().collect();
    /// let dependents = map.reversed();
    /// assert!(dependents.has_edge(&"b", &"a"));
    /// assert!(dependents.contains_key(&"a"));
    /// ```
    pub fn reversed(&self) -> Self {
        let mut flipped = Self::with_capacity(self.entries.len());
        for node in self.nodes() {
            flipped.add_node(node.clone());
        }
        for (node, dep) in self.edges() {
            flipped.add_dependency(dep.clone(), node.clone());
        }
        flipped
    }
}

impl<N: Eq + Hash> Default for DependencyMap<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, I> FromIterator<(N, I)> for DependencyMap<N>
where
    N: Eq + Hash,
    I: IntoIterator<Item = N>,
{
    fn from_iter<T: IntoIterator<Item = (N, I)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<N, I> Extend<(N, I)> for DependencyMap<N>
where
    N: Eq + Hash,
    I: IntoIterator<Item = N>,
{
    fn extend<T: IntoIterator<Item = (N, I)>>(
        &mut self,
        iter: T,
    ) {
        for (node, deps) in iter {
            self.insert(node, deps);
        }
    }
}

/// Interned view of a [`DependencyMap`].
///
/// Indices follow the map's first-seen order. `dependencies[i]` lists what
/// node `i` depends on and `dependents[i]` lists who depends on node `i`.
#[derive(Debug)]
pub struct IndexedGraph<'a, N> {
    table: NodeTable<&'a N>,
    dependencies: Vec<Adjacency>,
    dependents: Vec<Adjacency>,
}

impl<'a, N: Eq + Hash> IndexedGraph<'a, N> {
    /// Intern every node of `map` and build both adjacency directions.
    pub fn build(map: &'a DependencyMap<N>) -> Self {
        let mut graph = Self {
            table: NodeTable::with_capacity(map.len()),
            dependencies: Vec::with_capacity(map.len()),
            dependents: Vec::with_capacity(map.len()),
        };

        for (node, deps) in map.iter() {
            let from = graph.intern(node);
            for dep in deps {
                let to = graph.intern(dep);
                graph.dependencies[from.0].push(to);
                graph.dependents[to.0].push(from);
            }
        }

        graph
    }

    fn intern(
        &mut self,
        node: &'a N,
    ) -> NodeIndex {
        let index = self.table.intern(node);
        if index.0 == self.dependencies.len() {
            self.dependencies.push(Adjacency::new());
            self.dependents.push(Adjacency::new());
        }
        index
    }

    /// Number of interned nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Check if the graph has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Nodes `index` depends on.
    #[inline]
    pub fn dependencies(
        &self,
        index: NodeIndex,
    ) -> &[NodeIndex] {
        &self.dependencies[index.0]
    }

    /// Nodes that depend on `index`.
    #[inline]
    pub fn dependents(
        &self,
        index: NodeIndex,
    ) -> &[NodeIndex] {
        &self.dependents[index.0]
    }

    /// Index of a node, if it is part of the graph.
    #[inline]
    pub fn index_of(
        &self,
        node: &N,
    ) -> Option<NodeIndex> {
        self.table.index_of(node)
    }

    /// Node behind an index.
    #[inline]
    pub fn node(
        &self,
        index: NodeIndex,
    ) -> Option<&'a N> {
        self.table.get(index).copied()
    }

    /// All indices in first-seen order.
    pub fn indices(&self) -> impl Iterator<Item = NodeIndex> {
        (0..self.table.len()).map(NodeIndex)
    }
}

impl<N: Eq + Hash + Clone> IndexedGraph<'_, N> {
    /// Resolve indices back to owned nodes.
    pub fn resolve(
        &self,
        indices: &[NodeIndex],
    ) -> Vec<N> {
        indices
            .iter()
            .filter_map(|&index| self.node(index).cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests;

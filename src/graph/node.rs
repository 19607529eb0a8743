//! Node indices for dependency graphs
//!
//! Nodes handed in by callers are opaque. Algorithms intern them into a
//! [`NodeTable`] and work on dense [`NodeIndex`] values, which also encode
//! first-seen order.

use std::fmt;
use std::hash::Hash;

use indexmap::{Equivalent, IndexSet};

/// Dense index of an interned node.
///
/// Indices are assigned in first-seen order, so comparing two indices
/// compares when the nodes were first encountered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex(pub usize);

impl NodeIndex {
    /// Create a new NodeIndex with the given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordo::graph::NodeIndex;
    ///
    /// let index = NodeIndex::new(42);
    /// assert_eq!(index.value(), 42);
    /// ```
    #[inline]
    pub fn new(value: usize) -> Self {
        NodeIndex(value)
    }

    /// Returns the inner value of the index.
    #[inline]
    pub fn value(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Interning table mapping nodes to [`NodeIndex`] values.
///
/// Interning the same node twice returns the same index.
#[derive(Debug, Clone)]
pub struct NodeTable<N> {
    nodes: IndexSet<N>,
}

impl<N: Eq + Hash> NodeTable<N> {
    /// Create an empty table.
    #[inline]
    pub fn new() -> Self {
        Self {
            nodes: IndexSet::new(),
        }
    }

    /// Create an empty table with room for `capacity` nodes.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: IndexSet::with_capacity(capacity),
        }
    }

    /// Intern a node, returning its index.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordo::graph::{NodeIndex, NodeTable};
    ///
    /// let mut table = NodeTable::new();
    /// let a = table.intern("a");
    /// let b = table.intern("b");
    /// assert_eq!(table.intern("a"), a);
    /// assert_eq!(b, NodeIndex(1));
    /// ```
    #[inline]
    pub fn intern(
        &mut self,
        node: N,
    ) -> NodeIndex {
        let (index, _) = self.nodes.insert_full(node);
        NodeIndex(index)
    }

    /// Look up the index of an already interned node.
    #[inline]
    pub fn index_of<Q>(
        &self,
        node: &Q,
    ) -> Option<NodeIndex>
    where
        Q: ?Sized + Hash + Equivalent<N>,
    {
        self.nodes.get_index_of(node).map(NodeIndex)
    }

    /// Get the node behind an index.
    #[inline]
    pub fn get(
        &self,
        index: NodeIndex,
    ) -> Option<&N> {
        self.nodes.get_index(index.0)
    }

    /// Number of interned nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the table is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<N: Eq + Hash> Default for NodeTable<N> {
    fn default() -> Self {
        Self::new()
    }
}

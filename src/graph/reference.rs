//! Reference graphs
//!
//! A reference graph records, for each node, the nodes it structurally
//! points at (a type's property types, say) in declaration order. Unlike a
//! [`DependencyMap`](super::DependencyMap) the child lists are sequences:
//! a node that references the same child twice keeps both entries, because
//! the in-order split counts them.

use std::convert::Infallible;
use std::hash::Hash;

use indexmap::IndexMap;

use crate::traverse::Expand;

/// Node -> ordered children.
///
/// Nodes never added as keys have no children.
///
/// # Examples
///
/// ```
/// use ordo::graph::ReferenceGraph;
///
/// let mut graph = ReferenceGraph::new();
/// graph.add_reference("Order", "Customer");
/// graph.add_reference("Order", "Money");
/// assert_eq!(graph.children(&"Order"), &["Customer", "Money"]);
/// assert!(graph.children(&"Money").is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceGraph<N: Eq + Hash> {
    children: IndexMap<N, Vec<N>>,
}

impl<N: Eq + Hash> ReferenceGraph<N> {
    /// Create an empty graph.
    #[inline]
    pub fn new() -> Self {
        Self {
            children: IndexMap::new(),
        }
    }

    /// Add a node as a key without children.
    pub fn add_node(
        &mut self,
        node: N,
    ) {
        self.children.entry(node).or_default();
    }

    /// Append `child` to the children of `node`.
    pub fn add_reference(
        &mut self,
        node: N,
        child: N,
    ) {
        self.children.entry(node).or_default().push(child);
    }

    /// Children of a node in declaration order.
    pub fn children(
        &self,
        node: &N,
    ) -> &[N] {
        self.children.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check if the node is a key.
    #[inline]
    pub fn contains_key(
        &self,
        node: &N,
    ) -> bool {
        self.children.contains_key(node)
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &N> + '_ {
        self.children.keys()
    }

    /// Number of keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Check if the graph has no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<N: Eq + Hash> Default for ReferenceGraph<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, I> FromIterator<(N, I)> for ReferenceGraph<N>
where
    N: Eq + Hash,
    I: IntoIterator<Item = N>,
{
    fn from_iter<T: IntoIterator<Item = (N, I)>>(iter: T) -> Self {
        let mut graph = Self::new();
        for (node, children) in iter {
            graph.children.entry(node).or_default().extend(children);
        }
        graph
    }
}

impl<N: Eq + Hash + Clone> Expand<N> for &ReferenceGraph<N> {
    type Error = Infallible;

    fn expand(
        &mut self,
        node: &N,
    ) -> Result<Vec<N>, Infallible> {
        Ok(self.children(node).to_vec())
    }
}

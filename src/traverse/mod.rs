//! Structural traversal of reference graphs
//!
//! Walks the graph reachable from one or more roots and produces each node
//! at most once, lazily, in one of two [`Order`]s. Children come from a
//! caller-supplied [`Expand`]; identity comes from the node itself or from a
//! caller-supplied key function.
//!
//! A node is recorded in the [`VisitedSet`] the moment it is first reached,
//! before its children are expanded. Reaching a recorded node again yields
//! nothing, which is what makes cyclic graphs terminate. It also means the
//! edge behind the second reach is dropped: under cycles a parent may come
//! out before one of its children. This is a dedup walk, not a sort; use
//! [`crate::sort`] when every dependency must precede its dependent.
//!
//! # Example
//!
//! ```
//! use ordo::graph::ReferenceGraph;
//! use ordo::traverse::{Order, Traversal, VisitedSet};
//!
//! let graph: ReferenceGraph<_> = [("R", vec!["X", "Y"]), ("X", vec!["Z"])]
//!     .into_iter()
//!     .collect();
//! let mut visited = VisitedSet::new();
//! let order: Vec<_> = Traversal::new("R", &graph, Order::PostOrder, &mut visited)
//!     .map(Result::unwrap)
//!     .collect();
//! assert_eq!(order, vec!["Z", "X", "Y", "R"]);
//! ```

pub mod expand;
pub mod visited;

use std::borrow::BorrowMut;
use std::convert::Infallible;
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

pub use expand::{from_fn, try_from_fn, Expand, FromFn, TryFromFn};
pub use visited::VisitedSet;

/// Output order of a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Order {
    /// Every child, recursively, before the node itself.
    #[default]
    #[serde(rename = "post")]
    PostOrder,
    /// The first half of the children (rounded down), then the node, then
    /// the rest. For balanced presentation only; gives no dependency
    /// guarantee.
    #[serde(rename = "in")]
    InOrder,
}

impl Order {
    /// Number of children traversed before the node is produced.
    #[inline]
    pub fn split(
        self,
        num_children: usize,
    ) -> usize {
        match self {
            Order::PostOrder => num_children,
            Order::InOrder => num_children / 2,
        }
    }
}

impl fmt::Display for Order {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Order::PostOrder => write!(f, "post"),
            Order::InOrder => write!(f, "in"),
        }
    }
}

impl FromStr for Order {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "post" | "post-order" | "postorder" => Ok(Order::PostOrder),
            "in" | "in-order" | "inorder" => Ok(Order::InOrder),
            other => Err(format!("unknown traversal order: {}", other)),
        }
    }
}

/// One node on the descent path.
#[derive(Debug)]
struct Frame<N> {
    /// `None` once produced
    node: Option<N>,
    children: std::vec::IntoIter<N>,
    taken: usize,
    split: usize,
}

/// Lazy traversal over one or more roots.
///
/// Yields `Ok(node)` for each produced node. If the expand operation fails
/// the error is yielded unchanged and the iterator ends there.
///
/// `V` is where the visited set lives: `&mut VisitedSet<K>` to share it with
/// other traversals of the same run, or an owned `VisitedSet<K>` that can be
/// taken back with [`Traversal::into_visited`].
pub struct Traversal<N, K, X, KF, V> {
    roots: std::vec::IntoIter<N>,
    expand: X,
    key: KF,
    order: Order,
    visited: V,
    stack: Vec<Frame<N>>,
    done: bool,
    _key: PhantomData<fn() -> K>,
}

impl<N, X, V> Traversal<N, N, X, fn(&N) -> N, V>
where
    N: Clone + Eq + Hash,
    X: Expand<N>,
    V: BorrowMut<VisitedSet<N>>,
{
    /// Traverse from a single root, identifying nodes by value.
    pub fn new(
        root: N,
        expand: X,
        order: Order,
        visited: V,
    ) -> Self {
        Self::forest([root], expand, order, visited)
    }

    /// Traverse several roots in order, sharing one visited set.
    ///
    /// A node produced under an earlier root is skipped under later ones.
    pub fn forest<R>(
        roots: R,
        expand: X,
        order: Order,
        visited: V,
    ) -> Self
    where
        R: IntoIterator<Item = N>,
    {
        Traversal::with_key(roots, expand, N::clone as fn(&N) -> N, order, visited)
    }
}

impl<N, K, X, KF, V> Traversal<N, K, X, KF, V>
where
    K: Eq + Hash,
    X: Expand<N>,
    KF: FnMut(&N) -> K,
    V: BorrowMut<VisitedSet<K>>,
{
    /// Traverse several roots, identifying nodes by `key` instead of by
    /// value.
    ///
    /// Use this for nodes compared by identity, such as handles whose
    /// equality would be too loose or too expensive.
    pub fn with_key<R>(
        roots: R,
        expand: X,
        key: KF,
        order: Order,
        visited: V,
    ) -> Self
    where
        R: IntoIterator<Item = N>,
    {
        let roots: Vec<N> = roots.into_iter().collect();
        debug!(roots = roots.len(), %order, "starting traversal");
        Self {
            roots: roots.into_iter(),
            expand,
            key,
            order,
            visited,
            stack: Vec::new(),
            done: false,
            _key: PhantomData,
        }
    }

    /// Current descent depth.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Stop and hand back the visited set.
    pub fn into_visited(self) -> V {
        self.visited
    }

    /// Descend into `node` unless it was already reached.
    fn enter(
        &mut self,
        node: N,
    ) -> Result<(), X::Error> {
        let key = (self.key)(&node);
        if !BorrowMut::<VisitedSet<K>>::borrow_mut(&mut self.visited).insert(key) {
            trace!(depth = self.depth(), "skipping visited node");
            return Ok(());
        }

        let children = self.expand.expand(&node)?;
        let split = self.order.split(children.len());
        trace!(depth = self.depth(), children = children.len(), split, "entering node");
        self.stack.push(Frame {
            node: Some(node),
            children: children.into_iter(),
            taken: 0,
            split,
        });
        Ok(())
    }

    fn fail(&mut self) {
        debug!(depth = self.depth(), "expand failed, traversal aborted");
        self.done = true;
        self.stack.clear();
    }
}

impl<N, K, X, KF, V> Iterator for Traversal<N, K, X, KF, V>
where
    K: Eq + Hash,
    X: Expand<N>,
    KF: FnMut(&N) -> K,
    V: BorrowMut<VisitedSet<K>>,
{
    type Item = Result<N, X::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let next_child = match self.stack.last_mut() {
                Some(frame) => {
                    if frame.taken == frame.split {
                        if let Some(node) = frame.node.take() {
                            return Some(Ok(node));
                        }
                    }
                    match frame.children.next() {
                        Some(child) => {
                            frame.taken += 1;
                            child
                        }
                        None => {
                            self.stack.pop();
                            continue;
                        }
                    }
                }
                None => match self.roots.next() {
                    Some(root) => root,
                    None => {
                        self.done = true;
                        return None;
                    }
                },
            };

            if let Err(err) = self.enter(next_child) {
                self.fail();
                return Some(Err(err));
            }
        }
    }
}

impl<N, K, X, KF, V> FusedIterator for Traversal<N, K, X, KF, V>
where
    K: Eq + Hash,
    X: Expand<N>,
    KF: FnMut(&N) -> K,
    V: BorrowMut<VisitedSet<K>>,
{
}

impl<N, K, X, KF, V> fmt::Debug for Traversal<N, K, X, KF, V> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Traversal")
            .field("order", &self.order)
            .field("depth", &self.stack.len())
            .field("pending_roots", &self.roots.len())
            .field("done", &self.done)
            .finish()
    }
}

/// Post-order walk from `root` with an infallible children function and a
/// private visited set.
///
/// # Examples
///
/// ```
/// use ordo::traverse::post_order;
///
/// let order: Vec<u32> = post_order(1, |n: &u32| match *n {
///     1 => vec![2, 3],
///     2 => vec![4],
///     _ => vec![],
/// })
/// .collect();
/// assert_eq!(order, vec![4, 2, 3, 1]);
/// ```
pub fn post_order<N, F, I>(
    root: N,
    children: F,
) -> impl Iterator<Item = N>
where
    N: Clone + Eq + Hash,
    F: FnMut(&N) -> I,
    I: IntoIterator<Item = N>,
{
    infallible(Traversal::new(
        root,
        from_fn(children),
        Order::PostOrder,
        VisitedSet::new(),
    ))
}

/// In-order (split) walk from `root` with an infallible children function
/// and a private visited set.
pub fn in_order<N, F, I>(
    root: N,
    children: F,
) -> impl Iterator<Item = N>
where
    N: Clone + Eq + Hash,
    F: FnMut(&N) -> I,
    I: IntoIterator<Item = N>,
{
    infallible(Traversal::new(
        root,
        from_fn(children),
        Order::InOrder,
        VisitedSet::new(),
    ))
}

/// Strip the `Result` from a traversal that cannot fail.
pub fn infallible<N, T>(traversal: T) -> impl Iterator<Item = N>
where
    T: Iterator<Item = Result<N, Infallible>>,
{
    traversal.map(|item| match item {
        Ok(node) => node,
        Err(never) => match never {},
    })
}

//! ordo: dependency ordering and structural traversal
//!
//! Two independent engines over caller-supplied graphs:
//!
//! - [`sort`]: topological order of a [`DependencyMap`], failing with the
//!   offending cycle instead of returning a truncated order.
//! - [`Traversal`]: a lazy, deduplicated post-order or in-order walk of a
//!   reference graph, with an explicit [`VisitedSet`] that several roots can
//!   share.
//!
//! # Example
//!
//! ```
//! use ordo::{sort, DependencyMap};
//!
//! let map: DependencyMap<_> = [("A", vec!["B"]), ("B", vec!["C"]), ("C", vec![])]
//!     .into_iter()
//!     .collect();
//! assert_eq!(sort(&map).unwrap(), vec!["C", "B", "A"]);
//! ```

#![warn(rust_2018_idioms)]

pub mod emit;
pub mod graph;
pub mod input;
pub mod sort;
pub mod traverse;

// Utility modules
pub mod util;

// Re-exports
pub use graph::{DependencyMap, ReferenceGraph};
pub use sort::{find_cycle, sort, sort_batch, sort_levels, SortError};
pub use traverse::{in_order, post_order, Expand, Order, Traversal, VisitedSet};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tool name
pub const NAME: &str = "ordo";

//! JSON loaders for dependency maps and reference graphs
//!
//! Both files share one shape, an object from node name to a list of names:
//!
//! ```text
//! {
//!     "App":  ["Http", "Json"],
//!     "Http": ["Log"]
//! }
//! ```
//!
//! Key order and list order are kept as written; they feed the sorter's
//! tie-break and the traversal's child order.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

use crate::graph::{DependencyMap, ReferenceGraph};

/// Input errors
#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid node in entry {entry:?}: {reason}")]
    InvalidNode { entry: String, reason: &'static str },
}

type RawEntries = IndexMap<String, Vec<Option<String>>>;

/// Parse a dependency map from JSON text.
///
/// # Examples
///
/// ```
/// use ordo::input::parse_dependency_map;
///
/// let map = parse_dependency_map(r#"{"A": ["B"], "B": []}"#).unwrap();
/// assert_eq!(map.len(), 2);
/// assert!(map.has_edge(&"A".to_string(), &"B".to_string()));
/// ```
pub fn parse_dependency_map(json: &str) -> Result<DependencyMap<String>, InputError> {
    let mut map = DependencyMap::new();
    for (node, dependencies) in checked_entries(json)? {
        map.insert(node, dependencies);
    }
    debug!(nodes = map.num_nodes(), edges = map.num_edges(), "parsed dependency map");
    Ok(map)
}

/// Parse a reference graph from JSON text.
///
/// Repeated children are kept; they count toward the in-order split.
pub fn parse_reference_graph(json: &str) -> Result<ReferenceGraph<String>, InputError> {
    let graph: ReferenceGraph<String> = checked_entries(json)?.into_iter().collect();
    debug!(keys = graph.len(), "parsed reference graph");
    Ok(graph)
}

/// Load a dependency map from a JSON file.
pub fn load_dependency_map(path: &Path) -> Result<DependencyMap<String>, InputError> {
    parse_dependency_map(&read(path)?)
}

/// Load a reference graph from a JSON file.
pub fn load_reference_graph(path: &Path) -> Result<ReferenceGraph<String>, InputError> {
    parse_reference_graph(&read(path)?)
}

fn read(path: &Path) -> Result<String, InputError> {
    fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode and reject null or empty names.
fn checked_entries(json: &str) -> Result<Vec<(String, Vec<String>)>, InputError> {
    let raw: RawEntries = serde_json::from_str(json)?;
    let mut entries = Vec::with_capacity(raw.len());
    for (entry, names) in raw {
        if entry.is_empty() {
            return Err(InputError::InvalidNode {
                entry,
                reason: "empty key",
            });
        }
        let mut checked = Vec::with_capacity(names.len());
        for name in names {
            match name {
                Some(name) if !name.is_empty() => checked.push(name),
                Some(_) => {
                    return Err(InputError::InvalidNode {
                        entry,
                        reason: "empty name",
                    })
                }
                None => {
                    return Err(InputError::InvalidNode {
                        entry,
                        reason: "null name",
                    })
                }
            }
        }
        entries.push((entry, checked));
    }
    Ok(entries)
}

//! Walking a type-metadata model keyed by identity
//!
//! Descriptors are handles into a registry; equality on the handle would be
//! fine here, but the registry can also hand out distinct handles for the
//! same type, so traversal keys on the type id.

use std::collections::HashMap;
use std::fmt;

use ordo::emit::{render, Format};
use ordo::traverse::try_from_fn;
use ordo::{Order, Traversal, VisitedSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TypeHandle {
    id: u32,
    generation: u32,
}

#[derive(Debug, PartialEq, Eq)]
struct MetadataError(u32);

impl fmt::Display for MetadataError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "no metadata for type {}", self.0)
    }
}

struct Registry {
    names: HashMap<u32, &'static str>,
    properties: HashMap<u32, Vec<u32>>,
    lookups: u32,
}

impl Registry {
    fn new() -> Self {
        let names = HashMap::from([
            (1, "Shop.Order"),
            (2, "Shop.Customer"),
            (3, "System.String"),
            (4, "Shop.Address"),
        ]);
        let properties = HashMap::from([(1, vec![2, 3]), (2, vec![4, 3, 1]), (4, vec![3])]);
        Self {
            names,
            properties,
            lookups: 0,
        }
    }

    /// Hands out a fresh handle per lookup.
    fn properties(
        &mut self,
        ty: &TypeHandle,
    ) -> Result<Vec<TypeHandle>, MetadataError> {
        if !self.names.contains_key(&ty.id) {
            return Err(MetadataError(ty.id));
        }
        self.lookups += 1;
        let generation = self.lookups;
        Ok(self
            .properties
            .get(&ty.id)
            .map(|ids| ids.iter().map(|&id| TypeHandle { id, generation }).collect())
            .unwrap_or_default())
    }
}

fn root(id: u32) -> TypeHandle {
    TypeHandle { id, generation: 0 }
}

#[test]
fn test_identity_keyed_walk_emits_aliases() {
    let mut registry = Registry::new();
    let mut visited = VisitedSet::new();

    let handles: Vec<TypeHandle> = Traversal::with_key(
        [root(1)],
        try_from_fn(|ty: &TypeHandle| registry.properties(ty)),
        |ty: &TypeHandle| ty.id,
        Order::PostOrder,
        &mut visited,
    )
    .collect::<Result<_, _>>()
    .unwrap();

    let ids: Vec<u32> = handles.iter().map(|h| h.id).collect();
    // Customer -> Order is a back edge and gets dropped.
    assert_eq!(ids, vec![3, 4, 2, 1]);
    assert_eq!(visited.len(), 4);
    assert!(handles.iter().any(|h| h.generation > 1));

    let registry = Registry::new();
    let names: Vec<&str> = handles.iter().map(|h| registry.names[&h.id]).collect();
    let text = render(&names, Format::Alias).unwrap();
    assert_eq!(
        text,
        "using String = System.String;\n\
         using Address = Shop.Address;\n\
         using Customer = Shop.Customer;\n\
         using Order = Shop.Order;\n"
    );
}

#[test]
fn test_missing_metadata_propagates() {
    let mut registry = Registry::new();
    registry.names.remove(&4);

    let items: Vec<_> = Traversal::with_key(
        [root(1)],
        try_from_fn(|ty: &TypeHandle| registry.properties(ty)),
        |ty: &TypeHandle| ty.id,
        Order::PostOrder,
        VisitedSet::new(),
    )
    .collect();

    // Order and Customer are still open when Address fails.
    assert_eq!(items, vec![Err(MetadataError(4))]);
}

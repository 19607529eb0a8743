//! Visited set shared across the roots of one traversal run

use std::hash::Hash;

use hashbrown::HashSet;

/// Identities already reached during one logical traversal run.
///
/// Create one per run. Passing the same set to several traversals makes
/// them deduplicate against each other; a fresh set starts over.
#[derive(Debug, Clone)]
pub struct VisitedSet<K> {
    seen: HashSet<K>,
}

impl<K: Eq + Hash> VisitedSet<K> {
    /// Create an empty set.
    #[inline]
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }

    /// Record an identity. Returns `false` if it was already present.
    #[inline]
    pub fn insert(
        &mut self,
        key: K,
    ) -> bool {
        self.seen.insert(key)
    }

    /// Check if an identity was recorded.
    #[inline]
    pub fn contains(
        &self,
        key: &K,
    ) -> bool {
        self.seen.contains(key)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Iterate over recorded identities in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &K> + '_ {
        self.seen.iter()
    }
}

impl<K: Eq + Hash> Default for VisitedSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> FromIterator<K> for VisitedSet<K> {
    fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> Self {
        Self {
            seen: iter.into_iter().collect(),
        }
    }
}

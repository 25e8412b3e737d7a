//! The map type backing every nested mapping.
//!
//! By default keys are kept in sorted order (`BTreeMap`). Enabling the
//! `indexmap` feature switches to an `IndexMap`, in which case keys keep
//! the order they were first inserted in, and serialization follows it.

#[cfg(not(feature = "indexmap"))]
pub use std::collections::btree_map::{BTreeMap as Map, IntoIter};

#[cfg(feature = "indexmap")]
pub use indexmap::map::{IndexMap as Map, IntoIter};

/// Removes `key` from `map`, returning the value if it was present.
///
/// For `IndexMap` this preserves the relative order of the remaining keys.
#[cfg(not(feature = "indexmap"))]
pub(crate) fn remove<V>(map: &mut Map<String, V>, key: &str) -> Option<V> {
    map.remove(key)
}

#[cfg(feature = "indexmap")]
pub(crate) fn remove<V>(map: &mut Map<String, V>, key: &str) -> Option<V> {
    map.shift_remove(key)
}

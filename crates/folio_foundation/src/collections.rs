//! Persistent attribute maps with structural sharing.
//!
//! A thin wrapper around `im::OrdMap`. Schema contexts snapshot the attributes
//! of every ancestor on each query, so cloning must be O(1); key order is
//! sorted so iteration (and therefore mutation order) is deterministic.

use std::fmt;
use std::iter::FromIterator;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::value::AttributeValue;

/// Persistent, sorted attribute map.
///
/// Cloning is O(1). Modifications return a new map sharing structure
/// with the map they came from.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Attributes(im::OrdMap<Arc<str>, AttributeValue>);

impl Attributes {
    /// Creates an empty attribute map.
    #[must_use]
    pub fn new() -> Self {
        Self(im::OrdMap::new())
    }

    /// Returns the number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets an attribute value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.0.get(key)
    }

    /// Returns true if the key is set.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns a new map with the attribute set.
    #[must_use]
    pub fn insert(&self, key: &str, value: impl Into<AttributeValue>) -> Self {
        Self(self.0.update(key.into(), value.into()))
    }

    /// Returns a new map without the given key.
    #[must_use]
    pub fn remove(&self, key: &str) -> Self {
        Self(self.0.without(key))
    }

    /// Returns an iterator over keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(AsRef::as_ref)
    }

    /// Returns an iterator over key-value pairs in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.0.iter().map(|(k, v)| (k.as_ref(), v))
    }
}

impl fmt::Debug for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: AsRef<str>, V: Into<AttributeValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (Arc::from(k.as_ref()), v.into()))
                .collect(),
        )
    }
}

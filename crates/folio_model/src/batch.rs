//! Recorded document mutations.
//!
//! Schema clean-up passes never touch a document directly. They write through
//! a [`MutationSink`], which is either a [`Batch`] (record now, apply later)
//! or the [`Document`](crate::Document) itself (apply immediately).

use folio_foundation::NodeId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A writer that accepts attribute removals.
pub trait MutationSink {
    /// Removes `key` from the attributes of `node`.
    fn remove_attribute(&mut self, node: NodeId, key: &str);
}

/// A single recorded mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Operation {
    /// Remove an attribute from a node.
    RemoveAttribute {
        /// Target node.
        node: NodeId,
        /// Attribute key.
        key: String,
    },
}

/// An ordered list of recorded operations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Batch {
    operations: Vec<Operation>,
}

impl Batch {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of recorded operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Iterates over the operations in recording order.
    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter()
    }

    /// Returns the recorded operations.
    #[must_use]
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Consumes the batch, returning its operations.
    #[must_use]
    pub fn into_operations(self) -> Vec<Operation> {
        self.operations
    }
}

impl MutationSink for Batch {
    fn remove_attribute(&mut self, node: NodeId, key: &str) {
        self.operations.push(Operation::RemoveAttribute {
            node,
            key: key.to_string(),
        });
    }
}

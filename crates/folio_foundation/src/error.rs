//! Error types for the Folio system.
//!
//! Uses `thiserror` for ergonomic error definition. Schema queries never fail;
//! only registration and document construction return these errors.

use thiserror::Error;

use crate::node::NodeId;

/// Result alias used throughout Folio.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Folio operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind }
    }

    /// Creates an error for an item name that was registered twice.
    #[must_use]
    pub fn duplicate_registration(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateRegistration(name.into()))
    }

    /// Creates an error for extending an item that was never registered.
    #[must_use]
    pub fn unknown_item_extended(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownItemExtended(name.into()))
    }

    /// Creates an error for a node that must be an element but is text.
    #[must_use]
    pub fn not_an_element(node: NodeId) -> Self {
        Self::new(ErrorKind::NotAnElement(node))
    }

    /// Creates an error for inserting a node that already has a parent.
    #[must_use]
    pub fn already_attached(node: NodeId) -> Self {
        Self::new(ErrorKind::AlreadyAttached(node))
    }

    /// Creates an error for inserting a node into its own subtree.
    #[must_use]
    pub fn ancestor_insertion(node: NodeId) -> Self {
        Self::new(ErrorKind::AncestorInsertion(node))
    }

    /// Creates an error for a path that does not resolve inside its root.
    #[must_use]
    pub fn invalid_position(path: &[usize]) -> Self {
        Self::new(ErrorKind::InvalidPosition(path.to_vec()))
    }

    /// Creates a fixture markup error.
    #[must_use]
    pub fn invalid_markup(message: impl Into<String>, offset: usize) -> Self {
        Self::new(ErrorKind::InvalidMarkup {
            message: message.into(),
            offset,
        })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// An item with this name is already registered.
    #[error("cannot register item twice: {0}")]
    DuplicateRegistration(String),

    /// The item being extended has not been registered.
    #[error("cannot extend missing item: {0}")]
    UnknownItemExtended(String),

    /// The node is a text node where an element is required.
    #[error("{0} is not an element")]
    NotAnElement(NodeId),

    /// The node already has a parent.
    #[error("{0} is already attached to a parent")]
    AlreadyAttached(NodeId),

    /// The node would become a child of one of its own descendants.
    #[error("cannot insert {0} into its own subtree")]
    AncestorInsertion(NodeId),

    /// A position path does not resolve inside its root.
    #[error("invalid position path: {0:?}")]
    InvalidPosition(Vec<usize>),

    /// Fixture markup could not be parsed.
    #[error("invalid markup at byte {offset}: {message}")]
    InvalidMarkup {
        /// Description of the problem.
        message: String,
        /// Byte offset into the markup source.
        offset: usize,
    },
}

//! Document tree, positions, ranges, selections, and mutation batches for Folio.
//!
//! This crate provides the read-only tree the schema validates against:
//! - [`Document`] - Arena tree of elements and text nodes
//! - [`Position`], [`Range`], [`Selection`] - Offset-based locations
//! - [`TreeWalker`] - Left-to-right traversal of a range
//! - [`Batch`] - Recorded mutations behind the [`MutationSink`] trait
//! - [`markup`] - Fixture markup parsing and stringification

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod batch;
pub mod document;
pub mod item;
pub mod markup;
pub mod position;
pub mod walker;

pub use batch::{Batch, MutationSink, Operation};
pub use document::{Document, TEXT_NAME};
pub use item::{Item, TextProxy};
pub use position::{Position, Range, Selection};
pub use walker::{TreeWalker, WalkerStep, WalkerValue};

pub use folio_foundation::{AttributeValue, Attributes, NodeId};

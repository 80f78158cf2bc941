//! Core types, attribute values, and errors for Folio.
//!
//! This crate provides:
//! - [`AttributeValue`] - Values stored under attribute keys on document nodes
//! - [`Attributes`] - Persistent attribute maps with structural sharing
//! - [`NodeId`] - Arena identifiers for document nodes
//! - [`Error`] - Error kinds shared by the model and schema layers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod error;
pub mod node;
pub mod value;

pub use collections::Attributes;
pub use error::{Error, ErrorKind, Result};
pub use node::NodeId;
pub use value::AttributeValue;

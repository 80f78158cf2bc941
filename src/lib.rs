//! Folio - Schema validation for a rich-text document model
//!
//! This crate re-exports all layers of the Folio system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: folio_schema     - Rule store, compiler, contexts, checks, tree queries
//! Layer 1: folio_model      - Document tree, positions, walker, mutation batches
//! Layer 0: folio_foundation - Core types (NodeId, AttributeValue, Error)
//! ```

pub use folio_foundation as foundation;
pub use folio_model as model;
pub use folio_schema as schema;

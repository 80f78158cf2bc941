//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: AttributeValue, Attributes, NodeId, and Error.

mod attributes;
mod errors;
mod values;

//! Schema registry and validation queries for Folio documents.
//!
//! This crate provides:
//! - [`RuleFragment`] - Declarative, composable rules for one item name
//! - [`RuleStore`] - Registration and extension of raw fragments
//! - [`RuleCompiler`] - Resolution of fragments into [`CompiledRule`]s
//! - [`SchemaContext`] - Ancestor chains that checks are evaluated against
//! - [`Pipeline`] - Prioritized listeners overriding the default checks
//! - [`Schema`] - The facade tying everything together, plus the derived
//!   queries (limit elements, valid ranges, attribute clean-up)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod compiler;
pub mod config;
pub mod context;
pub mod fragment;
pub mod pipeline;
pub mod query;
pub mod schema;
pub mod store;

pub use compiler::{CompiledRule, CompiledRules, RuleCompiler};
pub use config::SchemaConfig;
pub use context::{ContextDefinition, ContextEntry, ContextItem, SchemaContext};
pub use fragment::{BLOCK, LIMIT, NameList, OBJECT, RuleFragment};
pub use pipeline::{CheckEvent, Decision, ListenerId, Pipeline, Priority};
pub use schema::Schema;
pub use store::RuleStore;

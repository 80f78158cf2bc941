//! Raw rule fragments as registered by callers.
//!
//! A fragment lists directives for one item name. Directives are only
//! resolved by the [`RuleCompiler`](crate::RuleCompiler); a fragment itself is
//! plain data and is moved into the store on registration, so the caller keeps
//! no handle through which it could change afterwards.

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Type flag for block elements.
pub const BLOCK: &str = "block";
/// Type flag for limit elements.
pub const LIMIT: &str = "limit";
/// Type flag for object elements.
pub const OBJECT: &str = "object";

// =============================================================================
// Name Lists
// =============================================================================

/// Anything that can be turned into a list of item or attribute names.
///
/// Every directive accepts either a single name or a list of names.
pub trait NameList {
    /// Converts into owned names, preserving order.
    fn into_names(self) -> Vec<String>;
}

impl NameList for &str {
    fn into_names(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl NameList for String {
    fn into_names(self) -> Vec<String> {
        vec![self]
    }
}

impl NameList for &[&str] {
    fn into_names(self) -> Vec<String> {
        self.iter().map(ToString::to_string).collect()
    }
}

impl<const N: usize> NameList for [&str; N] {
    fn into_names(self) -> Vec<String> {
        self.iter().map(ToString::to_string).collect()
    }
}

impl NameList for Vec<&str> {
    fn into_names(self) -> Vec<String> {
        self.into_iter().map(ToString::to_string).collect()
    }
}

impl NameList for Vec<String> {
    fn into_names(self) -> Vec<String> {
        self
    }
}

// =============================================================================
// Rule Fragment
// =============================================================================

/// Declarative rules for one item name.
///
/// ```
/// use folio_schema::RuleFragment;
///
/// let paragraph = RuleFragment::new()
///     .inherit_all_from("$block")
///     .allow_attributes(["alignment", "indent"]);
/// assert_eq!(paragraph.inherit_all_from, vec!["$block"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RuleFragment {
    /// Items this item may be a child of.
    pub allow_in: Vec<String>,
    /// This item is allowed wherever the listed items are.
    pub allow_where: Vec<String>,
    /// Children of the listed items are also allowed in this item.
    pub allow_content_of: Vec<String>,
    /// Attributes this item accepts.
    pub allow_attributes: Vec<String>,
    /// This item accepts every attribute the listed items accept.
    pub allow_attributes_of: Vec<String>,
    /// Type flags of the listed items apply unless declared here.
    pub inherit_types_from: Vec<String>,
    /// Shorthand for content, placement, attributes and types together.
    pub inherit_all_from: Vec<String>,
    /// Declared type flags. A flag is declared iff present, even when false.
    pub types: BTreeMap<String, bool>,
}

impl RuleFragment {
    /// Creates an empty fragment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds parents this item may be placed in.
    #[must_use]
    pub fn allow_in(mut self, names: impl NameList) -> Self {
        self.allow_in.extend(names.into_names());
        self
    }

    /// Allows this item wherever the named items are allowed.
    #[must_use]
    pub fn allow_where(mut self, names: impl NameList) -> Self {
        self.allow_where.extend(names.into_names());
        self
    }

    /// Allows the children of the named items inside this item.
    #[must_use]
    pub fn allow_content_of(mut self, names: impl NameList) -> Self {
        self.allow_content_of.extend(names.into_names());
        self
    }

    /// Adds accepted attributes.
    #[must_use]
    pub fn allow_attributes(mut self, names: impl NameList) -> Self {
        self.allow_attributes.extend(names.into_names());
        self
    }

    /// Accepts every attribute the named items accept.
    #[must_use]
    pub fn allow_attributes_of(mut self, names: impl NameList) -> Self {
        self.allow_attributes_of.extend(names.into_names());
        self
    }

    /// Inherits undeclared type flags from the named items.
    #[must_use]
    pub fn inherit_types_from(mut self, names: impl NameList) -> Self {
        self.inherit_types_from.extend(names.into_names());
        self
    }

    /// Inherits content, placement, attributes and types from the named items.
    #[must_use]
    pub fn inherit_all_from(mut self, names: impl NameList) -> Self {
        self.inherit_all_from.extend(names.into_names());
        self
    }

    /// Declares a type flag.
    #[must_use]
    pub fn flag(mut self, name: &str, value: bool) -> Self {
        self.types.insert(name.to_string(), value);
        self
    }

    /// Declares the [`BLOCK`] flag.
    #[must_use]
    pub fn is_block(self, value: bool) -> Self {
        self.flag(BLOCK, value)
    }

    /// Declares the [`LIMIT`] flag.
    #[must_use]
    pub fn is_limit(self, value: bool) -> Self {
        self.flag(LIMIT, value)
    }

    /// Declares the [`OBJECT`] flag.
    #[must_use]
    pub fn is_object(self, value: bool) -> Self {
        self.flag(OBJECT, value)
    }

    /// Merges `other` into this fragment.
    ///
    /// Directive lists are appended; type flags from `other` overwrite.
    pub fn merge(&mut self, other: RuleFragment) {
        self.allow_in.extend(other.allow_in);
        self.allow_where.extend(other.allow_where);
        self.allow_content_of.extend(other.allow_content_of);
        self.allow_attributes.extend(other.allow_attributes);
        self.allow_attributes_of.extend(other.allow_attributes_of);
        self.inherit_types_from.extend(other.inherit_types_from);
        self.inherit_all_from.extend(other.inherit_all_from);
        self.types.extend(other.types);
    }
}

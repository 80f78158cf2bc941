//! Rule compiler - resolves raw fragments into a flat, queryable table.
//!
//! Compilation runs a fixed sequence of passes over the items in registration
//! order:
//!
//! 1. Seed every item with its own `allow_in`, `allow_attributes` and declared
//!    type flags. `inherit_all_from: X` is expanded into content, placement,
//!    attribute and type inheritance from `X`.
//! 2. `allow_content_of: X` adds the item as a parent to every item whose
//!    `allow_in` currently lists `X`.
//! 3. `allow_where: X` copies the current `allow_in` of `X`.
//! 4. `allow_attributes_of: X` copies the current `allow_attributes` of `X`,
//!    and `inherit_types_from: X` copies flags of `X` the item does not
//!    declare itself.
//! 5. Drop unregistered names from `allow_in` and remove duplicates.
//!
//! There is no fixed-point iteration. A chain such as `d` taking the content
//! of `c` taking the content of `b` only resolves when `c` is registered
//! before `d`.

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::fragment::{BLOCK, LIMIT, OBJECT};
use crate::store::RuleStore;

// =============================================================================
// Compiled Rule
// =============================================================================

/// The resolved rule for one item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompiledRule {
    /// Item name.
    pub name: String,
    /// Names of items this item may be a child of. No duplicates, only
    /// registered names.
    pub allow_in: Vec<String>,
    /// Attributes this item accepts. No duplicates.
    pub allow_attributes: Vec<String>,
    /// Type flags, declared or inherited.
    pub types: BTreeMap<String, bool>,
}

impl CompiledRule {
    /// Returns the value of a type flag, false if undeclared.
    #[must_use]
    pub fn is(&self, flag: &str) -> bool {
        self.types.get(flag).copied().unwrap_or(false)
    }

    /// Returns true for block items.
    #[must_use]
    pub fn is_block(&self) -> bool {
        self.is(BLOCK)
    }

    /// Returns true for limit items.
    #[must_use]
    pub fn is_limit(&self) -> bool {
        self.is(LIMIT)
    }

    /// Returns true for object items.
    #[must_use]
    pub fn is_object(&self) -> bool {
        self.is(OBJECT)
    }

    /// Returns true if this item may be a child of `parent`.
    #[must_use]
    pub fn allows_in(&self, parent: &str) -> bool {
        self.allow_in.iter().any(|name| name == parent)
    }

    /// Returns true if this item accepts `attribute`.
    #[must_use]
    pub fn allows_attribute(&self, attribute: &str) -> bool {
        self.allow_attributes.iter().any(|name| name == attribute)
    }
}

// =============================================================================
// Compiled Rules
// =============================================================================

/// Every compiled rule, in registration order.
#[derive(Clone, Debug, Default)]
pub struct CompiledRules {
    rules: Vec<Rc<CompiledRule>>,
    index: HashMap<String, usize>,
    version: u64,
}

impl CompiledRules {
    /// Returns the rule for `name`, if registered.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Rc<CompiledRule>> {
        self.index.get(name).map(|&slot| &self.rules[slot])
    }

    /// Returns true if `name` has a rule.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterates over the rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Rc<CompiledRule>> {
        self.rules.iter()
    }

    /// Returns the number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if there are no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns the store version these rules were compiled from.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }
}

// =============================================================================
// Rule Compiler
// =============================================================================

/// Work-in-progress rule while passes run.
struct PendingRule {
    name: String,
    allow_in: Vec<String>,
    allow_where: Vec<String>,
    allow_content_of: Vec<String>,
    allow_attributes: Vec<String>,
    allow_attributes_of: Vec<String>,
    inherit_types_from: Vec<String>,
    types: BTreeMap<String, bool>,
}

/// Compiles a [`RuleStore`] into [`CompiledRules`].
pub struct RuleCompiler;

impl RuleCompiler {
    /// Compiles every fragment in `store`.
    #[must_use]
    pub fn compile(store: &RuleStore) -> CompiledRules {
        let mut pending = Self::seed(store);
        let index: HashMap<String, usize> = pending
            .iter()
            .enumerate()
            .map(|(slot, rule)| (rule.name.clone(), slot))
            .collect();

        Self::resolve_content_of(&mut pending, &index);
        Self::resolve_where(&mut pending, &index);
        Self::resolve_attributes_and_types(&mut pending, &index);

        let rules: Vec<Rc<CompiledRule>> = pending
            .into_iter()
            .map(|rule| {
                let allow_in = dedup(
                    rule.allow_in
                        .into_iter()
                        .filter(|name| index.contains_key(name)),
                );
                Rc::new(CompiledRule {
                    name: rule.name,
                    allow_in,
                    allow_attributes: dedup(rule.allow_attributes),
                    types: rule.types,
                })
            })
            .collect();

        debug!(
            items = rules.len(),
            version = store.version(),
            "compiled schema rules"
        );
        CompiledRules {
            rules,
            index,
            version: store.version(),
        }
    }

    fn seed(store: &RuleStore) -> Vec<PendingRule> {
        store
            .iter()
            .map(|(name, fragment)| {
                let mut rule = PendingRule {
                    name: name.to_string(),
                    allow_in: fragment.allow_in.clone(),
                    allow_where: fragment.allow_where.clone(),
                    allow_content_of: fragment.allow_content_of.clone(),
                    allow_attributes: fragment.allow_attributes.clone(),
                    allow_attributes_of: fragment.allow_attributes_of.clone(),
                    inherit_types_from: fragment.inherit_types_from.clone(),
                    types: fragment.types.clone(),
                };
                for source in &fragment.inherit_all_from {
                    rule.allow_content_of.push(source.clone());
                    rule.allow_where.push(source.clone());
                    rule.allow_attributes_of.push(source.clone());
                    rule.inherit_types_from.push(source.clone());
                }
                rule
            })
            .collect()
    }

    fn resolve_content_of(pending: &mut [PendingRule], index: &HashMap<String, usize>) {
        for slot in 0..pending.len() {
            let sources = pending[slot].allow_content_of.clone();
            for source in sources.iter().filter(|s| index.contains_key(*s)) {
                let name = pending[slot].name.clone();
                for child in pending.iter_mut() {
                    if child.allow_in.contains(source) {
                        child.allow_in.push(name.clone());
                    }
                }
            }
        }
    }

    fn resolve_where(pending: &mut [PendingRule], index: &HashMap<String, usize>) {
        for slot in 0..pending.len() {
            let sources = pending[slot].allow_where.clone();
            for source in &sources {
                if let Some(&from) = index.get(source) {
                    let inherited = pending[from].allow_in.clone();
                    pending[slot].allow_in.extend(inherited);
                }
            }
        }
    }

    fn resolve_attributes_and_types(pending: &mut [PendingRule], index: &HashMap<String, usize>) {
        for slot in 0..pending.len() {
            let sources = pending[slot].allow_attributes_of.clone();
            for source in &sources {
                if let Some(&from) = index.get(source) {
                    let inherited = pending[from].allow_attributes.clone();
                    pending[slot].allow_attributes.extend(inherited);
                }
            }

            let sources = pending[slot].inherit_types_from.clone();
            for source in &sources {
                if let Some(&from) = index.get(source) {
                    let inherited = pending[from].types.clone();
                    for (flag, value) in inherited {
                        pending[slot].types.entry(flag).or_insert(value);
                    }
                }
            }
        }
    }
}

/// Removes duplicates, keeping the first occurrence.
fn dedup(names: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

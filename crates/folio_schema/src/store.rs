//! Raw rule storage.
//!
//! The store keeps fragments exactly as registered, in registration order, and
//! counts every change so compiled tables can tell when they are stale.

use std::collections::HashMap;

use folio_foundation::{Error, Result};
use tracing::debug;

use crate::fragment::RuleFragment;

/// Uncompiled fragments keyed by item name.
#[derive(Clone, Debug, Default)]
pub struct RuleStore {
    items: Vec<(String, RuleFragment)>,
    index: HashMap<String, usize>,
    version: u64,
}

impl RuleStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new item.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::DuplicateRegistration`](folio_foundation::ErrorKind::DuplicateRegistration)
    /// if `name` is already registered. The store is left unchanged.
    pub fn register(&mut self, name: &str, fragment: RuleFragment) -> Result<()> {
        if self.index.contains_key(name) {
            return Err(Error::duplicate_registration(name));
        }

        self.index.insert(name.to_string(), self.items.len());
        self.items.push((name.to_string(), fragment));
        self.version += 1;
        debug!(item = name, version = self.version, "registered schema item");
        Ok(())
    }

    /// Merges more rules into a registered item.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::UnknownItemExtended`](folio_foundation::ErrorKind::UnknownItemExtended)
    /// if `name` was never registered. The store is left unchanged.
    pub fn extend(&mut self, name: &str, fragment: RuleFragment) -> Result<()> {
        let Some(&slot) = self.index.get(name) else {
            return Err(Error::unknown_item_extended(name));
        };

        self.items[slot].1.merge(fragment);
        self.version += 1;
        debug!(item = name, version = self.version, "extended schema item");
        Ok(())
    }

    /// Returns true if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Returns the merged fragment of an item.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RuleFragment> {
        self.index.get(name).map(|&slot| &self.items[slot].1)
    }

    /// Iterates over all items in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleFragment)> {
        self.items.iter().map(|(name, fragment)| (name.as_str(), fragment))
    }

    /// Returns the number of registered items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the change counter. Every successful register or extend bumps it.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }
}

//! Prioritized listener pipelines for schema checks.
//!
//! Each check kind (child, attribute) owns one [`Pipeline`]. Listeners run in
//! priority order, highest first, and in registration order within a
//! priority. The default policy is an ordinary stage at [`Priority::Lowest`],
//! inserted before any listener, so:
//!
//! - listeners above `Lowest` run before it and see no pending result;
//! - listeners added at `Lowest` run after it and see its result.
//!
//! The first listener to return [`Decision::Resolve`] ends the run.

use std::fmt;

use crate::context::SchemaContext;

/// Listener priority tiers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    /// Runs last. The default policy lives here.
    Lowest,
    /// Runs after `Normal`.
    Low,
    /// The usual tier.
    #[default]
    Normal,
    /// Runs before `Normal`. Overrides typically go here.
    High,
    /// Runs first.
    Highest,
}

/// What a listener wants to happen with the check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Leave the result alone and let later stages run.
    Pass,
    /// Set the result and stop.
    Resolve(bool),
}

/// What a listener sees.
#[derive(Clone, Copy, Debug)]
pub struct CheckEvent<'a> {
    /// The context being checked against.
    pub context: &'a SchemaContext,
    /// Child item name or attribute key.
    pub name: &'a str,
    /// The default policy's result, once it has run.
    pub pending: Option<bool>,
}

/// Handle returned when a listener is registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// A check listener.
pub type Listener = Box<dyn Fn(&CheckEvent<'_>) -> Decision>;

enum Stage {
    Default,
    Custom(ListenerId, Listener),
}

struct Entry {
    priority: Priority,
    stage: Stage,
}

/// An ordered list of check stages.
pub struct Pipeline {
    entries: Vec<Entry>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// Creates a pipeline holding only the default policy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: vec![Entry {
                priority: Priority::Lowest,
                stage: Stage::Default,
            }],
        }
    }

    /// Inserts a listener after every stage of equal or higher priority.
    pub(crate) fn insert(&mut self, id: ListenerId, priority: Priority, listener: Listener) {
        let slot = self
            .entries
            .iter()
            .position(|entry| entry.priority < priority)
            .unwrap_or(self.entries.len());
        self.entries.insert(
            slot,
            Entry {
                priority,
                stage: Stage::Custom(id, listener),
            },
        );
    }

    /// Removes a listener. Returns false if it is not part of this pipeline.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|entry| !matches!(entry.stage, Stage::Custom(existing, _) if existing == id));
        self.entries.len() != before
    }

    /// Returns the number of registered listeners, not counting the default.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.entries.len() - 1
    }

    /// Runs every stage for one check.
    ///
    /// `default` is evaluated when the default stage is reached. The result is
    /// the first resolved value, else the default's result, else false.
    pub fn run(&self, context: &SchemaContext, name: &str, default: impl FnOnce() -> bool) -> bool {
        let mut default = Some(default);
        let mut event = CheckEvent {
            context,
            name,
            pending: None,
        };

        for entry in &self.entries {
            match &entry.stage {
                Stage::Default => {
                    if let Some(policy) = default.take() {
                        event.pending = Some(policy());
                    }
                }
                Stage::Custom(_, listener) => {
                    if let Decision::Resolve(value) = listener(&event) {
                        return value;
                    }
                }
            }
        }
        event.pending.unwrap_or(false)
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for entry in &self.entries {
            match &entry.stage {
                Stage::Default => list.entry(&(entry.priority, "default")),
                Stage::Custom(id, _) => list.entry(&(entry.priority, id)),
            };
        }
        list.finish()
    }
}

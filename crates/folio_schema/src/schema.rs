//! The schema facade.
//!
//! [`Schema`] owns the rule store, a lazily compiled rule table, and one
//! listener pipeline per check kind. Registration goes through `&mut self`;
//! every query takes `&self` and is infallible.

use std::cell::RefCell;
use std::rc::Rc;

use folio_foundation::{NodeId, Result};
use folio_model::Document;
use tracing::trace;

use crate::compiler::{CompiledRule, CompiledRules, RuleCompiler};
use crate::config::SchemaConfig;
use crate::context::SchemaContext;
use crate::fragment::{BLOCK, LIMIT, OBJECT, RuleFragment};
use crate::pipeline::{CheckEvent, Decision, ListenerId, Pipeline, Priority};
use crate::store::RuleStore;

/// Rules for what may appear where, and the checks built on them.
///
/// # Example
///
/// ```
/// use folio_schema::{RuleFragment, Schema};
///
/// let mut schema = Schema::new();
/// schema.register("$root", RuleFragment::new()).unwrap();
/// schema.register("paragraph", RuleFragment::new().allow_in("$root")).unwrap();
///
/// assert!(schema.check_child(["$root"], "paragraph"));
/// assert!(!schema.check_child(["paragraph"], "paragraph"));
/// ```
#[derive(Debug)]
pub struct Schema {
    config: SchemaConfig,
    store: RuleStore,
    compiled: RefCell<Option<Rc<CompiledRules>>>,
    child_checks: Pipeline,
    attribute_checks: Pipeline,
    next_listener: u64,
}

impl Default for Schema {
    fn default() -> Self {
        Self::new()
    }
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SchemaConfig::default())
    }

    /// Creates a schema with the given configuration.
    #[must_use]
    pub fn with_config(config: SchemaConfig) -> Self {
        let mut schema = Self {
            config,
            store: RuleStore::new(),
            compiled: RefCell::new(None),
            child_checks: Pipeline::new(),
            attribute_checks: Pipeline::new(),
            next_listener: 0,
        };
        if schema.config.register_base_items {
            schema.register_base_items();
        }
        schema
    }

    fn register_base_items(&mut self) {
        let base = [
            ("$root", RuleFragment::new().is_limit(true)),
            ("$block", RuleFragment::new().allow_in("$root").is_block(true)),
            ("$text", RuleFragment::new().allow_in("$block")),
        ];
        for (name, fragment) in base {
            let registered = self.store.register(name, fragment);
            debug_assert!(registered.is_ok(), "base item {name} registered twice");
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// Returns the raw store.
    #[must_use]
    pub fn store(&self) -> &RuleStore {
        &self.store
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Registers a new item.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::DuplicateRegistration`](folio_foundation::ErrorKind::DuplicateRegistration)
    /// if `name` is already registered.
    pub fn register(&mut self, name: &str, fragment: RuleFragment) -> Result<()> {
        self.store.register(name, fragment)
    }

    /// Adds rules to a registered item.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::UnknownItemExtended`](folio_foundation::ErrorKind::UnknownItemExtended)
    /// if `name` was never registered.
    pub fn extend(&mut self, name: &str, fragment: RuleFragment) -> Result<()> {
        self.store.extend(name, fragment)
    }

    /// Returns true if `name` is registered.
    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.store.contains(name)
    }

    // =========================================================================
    // Compiled Rules
    // =========================================================================

    /// Returns the compiled rule table.
    ///
    /// The table is rebuilt only after a register or extend; otherwise the
    /// same `Rc` is handed out again.
    #[must_use]
    pub fn get_rules(&self) -> Rc<CompiledRules> {
        let mut slot = self.compiled.borrow_mut();
        let current = self.store.version();
        if let Some(rules) = slot.as_ref().filter(|rules| rules.version() == current) {
            return Rc::clone(rules);
        }

        let rules = Rc::new(RuleCompiler::compile(&self.store));
        *slot = Some(Rc::clone(&rules));
        rules
    }

    /// Returns the compiled rule of one item, if registered.
    #[must_use]
    pub fn get_rule(&self, name: &str) -> Option<Rc<CompiledRule>> {
        self.get_rules().get(name).cloned()
    }

    /// Returns true if `name` is registered and carries `flag`.
    #[must_use]
    pub fn is(&self, name: &str, flag: &str) -> bool {
        self.get_rules().get(name).is_some_and(|rule| rule.is(flag))
    }

    /// Returns true if `name` is a block.
    #[must_use]
    pub fn is_block(&self, name: &str) -> bool {
        self.is(name, BLOCK)
    }

    /// Returns true if `name` is a limit.
    #[must_use]
    pub fn is_limit(&self, name: &str) -> bool {
        self.is(name, LIMIT)
    }

    /// Returns true if `name` is an object.
    #[must_use]
    pub fn is_object(&self, name: &str) -> bool {
        self.is(name, OBJECT)
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Adds a listener to child checks.
    pub fn on_check_child(
        &mut self,
        priority: Priority,
        listener: impl Fn(&CheckEvent<'_>) -> Decision + 'static,
    ) -> ListenerId {
        let id = self.allocate_listener();
        self.child_checks.insert(id, priority, Box::new(listener));
        id
    }

    /// Adds a listener to attribute checks.
    pub fn on_check_attribute(
        &mut self,
        priority: Priority,
        listener: impl Fn(&CheckEvent<'_>) -> Decision + 'static,
    ) -> ListenerId {
        let id = self.allocate_listener();
        self.attribute_checks.insert(id, priority, Box::new(listener));
        id
    }

    /// Removes a listener from whichever pipeline holds it.
    ///
    /// Returns false if the id is unknown or already removed.
    pub fn off(&mut self, id: ListenerId) -> bool {
        self.child_checks.remove(id) || self.attribute_checks.remove(id)
    }

    fn allocate_listener(&mut self) -> ListenerId {
        self.next_listener += 1;
        ListenerId::new(self.next_listener)
    }

    // =========================================================================
    // Checks
    // =========================================================================

    /// Returns true if `child` may be the next item after `context`.
    ///
    /// The child is named; use [`check_child_node`](Self::check_child_node)
    /// for an existing node. An unregistered child is rejected without
    /// consulting listeners.
    #[must_use]
    pub fn check_child(&self, context: impl Into<SchemaContext>, child: &str) -> bool {
        let context = context.into();
        let rules = self.get_rules();

        let allowed = match rules.get(child) {
            None => false,
            Some(rule) => self.child_checks.run(&context, child, || {
                context.last().is_some_and(|parent| rule.allows_in(parent.name()))
            }),
        };

        if self.config.trace_queries {
            trace!(context = %context, child, allowed, "checked child");
        }
        allowed
    }

    /// Same as [`check_child`](Self::check_child) with the child given as a
    /// node; text nodes check as `$text`.
    #[must_use]
    pub fn check_child_node(
        &self,
        doc: &Document,
        context: impl Into<SchemaContext>,
        node: NodeId,
    ) -> bool {
        self.check_child(context, doc.name(node))
    }

    /// Returns true if the last item of `context` may carry `attribute`.
    #[must_use]
    pub fn check_attribute(&self, context: impl Into<SchemaContext>, attribute: &str) -> bool {
        let context = context.into();
        let rules = self.get_rules();

        let allowed = self.attribute_checks.run(&context, attribute, || {
            context
                .last()
                .and_then(|item| rules.get(item.name()))
                .is_some_and(|rule| rule.allows_attribute(attribute))
        });

        if self.config.trace_queries {
            trace!(context = %context, attribute, allowed, "checked attribute");
        }
        allowed
    }
}

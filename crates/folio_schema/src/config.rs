//! Configuration for a [`Schema`](crate::Schema).

/// Configuration for a schema instance.
///
/// Controls which items are registered up front and how much is logged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchemaConfig {
    /// Register the `$root`, `$block` and `$text` base items on creation.
    pub register_base_items: bool,

    /// Emit a `trace` event for every child and attribute check.
    pub trace_queries: bool,
}

impl SchemaConfig {
    /// Creates the configuration an editing model uses: base items registered.
    ///
    /// - `$root` is a limit.
    /// - `$block` is a block allowed in `$root`.
    /// - `$text` is allowed in `$block`.
    #[must_use]
    pub fn editing() -> Self {
        Self {
            register_base_items: true,
            ..Self::default()
        }
    }

    /// Creates a configuration for debugging: base items plus query tracing.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            register_base_items: true,
            trace_queries: true,
        }
    }

    /// Builder method to toggle base item registration.
    #[must_use]
    pub fn with_base_items(mut self, register: bool) -> Self {
        self.register_base_items = register;
        self
    }

    /// Builder method to toggle query tracing.
    #[must_use]
    pub fn with_trace_queries(mut self, trace: bool) -> Self {
        self.trace_queries = trace;
        self
    }
}

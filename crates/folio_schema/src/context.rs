//! Schema contexts: the ancestor chains checks are evaluated against.
//!
//! A [`SchemaContext`] is an immutable list of [`ContextItem`]s, outermost
//! first. Items are snapshots: later edits to the document do not show up in a
//! context built before them. The backing `im::Vector` makes [`push`] and
//! cloning cheap.
//!
//! [`push`]: SchemaContext::push

use std::fmt;

use folio_foundation::{AttributeValue, Attributes, NodeId};
use folio_model::{Document, Item, Position, TextProxy};

use crate::fragment::NameList;

// =============================================================================
// Context Item
// =============================================================================

/// One entry of a context: a name and an attribute snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextItem {
    name: String,
    attributes: Attributes,
}

impl ContextItem {
    /// Creates an item.
    #[must_use]
    pub fn new(name: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            name: name.into(),
            attributes,
        }
    }

    /// Creates an item with no attributes.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, Attributes::new())
    }

    /// Snapshots a tree item.
    #[must_use]
    pub fn from_item(doc: &Document, item: Item) -> Self {
        Self::new(item.name(doc), item.attributes(doc).clone())
    }

    /// Returns the item name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the attribute snapshot.
    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Returns a single attribute.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    /// Iterates over attribute keys in sorted order.
    pub fn attribute_keys(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys()
    }
}

// =============================================================================
// Definitions
// =============================================================================

/// One element of a [`ContextDefinition::Mixed`] list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContextEntry {
    /// A bare name with no attributes.
    Name(String),
    /// A tree item, contributing its own name and attributes only.
    Item(Item),
}

impl From<&str> for ContextEntry {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ContextEntry {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<NodeId> for ContextEntry {
    fn from(node: NodeId) -> Self {
        Self::Item(Item::Node(node))
    }
}

impl From<Item> for ContextEntry {
    fn from(item: Item) -> Self {
        Self::Item(item)
    }
}

/// The shapes a context can be built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContextDefinition {
    /// Bare names, outermost first.
    Names(Vec<String>),
    /// A tree item: every ancestor, then the item itself.
    Item(Item),
    /// A position: every ancestor of the position, no item for the position.
    Position(Position),
    /// Names and items, each resolved to exactly one context item.
    Mixed(Vec<ContextEntry>),
}

impl From<NodeId> for ContextDefinition {
    fn from(node: NodeId) -> Self {
        Self::Item(Item::Node(node))
    }
}

impl From<Item> for ContextDefinition {
    fn from(item: Item) -> Self {
        Self::Item(item)
    }
}

impl From<TextProxy> for ContextDefinition {
    fn from(proxy: TextProxy) -> Self {
        Self::Item(Item::Text(proxy))
    }
}

impl From<Position> for ContextDefinition {
    fn from(position: Position) -> Self {
        Self::Position(position)
    }
}

impl From<&Position> for ContextDefinition {
    fn from(position: &Position) -> Self {
        Self::Position(position.clone())
    }
}

impl From<Vec<ContextEntry>> for ContextDefinition {
    fn from(entries: Vec<ContextEntry>) -> Self {
        Self::Mixed(entries)
    }
}

impl<const N: usize> From<[&str; N]> for ContextDefinition {
    fn from(names: [&str; N]) -> Self {
        Self::Names(names.into_names())
    }
}

// =============================================================================
// Schema Context
// =============================================================================

/// An ordered chain of context items, outermost first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchemaContext {
    items: im::Vector<ContextItem>,
}

impl SchemaContext {
    /// Builds a context from any supported definition.
    #[must_use]
    pub fn new(doc: &Document, definition: impl Into<ContextDefinition>) -> Self {
        let items = match definition.into() {
            ContextDefinition::Names(names) => names.into_iter().map(ContextItem::named).collect(),
            ContextDefinition::Item(item) => {
                let mut items: im::Vector<ContextItem> = doc
                    .ancestors(item.node())
                    .into_iter()
                    .map(|node| ContextItem::from_item(doc, Item::Node(node)))
                    .collect();
                items.push_back(ContextItem::from_item(doc, item));
                items
            }
            ContextDefinition::Position(position) => position
                .ancestors(doc)
                .into_iter()
                .map(|node| ContextItem::from_item(doc, Item::Node(node)))
                .collect(),
            ContextDefinition::Mixed(entries) => entries
                .into_iter()
                .map(|entry| match entry {
                    ContextEntry::Name(name) => ContextItem::named(name),
                    ContextEntry::Item(item) => ContextItem::from_item(doc, item),
                })
                .collect(),
        };
        Self { items }
    }

    /// Builds a context from bare names. An empty list gives an empty context.
    #[must_use]
    pub fn from_names(names: impl NameList) -> Self {
        Self {
            items: names.into_names().into_iter().map(ContextItem::named).collect(),
        }
    }

    /// Builds a context from prepared items.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = ContextItem>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    /// Returns the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the context has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the innermost item.
    #[must_use]
    pub fn last(&self) -> Option<&ContextItem> {
        self.items.last()
    }

    /// Returns the item at `index`, outermost first.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<&ContextItem> {
        self.items.get(index)
    }

    /// Iterates over the items, outermost first.
    pub fn iter(&self) -> impl Iterator<Item = &ContextItem> {
        self.items.iter()
    }

    /// Iterates over the item names, outermost first.
    ///
    /// Calling it again starts over from the outermost item.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(ContextItem::name)
    }

    /// Returns a new context with `item` appended.
    #[must_use]
    pub fn push(&self, item: ContextItem) -> Self {
        let mut items = self.items.clone();
        items.push_back(item);
        Self { items }
    }

    /// Returns true if the whitespace-separated `query` names the tail of
    /// this context.
    ///
    /// ```
    /// use folio_schema::SchemaContext;
    ///
    /// let ctx = SchemaContext::from_names(["$root", "blockQuote", "paragraph"]);
    /// assert!(ctx.match_end("blockQuote paragraph"));
    /// assert!(!ctx.match_end("$root blockQuote"));
    /// ```
    #[must_use]
    pub fn match_end(&self, query: &str) -> bool {
        let query: Vec<&str> = query.split_whitespace().collect();
        self.match_end_names(&query)
    }

    /// Same as [`match_end`](Self::match_end) with pre-split names.
    ///
    /// An empty query matches nothing, and neither does an empty context.
    #[must_use]
    pub fn match_end_names(&self, query: &[&str]) -> bool {
        if query.is_empty() || query.len() > self.items.len() {
            return false;
        }
        let skip = self.items.len() - query.len();
        self.names().skip(skip).eq(query.iter().copied())
    }
}

impl fmt::Display for SchemaContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.names().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

impl<const N: usize> From<[&str; N]> for SchemaContext {
    fn from(names: [&str; N]) -> Self {
        Self::from_names(names)
    }
}

impl From<Vec<&str>> for SchemaContext {
    fn from(names: Vec<&str>) -> Self {
        Self::from_names(names)
    }
}

impl From<&SchemaContext> for SchemaContext {
    fn from(context: &SchemaContext) -> Self {
        context.clone()
    }
}

impl FromIterator<ContextItem> for SchemaContext {
    fn from_iter<I: IntoIterator<Item = ContextItem>>(iter: I) -> Self {
        Self::from_items(iter)
    }
}

//! Items produced by walking a range.

use folio_foundation::{Attributes, NodeId};

use crate::document::{Document, TEXT_NAME};

/// A slice of a text node.
///
/// Ranges may start or end in the middle of a text node; a proxy names the
/// covered characters without splitting the node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextProxy {
    node: NodeId,
    offset_in_text: usize,
    len: usize,
}

impl TextProxy {
    /// Creates a proxy over `len` characters of `node` starting at `offset_in_text`.
    #[must_use]
    pub const fn new(node: NodeId, offset_in_text: usize, len: usize) -> Self {
        Self {
            node,
            offset_in_text,
            len,
        }
    }

    /// Returns the underlying text node.
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// Returns the first covered character index within the text node.
    #[must_use]
    pub const fn offset_in_text(&self) -> usize {
        self.offset_in_text
    }

    /// Returns the number of covered characters.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the proxy covers no characters.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if the proxy covers the whole text node.
    #[must_use]
    pub fn is_whole(&self, doc: &Document) -> bool {
        self.offset_in_text == 0 && self.len == doc.offset_size(self.node)
    }

    /// Returns the covered characters.
    #[must_use]
    pub fn data<'d>(&self, doc: &'d Document) -> &'d str {
        let text = doc.text(self.node).unwrap_or_default();
        let start = byte_index(text, self.offset_in_text);
        let end = byte_index(text, self.offset_in_text + self.len);
        &text[start..end]
    }
}

fn byte_index(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(index, _)| index)
}

/// Anything a context can be built from: an element, a whole text node, or
/// part of one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Item {
    /// An element or a whole text node.
    Node(NodeId),
    /// Part of a text node.
    Text(TextProxy),
}

impl Item {
    /// Returns the tree node backing this item.
    #[must_use]
    pub const fn node(&self) -> NodeId {
        match self {
            Self::Node(node) => *node,
            Self::Text(proxy) => proxy.node(),
        }
    }

    /// Returns the item name, [`TEXT_NAME`] for text.
    #[must_use]
    pub fn name<'d>(&self, doc: &'d Document) -> &'d str {
        match self {
            Self::Node(node) => doc.name(*node),
            Self::Text(_) => TEXT_NAME,
        }
    }

    /// Returns the attributes of the backing node.
    #[must_use]
    pub fn attributes<'d>(&self, doc: &'d Document) -> &'d Attributes {
        doc.attributes(self.node())
    }

    /// Returns the parent element of the backing node.
    #[must_use]
    pub fn parent(&self, doc: &Document) -> Option<NodeId> {
        doc.parent(self.node())
    }
}

impl From<NodeId> for Item {
    fn from(node: NodeId) -> Self {
        Self::Node(node)
    }
}

impl From<TextProxy> for Item {
    fn from(proxy: TextProxy) -> Self {
        Self::Text(proxy)
    }
}

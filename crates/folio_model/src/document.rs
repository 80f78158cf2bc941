//! Arena-allocated document tree.
//!
//! A [`Document`] owns every node it creates. Nodes are either elements, which
//! have a name and ordered children, or text nodes, which carry character data.
//! Both kinds carry an attribute map.
//!
//! Offsets follow the usual rich-text convention: an element occupies one
//! offset in its parent, a text node occupies one offset per character.

use std::sync::Arc;

use folio_foundation::{AttributeValue, Attributes, Error, NodeId, Result};

use crate::batch::{Batch, MutationSink, Operation};

/// The item name reported for every text node.
pub const TEXT_NAME: &str = "$text";

#[derive(Clone, Debug)]
enum NodeData {
    Element {
        name: Arc<str>,
        children: Vec<NodeId>,
    },
    Text {
        data: String,
        len: usize,
    },
}

#[derive(Clone, Debug)]
struct Node {
    parent: Option<NodeId>,
    attributes: Attributes,
    data: NodeData,
}

/// An arena of elements and text nodes.
///
/// Every node id handed out by a document is valid for that document only;
/// passing a foreign id to a lookup method panics on an out-of-range index.
#[derive(Clone, Debug, Default)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of nodes allocated in this document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no nodes have been allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Creates a detached element meant to act as a tree root.
    pub fn create_root(&mut self, name: &str) -> NodeId {
        self.create_element(name, Attributes::new())
    }

    /// Creates a detached element.
    pub fn create_element(&mut self, name: &str, attributes: Attributes) -> NodeId {
        self.alloc(Node {
            parent: None,
            attributes,
            data: NodeData::Element {
                name: name.into(),
                children: Vec::new(),
            },
        })
    }

    /// Creates a detached text node.
    pub fn create_text(&mut self, data: &str, attributes: Attributes) -> NodeId {
        self.alloc(Node {
            parent: None,
            attributes,
            data: NodeData::Text {
                data: data.to_string(),
                len: data.chars().count(),
            },
        })
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        #[allow(clippy::cast_possible_truncation)]
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Appends a detached node as the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns an error if `parent` is a text node, if `child` already has a
    /// parent, or if `child` is `parent` or one of its ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if !self.is_element(parent) {
            return Err(Error::not_an_element(parent));
        }
        if self.parent(child).is_some() {
            return Err(Error::already_attached(child));
        }
        if child == parent || self.is_ancestor_of(child, parent) {
            return Err(Error::ancestor_insertion(child));
        }

        self.nodes[child.index()].parent = Some(parent);
        if let NodeData::Element { children, .. } = &mut self.nodes[parent.index()].data {
            children.push(child);
        }
        Ok(())
    }

    /// Appends several detached nodes in order.
    ///
    /// # Errors
    ///
    /// Stops at the first child [`append_child`](Self::append_child) rejects.
    pub fn append_children(
        &mut self,
        parent: NodeId,
        children: impl IntoIterator<Item = NodeId>,
    ) -> Result<()> {
        for child in children {
            self.append_child(parent, child)?;
        }
        Ok(())
    }

    /// Sets an attribute on a node.
    pub fn set_attribute(&mut self, node: NodeId, key: &str, value: impl Into<AttributeValue>) {
        let slot = &mut self.nodes[node.index()].attributes;
        *slot = slot.insert(key, value);
    }

    /// Removes an attribute from a node. Missing keys are ignored.
    pub fn remove_attribute(&mut self, node: NodeId, key: &str) {
        let slot = &mut self.nodes[node.index()].attributes;
        *slot = slot.remove(key);
    }

    /// Applies every operation recorded in `batch`, in order.
    pub fn apply(&mut self, batch: &Batch) {
        for operation in batch.iter() {
            match operation {
                Operation::RemoveAttribute { node, key } => self.remove_attribute(*node, key),
            }
        }
    }

    // =========================================================================
    // Node accessors
    // =========================================================================

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Returns the element name, or [`TEXT_NAME`] for text nodes.
    #[must_use]
    pub fn name(&self, id: NodeId) -> &str {
        match &self.node(id).data {
            NodeData::Element { name, .. } => name,
            NodeData::Text { .. } => TEXT_NAME,
        }
    }

    /// Returns true if the node is an element.
    #[must_use]
    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.node(id).data, NodeData::Element { .. })
    }

    /// Returns true if the node is a text node.
    #[must_use]
    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.node(id).data, NodeData::Text { .. })
    }

    /// Returns the character data of a text node.
    #[must_use]
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).data {
            NodeData::Text { data, .. } => Some(data),
            NodeData::Element { .. } => None,
        }
    }

    /// Returns the attributes of a node.
    #[must_use]
    pub fn attributes(&self, id: NodeId) -> &Attributes {
        &self.node(id).attributes
    }

    /// Returns a single attribute of a node.
    #[must_use]
    pub fn attribute(&self, id: NodeId, key: &str) -> Option<&AttributeValue> {
        self.node(id).attributes.get(key)
    }

    /// Returns the parent of a node, if attached.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Returns the children of an element. Text nodes have none.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.node(id).data {
            NodeData::Element { children, .. } => children,
            NodeData::Text { .. } => &[],
        }
    }

    /// Returns the child at `index` (not offset).
    #[must_use]
    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.children(id).get(index).copied()
    }

    // =========================================================================
    // Offsets
    // =========================================================================

    /// Returns how many offsets the node occupies in its parent.
    #[must_use]
    pub fn offset_size(&self, id: NodeId) -> usize {
        match &self.node(id).data {
            NodeData::Element { .. } => 1,
            NodeData::Text { len, .. } => *len,
        }
    }

    /// Returns the largest valid offset inside an element.
    #[must_use]
    pub fn max_offset(&self, id: NodeId) -> usize {
        self.children(id).iter().map(|&c| self.offset_size(c)).sum()
    }

    /// Returns the offset at which the node starts inside its parent.
    #[must_use]
    pub fn start_offset(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        let mut offset = 0;
        for &sibling in self.children(parent) {
            if sibling == id {
                return Some(offset);
            }
            offset += self.offset_size(sibling);
        }
        None
    }

    /// Returns the offset right after the node inside its parent.
    #[must_use]
    pub fn end_offset(&self, id: NodeId) -> Option<usize> {
        self.start_offset(id).map(|start| start + self.offset_size(id))
    }

    /// Finds the child covering `offset` and the offset it starts at.
    ///
    /// Returns `None` when `offset` is at or past [`max_offset`](Self::max_offset).
    #[must_use]
    pub fn child_at_offset(&self, parent: NodeId, offset: usize) -> Option<(NodeId, usize)> {
        let mut start = 0;
        for &child in self.children(parent) {
            let end = start + self.offset_size(child);
            if offset < end {
                return Some((child, start));
            }
            start = end;
        }
        None
    }

    // =========================================================================
    // Ancestry
    // =========================================================================

    /// Returns the ancestors of a node, root first, excluding the node itself.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.parent(id);
        while let Some(node) = current {
            chain.push(node);
            current = self.parent(node);
        }
        chain.reverse();
        chain
    }

    /// Returns the topmost ancestor of a node, or the node itself if detached.
    #[must_use]
    pub fn root_of(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Returns the start offsets leading from the root down to the node.
    ///
    /// A root has an empty path.
    #[must_use]
    pub fn path(&self, id: NodeId) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = id;
        while let Some(offset) = self.start_offset(current) {
            path.push(offset);
            current = self.parent(current).unwrap_or(current);
        }
        path.reverse();
        path
    }

    /// Returns true if `ancestor` is a strict ancestor of `node`.
    #[must_use]
    pub fn is_ancestor_of(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parent(node);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parent(parent);
        }
        false
    }

    /// Returns the deepest node that is `a`, `b`, or an ancestor of both.
    ///
    /// Nodes in different trees have no common ancestor.
    #[must_use]
    pub fn common_ancestor(&self, a: NodeId, b: NodeId) -> Option<NodeId> {
        let mut chain_a = self.ancestors(a);
        chain_a.push(a);
        let mut chain_b = self.ancestors(b);
        chain_b.push(b);

        chain_a
            .iter()
            .zip(chain_b.iter())
            .take_while(|(x, y)| x == y)
            .last()
            .map(|(x, _)| *x)
    }
}

impl MutationSink for Document {
    fn remove_attribute(&mut self, node: NodeId, key: &str) {
        Document::remove_attribute(self, node, key);
    }
}

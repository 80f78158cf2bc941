//! Tree-level queries built on the basic checks.
//!
//! These walk real documents: they find the limit element around a selection,
//! split ranges where an attribute is not allowed, and strip attributes a
//! schema rejects.

use folio_foundation::NodeId;
use folio_model::{Document, MutationSink, Range, Selection, TEXT_NAME};
use tracing::debug;

use crate::context::{ContextItem, SchemaContext};
use crate::schema::Schema;

impl Schema {
    // =========================================================================
    // Limit Elements
    // =========================================================================

    /// Returns the innermost limit element containing the whole selection.
    ///
    /// A root always counts as a limit. Returns `None` for an empty selection
    /// or when ranges live in different trees.
    #[must_use]
    pub fn get_limit_element(&self, doc: &Document, selection: &Selection) -> Option<NodeId> {
        let mut limits = selection
            .ranges()
            .iter()
            .filter_map(|range| range.common_ancestor(doc))
            .map(|ancestor| self.nearest_limit(doc, ancestor));

        let first = limits.next()?;
        let common = limits.try_fold(first, |acc, limit| doc.common_ancestor(acc, limit))?;
        Some(self.nearest_limit(doc, common))
    }

    fn nearest_limit(&self, doc: &Document, mut node: NodeId) -> NodeId {
        while let Some(parent) = doc.parent(node) {
            if self.is_limit(doc.name(node)) {
                break;
            }
            node = parent;
        }
        node
    }

    // =========================================================================
    // Attribute Ranges
    // =========================================================================

    /// Splits `ranges` into the sub-ranges where `attribute` is allowed.
    ///
    /// Every walked item (element boundary or text) that rejects the attribute
    /// ends the current run. Disallowed elements are still entered, so allowed
    /// content inside them yields its own ranges. Output ranges never leave
    /// their source range and are never empty.
    #[must_use]
    pub fn get_valid_ranges<'r>(
        &self,
        doc: &Document,
        ranges: impl IntoIterator<Item = &'r Range>,
        attribute: &str,
    ) -> Vec<Range> {
        let mut valid = Vec::new();
        for range in ranges {
            self.collect_valid_ranges(doc, range, attribute, &mut valid);
        }
        valid
    }

    fn collect_valid_ranges(&self, doc: &Document, range: &Range, attribute: &str, out: &mut Vec<Range>) {
        let mut start = range.start().clone();
        let mut last = range.start().clone();

        for value in range.walker(doc) {
            if !self.check_attribute(SchemaContext::new(doc, value.item), attribute) {
                if start != last {
                    out.push(Range::new(start, last));
                }
                start = value.next_position.clone();
            }
            last = value.next_position;
        }

        if &start != range.end() {
            out.push(Range::new(start, range.end().clone()));
        }
    }

    /// Returns true if `attribute` could be applied to the selection.
    ///
    /// For a caret this asks whether text typed there may carry the attribute.
    /// Otherwise any selected item that accepts it is enough.
    #[must_use]
    pub fn check_attribute_in_selection(&self, doc: &Document, selection: &Selection, attribute: &str) -> bool {
        if selection.is_collapsed() {
            let Some(position) = selection.first_position() else {
                return false;
            };
            let context = SchemaContext::new(doc, position).push(ContextItem::named(TEXT_NAME));
            return self.check_attribute(context, attribute);
        }

        selection.ranges().iter().any(|range| {
            range
                .walker(doc)
                .any(|value| self.check_attribute(SchemaContext::new(doc, value.item), attribute))
        })
    }

    // =========================================================================
    // Clean-up
    // =========================================================================

    /// Reports every attribute on `nodes` and their descendants that the
    /// schema rejects.
    ///
    /// Nodes are visited depth first and keys in sorted order, one
    /// `remove_attribute` per rejection. Every check sees the earlier
    /// removals, both on the node itself and on its ancestors.
    pub fn remove_disallowed_attributes(
        &self,
        doc: &Document,
        nodes: impl IntoIterator<Item = NodeId>,
        sink: &mut impl MutationSink,
    ) {
        let mut removed = 0;
        for node in nodes {
            let parent = doc
                .parent(node)
                .map_or_else(SchemaContext::default, |parent| SchemaContext::new(doc, parent));
            removed += self.strip_node(doc, &parent, node, sink);
        }
        debug!(removed, "removed disallowed attributes");
    }

    fn strip_node(
        &self,
        doc: &Document,
        parent: &SchemaContext,
        node: NodeId,
        sink: &mut impl MutationSink,
    ) -> usize {
        let name = doc.name(node);
        let attributes = doc.attributes(node);

        let mut own = parent.push(ContextItem::new(name, attributes.clone()));
        let mut kept = attributes.clone();
        let mut removed = 0;
        for key in attributes.keys() {
            if !self.check_attribute(&own, key) {
                sink.remove_attribute(node, key);
                kept = kept.remove(key);
                own = parent.push(ContextItem::new(name, kept.clone()));
                removed += 1;
            }
        }

        if doc.is_element(node) {
            for &child in doc.children(node) {
                removed += self.strip_node(doc, &own, child, sink);
            }
        }
        removed
    }
}

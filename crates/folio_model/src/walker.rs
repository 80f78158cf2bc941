//! Left-to-right traversal of a range.
//!
//! The walker reports three kinds of steps: entering an element, crossing a
//! run of text, and leaving an element. It descends into every element, so a
//! range over `<p>a<b>c</b></p>` yields `start(b)`, text `c`, `end(b)` in
//! between the surrounding text steps.

use crate::document::Document;
use crate::item::{Item, TextProxy};
use crate::position::{Position, Range};

/// The kind of a walker step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WalkerStep {
    /// Entered an element.
    ElementStart,
    /// Crossed characters of a text node.
    Text,
    /// Left an element.
    ElementEnd,
}

/// A single step of a [`TreeWalker`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalkerValue {
    /// What kind of boundary was crossed.
    pub step: WalkerStep,
    /// The element or text that was crossed.
    pub item: Item,
    /// Position before the step.
    pub previous_position: Position,
    /// Position after the step.
    pub next_position: Position,
}

/// Iterator over the items of a range, in document order.
#[derive(Clone, Debug)]
pub struct TreeWalker<'d> {
    doc: &'d Document,
    position: Position,
    end: Position,
}

impl<'d> TreeWalker<'d> {
    /// Creates a walker over `range`.
    #[must_use]
    pub fn new(doc: &'d Document, range: &Range) -> Self {
        Self {
            doc,
            position: range.start().clone(),
            end: range.end().clone(),
        }
    }

    /// Returns the position the walker currently stands at.
    #[must_use]
    pub fn position(&self) -> &Position {
        &self.position
    }
}

impl Iterator for TreeWalker<'_> {
    type Item = WalkerValue;

    fn next(&mut self) -> Option<WalkerValue> {
        if self.position == self.end {
            return None;
        }

        let doc = self.doc;
        let parent = self.position.parent();
        let offset = self.position.offset();
        let previous_position = self.position.clone();

        let (step, item, next_position) = match doc.child_at_offset(parent, offset) {
            Some((child, _)) if doc.is_element(child) => (
                WalkerStep::ElementStart,
                Item::Node(child),
                self.position.descend(child),
            ),
            Some((text, start)) => {
                let mut stop = start + doc.offset_size(text);
                if self.end.parent() == parent && self.end.offset() > offset {
                    stop = stop.min(self.end.offset());
                }
                let proxy = TextProxy::new(text, offset - start, stop - offset);
                let item = if proxy.is_whole(doc) {
                    Item::Node(text)
                } else {
                    Item::Text(proxy)
                };
                (WalkerStep::Text, item, self.position.with_offset(stop))
            }
            // Past the last child: leave the parent, or stop at the end of the root.
            None => (
                WalkerStep::ElementEnd,
                Item::Node(parent),
                self.position.ascend(doc)?,
            ),
        };

        self.position = next_position.clone();
        Some(WalkerValue {
            step,
            item,
            previous_position,
            next_position,
        })
    }
}

//! Offset-based positions, ranges, and selections.
//!
//! A [`Position`] is a path of offsets from a root element. Every step but the
//! last names the start offset of an element; the last step is an offset
//! inside the innermost element, which may fall in the middle of a text node.
//! Positions in the same tree compare in document order.

use std::cmp::Ordering;

use folio_foundation::{Error, NodeId, Result};

use crate::document::Document;
use crate::walker::TreeWalker;

// =============================================================================
// Position
// =============================================================================

/// A location between two offsets of an element.
///
/// The parent element is resolved when the position is created, so accessors
/// never need the document.
#[derive(Clone, Debug)]
pub struct Position {
    root: NodeId,
    parent: NodeId,
    path: Vec<usize>,
}

impl Position {
    /// Resolves a path of offsets against `root`.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is empty, steps through something other
    /// than the start of an element, or ends past the last offset.
    pub fn new(doc: &Document, root: NodeId, path: Vec<usize>) -> Result<Self> {
        let Some((&last, steps)) = path.split_last() else {
            return Err(Error::invalid_position(&path));
        };
        if !doc.is_element(root) {
            return Err(Error::invalid_position(&path));
        }

        let mut parent = root;
        for &step in steps {
            match doc.child_at_offset(parent, step) {
                Some((child, start)) if start == step && doc.is_element(child) => parent = child,
                _ => return Err(Error::invalid_position(&path)),
            }
        }
        if last > doc.max_offset(parent) {
            return Err(Error::invalid_position(&path));
        }

        Ok(Self { root, parent, path })
    }

    /// Creates a position at `offset` inside `parent`.
    ///
    /// # Errors
    ///
    /// Returns an error if `parent` is not an element or `offset` is past its
    /// last offset.
    pub fn at(doc: &Document, parent: NodeId, offset: usize) -> Result<Self> {
        if !doc.is_element(parent) {
            return Err(Error::not_an_element(parent));
        }
        let mut path = doc.path(parent);
        path.push(offset);
        if offset > doc.max_offset(parent) {
            return Err(Error::invalid_position(&path));
        }
        Ok(Self {
            root: doc.root_of(parent),
            parent,
            path,
        })
    }

    /// Creates a position after the last child of `parent`.
    ///
    /// # Errors
    ///
    /// Returns an error if `parent` is not an element.
    pub fn at_end(doc: &Document, parent: NodeId) -> Result<Self> {
        Self::at(doc, parent, doc.max_offset(parent))
    }

    /// Creates a position right before `node`.
    ///
    /// # Errors
    ///
    /// Returns an error if `node` has no parent.
    pub fn before(doc: &Document, node: NodeId) -> Result<Self> {
        let (Some(parent), Some(offset)) = (doc.parent(node), doc.start_offset(node)) else {
            return Err(Error::invalid_position(&doc.path(node)));
        };
        Self::at(doc, parent, offset)
    }

    /// Creates a position right after `node`.
    ///
    /// # Errors
    ///
    /// Returns an error if `node` has no parent.
    pub fn after(doc: &Document, node: NodeId) -> Result<Self> {
        let (Some(parent), Some(offset)) = (doc.parent(node), doc.end_offset(node)) else {
            return Err(Error::invalid_position(&doc.path(node)));
        };
        Self::at(doc, parent, offset)
    }

    /// Returns the root of the tree this position lives in.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the element this position is inside.
    #[must_use]
    pub const fn parent(&self) -> NodeId {
        self.parent
    }

    /// Returns the full offset path from the root.
    #[must_use]
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// Returns the offset inside [`parent`](Self::parent).
    #[must_use]
    pub fn offset(&self) -> usize {
        self.path.last().copied().unwrap_or_default()
    }

    /// Returns the parent element and every ancestor of it, root first.
    #[must_use]
    pub fn ancestors(&self, doc: &Document) -> Vec<NodeId> {
        let mut chain = doc.ancestors(self.parent);
        chain.push(self.parent);
        chain
    }

    /// Returns the node right after this position, if any.
    ///
    /// Inside a text node this is the text node itself.
    #[must_use]
    pub fn node_after(&self, doc: &Document) -> Option<NodeId> {
        doc.child_at_offset(self.parent, self.offset())
            .map(|(node, _)| node)
    }

    /// Returns true if the position falls strictly inside a text node.
    #[must_use]
    pub fn is_inside_text(&self, doc: &Document) -> bool {
        matches!(
            doc.child_at_offset(self.parent, self.offset()),
            Some((node, start)) if doc.is_text(node) && start < self.offset()
        )
    }

    /// Same parent, different offset. The caller guarantees the offset fits.
    pub(crate) fn with_offset(&self, offset: usize) -> Self {
        let mut path = self.path.clone();
        if let Some(last) = path.last_mut() {
            *last = offset;
        }
        Self {
            root: self.root,
            parent: self.parent,
            path,
        }
    }

    /// Offset 0 inside `child`, which must be an element at this position.
    pub(crate) fn descend(&self, child: NodeId) -> Self {
        let mut path = self.path.clone();
        path.push(0);
        Self {
            root: self.root,
            parent: child,
            path,
        }
    }

    /// The position right after [`parent`](Self::parent), if it has one.
    pub(crate) fn ascend(&self, doc: &Document) -> Option<Self> {
        let grandparent = doc.parent(self.parent)?;
        let mut path = self.path.clone();
        path.pop();
        let last = path.last_mut()?;
        *last += 1;
        Some(Self {
            root: self.root,
            parent: grandparent,
            path,
        })
    }
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root && self.path == other.path
    }
}

impl Eq for Position {}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.root
            .cmp(&other.root)
            .then_with(|| self.path.cmp(&other.path))
    }
}

// =============================================================================
// Range
// =============================================================================

/// A span between two positions, `start <= end`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Range {
    start: Position,
    end: Position,
}

impl Range {
    /// Creates a range, swapping the ends if given in reverse.
    #[must_use]
    pub fn new(start: Position, end: Position) -> Self {
        if end < start {
            Self {
                start: end,
                end: start,
            }
        } else {
            Self { start, end }
        }
    }

    /// Creates an empty range at `position`.
    #[must_use]
    pub fn collapsed(position: Position) -> Self {
        Self {
            start: position.clone(),
            end: position,
        }
    }

    /// Creates a range that covers `node` entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if `node` has no parent.
    pub fn on(doc: &Document, node: NodeId) -> Result<Self> {
        Ok(Self {
            start: Position::before(doc, node)?,
            end: Position::after(doc, node)?,
        })
    }

    /// Creates a range over all the content of `element`.
    ///
    /// # Errors
    ///
    /// Returns an error if `element` is not an element.
    pub fn inside(doc: &Document, element: NodeId) -> Result<Self> {
        Ok(Self {
            start: Position::at(doc, element, 0)?,
            end: Position::at_end(doc, element)?,
        })
    }

    /// Returns the start position.
    #[must_use]
    pub const fn start(&self) -> &Position {
        &self.start
    }

    /// Returns the end position.
    #[must_use]
    pub const fn end(&self) -> &Position {
        &self.end
    }

    /// Returns true if start and end coincide.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if `position` lies between start and end, inclusive.
    #[must_use]
    pub fn contains(&self, position: &Position) -> bool {
        &self.start <= position && position <= &self.end
    }

    /// Returns the deepest element containing both ends.
    #[must_use]
    pub fn common_ancestor(&self, doc: &Document) -> Option<NodeId> {
        doc.common_ancestor(self.start.parent(), self.end.parent())
    }

    /// Returns a walker over the items in this range.
    #[must_use]
    pub fn walker<'d>(&self, doc: &'d Document) -> TreeWalker<'d> {
        TreeWalker::new(doc, self)
    }
}

// =============================================================================
// Selection
// =============================================================================

/// Zero or more ranges.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    ranges: Vec<Range>,
}

impl Selection {
    /// Creates a selection from ranges, kept in the given order.
    #[must_use]
    pub fn new(ranges: impl IntoIterator<Item = Range>) -> Self {
        Self {
            ranges: ranges.into_iter().collect(),
        }
    }

    /// Creates a caret selection.
    #[must_use]
    pub fn collapsed(position: Position) -> Self {
        Self::new([Range::collapsed(position)])
    }

    /// Returns the ranges.
    #[must_use]
    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }

    /// Returns the number of ranges.
    #[must_use]
    pub fn range_count(&self) -> usize {
        self.ranges.len()
    }

    /// Returns true if there are no ranges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Returns true for a single collapsed range.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        matches!(self.ranges.as_slice(), [range] if range.is_collapsed())
    }

    /// Returns the range starting first in document order.
    #[must_use]
    pub fn first_range(&self) -> Option<&Range> {
        self.ranges.iter().min_by(|a, b| a.start().cmp(b.start()))
    }

    /// Returns the earliest start position.
    #[must_use]
    pub fn first_position(&self) -> Option<&Position> {
        self.first_range().map(Range::start)
    }
}

impl From<Range> for Selection {
    fn from(range: Range) -> Self {
        Self::new([range])
    }
}

impl FromIterator<Range> for Selection {
    fn from_iter<I: IntoIterator<Item = Range>>(iter: I) -> Self {
        Self::new(iter)
    }
}

//! Fixture markup for building and printing small documents.
//!
//! The notation is XML-like:
//!
//! ```text
//! <paragraph align="right">fo[o<img></img>b]ar</paragraph>
//! <paragraph><$text bold="true">bold</$text> plain</paragraph>
//! ```
//!
//! - Elements are written as tags; `<name/>` is an empty element.
//! - Text outside `<$text>` has no attributes; `<$text ...>` gives the
//!   enclosed characters attributes. It is not an element.
//! - `[` and `]` open and close a selection range. Several ranges may appear
//!   one after another; `[]` is a caret.
//! - Attribute values are quoted. `"true"`/`"false"` become booleans and
//!   integers become numbers; anything else stays a string.
//!
//! The top-level content is placed inside a `$root` element.

use std::fmt::Write as _;

use folio_foundation::{AttributeValue, Attributes, Error, NodeId, Result};

use crate::document::{Document, TEXT_NAME};
use crate::position::{Position, Range, Selection};

/// Name given to the root created by [`parse`].
pub const ROOT_NAME: &str = "$root";

/// A parsed document together with its root and selection.
#[derive(Clone, Debug)]
pub struct Fixture {
    /// The document holding all parsed nodes.
    pub document: Document,
    /// The `$root` element.
    pub root: NodeId,
    /// Ranges marked with `[` and `]`, in order of appearance.
    pub selection: Selection,
}

// =============================================================================
// Parsing
// =============================================================================

/// Parses fixture markup into a new document.
///
/// # Errors
///
/// Returns [`ErrorKind::InvalidMarkup`](folio_foundation::ErrorKind::InvalidMarkup)
/// for unbalanced tags or brackets, malformed attributes, or elements nested
/// inside `<$text>`.
pub fn parse(source: &str) -> Result<Fixture> {
    let mut document = Document::new();
    let root = document.create_root(ROOT_NAME);
    let selection = Parser::new(source, &mut document, root).run()?;
    Ok(Fixture {
        document,
        root,
        selection,
    })
}

struct Frame {
    node: NodeId,
    name: String,
    offset: usize,
}

struct Parser<'s, 'd> {
    source: &'s str,
    cursor: usize,
    doc: &'d mut Document,
    stack: Vec<Frame>,
    text: String,
    text_len: usize,
    text_attributes: Attributes,
    styled: Option<Attributes>,
    root: NodeId,
    open_range: Option<(NodeId, usize)>,
    ranges: Vec<((NodeId, usize), (NodeId, usize))>,
}

impl<'s, 'd> Parser<'s, 'd> {
    fn new(source: &'s str, doc: &'d mut Document, root: NodeId) -> Self {
        Self {
            source,
            cursor: 0,
            doc,
            stack: vec![Frame {
                node: root,
                name: ROOT_NAME.to_string(),
                offset: 0,
            }],
            text: String::new(),
            text_len: 0,
            text_attributes: Attributes::new(),
            styled: None,
            root,
            open_range: None,
            ranges: Vec::new(),
        }
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::invalid_markup(message, self.cursor)
    }

    fn peek(&self) -> Option<char> {
        self.source[self.cursor..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.cursor += ch.len_utf8();
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> Result<()> {
        match self.bump() {
            Some(ch) if ch == expected => Ok(()),
            Some(ch) => Err(self.error(format!("expected '{expected}', found '{ch}'"))),
            None => Err(self.error(format!("expected '{expected}', found end of input"))),
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn run(mut self) -> Result<Selection> {
        while let Some(ch) = self.peek() {
            match ch {
                '<' => self.tag()?,
                '[' => {
                    self.bump();
                    if self.open_range.is_some() {
                        return Err(self.error("nested '['"));
                    }
                    self.open_range = Some(self.here());
                }
                ']' => {
                    self.bump();
                    let Some(start) = self.open_range.take() else {
                        return Err(self.error("']' without matching '['"));
                    };
                    let end = self.here();
                    self.ranges.push((start, end));
                }
                _ => {
                    self.bump();
                    self.push_char(ch)?;
                }
            }
        }

        self.flush_text()?;
        if self.styled.is_some() {
            return Err(self.error("unclosed <$text>"));
        }
        if let Some(frame) = self.stack.get(1) {
            return Err(self.error(format!("unclosed element <{}>", frame.name)));
        }
        if self.open_range.is_some() {
            return Err(self.error("unclosed '['"));
        }

        let mut ranges = Vec::with_capacity(self.ranges.len());
        for &((start_parent, start_offset), (end_parent, end_offset)) in &self.ranges {
            let start = Position::at(self.doc, start_parent, start_offset)?;
            let end = Position::at(self.doc, end_parent, end_offset)?;
            ranges.push(Range::new(start, end));
        }
        Ok(Selection::new(ranges))
    }

    fn top(&mut self) -> Result<&mut Frame> {
        let cursor = self.cursor;
        self.stack
            .last_mut()
            .ok_or_else(|| Error::invalid_markup("no open element", cursor))
    }

    /// The parent and offset the next character would land at.
    fn here(&self) -> (NodeId, usize) {
        self.stack.last().map_or((self.root, 0), |frame| {
            (frame.node, frame.offset + self.text_len)
        })
    }

    fn push_char(&mut self, ch: char) -> Result<()> {
        let attributes = self.styled.clone().unwrap_or_default();
        if self.text_len > 0 && attributes != self.text_attributes {
            self.flush_text()?;
        }
        self.text_attributes = attributes;
        self.text.push(ch);
        self.text_len += 1;
        Ok(())
    }

    fn flush_text(&mut self) -> Result<()> {
        if self.text_len == 0 {
            return Ok(());
        }
        let text = std::mem::take(&mut self.text);
        let attributes = std::mem::take(&mut self.text_attributes);
        let len = std::mem::take(&mut self.text_len);
        let node = self.doc.create_text(&text, attributes);
        let parent = self.top()?.node;
        self.doc.append_child(parent, node)?;
        self.top()?.offset += len;
        Ok(())
    }

    fn name(&mut self) -> Result<String> {
        let start = self.cursor;
        while self
            .peek()
            .is_some_and(|ch| ch.is_alphanumeric() || matches!(ch, '$' | '_' | '-' | ':'))
        {
            self.bump();
        }
        if self.cursor == start {
            return Err(self.error("expected a name"));
        }
        Ok(self.source[start..self.cursor].to_string())
    }

    fn tag(&mut self) -> Result<()> {
        self.eat('<')?;
        if self.peek() == Some('/') {
            self.bump();
            let name = self.name()?;
            self.skip_whitespace();
            self.eat('>')?;
            return self.close(&name);
        }

        let name = self.name()?;
        let mut attributes = Attributes::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('>') => {
                    self.bump();
                    return self.open(&name, attributes, false);
                }
                Some('/') => {
                    self.bump();
                    self.eat('>')?;
                    return self.open(&name, attributes, true);
                }
                Some(_) => {
                    let key = self.name()?;
                    self.eat('=')?;
                    self.eat('"')?;
                    let start = self.cursor;
                    while self.peek().is_some_and(|ch| ch != '"') {
                        self.bump();
                    }
                    let raw = &self.source[start..self.cursor];
                    let value = parse_value(raw);
                    self.eat('"')?;
                    attributes = attributes.insert(&key, value);
                }
                None => return Err(self.error(format!("unterminated tag <{name}"))),
            }
        }
    }

    fn open(&mut self, name: &str, attributes: Attributes, empty: bool) -> Result<()> {
        if name == TEXT_NAME {
            if empty {
                return Err(self.error("<$text/> cannot be empty"));
            }
            if self.styled.is_some() {
                return Err(self.error("nested <$text>"));
            }
            self.styled = Some(attributes);
            return Ok(());
        }
        if self.styled.is_some() {
            return Err(self.error(format!("element <{name}> inside <$text>")));
        }

        self.flush_text()?;
        let node = self.doc.create_element(name, attributes);
        let parent = self.top()?.node;
        self.doc.append_child(parent, node)?;
        self.top()?.offset += 1;
        if !empty {
            self.stack.push(Frame {
                node,
                name: name.to_string(),
                offset: 0,
            });
        }
        Ok(())
    }

    fn close(&mut self, name: &str) -> Result<()> {
        if name == TEXT_NAME {
            if self.styled.take().is_none() {
                return Err(self.error("</$text> without <$text>"));
            }
            return Ok(());
        }
        if self.styled.is_some() {
            return Err(self.error(format!("</{name}> inside <$text>")));
        }

        self.flush_text()?;
        if self.stack.len() < 2 {
            return Err(self.error(format!("unexpected </{name}>")));
        }
        let expected = self.top()?.name.clone();
        if expected != name {
            return Err(self.error(format!("expected </{expected}>, found </{name}>")));
        }
        self.stack.pop();
        Ok(())
    }
}

fn parse_value(raw: &str) -> AttributeValue {
    match raw {
        "true" => AttributeValue::Bool(true),
        "false" => AttributeValue::Bool(false),
        _ => raw
            .parse::<i64>()
            .map_or_else(|_| AttributeValue::from(raw), AttributeValue::Int),
    }
}

// =============================================================================
// Stringification
// =============================================================================

/// Renders the content of `root` in fixture markup.
///
/// Adjacent text nodes with equal attributes print as one run. Where a range
/// ends and another starts at the same spot, `]` comes first.
#[must_use]
pub fn stringify(doc: &Document, root: NodeId, selection: Option<&Selection>) -> String {
    let ranges = selection.map(Selection::ranges).unwrap_or_default();
    let mut out = String::new();
    write_children(doc, root, ranges, &mut out);
    out
}

fn markers_at(ranges: &[Range], parent: NodeId, offset: usize) -> String {
    let at = |position: &Position| position.parent() == parent && position.offset() == offset;
    let closing = ranges
        .iter()
        .filter(|r| !r.is_collapsed() && at(r.end()))
        .count();
    let carets = ranges
        .iter()
        .filter(|r| r.is_collapsed() && at(r.start()))
        .count();
    let opening = ranges
        .iter()
        .filter(|r| !r.is_collapsed() && at(r.start()))
        .count();
    format!("{}{}{}", "]".repeat(closing), "[]".repeat(carets), "[".repeat(opening))
}

fn write_children(doc: &Document, parent: NodeId, ranges: &[Range], out: &mut String) {
    let mut run: Option<(&Attributes, String)> = None;

    for offset in 0..=doc.max_offset(parent) {
        let next = doc.child_at_offset(parent, offset);

        let markers = markers_at(ranges, parent, offset);
        if !markers.is_empty() {
            // Inside styled text the markers stay within the <$text> run.
            let inside = matches!(
                (&run, next),
                (Some((attributes, _)), Some((node, _)))
                    if !attributes.is_empty()
                        && doc.is_text(node)
                        && doc.attributes(node) == *attributes
            );
            if !inside {
                flush_run(run.take(), out);
            }
            match &mut run {
                Some((_, text)) => text.push_str(&markers),
                None => out.push_str(&markers),
            }
        }

        let Some((node, start)) = next else {
            continue;
        };
        if doc.is_element(node) {
            flush_run(run.take(), out);
            write_element(doc, node, ranges, out);
            continue;
        }

        let attributes = doc.attributes(node);
        let ch = doc
            .text(node)
            .and_then(|text| text.chars().nth(offset - start))
            .unwrap_or_default();
        let same_run = matches!(&run, Some((current, _)) if *current == attributes);
        if !same_run {
            flush_run(run.take(), out);
            run = Some((attributes, String::new()));
        }
        if let Some((_, text)) = &mut run {
            text.push(ch);
        }
    }
    flush_run(run, out);
}

fn write_element(doc: &Document, node: NodeId, ranges: &[Range], out: &mut String) {
    let name = doc.name(node);
    out.push('<');
    out.push_str(name);
    write_attributes(doc.attributes(node), out);
    out.push('>');
    write_children(doc, node, ranges, out);
    let _ = write!(out, "</{name}>");
}

fn write_attributes(attributes: &Attributes, out: &mut String) {
    for (key, value) in attributes.iter() {
        let _ = write!(out, " {key}=\"{value}\"");
    }
}

fn flush_run(run: Option<(&Attributes, String)>, out: &mut String) {
    let Some((attributes, text)) = run else {
        return;
    };
    if attributes.is_empty() {
        out.push_str(&text);
    } else {
        out.push('<');
        out.push_str(TEXT_NAME);
        write_attributes(attributes, out);
        out.push('>');
        out.push_str(&text);
        let _ = write!(out, "</{TEXT_NAME}>");
    }
}

//! Shared documents for schema tests

use folio_foundation::NodeId;
use folio_model::Document;
use folio_model::markup::parse;
use folio_schema::SchemaContext;

/// A small tree with two roots:
///
/// ```text
/// $root
///   paragraph "foo"
///   paragraph[align=right] "bar"
///   blockQuote
///     paragraph "foo"
/// $root2
/// ```
pub struct Tree {
    pub doc: Document,
    pub root: NodeId,
    pub root2: NodeId,
    pub p1: NodeId,
    pub p2: NodeId,
    pub quote: NodeId,
    pub quoted_p: NodeId,
}

impl Tree {
    pub fn new() -> Self {
        let fixture = parse(
            "<paragraph>foo</paragraph>\
             <paragraph align=\"right\">bar</paragraph>\
             <blockQuote><paragraph>foo</paragraph></blockQuote>",
        )
        .unwrap();
        let mut doc = fixture.document;
        let root = fixture.root;
        let root2 = doc.create_root("$root2");

        let p1 = doc.children(root)[0];
        let p2 = doc.children(root)[1];
        let quote = doc.children(root)[2];
        let quoted_p = doc.children(quote)[0];

        Self {
            doc,
            root,
            root2,
            p1,
            p2,
            quote,
            quoted_p,
        }
    }

    /// The context of a node: its ancestors and itself.
    pub fn ctx(&self, node: NodeId) -> SchemaContext {
        SchemaContext::new(&self.doc, node)
    }

    /// The first child of a node.
    pub fn first_child(&self, node: NodeId) -> NodeId {
        self.doc.children(node)[0]
    }

    /// Appends a new empty element and returns it.
    pub fn append(&mut self, parent: NodeId, name: &str) -> NodeId {
        let element = self.doc.create_element(name, Default::default());
        self.doc.append_child(parent, element).unwrap();
        element
    }
}

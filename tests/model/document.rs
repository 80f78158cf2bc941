//! Integration tests for the document tree and mutation batches

use folio_foundation::{Attributes, ErrorKind};
use folio_model::{Batch, Document, MutationSink, Operation, TEXT_NAME};

// =============================================================================
// Building
// =============================================================================

#[test]
fn build_tree() {
    let mut doc = Document::new();
    let root = doc.create_root("$root");
    let paragraph = doc.create_element("paragraph", Attributes::new().insert("align", "left"));
    let text = doc.create_text("foo", Attributes::new());
    doc.append_child(root, paragraph).unwrap();
    doc.append_child(paragraph, text).unwrap();

    assert_eq!(doc.len(), 3);
    assert_eq!(doc.children(root), &[paragraph]);
    assert_eq!(doc.parent(text), Some(paragraph));
    assert_eq!(doc.name(paragraph), "paragraph");
    assert_eq!(doc.name(text), TEXT_NAME);
    assert_eq!(doc.text(text), Some("foo"));
    assert_eq!(doc.attribute(paragraph, "align").and_then(|v| v.as_str()), Some("left"));
}

#[test]
fn text_offsets_count_characters() {
    let mut doc = Document::new();
    let root = doc.create_root("$root");
    let text = doc.create_text("żółw", Attributes::new());
    let image = doc.create_element("image", Attributes::new());
    doc.append_children(root, [text, image]).unwrap();

    assert_eq!(doc.offset_size(text), 4);
    assert_eq!(doc.offset_size(image), 1);
    assert_eq!(doc.max_offset(root), 5);
    assert_eq!(doc.start_offset(image), Some(4));
    assert_eq!(doc.end_offset(image), Some(5));
    assert_eq!(doc.child_at_offset(root, 2), Some((text, 0)));
    assert_eq!(doc.child_at_offset(root, 4), Some((image, 4)));
    assert_eq!(doc.child_at_offset(root, 5), None);
}

#[test]
fn append_rejections() {
    let mut doc = Document::new();
    let root = doc.create_root("$root");
    let div = doc.create_element("div", Attributes::new());
    let text = doc.create_text("x", Attributes::new());
    doc.append_child(root, div).unwrap();
    doc.append_child(div, text).unwrap();

    let other = doc.create_element("p", Attributes::new());
    let err = doc.append_child(text, other).unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotAnElement(text));

    let err = doc.append_child(root, div).unwrap_err();
    assert_eq!(err.kind, ErrorKind::AlreadyAttached(div));

    let err = doc.append_child(div, root).unwrap_err();
    assert_eq!(err.kind, ErrorKind::AncestorInsertion(root));
}

// =============================================================================
// Ancestry
// =============================================================================

#[test]
fn ancestry_queries() {
    let mut doc = Document::new();
    let root = doc.create_root("$root");
    let section = doc.create_element("section", Attributes::new());
    let left = doc.create_element("article", Attributes::new());
    let right = doc.create_element("article", Attributes::new());
    doc.append_child(root, section).unwrap();
    doc.append_children(section, [left, right]).unwrap();

    assert_eq!(doc.ancestors(right), vec![root, section]);
    assert_eq!(doc.path(right), vec![0, 1]);
    assert_eq!(doc.root_of(right), root);
    assert!(doc.is_ancestor_of(root, right));
    assert!(!doc.is_ancestor_of(right, right));
    assert_eq!(doc.common_ancestor(left, right), Some(section));
    assert_eq!(doc.common_ancestor(section, right), Some(section));

    let detached = doc.create_root("$other");
    assert_eq!(doc.common_ancestor(left, detached), None);
}

// =============================================================================
// Batches
// =============================================================================

#[test]
fn batch_records_then_applies() {
    let mut doc = Document::new();
    let root = doc.create_root("$root");
    let image = doc.create_element("image", Attributes::new().insert("a", 1).insert("b", 1));
    doc.append_child(root, image).unwrap();

    let mut batch = Batch::new();
    batch.remove_attribute(image, "a");
    assert_eq!(
        batch.operations(),
        &[Operation::RemoveAttribute {
            node: image,
            key: "a".to_string()
        }]
    );
    // Recording does not touch the tree.
    assert!(doc.attributes(image).contains_key("a"));

    doc.apply(&batch);
    let keys: Vec<&str> = doc.attributes(image).keys().collect();
    assert_eq!(keys, vec!["b"]);
}

#[test]
fn document_is_a_sink() {
    let mut doc = Document::new();
    let root = doc.create_root("$root");
    doc.set_attribute(root, "lang", "en");

    MutationSink::remove_attribute(&mut doc, root, "lang");
    MutationSink::remove_attribute(&mut doc, root, "missing");
    assert!(doc.attributes(root).is_empty());
}

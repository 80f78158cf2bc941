//! Integration tests for child and attribute checks
//!
//! Covers every way of describing a context and the listener pipeline.

use std::cell::RefCell;
use std::rc::Rc;

use folio_model::{Item, Position, TEXT_NAME, TextProxy};
use folio_schema::{
    CheckEvent, ContextEntry, Decision, Priority, RuleFragment, Schema, SchemaContext,
};

use crate::fixtures::Tree;

fn paragraph_schema() -> Schema {
    let mut schema = Schema::new();
    schema.register("$root", RuleFragment::new()).unwrap();
    schema
        .register("paragraph", RuleFragment::new().allow_in("$root"))
        .unwrap();
    schema
        .register(TEXT_NAME, RuleFragment::new().allow_in("paragraph"))
        .unwrap();
    schema
}

fn attribute_schema() -> Schema {
    let mut schema = Schema::new();
    schema
        .register("paragraph", RuleFragment::new().allow_attributes("align"))
        .unwrap();
    schema
        .register(TEXT_NAME, RuleFragment::new().allow_attributes("bold"))
        .unwrap();
    schema
}

// =============================================================================
// check_child contexts
// =============================================================================

#[test]
fn element_context() {
    let tree = Tree::new();
    let schema = paragraph_schema();

    assert!(schema.check_child(tree.ctx(tree.root), "paragraph"));
    assert!(!schema.check_child(tree.ctx(tree.root), TEXT_NAME));
}

#[test]
fn position_context() {
    let tree = Tree::new();
    let schema = paragraph_schema();
    let in_root = Position::at(&tree.doc, tree.root, 0).unwrap();
    let in_paragraph = Position::at(&tree.doc, tree.p1, 0).unwrap();

    assert!(schema.check_child(SchemaContext::new(&tree.doc, &in_root), "paragraph"));
    assert!(!schema.check_child(SchemaContext::new(&tree.doc, &in_root), TEXT_NAME));

    assert!(schema.check_child(SchemaContext::new(&tree.doc, &in_paragraph), TEXT_NAME));
    assert!(!schema.check_child(SchemaContext::new(&tree.doc, in_paragraph), "paragraph"));
}

#[test]
fn name_list_context() {
    let schema = paragraph_schema();

    assert!(schema.check_child(["$root"], "paragraph"));
    assert!(!schema.check_child(["$root"], TEXT_NAME));

    assert!(schema.check_child(vec!["$root", "paragraph"], TEXT_NAME));
    assert!(!schema.check_child(vec!["$root", "paragraph"], "paragraph"));
}

#[test]
fn element_list_context() {
    let tree = Tree::new();
    let schema = paragraph_schema();
    let in_root = SchemaContext::new(&tree.doc, vec![ContextEntry::from(tree.root)]);
    let in_paragraph = SchemaContext::new(
        &tree.doc,
        vec![ContextEntry::from(tree.root), ContextEntry::from(tree.p1)],
    );

    assert!(schema.check_child(&in_root, "paragraph"));
    assert!(!schema.check_child(&in_root, TEXT_NAME));
    assert!(schema.check_child(&in_paragraph, TEXT_NAME));
    assert!(!schema.check_child(&in_paragraph, "paragraph"));
}

#[test]
fn mixed_list_context() {
    let tree = Tree::new();
    let schema = paragraph_schema();
    let context = SchemaContext::new(
        &tree.doc,
        vec![ContextEntry::from("$root"), ContextEntry::from(tree.p1)],
    );

    assert!(schema.check_child(&context, TEXT_NAME));
    assert!(!schema.check_child(&context, "paragraph"));
}

#[test]
fn node_as_child() {
    let tree = Tree::new();
    let schema = paragraph_schema();
    let text = tree.first_child(tree.p1);

    assert!(schema.check_child_node(&tree.doc, tree.ctx(tree.root), tree.p1));
    assert!(!schema.check_child_node(&tree.doc, tree.ctx(tree.root), text));
    assert!(schema.check_child_node(&tree.doc, tree.ctx(tree.p1), text));
    assert!(!schema.check_child_node(&tree.doc, tree.ctx(tree.p1), tree.quote));
}

// =============================================================================
// check_attribute contexts
// =============================================================================

#[test]
fn attribute_on_element() {
    let tree = Tree::new();
    let schema = attribute_schema();

    assert!(schema.check_attribute(tree.ctx(tree.p1), "align"));
    assert!(!schema.check_attribute(tree.ctx(tree.p1), "bold"));
}

#[test]
fn attribute_on_text() {
    let tree = Tree::new();
    let schema = attribute_schema();
    let text = tree.first_child(tree.p1);

    assert!(schema.check_attribute(tree.ctx(text), "bold"));
    assert!(!schema.check_attribute(tree.ctx(text), "align"));

    let proxy = TextProxy::new(text, 1, 2);
    assert!(schema.check_attribute(SchemaContext::new(&tree.doc, proxy), "bold"));
    assert!(schema.check_attribute(SchemaContext::new(&tree.doc, Item::Text(proxy)), "bold"));
}

#[test]
fn bare_text_name_context() {
    let schema = attribute_schema();
    assert!(schema.check_attribute([TEXT_NAME], "bold"));
    assert!(!schema.check_attribute(SchemaContext::default(), "bold"));
}

// =============================================================================
// Listeners
// =============================================================================

#[test]
fn high_listener_overrides_default() {
    let tree = Tree::new();
    let mut schema = paragraph_schema();
    schema.on_check_child(Priority::High, |event: &CheckEvent<'_>| {
        if event.name == "paragraph" && event.context.match_end("paragraph") {
            Decision::Resolve(true)
        } else {
            Decision::Pass
        }
    });

    assert!(schema.check_child(tree.ctx(tree.p1), "paragraph"));
    assert!(schema.check_child(tree.ctx(tree.root), "paragraph"));
    assert!(!schema.check_child(tree.ctx(tree.root), TEXT_NAME));
}

#[test]
fn listeners_run_by_priority() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut schema = paragraph_schema();

    for (tag, priority) in [
        ("low", Priority::Low),
        ("highest", Priority::Highest),
        ("normal", Priority::Normal),
        ("lowest", Priority::Lowest),
        ("high", Priority::High),
    ] {
        let log = Rc::clone(&log);
        schema.on_check_child(priority, move |event: &CheckEvent<'_>| {
            log.borrow_mut().push((tag, event.pending));
            Decision::Pass
        });
    }

    assert!(schema.check_child(["$root"], "paragraph"));
    assert_eq!(
        *log.borrow(),
        vec![
            ("highest", None),
            ("high", None),
            ("normal", None),
            ("low", None),
            ("lowest", Some(true)),
        ]
    );
}

#[test]
fn lowest_listener_can_veto_default() {
    let mut schema = paragraph_schema();
    schema.on_check_child(Priority::Lowest, |event: &CheckEvent<'_>| {
        if event.pending == Some(true) && event.name == TEXT_NAME {
            Decision::Resolve(false)
        } else {
            Decision::Pass
        }
    });

    assert!(!schema.check_child(["$root", "paragraph"], TEXT_NAME));
    assert!(schema.check_child(["$root"], "paragraph"));
}

#[test]
fn listeners_are_not_called_for_unregistered_children() {
    let calls = Rc::new(RefCell::new(0));
    let mut schema = paragraph_schema();
    {
        let calls = Rc::clone(&calls);
        schema.on_check_child(Priority::High, move |_: &CheckEvent<'_>| {
            *calls.borrow_mut() += 1;
            Decision::Pass
        });
    }

    assert!(!schema.check_child(["$root"], "foo404"));
    assert_eq!(*calls.borrow(), 0);
    assert!(schema.check_child(["$root"], "paragraph"));
    assert_eq!(*calls.borrow(), 1);
}

#[test]
fn listener_sees_context_attributes() {
    let tree = Tree::new();
    let mut schema = attribute_schema();
    schema.on_check_attribute(Priority::High, |event: &CheckEvent<'_>| {
        let right_aligned = event
            .context
            .last()
            .and_then(|item| item.attribute("align"))
            .and_then(|value| value.as_str())
            == Some("right");
        if right_aligned && event.name == "align" {
            Decision::Resolve(false)
        } else {
            Decision::Pass
        }
    });

    assert!(schema.check_attribute(tree.ctx(tree.p1), "align"));
    assert!(!schema.check_attribute(tree.ctx(tree.p2), "align"));
}

#[test]
fn off_restores_default() {
    let mut schema = paragraph_schema();
    let id = schema.on_check_child(Priority::Highest, |_: &CheckEvent<'_>| Decision::Resolve(false));

    assert!(!schema.check_child(["$root"], "paragraph"));
    assert!(schema.off(id));
    assert!(schema.check_child(["$root"], "paragraph"));
    assert!(!schema.off(id));
}

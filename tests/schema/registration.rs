//! Integration tests for registering, extending, and reading compiled rules

use std::rc::Rc;

use folio_foundation::ErrorKind;
use folio_schema::{CompiledRule, RuleFragment, Schema};

fn rule(name: &str, allow_in: &[&str], allow_attributes: &[&str]) -> CompiledRule {
    CompiledRule {
        name: name.to_string(),
        allow_in: allow_in.iter().map(ToString::to_string).collect(),
        allow_attributes: allow_attributes.iter().map(ToString::to_string).collect(),
        types: Default::default(),
    }
}

// =============================================================================
// register / extend
// =============================================================================

#[test]
fn register_item() {
    let mut schema = Schema::new();
    schema.register("foo", RuleFragment::new()).unwrap();

    assert!(schema.get_rule("foo").is_some());
    assert!(schema.is_registered("foo"));
    assert!(!schema.is_registered("bar"));
}

#[test]
fn register_copies_fragment() {
    let mut schema = Schema::new();
    let mut fragment = RuleFragment::new();
    schema.register("foo", fragment.clone()).unwrap();

    fragment = fragment.is_block(true);
    assert!(fragment.types.contains_key("block"));
    assert!(!schema.is_block("foo"));
}

#[test]
fn register_twice_fails() {
    let mut schema = Schema::new();
    schema.register("foo", RuleFragment::new()).unwrap();

    let err = schema.register("foo", RuleFragment::new()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::DuplicateRegistration("foo".to_string()));
    assert!(err.to_string().contains("cannot register item twice"));
}

#[test]
fn extend_item() {
    let mut schema = Schema::new();
    schema.register("foo", RuleFragment::new()).unwrap();
    schema
        .extend("foo", RuleFragment::new().is_block(true))
        .unwrap();

    assert!(schema.get_rule("foo").unwrap().is_block());
}

#[test]
fn extend_missing_fails() {
    let mut schema = Schema::new();
    let err = schema.extend("foo", RuleFragment::new()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnknownItemExtended("foo".to_string()));
    assert!(err.to_string().contains("cannot extend missing item"));
}

// =============================================================================
// get_rules
// =============================================================================

#[test]
fn returns_compiled_rules() {
    let mut schema = Schema::new();
    schema.register("$root", RuleFragment::new()).unwrap();
    schema
        .register("foo", RuleFragment::new().allow_in("$root"))
        .unwrap();
    schema
        .extend("foo", RuleFragment::new().is_block(true))
        .unwrap();

    let mut expected = rule("foo", &["$root"], &[]);
    expected.types.insert("block".to_string(), true);
    assert_eq!(**schema.get_rules().get("foo").unwrap(), expected);
}

#[test]
fn copies_all_flags_last_write_wins() {
    let mut schema = Schema::new();
    schema
        .register(
            "foo",
            RuleFragment::new().is_block(true).flag("foo", true),
        )
        .unwrap();
    schema
        .extend("foo", RuleFragment::new().flag("bar", true).flag("foo", false))
        .unwrap();

    let rule = schema.get_rule("foo").unwrap();
    assert!(rule.is_block());
    assert_eq!(rule.types.get("foo"), Some(&false));
    assert!(rule.is("bar"));
    assert!(schema.is("foo", "bar"));
}

#[test]
fn does_not_recompile_without_changes() {
    let mut schema = Schema::new();
    schema.register("foo", RuleFragment::new()).unwrap();

    assert!(Rc::ptr_eq(&schema.get_rules(), &schema.get_rules()));
}

#[test]
fn no_duplicates_in_allow_in() {
    let mut schema = Schema::new();
    schema.register("$root", RuleFragment::new()).unwrap();
    schema
        .register("foo", RuleFragment::new().allow_in("$root"))
        .unwrap();
    schema
        .extend("foo", RuleFragment::new().allow_in("$root"))
        .unwrap();

    assert_eq!(*schema.get_rule("foo").unwrap(), rule("foo", &["$root"], &[]));
}

#[test]
fn no_unregistered_items_in_allow_in() {
    let mut schema = Schema::new();
    schema
        .register("foo", RuleFragment::new().allow_in("$root"))
        .unwrap();

    assert_eq!(*schema.get_rule("foo").unwrap(), rule("foo", &[], &[]));
}

#[test]
fn no_duplicates_in_allow_attributes() {
    let mut schema = Schema::new();
    schema
        .register("paragraph", RuleFragment::new().allow_attributes("foo"))
        .unwrap();
    schema
        .extend("paragraph", RuleFragment::new().allow_attributes("foo"))
        .unwrap();

    assert_eq!(
        *schema.get_rule("paragraph").unwrap(),
        rule("paragraph", &[], &["foo"])
    );
}

#[test]
fn no_duplicates_from_allow_attributes_of() {
    let mut schema = Schema::new();
    schema
        .register(
            "paragraph",
            RuleFragment::new()
                .allow_attributes("foo")
                .allow_attributes_of("$block"),
        )
        .unwrap();
    schema
        .register("$block", RuleFragment::new().allow_attributes("foo"))
        .unwrap();

    assert_eq!(
        *schema.get_rule("paragraph").unwrap(),
        rule("paragraph", &[], &["foo"])
    );
}

// =============================================================================
// Type flags
// =============================================================================

#[test]
fn type_flags() {
    let mut schema = Schema::new();
    schema
        .register("block", RuleFragment::new().is_block(true))
        .unwrap();
    schema
        .register("limit", RuleFragment::new().is_limit(true))
        .unwrap();
    schema
        .register("object", RuleFragment::new().is_object(true))
        .unwrap();
    schema.register("plain", RuleFragment::new()).unwrap();

    assert!(schema.is_block("block"));
    assert!(schema.is_limit("limit"));
    assert!(schema.is_object("object"));

    for name in ["plain", "unregistered"] {
        assert!(!schema.is_block(name), "{name}");
        assert!(!schema.is_limit(name), "{name}");
        assert!(!schema.is_object(name), "{name}");
    }
}

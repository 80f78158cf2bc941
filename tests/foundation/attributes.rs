//! Integration tests for persistent attribute maps
//!
//! Tests sorted iteration, structural sharing, and immutability.

use folio_foundation::{AttributeValue, Attributes};

#[test]
fn empty_map() {
    let attrs = Attributes::new();
    assert!(attrs.is_empty());
    assert_eq!(attrs.len(), 0);
    assert_eq!(attrs.get("bold"), None);
}

#[test]
fn insert_is_persistent() {
    let a1 = Attributes::new().insert("bold", true);
    let a2 = a1.insert("italic", true);

    // a1 is unchanged
    assert_eq!(a1.len(), 1);
    assert!(!a1.contains_key("italic"));
    assert_eq!(a2.len(), 2);
}

#[test]
fn remove_is_persistent() {
    let a1 = Attributes::new().insert("a", 1).insert("b", 2);
    let a2 = a1.remove("a");

    assert_eq!(a1.get("a"), Some(&AttributeValue::Int(1)));
    assert_eq!(a2.get("a"), None);
    assert_eq!(a2.remove("missing"), a2);
}

#[test]
fn keys_are_sorted() {
    let attrs: Attributes = [("title", "t"), ("align", "left"), ("name", "n")]
        .into_iter()
        .collect();
    let keys: Vec<&str> = attrs.keys().collect();
    assert_eq!(keys, vec!["align", "name", "title"]);
}

#[test]
fn insert_overwrites() {
    let attrs = Attributes::new().insert("level", 1).insert("level", 2);
    assert_eq!(attrs.len(), 1);
    assert_eq!(attrs.get("level").and_then(AttributeValue::as_int), Some(2));
}

#[test]
fn equality_ignores_insertion_order() {
    let a = Attributes::new().insert("x", 1).insert("y", 2);
    let b = Attributes::new().insert("y", 2).insert("x", 1);
    assert_eq!(a, b);
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn keys_stay_sorted_and_unique(keys in prop::collection::vec("[a-z]{1,6}", 0..20)) {
            let attrs = keys
                .iter()
                .fold(Attributes::new(), |acc, key| acc.insert(key, true));
            let collected: Vec<&str> = attrs.keys().collect();

            let mut expected: Vec<&str> = keys.iter().map(String::as_str).collect();
            expected.sort_unstable();
            expected.dedup();
            prop_assert_eq!(collected, expected);
        }

        #[test]
        fn remove_undoes_insert(key in "[a-z]{1,6}", value in any::<i64>()) {
            let base = Attributes::new().insert("fixed", 0);
            prop_assume!(key != "fixed");
            prop_assert_eq!(base.insert(&key, value).remove(&key), base);
        }
    }
}

//! Integration tests for attribute values and node ids

use folio_foundation::{AttributeValue, NodeId};

#[test]
fn value_accessors() {
    assert_eq!(AttributeValue::from(true).as_bool(), Some(true));
    assert_eq!(AttributeValue::from(3_i64).as_int(), Some(3));
    assert_eq!(AttributeValue::from(3).as_int(), Some(3));
    assert_eq!(AttributeValue::from("left").as_str(), Some("left"));

    assert_eq!(AttributeValue::from("left").as_bool(), None);
    assert_eq!(AttributeValue::from(true).as_str(), None);
}

#[test]
fn value_display() {
    assert_eq!(AttributeValue::from(false).to_string(), "false");
    assert_eq!(AttributeValue::from(-4).to_string(), "-4");
    assert_eq!(AttributeValue::from(String::from("x")).to_string(), "x");
}

#[test]
fn value_equality_is_typed() {
    assert_ne!(AttributeValue::from(1), AttributeValue::from("1"));
    assert_ne!(AttributeValue::from(true), AttributeValue::from("true"));
}

#[test]
fn node_id_round_trips_index() {
    let id = NodeId::new(12);
    assert_eq!(id.index(), 12);
    assert_eq!(id.to_string(), "node#12");
    assert_eq!(format!("{id:?}"), "NodeId(12)");
    assert!(NodeId::new(1) < NodeId::new(2));
}

//! Integration tests for error kinds and messages

use folio_foundation::{Error, ErrorKind, NodeId};

#[test]
fn schema_errors_name_the_item() {
    let err = Error::duplicate_registration("paragraph");
    assert_eq!(
        err.kind,
        ErrorKind::DuplicateRegistration("paragraph".to_string())
    );
    assert!(err.to_string().contains("paragraph"));

    let err = Error::unknown_item_extended("ghost");
    assert!(matches!(err.kind, ErrorKind::UnknownItemExtended(ref name) if name == "ghost"));
    assert!(err.to_string().contains("ghost"));
}

#[test]
fn tree_errors_name_the_node() {
    let node = NodeId::new(3);
    assert!(Error::not_an_element(node).to_string().contains("node#3"));
    assert!(Error::already_attached(node).to_string().contains("node#3"));
    assert!(Error::ancestor_insertion(node).to_string().contains("node#3"));
}

#[test]
fn position_and_markup_errors() {
    let err = Error::invalid_position(&[0, 9]);
    assert_eq!(err.kind, ErrorKind::InvalidPosition(vec![0, 9]));

    let err = Error::invalid_markup("unclosed element <p>", 12);
    let message = err.to_string();
    assert!(message.contains("byte 12"));
    assert!(message.contains("unclosed element <p>"));
}

#[test]
fn errors_are_std_errors() {
    fn takes_error(_: &dyn std::error::Error) {}
    takes_error(&Error::duplicate_registration("x"));
}

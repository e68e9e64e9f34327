//! Tests for logging initialization
//!
//! A global subscriber can only be installed once per process, so these
//! tests only check that initialization never panics and that bad formats
//! are rejected before any install is attempted.

use std::str::FromStr;

use diagram_store::core::logging::{init_logging, LogFormat};
use diagram_store::prelude::*;

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("Pretty").unwrap(), LogFormat::Pretty);
    assert!(LogFormat::from_str("yaml").is_err());
}

#[test]
fn test_init_logging_invalid_format() {
    let result = init_logging(Some("info"), Some("invalid_format"));
    assert!(result.is_err());
}

#[test]
fn test_store_operations_with_subscriber() {
    let _ = init_logging(Some("trace"), Some("compact"));

    let mut store = DiagramStore::new();
    let actor = store.add_actor(Position::new(1.0, 2.0));
    store.update_element_position(&actor.id, Position::new(3.0, 4.0));
    store.remove_element(&actor.id);
    store.remove_element("never-existed");

    assert!(store.is_empty());
}

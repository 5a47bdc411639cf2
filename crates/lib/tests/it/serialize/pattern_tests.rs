//! Tests for reading and writing regular expression patterns.

use std::error::Error as _;

use configtree::{ConfigNode, Value};
use regex::Regex;

#[test]
fn test_pattern_round_trip() {
    let mut root = ConfigNode::root();
    root.entry("filter")
        .set_value(Regex::new("a.*b").unwrap())
        .unwrap();
    assert_eq!(
        root.lookup("filter").and_then(ConfigNode::get_string).as_deref(),
        Some("a.*b")
    );

    let pattern: Regex = root.entry("filter").get_value().unwrap();
    assert_eq!(pattern.as_str(), "a.*b");
    assert!(pattern.is_match("axxxb"));
    assert!(!pattern.is_match("bxxxa"));
}

#[test]
fn test_invalid_pattern_exposes_regex_error() {
    let mut root = ConfigNode::root();
    root.entry("filter").set("a(b");

    let err = root.entry("filter").get_value::<Regex>().unwrap_err();
    assert!(err.is_invalid_value());
    assert_eq!(err.path().to_string(), "filter");
    let cause = err.source().expect("regex error kept as source");
    assert!(cause.downcast_ref::<regex::Error>().is_some());
}

#[test]
fn test_missing_pattern() {
    let mut root = ConfigNode::root();
    let err = root.entry("filter").get_value::<Regex>().unwrap_err();
    assert!(err.is_missing());
    assert!(root.entry("filter").get_optional::<Regex>().unwrap().is_none());
}

#[test]
fn test_pattern_lists() {
    let mut root = ConfigNode::root();
    root.entry("allow").set(vec!["^10\\.", "^192\\.168\\."]);
    let allow: Vec<Regex> = root.entry("allow").get_value().unwrap();
    assert!(allow.iter().any(|p| p.is_match("192.168.1.1")));

    root.entry("allow").set(Value::list_of(["ok", "bad("]));
    let err = root.entry("allow").get_value::<Vec<Regex>>().unwrap_err();
    assert_eq!(err.path().to_string(), "allow.1");
}

#[test]
fn test_non_text_scalars_compile_as_text() {
    let mut root = ConfigNode::root();
    root.set(42);
    let pattern: Regex = root.get_value().unwrap();
    assert!(pattern.is_match("x42x"));
}

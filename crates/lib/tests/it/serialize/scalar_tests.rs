//! Tests for the built-in scalar and identifier serializers.

use configtree::{ConfigNode, ConfigurationOptions, Value};
use url::Url;
use uuid::Uuid;

use crate::helpers::*;

#[test]
fn test_numbers_through_the_tree() {
    let mut root = service_tree();
    assert_eq!(root.entry("listen.port").get_value::<u16>().unwrap(), 8080);
    assert_eq!(root.entry("listen.port").get_value::<f64>().unwrap(), 8080.0);

    let err = root.entry("listen.port").get_value::<u8>().unwrap_err();
    assert!(err.is_invalid_value());
    assert_eq!(err.path().to_string(), "listen.port");

    let err = root.entry("listen.host").get_value::<u16>().unwrap_err();
    assert!(err.is_type_mismatch());
}

#[test]
fn test_get_value_or_only_defaults_absent() {
    let mut root = service_tree();
    assert_eq!(root.entry("listen.backlog").get_value_or(128u32).unwrap(), 128);
    assert_eq!(root.entry("listen.port").get_value_or(1u32).unwrap(), 8080);
    assert!(root.entry("listen.host").get_value_or(1u32).is_err());
    assert!(root.lookup("listen.backlog").is_none());
}

#[test]
fn test_strings_and_bools() {
    let mut root = ConfigNode::root();
    root.entry("debug").set("on");
    root.entry("level").set(3);
    assert!(root.entry("debug").get_value::<bool>().unwrap());
    assert_eq!(root.entry("level").get_value::<String>().unwrap(), "3");

    root.entry("debug").set_value(false).unwrap();
    assert_eq!(root.entry("debug").get(), Value::Bool(false));
}

#[test]
fn test_raw_value_copies_subtree() {
    let mut root = service_tree();
    let listen: Value = root.entry("listen").get_value().unwrap();
    assert_eq!(listen, Value::map_of([("host", Value::from("0.0.0.0")), ("port", Value::from(8080))]));

    root.entry("copy").set_value(listen).unwrap();
    assert_eq!(root.lookup("copy"), root.lookup("listen"));
}

#[test]
fn test_url_normalizes() {
    let mut root = ConfigNode::root();
    root.entry("endpoint").set("http://example.com");
    let url: Url = root.entry("endpoint").get_value().unwrap();
    assert_eq!(url.as_str(), "http://example.com/");

    root.entry("endpoint").set_value(url).unwrap();
    assert_eq!(root.entry("endpoint").get(), Value::from("http://example.com/"));
}

#[test]
fn test_uuid_round_trip() {
    let id = Uuid::new_v4();
    let mut root = ConfigNode::new(ConfigurationOptions::defaults());
    root.entry("node_id").set_value(id).unwrap();
    assert_eq!(root.entry("node_id").get(), Value::from(id.to_string()));
    assert_eq!(root.entry("node_id").get_value::<Uuid>().unwrap(), id);

    root.entry("node_id").set("not a uuid");
    assert!(root.entry("node_id").get_value::<Uuid>().unwrap_err().is_invalid_value());
}

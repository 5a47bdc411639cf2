//! Tests for list, map and optional conversions.

use std::collections::{BTreeMap, HashMap};

use configtree::{ConfigNode, NodeKind, Value};

use crate::helpers::*;

#[test]
fn test_list_round_trip() {
    let mut root = ConfigNode::root();
    root.entry("ports").set_value(vec![80u16, 443]).unwrap();
    assert_eq!(root.entry("ports").kind(), NodeKind::List);
    assert_eq!(root.entry("ports").get(), Value::list_of([80, 443]));
    assert_eq!(root.entry("ports").get_value::<Vec<u16>>().unwrap(), vec![80, 443]);
}

#[test]
fn test_nested_collections() {
    let mut root = service_tree();
    let servers: Vec<HashMap<String, String>> = root.entry("servers").get_value().unwrap();
    assert_eq!(servers.len(), 2);
    assert_eq!(servers[0]["host"], "a.internal");

    let mut groups = BTreeMap::new();
    groups.insert("web".to_string(), vec![String::from("a"), String::from("b")]);
    groups.insert("db".to_string(), vec![]);
    root.entry("groups").set_value(groups.clone()).unwrap();
    assert_keys(&root, "groups", &["db", "web"]);
    assert_eq!(
        root.entry("groups").get_value::<BTreeMap<String, Vec<String>>>().unwrap(),
        groups
    );
}

#[test]
fn test_map_keeps_node_order() {
    let mut root = ConfigNode::root();
    root.set(Value::map_of([("z", 1), ("a", 2)]));
    let value: Value = root.get_value().unwrap();
    let keys: Vec<_> = value.as_map().unwrap().keys().cloned().collect();
    assert_eq!(keys, vec!["z", "a"]);

    let typed: HashMap<String, i64> = root.get_value().unwrap();
    assert_eq!(typed["a"], 2);
}

#[test]
fn test_list_where_map_expected() {
    let mut root = service_tree();
    let err = root.entry("servers").get_value::<HashMap<String, String>>().unwrap_err();
    assert!(err.is_type_mismatch());
    assert_eq!(err.path().to_string(), "servers");

    let err = root.entry("listen").get_value::<Vec<String>>().unwrap_err();
    assert!(err.is_type_mismatch());
}

#[test]
fn test_nested_error_paths() {
    let mut root = service_tree();
    root.entry("servers.1.port").set("high");
    let err = root
        .entry("servers")
        .get_value::<Vec<HashMap<String, u16>>>()
        .unwrap_err();
    assert_eq!(err.path().to_string(), "servers.0.host");

    let err = root
        .lookup("servers.1")
        .unwrap()
        .get_value::<HashMap<String, u16>>()
        .unwrap_err();
    assert_eq!(err.path().to_string(), "host");
}

#[test]
fn test_optional_values() {
    let mut root = ConfigNode::root();
    assert_eq!(root.entry("timeout").get_value::<Option<u32>>().unwrap(), None);

    root.entry("timeout").set_value(Some(30u32)).unwrap();
    assert_eq!(root.entry("timeout").get_optional::<u32>().unwrap(), Some(30));

    // writing None detaches the node
    root.entry("timeout").set_value(None::<u32>).unwrap();
    assert!(root.lookup("timeout").is_none());
    assert!(root.is_map());
    assert_eq!(root.child_count(), 0);
}

#[test]
fn test_large_unsigned_elements() {
    let mut root = service_tree();
    let before = root.clone();

    // u64 values above i64::MAX are stored as text
    root.entry("big").set_value(vec![u64::MAX]).unwrap();
    assert_eq!(root.entry("big.0").get(), Value::Text(u64::MAX.to_string()));
    assert_eq!(root.entry("big.0").get_value::<u64>().unwrap(), u64::MAX);

    root.entry("big").set(Value::Null);
    assert_eq!(root, before);
}

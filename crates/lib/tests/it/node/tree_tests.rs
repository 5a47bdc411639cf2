//! Tests for ConfigNode content, removal and merging.

use configtree::{ConfigNode, ConfigurationOptions, Key, NodeKind, Value, path};

use crate::helpers::*;

#[test]
fn test_get_returns_detached_copy() {
    let root = service_tree();
    let mut copy = root.get();
    if let Value::Map(map) = &mut copy {
        map.insert("name".into(), Value::from("changed"));
    }
    assert_eq!(root.lookup("name").and_then(ConfigNode::get_string).as_deref(), Some("edge"));
    assert_eq!(root.get(), service_value());
}

#[test]
fn test_kinds_follow_content() {
    let mut root = ConfigNode::root();
    assert_eq!(root.kind(), NodeKind::Absent);

    root.set(1.5);
    assert_eq!(root.kind(), NodeKind::Scalar);

    root.set(vec!["a", "b"]);
    assert_eq!(root.kind(), NodeKind::List);

    root.set(Value::empty_map());
    assert_eq!(root.kind(), NodeKind::Map);
    assert_eq!(root.child_count(), 0);

    root.clear();
    assert_eq!(root.kind(), NodeKind::Absent);
}

#[test]
fn test_replacing_shape_drops_children() {
    let mut root = service_tree();
    root.entry("servers").set("none");
    assert!(root.lookup("servers.0").is_none());
    assert_eq!(root.lookup("servers").and_then(ConfigNode::get_string).as_deref(), Some("none"));
}

#[test]
fn test_lookup_by_keys_and_macro() {
    let root = service_tree();
    let by_string = root.lookup("servers.1.host").unwrap();
    let by_macro = root.lookup(path!("servers", 1usize, "host")).unwrap();
    assert_eq!(by_string, by_macro);
    assert_eq!(by_macro.get_string().as_deref(), Some("b.internal"));

    assert!(root.lookup("servers.2.host").is_none());
    assert!(root.lookup("name.deeper").is_none());
}

#[test]
fn test_remove_list_element_shifts() {
    let mut root = service_tree();
    let removed = root.entry("servers.0").remove().unwrap();
    assert_eq!(removed.lookup("host").and_then(ConfigNode::get_string).as_deref(), Some("a.internal"));
    assert_eq!(
        root.lookup("servers.0.host").and_then(ConfigNode::get_string).as_deref(),
        Some("b.internal")
    );
}

#[test]
fn test_merge_keeps_existing_values() {
    let mut root = ConfigNode::from_value(
        ConfigurationOptions::defaults(),
        Value::map_of([
            ("name", Value::from("override")),
            ("listen", Value::map_of([("port", 9090)])),
        ]),
    );
    root.merge_from(&service_tree());

    assert_keys(&root, "", &["name", "listen", "servers"]);
    assert_keys(&root, "listen", &["port", "host"]);
    assert_eq!(root.lookup("listen.port").and_then(ConfigNode::get_int), Some(9090));
    assert_eq!(root.lookup("listen.host").and_then(ConfigNode::get_string).as_deref(), Some("0.0.0.0"));
    assert_eq!(root.lookup("name").and_then(ConfigNode::get_string).as_deref(), Some("override"));
}

#[test]
fn test_lenient_scalar_getters() {
    let root = ConfigNode::from_value(
        ConfigurationOptions::defaults(),
        Value::map_of([
            ("count", Value::from("12")),
            ("ratio", Value::from(2)),
            ("enabled", Value::from("yes")),
        ]),
    );
    assert_eq!(root.lookup("count").and_then(ConfigNode::get_int), Some(12));
    assert_eq!(root.lookup("ratio").and_then(ConfigNode::get_float), Some(2.0));
    assert_eq!(root.lookup("enabled").and_then(ConfigNode::get_bool), Some(true));
    assert_eq!(root.get_int(), None);
}

#[test]
fn test_json_interop() {
    let json = serde_json::json!({
        "name": "edge",
        "tags": ["a", "b"],
        "limits": { "max": 3, "ratio": 0.5, "strict": false, "unset": null }
    });
    let root = ConfigNode::from_value(ConfigurationOptions::defaults(), Value::from(json));

    assert_eq!(root.lookup("tags.1").and_then(ConfigNode::get_string).as_deref(), Some("b"));
    assert!(root.lookup("limits.unset").is_none());
    assert_eq!(
        serde_json::to_value(&root).unwrap(),
        serde_json::json!({
            "name": "edge",
            "tags": ["a", "b"],
            "limits": { "max": 3, "ratio": 0.5, "strict": false }
        })
    );
}

#[test]
fn test_child_key_by_index_on_map() {
    let mut root = ConfigNode::root();
    root.set(Value::map_of([("0", "zero")]));
    assert_eq!(
        root.get_child(Key::Index(0)).and_then(ConfigNode::get_string).as_deref(),
        Some("zero")
    );
}

//! Tests for the map ordering strategies.

use configtree::{ConfigNode, ConfigurationOptions, MapFactory, NodeMap, Value};

use crate::helpers::*;

#[test]
fn test_default_keeps_insertion_order() {
    let mut root = ConfigNode::root();
    root.entry("b").set(1);
    root.entry("a").set(2);
    root.entry("c").set(3);
    assert_keys(&root, "", &["b", "a", "c"]);
}

#[test]
fn test_sorted_factory_orders_keys() {
    let mut root = sorted_root();
    root.entry("b").set(1);
    root.entry("a").set(2);
    root.entry("c").set(3);
    assert_keys(&root, "", &["a", "b", "c"]);
}

#[test]
fn test_factory_applies_to_nested_maps() {
    let root = ConfigNode::from_value(
        ConfigurationOptions::defaults().with_map_factory(MapFactory::Sorted),
        service_value(),
    );
    assert_keys(&root, "", &["listen", "name", "servers"]);
    assert_keys(&root, "listen", &["host", "port"]);
    assert_eq!(root.map_children().map(NodeMap::factory), Some(MapFactory::Sorted));
}

#[test]
fn test_set_value_uses_sorted_containers() {
    let mut root = sorted_root();
    root.set(Value::map_of([("z", 1), ("m", 2)]));
    assert_keys(&root, "", &["m", "z"]);
    assert_eq!(
        serde_json::to_string(&root).unwrap(),
        r#"{"m":2,"z":1}"#
    );
}

#[test]
fn test_moved_maps_keep_their_order() {
    let built = ConfigNode::from_value(
        ConfigurationOptions::defaults(),
        Value::map_of([
            ("b", Value::from(1)),
            ("a", Value::map_of([("y", 1), ("x", 2)])),
            ("c", Value::from(3)),
        ]),
    );

    let mut root = sorted_root();
    root.set_node(built.clone());
    assert_eq!(root.options().map_factory(), MapFactory::Sorted);
    assert_keys(&root, "", &["b", "a", "c"]);
    assert_keys(&root, "a", &["y", "x"]);
    assert_eq!(
        root.map_children().map(NodeMap::factory),
        Some(MapFactory::InsertionOrdered)
    );

    // later inserts follow the container, not the new options
    root.entry("aa").set(4);
    assert_keys(&root, "", &["b", "a", "c", "aa"]);

    let mut merged = sorted_root();
    merged.merge_from(&built);
    assert_keys(&merged, "", &["b", "a", "c"]);
    assert_keys(&merged, "a", &["y", "x"]);
}

#[test]
fn test_created_maps_are_empty() {
    for factory in [MapFactory::InsertionOrdered, MapFactory::Sorted] {
        let map = factory.create();
        assert!(map.is_empty());
        assert_eq!(map.factory(), factory);
    }
}

#[test]
fn test_factory_names_round_trip_through_serde() {
    let json = serde_json::to_string(&MapFactory::Sorted).unwrap();
    assert_eq!(json, "\"sorted\"");
    let parsed: MapFactory = serde_json::from_str("\"insertion_ordered\"").unwrap();
    assert_eq!(parsed, MapFactory::InsertionOrdered);
}

use configtree::{ConfigNode, ConfigurationOptions, MapFactory, Value};

// ==========================
// TREE FACTORIES
// ==========================

/// Creates a tree describing a small service, with default options.
///
/// ```text
/// name: edge
/// listen: { host: 0.0.0.0, port: 8080 }
/// servers: [ { host: a.internal }, { host: b.internal } ]
/// ```
pub fn service_tree() -> ConfigNode {
    ConfigNode::from_value(ConfigurationOptions::defaults(), service_value())
}

pub fn service_value() -> Value {
    Value::map_of([
        ("name", Value::from("edge")),
        (
            "listen",
            Value::map_of([("host", Value::from("0.0.0.0")), ("port", Value::from(8080))]),
        ),
        (
            "servers",
            Value::list_of([
                Value::map_of([("host", "a.internal")]),
                Value::map_of([("host", "b.internal")]),
            ]),
        ),
    ])
}

/// Creates an absent root whose maps keep their keys sorted.
pub fn sorted_root() -> ConfigNode {
    ConfigNode::new(ConfigurationOptions::defaults().with_map_factory(MapFactory::Sorted))
}

// ==========================
// ASSERTIONS
// ==========================

/// Asserts the keys of the map node at `path`, in iteration order.
pub fn assert_keys(root: &ConfigNode, path: &str, expected: &[&str]) {
    let node = root
        .lookup(path)
        .unwrap_or_else(|| panic!("no node at '{path}'"));
    let map = node
        .map_children()
        .unwrap_or_else(|| panic!("node at '{path}' is a {}, not a map", node.kind()));
    let keys: Vec<&str> = map.keys().collect();
    assert_eq!(keys, expected, "key order mismatch at '{path}'");
}

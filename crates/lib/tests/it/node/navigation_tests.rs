//! Tests for lazy child attachment through NodeEntry.

use configtree::{ConfigNode, Key, NodeKind, Value};

use crate::helpers::*;

#[test]
fn test_virtual_child_does_not_modify_parent() {
    let mut root = service_tree();
    let before = root.clone();

    let entry = root.entry("listen.tls.cert");
    assert!(entry.is_virtual());
    assert_eq!(entry.kind(), NodeKind::Absent);
    assert_eq!(entry.get(), Value::Null);
    assert_eq!(entry.get_value_or(String::from("none")).unwrap(), "none");
    assert_eq!(entry.get_optional::<String>().unwrap(), None);

    assert_eq!(root, before);
}

#[test]
fn test_repeated_navigation_is_equivalent() {
    let mut root = ConfigNode::root();
    let first = root.child("missing").get();
    let second = root.child("missing").get();
    assert_eq!(first, second);
    assert!(root.is_absent());
    assert_eq!(root.child_count(), 0);
}

#[test]
fn test_write_attaches_whole_chain() {
    let mut root = ConfigNode::root();
    root.entry("a.b.c").set(1);

    assert!(root.is_map());
    assert!(root.lookup("a.b").unwrap().is_map());
    assert_eq!(root.lookup("a.b.c").and_then(ConfigNode::get_int), Some(1));
}

#[test]
fn test_entry_navigation_builds_paths() {
    let mut root = ConfigNode::root();
    let mut entry = root.child("servers").child(Key::Index(0)).child("host");
    assert_eq!(entry.path().to_string(), "servers.0.host");
    assert_eq!(entry.key(), Some(&Key::from("host")));
    entry.set("a.internal");

    // index keys build lists
    assert!(root.lookup("servers").unwrap().is_list());

    let parent = root.entry("servers.0.host").parent();
    assert_eq!(parent.path().to_string(), "servers.0");
    assert_eq!(parent.kind(), NodeKind::Map);
}

#[test]
fn test_setting_null_detaches() {
    let mut root = service_tree();
    root.entry("listen.port").set(Value::Null);
    assert!(root.lookup("listen.port").is_none());
    assert_keys(&root, "listen", &["host"]);

    // a virtual entry stays virtual
    root.entry("nothing.here").set(Value::Null);
    assert!(root.lookup("nothing").is_none());
}

#[test]
fn test_write_into_scalar_replaces_it() {
    let mut root = service_tree();
    root.entry("name.first").set("e");
    assert_eq!(root.lookup("name").map(ConfigNode::kind), Some(NodeKind::Map));
    assert_eq!(root.lookup("name.first").and_then(ConfigNode::get_string).as_deref(), Some("e"));
}

#[test]
fn test_read_into_scalar_is_strict() {
    let mut root = service_tree();
    let entry = root.entry("name.first");
    assert!(entry.is_virtual());
    assert_eq!(entry.get(), Value::Null);
    assert_eq!(root.lookup("name").and_then(ConfigNode::get_string).as_deref(), Some("edge"));
}

#[test]
fn test_named_key_below_list_turns_it_into_map() {
    let mut root = service_tree();
    root.entry("servers.primary").set("a.internal");
    assert_eq!(root.lookup("servers").map(ConfigNode::kind), Some(NodeKind::Map));
    assert_keys(&root, "servers", &["primary"]);
}

#[test]
fn test_index_past_end_appends() {
    let mut root = service_tree();
    root.entry("servers.9.host").set("c.internal");
    assert_eq!(root.lookup("servers").unwrap().child_count(), 3);
    assert_eq!(
        root.lookup("servers.2.host").and_then(ConfigNode::get_string).as_deref(),
        Some("c.internal")
    );
}

#[test]
fn test_append_through_entry() {
    let mut root = ConfigNode::root();
    root.entry("tags").append_list_child().set("first");
    root.entry("tags").append_list_child().set("second");
    assert_eq!(root.entry("tags").get(), Value::list_of(["first", "second"]));
}

#[test]
fn test_remove_on_anchor_clears_it() {
    let mut root = service_tree();
    let removed = root.entry("").remove();
    assert!(removed.is_some());
    assert!(root.is_absent());
    assert!(root.entry("").remove().is_none());
}

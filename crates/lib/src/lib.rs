//!
//! configtree: a typed, format-independent configuration tree.
//! This library provides the in-memory model that configuration loaders and
//! writers for concrete file formats build on.
//!
//! ## Core Concepts
//!
//! configtree is built around a few key concepts:
//!
//! * **Nodes (`node::ConfigNode`)**: One position in a tree. A node is absent, holds a scalar, or owns an ordered list or a keyed map of child nodes.
//! * **Entries (`node::NodeEntry`)**: Handles on possibly missing nodes. Reading a missing node through an entry leaves the tree unchanged; writing attaches it.
//! * **Options (`options::ConfigurationOptions`)**: Immutable, tree-wide settings: the map ordering strategy, an optional header and the serializer registry.
//! * **Serializers (`serialize::TypeSerializer`)**: Conversions between nodes and Rust values, resolved by type through a `serialize::SerializerRegistry`.
//!     * **Built-ins**: strings, booleans, every primitive number, `Regex` patterns, `Uuid`, `Url` and raw `Value`s.
//!     * **Collections**: `Vec<T>`, `HashMap<String, T>`, `BTreeMap<String, T>` and `Option<T>` for any supported `T`.
//!
//! ## Example
//!
//! ```
//! use configtree::{ConfigNode, ConfigurationOptions, MapFactory};
//! use regex::Regex;
//!
//! let options = ConfigurationOptions::defaults().with_map_factory(MapFactory::Sorted);
//! let mut root = ConfigNode::new(options);
//!
//! root.entry("server.name").set_value(String::from("edge-1"))?;
//! root.entry("server.allow").set_value(vec![Regex::new("^10\\.")?])?;
//!
//! let allow: Vec<Regex> = root.entry("server.allow").get_value()?;
//! assert!(allow[0].is_match("10.0.0.1"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod node;
pub mod options;
pub mod serialize;

pub use node::{ConfigNode, Key, MapFactory, NodeEntry, NodeKind, NodeMap, NodePath, NodeValue, Scalar, Value};
pub use options::ConfigurationOptions;
pub use serialize::{
    ConfigType, ConversionError, NoSerializerError, SerializerRegistry, TypeDescriptor, TypeKind,
    TypeMatcher, TypeSerializer, TypedSerializer,
};

/// Result type used throughout the configtree library.
pub type Result<T, E = ConversionError> = std::result::Result<T, E>;

//! The configuration tree.
//!
//! A [`ConfigNode`] is one position in a tree. Its content is exactly one of
//! absent, a scalar, an ordered list of child nodes, or a mapping from string
//! keys to child nodes ([`NodeValue`]). A node owns its children; assigning a
//! value of a different shape replaces the old content and drops the old
//! children.
//!
//! # Usage
//!
//! ```
//! use configtree::{ConfigNode, NodeKind, Value};
//!
//! let mut root = ConfigNode::root();
//! root.set(Value::map_of([("host", Value::from("localhost")), ("port", Value::from(8080))]));
//! assert_eq!(root.kind(), NodeKind::Map);
//!
//! // Reads never modify the tree
//! assert!(root.lookup("listen.backlog").is_none());
//!
//! // Writes through an entry attach missing parents on demand
//! root.entry("listen.backlog").set(128);
//! assert_eq!(root.lookup("listen.backlog").and_then(|n| n.get_int()), Some(128));
//!
//! // Typed access dispatches through the tree's serializer registry
//! let port: u16 = root.child("port").get_value()?;
//! assert_eq!(port, 8080);
//! # Ok::<(), configtree::ConversionError>(())
//! ```
//!
//! # Shape coercion
//!
//! Reads are strict: navigating by key into a scalar or absent node yields
//! nothing. Writes coerce: attaching a child below a scalar node turns it
//! into a map (or a list, for an index key) and the scalar is discarded.
//! A digit-only key addresses a list element when the node is a list; any
//! other key written below a list turns it into a map.

use std::{fmt, sync::Arc};

use serde::{Serialize, Serializer};

use crate::{ConfigurationOptions, Result, serialize::ConfigType};

mod entry;
pub mod map;
pub mod path;
pub mod value;

pub use entry::NodeEntry;
pub use map::{MapFactory, NodeMap};
pub use path::{Key, NodePath};
pub use value::Value;

/// A single scalar value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "int",
            Scalar::Float(_) => "float",
            Scalar::Text(_) => "text",
        }
    }

    /// Renders the scalar as text. Never fails.
    pub fn as_string(&self) -> String {
        match self {
            Scalar::Text(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Reads the scalar as an integer.
    ///
    /// Floats convert when they have no fractional part; text converts when
    /// it parses as a decimal integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Scalar::Int(n) => Some(*n),
            Scalar::Float(n)
                if n.fract() == 0.0 && *n >= i64::MIN as f64 && *n < i64::MAX as f64 =>
            {
                Some(*n as i64)
            }
            Scalar::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Reads the scalar as a float. Integers and numeric text convert.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Scalar::Float(n) => Some(*n),
            Scalar::Int(n) => Some(*n as f64),
            Scalar::Text(s) => s.trim().parse().ok(),
            Scalar::Bool(_) => None,
        }
    }

    /// Reads the scalar as a boolean.
    ///
    /// Text accepts `true`/`t`/`yes`/`y`/`on`/`1` and
    /// `false`/`f`/`no`/`n`/`off`/`0`, ignoring case; integers accept 1 and 0.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(*b),
            Scalar::Int(1) => Some(true),
            Scalar::Int(0) => Some(false),
            Scalar::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "t" | "yes" | "y" | "on" | "1" => Some(true),
                "false" | "f" | "no" | "n" | "off" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int(n) => write!(f, "{n}"),
            Scalar::Float(n) => write!(f, "{n}"),
            Scalar::Text(s) => write!(f, "{s}"),
        }
    }
}

/// The shape a node currently has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Absent,
    Scalar,
    List,
    Map,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Absent => "absent",
            NodeKind::Scalar => "scalar",
            NodeKind::List => "list",
            NodeKind::Map => "map",
        };
        f.write_str(name)
    }
}

/// Content of a node.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum NodeValue {
    /// No value
    #[default]
    Absent,
    /// A scalar value
    Scalar(Scalar),
    /// Ordered child nodes
    List(Vec<ConfigNode>),
    /// Keyed child nodes
    Map(NodeMap),
}

impl NodeValue {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeValue::Absent => NodeKind::Absent,
            NodeValue::Scalar(_) => NodeKind::Scalar,
            NodeValue::List(_) => NodeKind::List,
            NodeValue::Map(_) => NodeKind::Map,
        }
    }
}

/// One position in a configuration tree.
///
/// Every node of a tree shares the [`ConfigurationOptions`] of its root. The
/// options decide which container new mapping nodes use and which serializer
/// registry [`get_value`](Self::get_value) and [`set_value`](Self::set_value)
/// dispatch through.
///
/// Equality compares content only, not options.
#[derive(Clone)]
pub struct ConfigNode {
    options: Arc<ConfigurationOptions>,
    value: NodeValue,
}

impl ConfigNode {
    /// Creates an absent root node with default options.
    pub fn root() -> Self {
        Self::new(ConfigurationOptions::defaults())
    }

    /// Creates an absent root node with the given options.
    pub fn new(options: ConfigurationOptions) -> Self {
        Self::with_shared_options(Arc::new(options))
    }

    /// Creates a root node holding `value`.
    pub fn from_value(options: ConfigurationOptions, value: impl Into<Value>) -> Self {
        let mut node = Self::new(options);
        node.set(value);
        node
    }

    pub(crate) fn with_shared_options(options: Arc<ConfigurationOptions>) -> Self {
        Self {
            options,
            value: NodeValue::Absent,
        }
    }

    /// Creates an absent node that is not part of any tree but shares this
    /// node's options. Useful as scratch space for serializers.
    pub fn detached(&self) -> Self {
        Self::with_shared_options(Arc::clone(&self.options))
    }

    pub fn options(&self) -> &ConfigurationOptions {
        &self.options
    }

    pub fn kind(&self) -> NodeKind {
        self.value.kind()
    }

    pub fn is_absent(&self) -> bool {
        matches!(self.value, NodeValue::Absent)
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.value, NodeValue::Scalar(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self.value, NodeValue::List(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self.value, NodeValue::Map(_))
    }

    /// Returns the node's content without copying it.
    pub fn raw_value(&self) -> &NodeValue {
        &self.value
    }

    /// Returns a detached copy of this node's content.
    ///
    /// Map entries appear in the order of the node's map container.
    pub fn get(&self) -> Value {
        match &self.value {
            NodeValue::Absent => Value::Null,
            NodeValue::Scalar(scalar) => scalar.clone().into(),
            NodeValue::List(items) => Value::List(items.iter().map(ConfigNode::get).collect()),
            NodeValue::Map(map) => Value::Map(
                map.iter()
                    .map(|(key, child)| (key.to_string(), child.get()))
                    .collect(),
            ),
        }
    }

    /// Replaces this node's content.
    ///
    /// Lists and maps in `value` become owned child nodes; the previous
    /// children are dropped. `Value::Null` clears the node. Null entries of a
    /// map are skipped, null items of a list become absent children.
    pub fn set(&mut self, value: impl Into<Value>) {
        self.value = Self::build(&self.options, value.into());
    }

    /// Clears the node to absent.
    pub fn clear(&mut self) {
        self.value = NodeValue::Absent;
    }

    fn build(options: &Arc<ConfigurationOptions>, value: Value) -> NodeValue {
        let child = |value| ConfigNode {
            options: Arc::clone(options),
            value: Self::build(options, value),
        };
        match value {
            Value::Null => NodeValue::Absent,
            Value::Bool(b) => NodeValue::Scalar(Scalar::Bool(b)),
            Value::Int(n) => NodeValue::Scalar(Scalar::Int(n)),
            Value::Float(n) => NodeValue::Scalar(Scalar::Float(n)),
            Value::Text(s) => NodeValue::Scalar(Scalar::Text(s)),
            Value::List(items) => NodeValue::List(items.into_iter().map(child).collect()),
            Value::Map(entries) => {
                let mut map = options.map_factory().create();
                for (key, value) in entries {
                    if !value.is_null() {
                        map.insert(key, child(value));
                    }
                }
                NodeValue::Map(map)
            }
        }
    }

    /// Replaces this node's content with the content of `other`.
    ///
    /// The moved children switch to this tree's options; containers that
    /// were already built keep their ordering strategy.
    pub fn set_node(&mut self, mut other: ConfigNode) {
        other.adopt_options(&self.options);
        self.value = other.value;
    }

    fn adopt_options(&mut self, options: &Arc<ConfigurationOptions>) {
        if Arc::ptr_eq(&self.options, options) {
            return;
        }
        self.options = Arc::clone(options);
        match &mut self.value {
            NodeValue::List(items) => items.iter_mut().for_each(|item| item.adopt_options(options)),
            NodeValue::Map(map) => map
                .iter_mut()
                .for_each(|(_, child)| child.adopt_options(options)),
            NodeValue::Absent | NodeValue::Scalar(_) => {}
        }
    }

    pub fn scalar(&self) -> Option<&Scalar> {
        match &self.value {
            NodeValue::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Reads a scalar as text, rendering numbers and booleans.
    pub fn get_string(&self) -> Option<String> {
        self.scalar().map(Scalar::as_string)
    }

    /// Reads a scalar as an integer. See [`Scalar::as_int`].
    pub fn get_int(&self) -> Option<i64> {
        self.scalar()?.as_int()
    }

    /// Reads a scalar as a float. See [`Scalar::as_float`].
    pub fn get_float(&self) -> Option<f64> {
        self.scalar()?.as_float()
    }

    /// Reads a scalar as a boolean. See [`Scalar::as_bool`].
    pub fn get_bool(&self) -> Option<bool> {
        self.scalar()?.as_bool()
    }

    /// Children of a list node; empty for every other kind.
    pub fn list_children(&self) -> &[ConfigNode] {
        match &self.value {
            NodeValue::List(items) => items,
            _ => &[],
        }
    }

    /// Children of a map node.
    pub fn map_children(&self) -> Option<&NodeMap> {
        match &self.value {
            NodeValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Number of direct children.
    pub fn child_count(&self) -> usize {
        match &self.value {
            NodeValue::List(items) => items.len(),
            NodeValue::Map(map) => map.len(),
            NodeValue::Absent | NodeValue::Scalar(_) => 0,
        }
    }

    /// Returns an existing direct child. Never modifies the tree.
    pub fn get_child(&self, key: impl Into<Key>) -> Option<&ConfigNode> {
        self.child_at(&key.into())
    }

    /// Returns an existing direct child mutably. Never attaches a child.
    pub fn get_child_mut(&mut self, key: impl Into<Key>) -> Option<&mut ConfigNode> {
        self.child_at_mut(&key.into())
    }

    /// Follows `path` through existing nodes. Never modifies the tree.
    pub fn lookup(&self, path: impl Into<NodePath>) -> Option<&ConfigNode> {
        self.lookup_keys(path.into().keys())
    }

    /// Follows `path` through existing nodes, returning the target mutably.
    pub fn lookup_mut(&mut self, path: impl Into<NodePath>) -> Option<&mut ConfigNode> {
        self.lookup_keys_mut(path.into().keys())
    }

    pub(crate) fn lookup_keys(&self, keys: &[Key]) -> Option<&ConfigNode> {
        keys.iter().try_fold(self, |node, key| node.child_at(key))
    }

    pub(crate) fn lookup_keys_mut(&mut self, keys: &[Key]) -> Option<&mut ConfigNode> {
        let mut current = self;
        for key in keys {
            current = current.child_at_mut(key)?;
        }
        Some(current)
    }

    fn child_at(&self, key: &Key) -> Option<&ConfigNode> {
        match &self.value {
            NodeValue::Map(map) => match key {
                Key::Name(name) => map.get(name),
                Key::Index(index) => map.get(&index.to_string()),
            },
            NodeValue::List(items) => items.get(key.as_index()?),
            NodeValue::Absent | NodeValue::Scalar(_) => None,
        }
    }

    fn child_at_mut(&mut self, key: &Key) -> Option<&mut ConfigNode> {
        match &mut self.value {
            NodeValue::Map(map) => match key {
                Key::Name(name) => map.get_mut(name),
                Key::Index(index) => map.get_mut(&index.to_string()),
            },
            NodeValue::List(items) => items.get_mut(key.as_index()?),
            NodeValue::Absent | NodeValue::Scalar(_) => None,
        }
    }

    /// Returns a handle on the child under `key`.
    ///
    /// If the child does not exist the handle is virtual: reading it yields
    /// an absent value and leaves this node unchanged, and the child (plus any
    /// missing intermediate nodes) is attached only when a value is written
    /// through the handle.
    pub fn child(&mut self, key: impl Into<Key>) -> NodeEntry<'_> {
        NodeEntry::new(self, NodePath::from(key.into()))
    }

    /// Returns a handle on the node at `path`. See [`child`](Self::child).
    pub fn entry(&mut self, path: impl Into<NodePath>) -> NodeEntry<'_> {
        NodeEntry::new(self, path.into())
    }

    /// Returns the child under `key`, attaching an absent child if needed.
    ///
    /// This is the write path behind [`NodeEntry`] and coerces the node's
    /// shape as described in the module docs.
    pub(crate) fn attach_child(&mut self, key: &Key) -> &mut ConfigNode {
        let options = Arc::clone(&self.options);
        let index = match (&self.value, key) {
            (NodeValue::Map(_), _) => None,
            (NodeValue::List(_), key) => key.as_index(),
            (_, Key::Index(index)) => Some(*index),
            (_, Key::Name(_)) => None,
        };

        match index {
            Some(index) => {
                let items = self.ensure_list();
                if index < items.len() {
                    &mut items[index]
                } else {
                    items.push(ConfigNode::with_shared_options(options));
                    let last = items.len() - 1;
                    &mut items[last]
                }
            }
            None => self
                .ensure_map()
                .get_or_insert_with(key.to_name(), || ConfigNode::with_shared_options(options)),
        }
    }

    fn ensure_list(&mut self) -> &mut Vec<ConfigNode> {
        if !self.is_list() {
            self.replace_shape(NodeValue::List(Vec::new()));
        }
        match &mut self.value {
            NodeValue::List(items) => items,
            _ => unreachable!("node shape was just replaced with a list"),
        }
    }

    fn ensure_map(&mut self) -> &mut NodeMap {
        if !self.is_map() {
            let map = self.options.map_factory().create();
            self.replace_shape(NodeValue::Map(map));
        }
        match &mut self.value {
            NodeValue::Map(map) => map,
            _ => unreachable!("node shape was just replaced with a map"),
        }
    }

    fn replace_shape(&mut self, value: NodeValue) {
        if !self.is_absent() {
            tracing::debug!(
                from = %self.kind(),
                to = %value.kind(),
                "Replacing node shape to attach a child"
            );
        }
        self.value = value;
    }

    /// Appends an absent child to a list node and returns it.
    ///
    /// A node of any other kind becomes an empty list first.
    pub fn append_list_child(&mut self) -> &mut ConfigNode {
        let options = Arc::clone(&self.options);
        let items = self.ensure_list();
        items.push(ConfigNode::with_shared_options(options));
        let last = items.len() - 1;
        &mut items[last]
    }

    /// Detaches and returns a direct child.
    ///
    /// Removing a list element shifts the following elements down.
    pub fn remove_child(&mut self, key: impl Into<Key>) -> Option<ConfigNode> {
        let key = key.into();
        match &mut self.value {
            NodeValue::Map(map) => map.remove(&key.to_name()),
            NodeValue::List(items) => {
                let index = key.as_index()?;
                (index < items.len()).then(|| items.remove(index))
            }
            NodeValue::Absent | NodeValue::Scalar(_) => None,
        }
    }

    /// Fills in values this node lacks from `other`.
    ///
    /// An absent node takes a copy of `other`. Two map nodes merge key by
    /// key, recursively. In every other case this node keeps its value.
    pub fn merge_from(&mut self, other: &ConfigNode) {
        if other.is_absent() {
            return;
        }
        if self.is_absent() {
            self.set_node(other.clone());
            return;
        }

        let options = Arc::clone(&self.options);
        if let (NodeValue::Map(mine), NodeValue::Map(theirs)) = (&mut self.value, &other.value) {
            for (key, their_child) in theirs {
                match mine.get_mut(key) {
                    Some(my_child) => my_child.merge_from(their_child),
                    None => {
                        let mut copy = their_child.clone();
                        copy.adopt_options(&options);
                        mine.insert(key.to_string(), copy);
                    }
                }
            }
        }
    }

    /// Converts this node's content into a `T` through the registry of the
    /// tree's options.
    ///
    /// # Errors
    /// [`ConversionError`](crate::ConversionError) if no serializer handles
    /// `T` or the content cannot be converted.
    pub fn get_value<T: ConfigType>(&self) -> Result<T> {
        self.options.serializers().deserialize(self)
    }

    /// Like [`get_value`](Self::get_value), but returns `default` when the
    /// node is absent. Conversion failures of present values still error.
    pub fn get_value_or<T: ConfigType>(&self, default: T) -> Result<T> {
        if self.is_absent() {
            return Ok(default);
        }
        self.get_value()
    }

    /// Returns `Ok(None)` when the node is absent, otherwise converts.
    pub fn get_optional<T: ConfigType>(&self) -> Result<Option<T>> {
        self.get_value::<Option<T>>()
    }

    /// Stores `value` in this node through the registry of the tree's
    /// options.
    ///
    /// The node is only modified if the whole value converts.
    pub fn set_value<T: ConfigType>(&mut self, value: T) -> Result<()> {
        let registry = Arc::clone(self.options.serializers());
        let mut staged = self.detached();
        registry.serialize(value, &mut staged)?;
        self.value = staged.value;
        Ok(())
    }
}

impl Default for ConfigNode {
    fn default() -> Self {
        Self::root()
    }
}

impl PartialEq for ConfigNode {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl fmt::Debug for ConfigNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            NodeValue::Absent => f.write_str("Absent"),
            NodeValue::Scalar(scalar) => write!(f, "{scalar:?}"),
            NodeValue::List(items) => f.debug_list().entries(items).finish(),
            NodeValue::Map(map) => f.debug_map().entries(map.iter()).finish(),
        }
    }
}

/// Absent nodes serialize as none, maps in their container's order.
impl Serialize for ConfigNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.value {
            NodeValue::Absent => serializer.serialize_none(),
            NodeValue::Scalar(scalar) => scalar.serialize(serializer),
            NodeValue::List(items) => serializer.collect_seq(items),
            NodeValue::Map(map) => serializer.collect_map(map.iter()),
        }
    }
}

//! Keys and paths for addressing nodes in a configuration tree.
//!
//! A [`NodePath`] is an ordered list of [`Key`]s, each selecting one child of
//! the node before it. Paths are relative: a path stored in an error or a
//! [`NodeEntry`](super::NodeEntry) is relative to the node the operation
//! started from, and the empty path refers to that node itself.
//!
//! # Usage
//!
//! ```rust
//! use configtree::{Key, NodePath, path};
//! use std::str::FromStr;
//!
//! // Parse from a dotted string (empty components are dropped)
//! let parsed = NodePath::from_str("server.listen..port")?;
//! assert_eq!(parsed.len(), 3);
//!
//! // Build incrementally
//! let built = NodePath::new().push("servers").push(Key::Index(0)).push("host");
//! assert_eq!(built.to_string(), "servers.0.host");
//!
//! // Or with the macro
//! assert_eq!(path!("server", "listen", "port"), parsed);
//! # Ok::<(), std::convert::Infallible>(())
//! ```

use std::{fmt, str::FromStr};

/// One step in a [`NodePath`].
///
/// `Name` selects an entry of a mapping node, `Index` an element of a list
/// node. A `Name` made only of digits also addresses a list element when the
/// node it is applied to is a list, so dotted paths like `"servers.0.host"`
/// work without constructing `Index` keys by hand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Mapping key
    Name(String),
    /// List position
    Index(usize),
}

impl Key {
    /// Returns the key as a list index, if it can address one.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Key::Index(index) => Some(*index),
            Key::Name(name) => name.parse().ok(),
        }
    }

    /// Returns the key as a mapping key. Indices render in decimal.
    pub fn to_name(&self) -> String {
        match self {
            Key::Name(name) => name.clone(),
            Key::Index(index) => index.to_string(),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => write!(f, "{name}"),
            Key::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Name(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Name(value)
    }
}

impl From<&String> for Key {
    fn from(value: &String) -> Self {
        Key::Name(value.clone())
    }
}

impl From<usize> for Key {
    fn from(value: usize) -> Self {
        Key::Index(value)
    }
}

impl From<&Key> for Key {
    fn from(value: &Key) -> Self {
        value.clone()
    }
}

/// An owned, relative path through a configuration tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath {
    keys: Vec<Key>,
}

impl NodePath {
    /// Creates the empty path.
    pub fn new() -> Self {
        Self { keys: Vec::new() }
    }

    /// Creates a path from a sequence of keys.
    pub fn from_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Appends a key, consuming and returning the path.
    pub fn push(mut self, key: impl Into<Key>) -> Self {
        self.keys.push(key.into());
        self
    }

    /// Appends a key in place.
    pub fn push_key(&mut self, key: impl Into<Key>) {
        self.keys.push(key.into());
    }

    /// Removes and returns the last key.
    pub fn pop(&mut self) -> Option<Key> {
        self.keys.pop()
    }

    /// Returns this path followed by all keys of `other`.
    pub fn join(mut self, other: &NodePath) -> Self {
        self.keys.extend(other.keys.iter().cloned());
        self
    }

    /// Returns `prefix` followed by this path.
    pub fn prefixed(self, prefix: &NodePath) -> Self {
        if prefix.is_empty() {
            return self;
        }
        prefix.clone().join(&self)
    }

    /// Returns the keys of the path in order.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Returns the number of keys in the path.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the path has no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the path without its last key, or `None` for the empty path.
    pub fn parent(&self) -> Option<NodePath> {
        let (_, parent) = self.keys.split_last()?;
        Some(NodePath {
            keys: parent.to_vec(),
        })
    }

    /// Returns the last key, or `None` for the empty path.
    pub fn last(&self) -> Option<&Key> {
        self.keys.last()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.keys.is_empty() {
            return write!(f, "(root)");
        }
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

impl FromStr for NodePath {
    type Err = std::convert::Infallible;

    /// Splits on `.`, dropping empty components. Never fails.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_keys(s.split('.').filter(|c| !c.is_empty())))
    }
}

impl From<&str> for NodePath {
    fn from(value: &str) -> Self {
        let Ok(path) = NodePath::from_str(value);
        path
    }
}

impl From<Key> for NodePath {
    fn from(value: Key) -> Self {
        NodePath { keys: vec![value] }
    }
}

impl From<Vec<Key>> for NodePath {
    fn from(keys: Vec<Key>) -> Self {
        NodePath { keys }
    }
}

impl From<&[Key]> for NodePath {
    fn from(keys: &[Key]) -> Self {
        NodePath {
            keys: keys.to_vec(),
        }
    }
}

impl From<&NodePath> for NodePath {
    fn from(value: &NodePath) -> Self {
        value.clone()
    }
}

impl<'a> IntoIterator for &'a NodePath {
    type Item = &'a Key;
    type IntoIter = std::slice::Iter<'a, Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.keys.iter()
    }
}

/// Builds a [`NodePath`] from a list of keys.
///
/// Each argument goes through `Key::from`, so string slices become mapping
/// keys and `usize` values become list indices. String arguments are *not*
/// split on dots.
///
/// ```rust
/// use configtree::{Key, path};
///
/// let path = path!("servers", Key::Index(1), "host");
/// assert_eq!(path.to_string(), "servers.1.host");
/// assert!(path!().is_empty());
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::NodePath::new()
    };

    ($($key:expr),+ $(,)?) => {
        $crate::NodePath::from_keys([$($crate::Key::from($key)),+])
    };
}

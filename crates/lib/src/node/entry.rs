//! Lazily attached child handles.

use crate::{ConfigNode, Result, serialize::ConfigType};

use super::{Key, NodeKind, NodePath, Value};

/// A handle on a node addressed by a path below an existing node.
///
/// The target may not exist yet. Such a *virtual* entry behaves like an
/// absent node for reads and does not change the tree; the first write
/// attaches the target and any missing nodes on the way to it. Writing
/// `Value::Null` (or a value that serializes to nothing) detaches the target
/// instead, so reading through entries never leaves empty placeholders
/// behind.
///
/// Navigating twice to the same missing key yields equivalent entries and the
/// parent stays unchanged until one of them is written.
pub struct NodeEntry<'a> {
    anchor: &'a mut ConfigNode,
    path: NodePath,
}

impl<'a> NodeEntry<'a> {
    pub(crate) fn new(anchor: &'a mut ConfigNode, path: NodePath) -> Self {
        Self { anchor, path }
    }

    /// Path of the target relative to the node the entry was created from.
    pub fn path(&self) -> &NodePath {
        &self.path
    }

    /// Last key of the path, or `None` for an entry on the anchor itself.
    pub fn key(&self) -> Option<&Key> {
        self.path.last()
    }

    /// Returns true if the target is not attached to the tree.
    pub fn is_virtual(&self) -> bool {
        self.node().is_none()
    }

    /// The target node, if attached.
    pub fn node(&self) -> Option<&ConfigNode> {
        self.anchor.lookup_keys(self.path.keys())
    }

    /// The target node mutably, if attached. Never attaches.
    pub fn node_mut(&mut self) -> Option<&mut ConfigNode> {
        self.anchor.lookup_keys_mut(self.path.keys())
    }

    /// Descends to a child of the target.
    pub fn child(mut self, key: impl Into<Key>) -> NodeEntry<'a> {
        self.path.push_key(key);
        self
    }

    /// Moves to the parent of the target. Stays put on the anchor.
    pub fn parent(mut self) -> NodeEntry<'a> {
        self.path.pop();
        self
    }

    /// Kind of the target; `Absent` while virtual.
    pub fn kind(&self) -> NodeKind {
        self.node().map_or(NodeKind::Absent, ConfigNode::kind)
    }

    /// Detached copy of the target's content; `Value::Null` while virtual.
    pub fn get(&self) -> Value {
        self.node().map_or(Value::Null, ConfigNode::get)
    }

    /// Replaces the target's content, attaching it if needed.
    ///
    /// `Value::Null` detaches the target instead.
    pub fn set(&mut self, value: impl Into<Value>) {
        let value = value.into();
        if value.is_null() {
            self.remove();
        } else {
            self.attach().set(value);
        }
    }

    /// Attaches the target and every missing node on its path, returning it.
    pub fn attach(&mut self) -> &mut ConfigNode {
        let mut current = &mut *self.anchor;
        for key in self.path.keys() {
            current = current.attach_child(key);
        }
        current
    }

    /// Appends an absent element to the target list, attaching the target.
    pub fn append_list_child(&mut self) -> &mut ConfigNode {
        self.attach().append_list_child()
    }

    /// Detaches the target from its parent and returns it.
    ///
    /// An entry on the anchor itself clears the anchor.
    pub fn remove(&mut self) -> Option<ConfigNode> {
        match self.path.keys().split_last() {
            None => {
                let empty = self.anchor.detached();
                let old = std::mem::replace(&mut *self.anchor, empty);
                (!old.is_absent()).then_some(old)
            }
            Some((last, parent)) => self.anchor.lookup_keys_mut(parent)?.remove_child(last),
        }
    }

    /// Converts the target's content into a `T`; a virtual target converts
    /// as an absent node. Error paths are relative to the anchor.
    pub fn get_value<T: ConfigType>(&self) -> Result<T> {
        let result = match self.node() {
            Some(node) => node.get_value(),
            None => self.anchor.detached().get_value(),
        };
        result.map_err(|err| err.at(&self.path))
    }

    /// Like [`get_value`](Self::get_value), but returns `default` while the
    /// target is virtual or absent.
    pub fn get_value_or<T: ConfigType>(&self, default: T) -> Result<T> {
        match self.node() {
            Some(node) => node.get_value_or(default).map_err(|err| err.at(&self.path)),
            None => Ok(default),
        }
    }

    /// Returns `Ok(None)` while the target is virtual or absent.
    pub fn get_optional<T: ConfigType>(&self) -> Result<Option<T>> {
        self.get_value::<Option<T>>()
    }

    /// Stores `value` in the target, attaching it if the value is not empty.
    ///
    /// The tree is only modified if the whole value converts.
    pub fn set_value<T: ConfigType>(&mut self, value: T) -> Result<()> {
        let mut staged = self.anchor.detached();
        staged
            .set_value(value)
            .map_err(|err| err.at(&self.path))?;

        if staged.is_absent() {
            self.remove();
        } else {
            self.attach().set_node(staged);
        }
        Ok(())
    }
}

impl std::fmt::Debug for NodeEntry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeEntry")
            .field("path", &self.path)
            .field("node", &self.node())
            .finish()
    }
}

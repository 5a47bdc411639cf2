//! Map construction strategies for mapping nodes.
//!
//! Every mapping node stores its children in a [`NodeMap`] produced by the
//! [`MapFactory`] of the tree's [`ConfigurationOptions`](crate::ConfigurationOptions).
//! The factory is consulted only when a node becomes a map; swapping the
//! factory on an options value never reorders maps that were already built.

use std::collections::{BTreeMap, btree_map};

use indexmap::{IndexMap, map as index_map};
use serde::{Deserialize, Serialize};

use super::ConfigNode;

/// Strategy for the container backing mapping nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapFactory {
    /// Keys iterate in the order they were first inserted, matching the
    /// natural order of a configuration file.
    #[default]
    InsertionOrdered,

    /// Keys iterate in lexicographic order regardless of insertion order.
    Sorted,
}

impl MapFactory {
    /// Creates an empty container for this strategy.
    pub fn create(&self) -> NodeMap {
        match self {
            MapFactory::InsertionOrdered => NodeMap::InsertionOrdered(IndexMap::new()),
            MapFactory::Sorted => NodeMap::Sorted(BTreeMap::new()),
        }
    }
}

/// Children of a mapping node.
///
/// Equality ignores iteration order: two maps are equal when they hold the
/// same keys with equal nodes.
#[derive(Debug, Clone)]
pub enum NodeMap {
    /// Insertion-ordered storage
    InsertionOrdered(IndexMap<String, ConfigNode>),
    /// Key-sorted storage
    Sorted(BTreeMap<String, ConfigNode>),
}

impl NodeMap {
    /// Returns the strategy that produced this container.
    pub fn factory(&self) -> MapFactory {
        match self {
            NodeMap::InsertionOrdered(_) => MapFactory::InsertionOrdered,
            NodeMap::Sorted(_) => MapFactory::Sorted,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            NodeMap::InsertionOrdered(map) => map.len(),
            NodeMap::Sorted(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains_key(&self, key: &str) -> bool {
        match self {
            NodeMap::InsertionOrdered(map) => map.contains_key(key),
            NodeMap::Sorted(map) => map.contains_key(key),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ConfigNode> {
        match self {
            NodeMap::InsertionOrdered(map) => map.get(key),
            NodeMap::Sorted(map) => map.get(key),
        }
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ConfigNode> {
        match self {
            NodeMap::InsertionOrdered(map) => map.get_mut(key),
            NodeMap::Sorted(map) => map.get_mut(key),
        }
    }

    /// Inserts a child, returning the node previously stored under `key`.
    ///
    /// Replacing an existing key keeps its original position in an
    /// insertion-ordered map.
    pub fn insert(&mut self, key: String, node: ConfigNode) -> Option<ConfigNode> {
        match self {
            NodeMap::InsertionOrdered(map) => map.insert(key, node),
            NodeMap::Sorted(map) => map.insert(key, node),
        }
    }

    /// Removes a child. Remaining keys keep their relative order.
    pub fn remove(&mut self, key: &str) -> Option<ConfigNode> {
        match self {
            NodeMap::InsertionOrdered(map) => map.shift_remove(key),
            NodeMap::Sorted(map) => map.remove(key),
        }
    }

    /// Returns the child under `key`, inserting the node built by `default`
    /// first if the key is missing.
    pub(crate) fn get_or_insert_with(
        &mut self,
        key: String,
        default: impl FnOnce() -> ConfigNode,
    ) -> &mut ConfigNode {
        match self {
            NodeMap::InsertionOrdered(map) => map.entry(key).or_insert_with(default),
            NodeMap::Sorted(map) => map.entry(key).or_insert_with(default),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(key, _)| key)
    }

    pub fn iter(&self) -> Iter<'_> {
        match self {
            NodeMap::InsertionOrdered(map) => Iter::InsertionOrdered(map.iter()),
            NodeMap::Sorted(map) => Iter::Sorted(map.iter()),
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_> {
        match self {
            NodeMap::InsertionOrdered(map) => IterMut::InsertionOrdered(map.iter_mut()),
            NodeMap::Sorted(map) => IterMut::Sorted(map.iter_mut()),
        }
    }
}

impl PartialEq for NodeMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, node)| other.get(key).is_some_and(|theirs| theirs == node))
    }
}

impl<'a> IntoIterator for &'a NodeMap {
    type Item = (&'a str, &'a ConfigNode);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of a [`NodeMap`] in its iteration order.
pub enum Iter<'a> {
    InsertionOrdered(index_map::Iter<'a, String, ConfigNode>),
    Sorted(btree_map::Iter<'a, String, ConfigNode>),
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a ConfigNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, node) = match self {
            Iter::InsertionOrdered(inner) => inner.next()?,
            Iter::Sorted(inner) => inner.next()?,
        };
        Some((key.as_str(), node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Iter::InsertionOrdered(inner) => inner.size_hint(),
            Iter::Sorted(inner) => inner.size_hint(),
        }
    }
}

/// Mutable iterator over the entries of a [`NodeMap`].
pub enum IterMut<'a> {
    InsertionOrdered(index_map::IterMut<'a, String, ConfigNode>),
    Sorted(btree_map::IterMut<'a, String, ConfigNode>),
}

impl<'a> Iterator for IterMut<'a> {
    type Item = (&'a str, &'a mut ConfigNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, node) = match self {
            IterMut::InsertionOrdered(inner) => inner.next()?,
            IterMut::Sorted(inner) => inner.next()?,
        };
        Some((key.as_str(), node))
    }
}

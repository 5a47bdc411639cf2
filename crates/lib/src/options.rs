//! Tree-wide configuration options.
//!
//! [`ConfigurationOptions`] controls how a configuration tree is structured
//! rather than how it is written to a file: which container backs mapping
//! nodes, which header a writer should emit, and which serializers typed
//! reads and writes dispatch through.
//!
//! Options are immutable. Every `with_*` method returns a new value with one
//! field replaced, leaving the original untouched, so a single options value
//! can be shared between trees and threads.
//!
//! ```
//! use configtree::{ConfigurationOptions, MapFactory};
//!
//! let base = ConfigurationOptions::defaults();
//! let sorted = base.with_map_factory(MapFactory::Sorted).with_header("Server settings");
//!
//! assert_eq!(base.map_factory(), MapFactory::InsertionOrdered);
//! assert_eq!(base.header(), None);
//! assert_eq!(sorted.header(), Some("Server settings"));
//! ```

use std::sync::Arc;

use crate::{node::MapFactory, serialize::SerializerRegistry};

/// Immutable bundle of tree-wide structural settings.
#[derive(Debug, Clone)]
pub struct ConfigurationOptions {
    map_factory: MapFactory,
    header: Option<String>,
    serializers: Arc<SerializerRegistry>,
}

impl ConfigurationOptions {
    /// Options with an insertion-ordered map factory, no header and the
    /// built-in serializers.
    pub fn defaults() -> Self {
        Self {
            map_factory: MapFactory::default(),
            header: None,
            serializers: SerializerRegistry::defaults(),
        }
    }

    /// The strategy used to create the container of mapping nodes.
    pub fn map_factory(&self) -> MapFactory {
        self.map_factory
    }

    /// Returns new options using `factory` for mapping nodes.
    pub fn with_map_factory(&self, factory: MapFactory) -> Self {
        Self {
            map_factory: factory,
            ..self.clone()
        }
    }

    /// The header a writer should emit before the tree, if any.
    ///
    /// Lines are separated by `\n`.
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    /// Returns new options with the given header.
    pub fn with_header(&self, header: impl Into<String>) -> Self {
        Self {
            header: Some(header.into()),
            ..self.clone()
        }
    }

    /// Returns new options without a header.
    pub fn without_header(&self) -> Self {
        Self {
            header: None,
            ..self.clone()
        }
    }

    /// Iterates over the header split on `\n`; empty when there is no header.
    ///
    /// Writers prefix each line with their format's comment marker.
    pub fn header_lines(&self) -> impl Iterator<Item = &str> {
        self.header.iter().flat_map(|header| header.split('\n'))
    }

    /// The registry typed reads and writes dispatch through.
    pub fn serializers(&self) -> &Arc<SerializerRegistry> {
        &self.serializers
    }

    /// Returns new options dispatching through `serializers`.
    pub fn with_serializers(&self, serializers: impl Into<Arc<SerializerRegistry>>) -> Self {
        Self {
            serializers: serializers.into(),
            ..self.clone()
        }
    }
}

impl Default for ConfigurationOptions {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Options compare by value; registries compare by identity.
impl PartialEq for ConfigurationOptions {
    fn eq(&self, other: &Self) -> bool {
        self.map_factory == other.map_factory
            && self.header == other.header
            && Arc::ptr_eq(&self.serializers, &other.serializers)
    }
}

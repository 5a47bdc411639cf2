//! Error types for typed reads and writes.
//!
//! Everything that goes wrong while converting between a node and a typed
//! value surfaces as a [`ConversionError`]. The lowest-level cause (for
//! example a regex syntax error) stays reachable through
//! [`std::error::Error::source`].

use thiserror::Error;

use super::TypeDescriptor;
use crate::node::{Key, NodePath};

/// No registered serializer accepts the requested type.
///
/// This indicates a programming or setup error rather than bad data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no type serializer registered for `{requested}`")]
pub struct NoSerializerError {
    requested: TypeDescriptor,
}

impl NoSerializerError {
    pub fn new(requested: TypeDescriptor) -> Self {
        Self { requested }
    }

    /// The type that could not be resolved.
    pub fn requested(&self) -> &TypeDescriptor {
        &self.requested
    }
}

/// A node's content could not be converted to or from a requested type.
///
/// Every variant records the path of the failing node, relative to the node
/// the conversion was started on.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConversionError {
    /// Resolution failed before any conversion ran
    #[error("cannot convert node at {path}: {source}")]
    NoSerializer {
        path: NodePath,
        #[source]
        source: NoSerializerError,
    },

    /// The node is absent but the requested type needs a value
    #[error("missing value at {path}")]
    Missing { path: NodePath },

    /// The node has the wrong shape or scalar type
    #[error("expected {expected} at {path}, found {actual}")]
    TypeMismatch {
        path: NodePath,
        expected: String,
        actual: String,
    },

    /// The node has the right shape but its content is not acceptable
    #[error("invalid value at {path}: {reason}")]
    InvalidValue {
        path: NodePath,
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
}

impl ConversionError {
    pub fn missing() -> Self {
        ConversionError::Missing {
            path: NodePath::new(),
        }
    }

    pub fn mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        ConversionError::TypeMismatch {
            path: NodePath::new(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        ConversionError::InvalidValue {
            path: NodePath::new(),
            reason: reason.into(),
            source: None,
        }
    }

    /// An invalid value caused by a lower-level error, which is kept as the
    /// error's source.
    pub fn invalid_with_source(
        reason: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        ConversionError::InvalidValue {
            path: NodePath::new(),
            reason: reason.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Path of the failing node.
    pub fn path(&self) -> &NodePath {
        match self {
            ConversionError::NoSerializer { path, .. }
            | ConversionError::Missing { path }
            | ConversionError::TypeMismatch { path, .. }
            | ConversionError::InvalidValue { path, .. } => path,
        }
    }

    fn path_mut(&mut self) -> &mut NodePath {
        match self {
            ConversionError::NoSerializer { path, .. }
            | ConversionError::Missing { path }
            | ConversionError::TypeMismatch { path, .. }
            | ConversionError::InvalidValue { path, .. } => path,
        }
    }

    /// Re-roots the error path below `prefix`.
    pub fn at(mut self, prefix: &NodePath) -> Self {
        let path = self.path_mut();
        *path = std::mem::take(path).prefixed(prefix);
        self
    }

    /// Re-roots the error path below a single child key.
    pub fn within(self, key: impl Into<Key>) -> Self {
        self.at(&NodePath::from(key.into()))
    }

    /// Check if no serializer was found for the requested type
    pub fn is_no_serializer(&self) -> bool {
        matches!(self, ConversionError::NoSerializer { .. })
    }

    /// Check if the node was absent
    pub fn is_missing(&self) -> bool {
        matches!(self, ConversionError::Missing { .. })
    }

    /// Check if the node had the wrong shape or scalar type
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, ConversionError::TypeMismatch { .. })
    }

    /// Check if the node's content was rejected
    pub fn is_invalid_value(&self) -> bool {
        matches!(self, ConversionError::InvalidValue { .. })
    }
}

impl From<NoSerializerError> for ConversionError {
    fn from(source: NoSerializerError) -> Self {
        ConversionError::NoSerializer {
            path: NodePath::new(),
            source,
        }
    }
}

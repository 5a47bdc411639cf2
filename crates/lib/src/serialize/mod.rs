//! Typed conversion between nodes and program values.
//!
//! A [`TypeSerializer`] converts between a [`ConfigNode`] and one family of
//! Rust types. Serializers live in a [`SerializerRegistry`], keyed by
//! [`TypeMatcher`]s, and the registry resolves the right one for a requested
//! [`TypeDescriptor`], including parameterized requests such as
//! `Vec<Regex>`.
//!
//! # Two serializer traits
//!
//! - [`TypedSerializer`] is what most implementations want: it works with one
//!   concrete value type and never sees type erasure.
//! - [`TypeSerializer`] is the object-safe form the registry stores. Values
//!   cross it as [`ErasedValue`]s. Registering a `TypedSerializer` wraps it
//!   in an adapter that performs the downcasts.
//!
//! Generic collection serializers are plain `TypeSerializer`s that receive
//! the registry, so they can resolve element serializers from the requested
//! descriptor's parameters. Collections travel through the erased interface
//! as [`ErasedList`], [`ErasedMap`] and [`ErasedOptional`].
//!
//! # Custom serializers
//!
//! ```
//! use configtree::{
//!     ConfigNode, ConfigType, ConfigurationOptions, ConversionError, Result, SerializerRegistry,
//!     TypeDescriptor, TypeMatcher, TypedSerializer,
//! };
//!
//! #[derive(Debug, PartialEq)]
//! struct Port(u16);
//! impl ConfigType for Port {}
//!
//! struct PortSerializer;
//!
//! impl TypedSerializer for PortSerializer {
//!     type Value = Port;
//!
//!     fn deserialize(&self, _ty: &TypeDescriptor, node: &ConfigNode) -> Result<Port> {
//!         let raw = node.get_int().ok_or_else(ConversionError::missing)?;
//!         u16::try_from(raw)
//!             .map(Port)
//!             .map_err(|err| ConversionError::invalid_with_source("port out of range", err))
//!     }
//!
//!     fn serialize(&self, _ty: &TypeDescriptor, value: Port, node: &mut ConfigNode) -> Result<()> {
//!         node.set(i64::from(value.0));
//!         Ok(())
//!     }
//! }
//!
//! let mut registry = SerializerRegistry::child_of(SerializerRegistry::defaults());
//! registry.register(TypeMatcher::exact::<Port>(), PortSerializer);
//!
//! let mut node = ConfigNode::new(ConfigurationOptions::defaults().with_serializers(registry));
//! node.set_value(Port(8080))?;
//! assert_eq!(node.get_value::<Port>()?, Port(8080));
//! # Ok::<(), ConversionError>(())
//! ```

use std::any::type_name;

use crate::{ConfigNode, Result};

mod collections;
mod config_type;
pub mod errors;
mod identifiers;
mod pattern;
pub mod registry;
mod scalars;
pub mod types;

pub use collections::{ListSerializer, MapSerializer, OptionalSerializer};
pub use config_type::{ConfigType, ErasedList, ErasedMap, ErasedOptional, ErasedValue};
pub use errors::{ConversionError, NoSerializerError};
pub use identifiers::{UrlSerializer, UuidSerializer};
pub use pattern::PatternSerializer;
pub use registry::SerializerRegistry;
pub use scalars::{BoolSerializer, Number, NumberSerializer, RawValueSerializer, StringSerializer};
pub use types::{NamedType, TypeDescriptor, TypeKind, TypeMatcher};

/// Object-safe, type-erased serializer as stored by the registry.
///
/// `registry` is the registry dispatching the call; collection serializers
/// use it to resolve the serializers of their parameters.
pub trait TypeSerializer: Send + Sync {
    /// Reads `node` as a value of the requested type.
    fn deserialize(
        &self,
        requested: &TypeDescriptor,
        node: &ConfigNode,
        registry: &SerializerRegistry,
    ) -> Result<ErasedValue>;

    /// Writes `value`, a value of the requested type, into `node`.
    fn serialize(
        &self,
        requested: &TypeDescriptor,
        value: ErasedValue,
        node: &mut ConfigNode,
        registry: &SerializerRegistry,
    ) -> Result<()>;
}

/// Serializer for a single concrete value type.
pub trait TypedSerializer: Send + Sync + 'static {
    /// The type this serializer produces and consumes.
    type Value: ConfigType;

    /// Reads `node` as a `Self::Value`.
    ///
    /// # Errors
    /// A [`ConversionError`] wrapping the underlying cause when the node's
    /// content is malformed.
    fn deserialize(&self, requested: &TypeDescriptor, node: &ConfigNode) -> Result<Self::Value>;

    /// Writes `value` into `node`, replacing its content.
    fn serialize(
        &self,
        requested: &TypeDescriptor,
        value: Self::Value,
        node: &mut ConfigNode,
    ) -> Result<()>;
}

/// Erases a [`TypedSerializer`] into a [`TypeSerializer`].
pub(crate) struct TypedAdapter<S> {
    inner: S,
}

impl<S: TypedSerializer> TypedAdapter<S> {
    pub(crate) fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: TypedSerializer> TypeSerializer for TypedAdapter<S> {
    fn deserialize(
        &self,
        requested: &TypeDescriptor,
        node: &ConfigNode,
        _registry: &SerializerRegistry,
    ) -> Result<ErasedValue> {
        let value = self.inner.deserialize(requested, node)?;
        Ok(value.into_erased())
    }

    fn serialize(
        &self,
        requested: &TypeDescriptor,
        value: ErasedValue,
        node: &mut ConfigNode,
        _registry: &SerializerRegistry,
    ) -> Result<()> {
        let typed = S::Value::from_erased(value).ok_or_else(|| {
            ConversionError::mismatch(
                type_name::<S::Value>(),
                format!("a value for `{requested}`"),
            )
        })?;
        self.inner.serialize(requested, typed, node)
    }
}

/// Returns the scalar of `node`, or the error a scalar serializer reports
/// for an absent or structured node.
pub(crate) fn require_scalar<'n>(
    node: &'n ConfigNode,
    expected: &str,
) -> Result<&'n crate::Scalar> {
    match node.scalar() {
        Some(scalar) => Ok(scalar),
        None if node.is_absent() => Err(ConversionError::missing()),
        None => Err(ConversionError::mismatch(expected, node.kind().to_string())),
    }
}

//! Generic serializers for lists, maps and optional values.
//!
//! These resolve the serializer of their element type from the requested
//! descriptor's parameters through the dispatching registry, so a
//! `Vec<Regex>` request ends up compiling every element with the pattern
//! serializer.

use std::any::Any;

use super::{
    ErasedList, ErasedMap, ErasedOptional, ErasedValue, SerializerRegistry, TypeDescriptor,
    TypeSerializer,
};
use crate::{ConfigNode, ConversionError, Key, NodeValue, Result, Value};

fn param<'d>(requested: &'d TypeDescriptor, index: usize) -> Result<&'d TypeDescriptor> {
    requested.param(index).ok_or_else(|| {
        ConversionError::invalid(format!("`{requested}` is missing type parameter {index}"))
    })
}

fn downcast<T: Any>(value: ErasedValue, requested: &TypeDescriptor) -> Result<T> {
    value
        .downcast::<T>()
        .map(|value| *value)
        .map_err(|_| ConversionError::mismatch(requested.to_string(), "a value of another type"))
}

/// Serializer for every list type.
///
/// An absent node reads as an empty list and a scalar node as a list with
/// that single element.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListSerializer;

impl TypeSerializer for ListSerializer {
    fn deserialize(
        &self,
        requested: &TypeDescriptor,
        node: &ConfigNode,
        registry: &SerializerRegistry,
    ) -> Result<ErasedValue> {
        let element = param(requested, 0)?;
        let items = match node.raw_value() {
            NodeValue::Absent => Vec::new(),
            NodeValue::Scalar(_) => vec![registry.deserialize_erased(element, node)?],
            NodeValue::List(children) => children
                .iter()
                .enumerate()
                .map(|(index, child)| {
                    registry
                        .deserialize_erased(element, child)
                        .map_err(|err| err.within(Key::Index(index)))
                })
                .collect::<Result<_>>()?,
            NodeValue::Map(_) => {
                return Err(ConversionError::mismatch(requested.to_string(), "map"));
            }
        };
        Ok(Box::new(ErasedList(items)))
    }

    fn serialize(
        &self,
        requested: &TypeDescriptor,
        value: ErasedValue,
        node: &mut ConfigNode,
        registry: &SerializerRegistry,
    ) -> Result<()> {
        let element = param(requested, 0)?;
        let ErasedList(items) = downcast(value, requested)?;
        node.set(Value::empty_list());
        for (index, item) in items.into_iter().enumerate() {
            let child = node.append_list_child();
            registry
                .serialize_erased(element, item, child)
                .map_err(|err| err.within(Key::Index(index)))?;
        }
        Ok(())
    }
}

/// Serializer for every string-keyed map type.
///
/// An absent node reads as an empty map. Entries whose value serializes to
/// nothing are left out of the written map.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapSerializer;

impl MapSerializer {
    fn value_type<'d>(requested: &'d TypeDescriptor) -> Result<&'d TypeDescriptor> {
        let key = param(requested, 0)?;
        if !key.is::<String>() {
            return Err(ConversionError::invalid(format!(
                "map keys must be strings, `{requested}` uses `{key}`"
            )));
        }
        param(requested, 1)
    }
}

impl TypeSerializer for MapSerializer {
    fn deserialize(
        &self,
        requested: &TypeDescriptor,
        node: &ConfigNode,
        registry: &SerializerRegistry,
    ) -> Result<ErasedValue> {
        let value_type = Self::value_type(requested)?;
        let entries = match node.raw_value() {
            NodeValue::Absent => Vec::new(),
            NodeValue::Map(children) => children
                .iter()
                .map(|(key, child)| {
                    registry
                        .deserialize_erased(value_type, child)
                        .map(|value| (key.to_string(), value))
                        .map_err(|err| err.within(key))
                })
                .collect::<Result<_>>()?,
            other => {
                return Err(ConversionError::mismatch(
                    requested.to_string(),
                    other.kind().to_string(),
                ));
            }
        };
        Ok(Box::new(ErasedMap(entries)))
    }

    fn serialize(
        &self,
        requested: &TypeDescriptor,
        value: ErasedValue,
        node: &mut ConfigNode,
        registry: &SerializerRegistry,
    ) -> Result<()> {
        let value_type = Self::value_type(requested)?;
        let ErasedMap(entries) = downcast(value, requested)?;
        node.set(Value::empty_map());
        for (key, value) in entries {
            let mut child = node.detached();
            registry
                .serialize_erased(value_type, value, &mut child)
                .map_err(|err| err.within(key.as_str()))?;
            if !child.is_absent() {
                node.attach_child(&Key::Name(key)).set_node(child);
            }
        }
        Ok(())
    }
}

/// Serializer for every optional type: absent is `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionalSerializer;

impl TypeSerializer for OptionalSerializer {
    fn deserialize(
        &self,
        requested: &TypeDescriptor,
        node: &ConfigNode,
        registry: &SerializerRegistry,
    ) -> Result<ErasedValue> {
        let inner = param(requested, 0)?;
        let value = if node.is_absent() {
            None
        } else {
            Some(registry.deserialize_erased(inner, node)?)
        };
        Ok(Box::new(ErasedOptional(value)))
    }

    fn serialize(
        &self,
        requested: &TypeDescriptor,
        value: ErasedValue,
        node: &mut ConfigNode,
        registry: &SerializerRegistry,
    ) -> Result<()> {
        let inner = param(requested, 0)?;
        match downcast(value, requested)? {
            ErasedOptional(Some(value)) => registry.serialize_erased(inner, value, node),
            ErasedOptional(None) => {
                node.clear();
                Ok(())
            }
        }
    }
}

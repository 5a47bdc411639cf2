//! Built-in serializers for scalar types.

use std::marker::PhantomData;

use super::{ConfigType, TypeDescriptor, TypedSerializer, require_scalar};
use crate::{ConfigNode, ConversionError, Result, Scalar, Value};

/// Reads any scalar as text; writes text.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringSerializer;

impl TypedSerializer for StringSerializer {
    type Value = String;

    fn deserialize(&self, _requested: &TypeDescriptor, node: &ConfigNode) -> Result<String> {
        require_scalar(node, "string").map(Scalar::as_string)
    }

    fn serialize(&self, _requested: &TypeDescriptor, value: String, node: &mut ConfigNode) -> Result<()> {
        node.set(value);
        Ok(())
    }
}

/// Reads booleans, `0`/`1` and the usual yes/no words; writes booleans.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolSerializer;

impl TypedSerializer for BoolSerializer {
    type Value = bool;

    fn deserialize(&self, _requested: &TypeDescriptor, node: &ConfigNode) -> Result<bool> {
        let scalar = require_scalar(node, "bool")?;
        scalar
            .as_bool()
            .ok_or_else(|| ConversionError::mismatch("bool", describe(scalar)))
    }

    fn serialize(&self, _requested: &TypeDescriptor, value: bool, node: &mut ConfigNode) -> Result<()> {
        node.set(value);
        Ok(())
    }
}

/// A primitive number the tree can store.
pub trait Number: Sized + Send + Sync + 'static {
    const NAME: &'static str;

    fn read(scalar: &Scalar) -> Result<Self>;

    fn write(self) -> Value;
}

macro_rules! integer_numbers {
    ($($ty:ty),* $(,)?) => {$(
        impl Number for $ty {
            const NAME: &'static str = stringify!($ty);

            fn read(scalar: &Scalar) -> Result<Self> {
                if let Scalar::Text(text) = scalar
                    && let Ok(n) = text.trim().parse::<$ty>()
                {
                    return Ok(n);
                }
                let wide = scalar
                    .as_int()
                    .ok_or_else(|| ConversionError::mismatch(Self::NAME, describe(scalar)))?;
                <$ty>::try_from(wide).map_err(|err| {
                    ConversionError::invalid_with_source(
                        format!("{wide} is out of range for {}", Self::NAME),
                        err,
                    )
                })
            }

            fn write(self) -> Value {
                match i64::try_from(self) {
                    Ok(n) => Value::Int(n),
                    // Only u64/usize values above i64::MAX land here
                    Err(_) => Value::Text(self.to_string()),
                }
            }
        }
    )*};
}

integer_numbers!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Number for f64 {
    const NAME: &'static str = "f64";

    fn read(scalar: &Scalar) -> Result<Self> {
        scalar
            .as_float()
            .ok_or_else(|| ConversionError::mismatch(Self::NAME, describe(scalar)))
    }

    fn write(self) -> Value {
        Value::Float(self)
    }
}

impl Number for f32 {
    const NAME: &'static str = "f32";

    fn read(scalar: &Scalar) -> Result<Self> {
        let wide = f64::read(scalar)?;
        if wide.is_finite() && wide.abs() > f64::from(f32::MAX) {
            return Err(ConversionError::invalid(format!(
                "{wide} is out of range for {}",
                Self::NAME
            )));
        }
        Ok(wide as f32)
    }

    fn write(self) -> Value {
        Value::Float(f64::from(self))
    }
}

/// Serializer for one primitive number type.
///
/// Integers are range checked; a value that does not fit is rejected as
/// invalid rather than truncated.
pub struct NumberSerializer<T>(PhantomData<fn() -> T>);

impl<T> NumberSerializer<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for NumberSerializer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Number + ConfigType> TypedSerializer for NumberSerializer<T> {
    type Value = T;

    fn deserialize(&self, _requested: &TypeDescriptor, node: &ConfigNode) -> Result<T> {
        T::read(require_scalar(node, T::NAME)?)
    }

    fn serialize(&self, _requested: &TypeDescriptor, value: T, node: &mut ConfigNode) -> Result<()> {
        node.set(value.write());
        Ok(())
    }
}

/// Copies a node's whole content to and from a [`Value`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RawValueSerializer;

impl TypedSerializer for RawValueSerializer {
    type Value = Value;

    fn deserialize(&self, _requested: &TypeDescriptor, node: &ConfigNode) -> Result<Value> {
        Ok(node.get())
    }

    fn serialize(&self, _requested: &TypeDescriptor, value: Value, node: &mut ConfigNode) -> Result<()> {
        node.set(value);
        Ok(())
    }
}

fn describe(scalar: &Scalar) -> String {
    format!("{} `{scalar}`", scalar.type_name())
}

//! Types that can be read from and written to nodes.

use std::{
    any::Any,
    collections::{BTreeMap, HashMap},
};

use regex::Regex;
use url::Url;
use uuid::Uuid;

use super::TypeDescriptor;
use crate::Value;

/// A value crossing the object-safe serializer interface.
pub type ErasedValue = Box<dyn Any + Send>;

/// Erased form of a list value: one erased value per element.
pub struct ErasedList(pub Vec<ErasedValue>);

/// Erased form of a map value: erased values under their keys, in order.
pub struct ErasedMap(pub Vec<(String, ErasedValue)>);

/// Erased form of an optional value.
pub struct ErasedOptional(pub Option<ErasedValue>);

/// A Rust type that typed node reads and writes can request.
///
/// The descriptor drives serializer resolution. Concrete types only need an
/// empty impl; the defaults describe them by type id and move them through
/// the erased interface as themselves. Collection types override all three
/// methods to describe their parameters and to (un)wrap their elements.
pub trait ConfigType: Sized + Send + 'static {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::named::<Self>()
    }

    /// Recovers a value from its erased form, `None` on a type mismatch.
    fn from_erased(value: ErasedValue) -> Option<Self> {
        value.downcast::<Self>().ok().map(|value| *value)
    }

    fn into_erased(self) -> ErasedValue {
        Box::new(self)
    }
}

macro_rules! named_config_types {
    ($($ty:ty),* $(,)?) => {
        $(impl ConfigType for $ty {})*
    };
}

named_config_types!(
    String, bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, Regex, Uuid, Url,
    Value,
);

impl<T: ConfigType> ConfigType for Vec<T> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::list_of(T::type_descriptor())
    }

    fn from_erased(value: ErasedValue) -> Option<Self> {
        let ErasedList(items) = *value.downcast::<ErasedList>().ok()?;
        items.into_iter().map(T::from_erased).collect()
    }

    fn into_erased(self) -> ErasedValue {
        Box::new(ErasedList(self.into_iter().map(T::into_erased).collect()))
    }
}

impl<T: ConfigType> ConfigType for Option<T> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::optional_of(T::type_descriptor())
    }

    fn from_erased(value: ErasedValue) -> Option<Self> {
        let ErasedOptional(inner) = *value.downcast::<ErasedOptional>().ok()?;
        match inner {
            Some(inner) => T::from_erased(inner).map(Some),
            None => Some(None),
        }
    }

    fn into_erased(self) -> ErasedValue {
        Box::new(ErasedOptional(self.map(T::into_erased)))
    }
}

fn map_from_erased<T, M>(value: ErasedValue) -> Option<M>
where
    T: ConfigType,
    M: FromIterator<(String, T)>,
{
    let ErasedMap(entries) = *value.downcast::<ErasedMap>().ok()?;
    entries
        .into_iter()
        .map(|(key, item)| T::from_erased(item).map(|item| (key, item)))
        .collect()
}

fn map_into_erased<T: ConfigType>(entries: impl IntoIterator<Item = (String, T)>) -> ErasedValue {
    Box::new(ErasedMap(
        entries
            .into_iter()
            .map(|(key, item)| (key, item.into_erased()))
            .collect(),
    ))
}

impl<T: ConfigType> ConfigType for HashMap<String, T> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::map_of(TypeDescriptor::named::<String>(), T::type_descriptor())
    }

    fn from_erased(value: ErasedValue) -> Option<Self> {
        map_from_erased(value)
    }

    fn into_erased(self) -> ErasedValue {
        map_into_erased(self)
    }
}

impl<T: ConfigType> ConfigType for BTreeMap<String, T> {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::map_of(TypeDescriptor::named::<String>(), T::type_descriptor())
    }

    fn from_erased(value: ErasedValue) -> Option<Self> {
        map_from_erased(value)
    }

    fn into_erased(self) -> ErasedValue {
        map_into_erased(self)
    }
}

//! Serializer registration, resolution and dispatch.

use std::{
    fmt,
    sync::{Arc, LazyLock},
};

use super::{
    BoolSerializer, ConfigType, ConversionError, ErasedValue, ListSerializer, MapSerializer,
    NoSerializerError, NumberSerializer, OptionalSerializer, PatternSerializer, RawValueSerializer,
    StringSerializer, TypeDescriptor, TypeMatcher, TypeSerializer, TypedAdapter, TypedSerializer,
    UrlSerializer, UuidSerializer,
};
use crate::{ConfigNode, Result};

static DEFAULTS: LazyLock<Arc<SerializerRegistry>> =
    LazyLock::new(|| Arc::new(SerializerRegistry::with_builtins()));

struct Registration {
    matcher: TypeMatcher,
    serializer: Arc<dyn TypeSerializer>,
}

/// An ordered collection of serializers with override semantics.
///
/// Registrations are consulted most recent first, and the first one whose
/// matcher accepts the requested type wins. Registering a serializer for a
/// type that is already covered therefore overrides the earlier one, however
/// narrow the earlier matcher was. If nothing in this registry matches, the
/// parent registry (if any) is consulted.
///
/// The usual way to customize conversions is a child of the shared
/// [`defaults`](Self::defaults):
///
/// ```
/// use configtree::{ConfigurationOptions, SerializerRegistry, serialize::StringSerializer, TypeMatcher};
///
/// let mut registry = SerializerRegistry::child_of(SerializerRegistry::defaults());
/// registry.register(TypeMatcher::exact::<String>(), StringSerializer);
/// let options = ConfigurationOptions::defaults().with_serializers(registry);
/// ```
#[derive(Default)]
pub struct SerializerRegistry {
    parent: Option<Arc<SerializerRegistry>>,
    registrations: Vec<Registration>,
}

impl SerializerRegistry {
    /// Creates an empty registry without a parent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry that falls back to `parent`.
    pub fn child_of(parent: Arc<SerializerRegistry>) -> Self {
        Self {
            parent: Some(parent),
            registrations: Vec::new(),
        }
    }

    /// The shared registry holding every built-in serializer.
    pub fn defaults() -> Arc<SerializerRegistry> {
        Arc::clone(&DEFAULTS)
    }

    /// Creates a registry holding every built-in serializer.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry
            .register_exact(RawValueSerializer)
            .register_exact(StringSerializer)
            .register_exact(BoolSerializer)
            .register_exact(NumberSerializer::<i8>::new())
            .register_exact(NumberSerializer::<i16>::new())
            .register_exact(NumberSerializer::<i32>::new())
            .register_exact(NumberSerializer::<i64>::new())
            .register_exact(NumberSerializer::<isize>::new())
            .register_exact(NumberSerializer::<u8>::new())
            .register_exact(NumberSerializer::<u16>::new())
            .register_exact(NumberSerializer::<u32>::new())
            .register_exact(NumberSerializer::<u64>::new())
            .register_exact(NumberSerializer::<usize>::new())
            .register_exact(NumberSerializer::<f32>::new())
            .register_exact(NumberSerializer::<f64>::new())
            .register_exact(PatternSerializer)
            .register_exact(UuidSerializer)
            .register_exact(UrlSerializer)
            .register_erased(TypeMatcher::list(), Arc::new(ListSerializer))
            .register_erased(TypeMatcher::map(), Arc::new(MapSerializer))
            .register_erased(TypeMatcher::optional(), Arc::new(OptionalSerializer));
        registry
    }

    pub fn parent(&self) -> Option<&Arc<SerializerRegistry>> {
        self.parent.as_ref()
    }

    /// Number of registrations in this registry, excluding its parents.
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Registers a typed serializer for the types accepted by `matcher`.
    pub fn register<S: TypedSerializer>(&mut self, matcher: TypeMatcher, serializer: S) -> &mut Self {
        self.register_erased(matcher, Arc::new(TypedAdapter::new(serializer)))
    }

    /// Registers a typed serializer for exactly its value type.
    pub fn register_exact<S: TypedSerializer>(&mut self, serializer: S) -> &mut Self {
        self.register(TypeMatcher::exact::<S::Value>(), serializer)
    }

    /// Registers an object-safe serializer for the types accepted by `matcher`.
    pub fn register_erased(
        &mut self,
        matcher: TypeMatcher,
        serializer: Arc<dyn TypeSerializer>,
    ) -> &mut Self {
        tracing::debug!(matcher = %matcher, "Registered type serializer");
        self.registrations.push(Registration {
            matcher,
            serializer,
        });
        self
    }

    /// Finds the serializer responsible for `requested`.
    ///
    /// # Errors
    /// [`NoSerializerError`] if neither this registry nor a parent has a
    /// matching registration.
    pub fn resolve(
        &self,
        requested: &TypeDescriptor,
    ) -> std::result::Result<Arc<dyn TypeSerializer>, NoSerializerError> {
        match self.find(requested) {
            Some(registration) => {
                tracing::trace!(requested = %requested, matcher = %registration.matcher, "Resolved type serializer");
                Ok(Arc::clone(&registration.serializer))
            }
            None => {
                tracing::debug!(requested = %requested, "No type serializer matched");
                Err(NoSerializerError::new(requested.clone()))
            }
        }
    }

    fn find(&self, requested: &TypeDescriptor) -> Option<&Registration> {
        let own = self
            .registrations
            .iter()
            .rev()
            .find(|registration| registration.matcher.matches(requested));

        match own {
            Some(registration) => Some(registration),
            None => self.parent.as_deref()?.find(requested),
        }
    }

    /// Reads `node` as a `T`.
    pub fn deserialize<T: ConfigType>(&self, node: &ConfigNode) -> Result<T> {
        let requested = T::type_descriptor();
        let value = self.deserialize_erased(&requested, node)?;
        T::from_erased(value).ok_or_else(|| {
            ConversionError::mismatch(
                requested.to_string(),
                "a value of another type from its serializer",
            )
        })
    }

    /// Writes `value` into `node`.
    pub fn serialize<T: ConfigType>(&self, value: T, node: &mut ConfigNode) -> Result<()> {
        let requested = T::type_descriptor();
        self.serialize_erased(&requested, value.into_erased(), node)
    }

    /// Reads `node` as the requested type, in erased form.
    pub fn deserialize_erased(
        &self,
        requested: &TypeDescriptor,
        node: &ConfigNode,
    ) -> Result<ErasedValue> {
        let serializer = self.resolve(requested)?;
        serializer.deserialize(requested, node, self)
    }

    /// Writes an erased value of the requested type into `node`.
    pub fn serialize_erased(
        &self,
        requested: &TypeDescriptor,
        value: ErasedValue,
        node: &mut ConfigNode,
    ) -> Result<()> {
        let serializer = self.resolve(requested)?;
        serializer.serialize(requested, value, node, self)
    }
}

impl fmt::Debug for SerializerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let matchers: Vec<_> = self
            .registrations
            .iter()
            .map(|registration| registration.matcher.to_string())
            .collect();
        f.debug_struct("SerializerRegistry")
            .field("registrations", &matchers)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}

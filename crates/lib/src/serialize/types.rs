//! Runtime descriptions of requested types.
//!
//! A [`TypeDescriptor`] is a base kind plus an ordered list of type
//! parameters, so `Vec<Regex>` is described as `list<Regex>` and
//! `HashMap<String, Vec<u16>>` as `map<String, list<u16>>`. The registry
//! matches these descriptors structurally with [`TypeMatcher`]s.

use std::{
    any::{TypeId, type_name},
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

use super::ConfigType;

/// A concrete, non-parameterized Rust type.
///
/// Identity is the [`TypeId`]; the name is only for display.
#[derive(Clone, Copy)]
pub struct NamedType {
    id: TypeId,
    name: &'static str,
}

impl NamedType {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Full type name as reported by [`std::any::type_name`].
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path.
    pub fn short_name(&self) -> &'static str {
        if self.name.contains('<') {
            return self.name;
        }
        self.name.rsplit("::").next().unwrap_or(self.name)
    }
}

impl PartialEq for NamedType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for NamedType {}

impl Hash for NamedType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for NamedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Base kind of a [`TypeDescriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A concrete type, described by its type id
    Named(NamedType),
    /// Ordered collection; one parameter, the element type
    List,
    /// String-keyed mapping; two parameters, key and value types
    Map,
    /// Value that may be absent; one parameter, the inner type
    Optional,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Named(named) => f.write_str(named.short_name()),
            TypeKind::List => f.write_str("list"),
            TypeKind::Map => f.write_str("map"),
            TypeKind::Optional => f.write_str("optional"),
        }
    }
}

/// Description of a possibly parameterized type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    kind: TypeKind,
    params: Vec<TypeDescriptor>,
}

impl TypeDescriptor {
    /// Descriptor of a type that can be read from and written to nodes.
    pub fn of<T: ConfigType>() -> Self {
        T::type_descriptor()
    }

    /// Descriptor of a concrete type without parameters.
    pub fn named<T: ?Sized + 'static>() -> Self {
        Self::parameterized(TypeKind::Named(NamedType::of::<T>()), Vec::new())
    }

    pub fn parameterized(kind: TypeKind, params: Vec<TypeDescriptor>) -> Self {
        Self { kind, params }
    }

    pub fn list_of(element: TypeDescriptor) -> Self {
        Self::parameterized(TypeKind::List, vec![element])
    }

    pub fn map_of(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        Self::parameterized(TypeKind::Map, vec![key, value])
    }

    pub fn optional_of(inner: TypeDescriptor) -> Self {
        Self::parameterized(TypeKind::Optional, vec![inner])
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn params(&self) -> &[TypeDescriptor] {
        &self.params
    }

    pub fn param(&self, index: usize) -> Option<&TypeDescriptor> {
        self.params.get(index)
    }

    /// Returns true if this describes exactly the concrete type `T`.
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        matches!(self.kind, TypeKind::Named(named) if named.id() == TypeId::of::<T>())
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if self.params.is_empty() {
            return Ok(());
        }
        write!(f, "<")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{param}")?;
        }
        write!(f, ">")
    }
}

/// Decides which requested types a registered serializer handles.
///
/// When several registrations match, the most recently registered wins
/// regardless of matcher variant.
#[derive(Clone)]
pub enum TypeMatcher {
    /// Matches one descriptor, parameters included
    Exact(TypeDescriptor),
    /// Matches every descriptor with this base kind, whatever its parameters
    Kind(TypeKind),
    /// Matches descriptors accepted by a function
    Predicate {
        label: &'static str,
        test: Arc<dyn Fn(&TypeDescriptor) -> bool + Send + Sync>,
    },
}

impl TypeMatcher {
    /// Matches exactly the descriptor of `T`.
    pub fn exact<T: ConfigType>() -> Self {
        TypeMatcher::Exact(T::type_descriptor())
    }

    /// Matches every type sharing the base kind of `T`'s descriptor.
    pub fn kind_of<T: ConfigType>() -> Self {
        TypeMatcher::Kind(T::type_descriptor().kind())
    }

    /// Matches every list type.
    pub fn list() -> Self {
        TypeMatcher::Kind(TypeKind::List)
    }

    /// Matches every map type.
    pub fn map() -> Self {
        TypeMatcher::Kind(TypeKind::Map)
    }

    /// Matches every optional type.
    pub fn optional() -> Self {
        TypeMatcher::Kind(TypeKind::Optional)
    }

    pub fn predicate(
        label: &'static str,
        test: impl Fn(&TypeDescriptor) -> bool + Send + Sync + 'static,
    ) -> Self {
        TypeMatcher::Predicate {
            label,
            test: Arc::new(test),
        }
    }

    pub fn matches(&self, requested: &TypeDescriptor) -> bool {
        match self {
            TypeMatcher::Exact(descriptor) => descriptor == requested,
            TypeMatcher::Kind(kind) => *kind == requested.kind(),
            TypeMatcher::Predicate { test, .. } => test(requested),
        }
    }
}

impl fmt::Display for TypeMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeMatcher::Exact(descriptor) => write!(f, "{descriptor}"),
            TypeMatcher::Kind(TypeKind::Named(named)) => write!(f, "{}<*>", named.short_name()),
            TypeMatcher::Kind(kind) => write!(f, "{kind}<*>"),
            TypeMatcher::Predicate { label, .. } => write!(f, "predicate({label})"),
        }
    }
}

impl fmt::Debug for TypeMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeMatcher({self})")
    }
}

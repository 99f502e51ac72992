use crate::error::RegistryError;
use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// A key that denotes the type of the value stored under it.
///
/// The associated `Value` type is the key's only identity: the registry
/// derives the slot from `Value` itself, so an implementation cannot point a
/// key at another type's slot. `TypedRegistry::put` only accepts a
/// `K::Value` for a key `K`.
pub trait TypeKey {
    /// The type of value this key addresses
    type Value: Any + Send + Sync;
}

/// The runtime identity of the type addressed by `K`
pub(crate) fn tag_of<K: TypeKey + ?Sized>() -> TypeTag {
    TypeTag::of::<K::Value>()
}

/// Runtime identity of a type: its `TypeId` plus a readable name.
///
/// Equality and hashing only consider the `TypeId`.
#[derive(Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// Returns the tag for the type `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// The `TypeId` this tag stands for
    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// The type's name as reported by `std::any::type_name`
    pub fn type_name(&self) -> &'static str {
        self.name
    }

    /// Check if this tag denotes the type `T`
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag({})", self.name)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A zero-sized token standing for the type `T`
///
/// # Examples
///
/// ```
/// use typed_registry::{TypeToken, TypedRegistry, RegistryError};
///
/// const GREETING: TypeToken<String> = TypeToken::new();
///
/// let registry = TypedRegistry::new();
/// registry.put(&GREETING, "Hello".to_string())?;
/// assert_eq!(registry.get(&GREETING)?.as_deref(), Some("Hello"));
/// # Ok::<(), RegistryError>(())
/// ```
pub struct TypeToken<T: ?Sized> {
    // fn() -> T keeps the token Send + Sync + Copy whatever T is
    _marker: PhantomData<fn() -> T>,
}

impl<T: ?Sized> TypeToken<T> {
    /// Creates a token for `T`; usable in `const` items
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized + 'static> TypeToken<T> {
    /// The runtime identity of `T`
    pub fn type_tag(&self) -> TypeTag {
        TypeTag::of::<T>()
    }
}

impl<T: ?Sized> Clone for TypeToken<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for TypeToken<T> {}

impl<T: ?Sized> Default for TypeToken<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for TypeToken<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeToken<{}>", type_name::<T>())
    }
}

impl<T: Any + Send + Sync> TypeKey for TypeToken<T> {
    type Value = T;
}

/// A named type token.
///
/// The name is a label for diagnostics; the registry keys entries by type
/// alone, so two `DataKey<T>` with different names address the same slot.
///
/// # Examples
///
/// ```
/// use typed_registry::{DataKey, TypedRegistry, RegistryError};
///
/// let is_test = DataKey::<bool>::new("isTest")?;
/// let registry = TypedRegistry::new();
/// registry.put(&is_test, true)?;
/// assert_eq!(registry.get(&is_test)?, Some(true));
///
/// assert!(matches!(
///     DataKey::<bool>::new("  "),
///     Err(RegistryError::InvalidArgument(_))
/// ));
/// # Ok::<(), RegistryError>(())
/// ```
pub struct DataKey<T: ?Sized> {
    name: String,
    token: TypeToken<T>,
}

impl<T: ?Sized> DataKey<T> {
    /// Creates a key labelled `name`
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidArgument` if `name` is empty or blank.
    pub fn new(name: impl Into<String>) -> Result<Self, RegistryError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RegistryError::InvalidArgument(
                "data key name must not be blank".to_string(),
            ));
        }
        Ok(Self {
            name,
            token: TypeToken::new(),
        })
    }

    /// The label given at construction
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The unnamed token for the same type
    pub fn token(&self) -> TypeToken<T> {
        self.token
    }
}

impl<T: ?Sized> Clone for DataKey<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            token: self.token,
        }
    }
}

impl<T: ?Sized> fmt::Debug for DataKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataKey")
            .field("name", &self.name)
            .field("type", &type_name::<T>())
            .finish()
    }
}

impl<T: Any + Send + Sync> TypeKey for DataKey<T> {
    type Value = T;
}

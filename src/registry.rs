use crate::any_value::AnyValue;
use crate::error::RegistryError;
use crate::token::{tag_of, TypeKey, TypeTag, TypeToken};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// A thread-safe heterogeneous container holding at most one value per type.
///
/// Keys are type tokens (`TypeToken<T>`, `DataKey<T>` or anything else that
/// implements [`TypeKey`]), and the value stored under a key is always of
/// the key's type. Retrieval narrows the type-erased entry with a checked
/// downcast, so callers never cast.
///
/// Cloning a `TypedRegistry` yields another handle to the same storage.
///
/// # Examples
///
/// ```
/// use typed_registry::{TypeToken, TypedRegistry, RegistryError};
///
/// let registry = TypedRegistry::new();
/// registry.put(&TypeToken::<String>::new(), "Hello".to_string())?;
/// registry.put(&TypeToken::<i32>::new(), 2025)?;
///
/// assert_eq!(registry.get(&TypeToken::<String>::new())?, Some("Hello".to_string()));
/// assert_eq!(registry.get(&TypeToken::<i32>::new())?, Some(2025));
/// assert_eq!(registry.get(&TypeToken::<bool>::new())?, None);
/// # Ok::<(), RegistryError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct TypedRegistry {
    items: Arc<Mutex<HashMap<TypeId, AnyValue>>>,
}

impl TypedRegistry {
    /// Creates a new, empty registry
    pub fn new() -> Self {
        Self {
            items: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<TypeId, AnyValue>>, RegistryError> {
        self.items.lock().map_err(|_| RegistryError::LockError)
    }

    /// Stores `value` under `key`, replacing any value of the same type.
    ///
    /// Returns the replaced value, if there was one.
    ///
    /// # Errors
    ///
    /// - Returns `RegistryError::LockError` if the internal lock cannot be acquired
    /// - Returns `RegistryError::TypeMismatch` if the replaced entry fails to narrow
    pub fn put<K: TypeKey>(&self, _key: &K, value: K::Value) -> Result<Option<K::Value>, RegistryError> {
        let tag = tag_of::<K>();
        let mut store = self.lock()?;
        let previous = store.insert(tag.type_id(), AnyValue::new(value));
        drop(store);

        match previous {
            Some(entry) => {
                tracing::debug!(type_name = tag.type_name(), "replaced registered value");
                narrow_owned::<K::Value>(entry).map(Some)
            }
            None => {
                tracing::trace!(type_name = tag.type_name(), "registered value");
                Ok(None)
            }
        }
    }

    /// Stores `value` under its own type
    ///
    /// # Errors
    ///
    /// Same as [`TypedRegistry::put`].
    pub fn insert<T: Any + Send + Sync>(&self, value: T) -> Result<Option<T>, RegistryError> {
        self.put(&TypeToken::<T>::new(), value)
    }

    /// Stores an already type-erased value under `tag`.
    ///
    /// This is the dynamic counterpart of [`TypedRegistry::put`]: the caller
    /// supplies the type identity separately, and it is checked against the
    /// value's runtime type before anything is stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use typed_registry::{TypeTag, TypeToken, TypedRegistry, RegistryError};
    /// use std::any::Any;
    ///
    /// let registry = TypedRegistry::new();
    /// let boxed: Box<dyn Any + Send + Sync> = Box::new(7u64);
    /// registry.put_tagged(TypeTag::of::<u64>(), boxed)?;
    /// assert_eq!(registry.get(&TypeToken::<u64>::new())?, Some(7));
    ///
    /// let wrong: Box<dyn Any + Send + Sync> = Box::new("seven");
    /// assert!(matches!(
    ///     registry.put_tagged(TypeTag::of::<u64>(), wrong),
    ///     Err(RegistryError::InvalidArgument(_))
    /// ));
    /// assert_eq!(registry.get(&TypeToken::<u64>::new())?, Some(7));
    /// # Ok::<(), RegistryError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// - Returns `RegistryError::InvalidArgument` if the value is not a `tag`;
    ///   the registry is left unchanged
    /// - Returns `RegistryError::LockError` if the internal lock cannot be acquired
    pub fn put_tagged(&self, tag: TypeTag, value: Box<dyn Any + Send + Sync>) -> Result<(), RegistryError> {
        let entry = AnyValue::from_boxed(tag, value).map_err(|_| {
            RegistryError::InvalidArgument(format!("value is not an instance of {}", tag))
        })?;

        let mut store = self.lock()?;
        if store.insert(tag.type_id(), entry).is_some() {
            tracing::debug!(type_name = tag.type_name(), "replaced registered value");
        } else {
            tracing::trace!(type_name = tag.type_name(), "registered value");
        }
        Ok(())
    }

    /// Retrieves a clone of the value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing was ever stored for that type.
    ///
    /// # Errors
    ///
    /// - Returns `RegistryError::LockError` if the internal lock cannot be acquired
    /// - Returns `RegistryError::TypeMismatch` if the stored entry fails to narrow
    pub fn get<K: TypeKey>(&self, key: &K) -> Result<Option<K::Value>, RegistryError>
    where
        K::Value: Clone,
    {
        self.with(key, |value| value.clone())
    }

    /// Runs `f` against a borrowed value, without cloning it.
    ///
    /// `f` runs while the registry lock is held; it must not call back into
    /// the same registry.
    ///
    /// # Examples
    ///
    /// ```
    /// use typed_registry::{TypeToken, TypedRegistry, RegistryError};
    ///
    /// let registry = TypedRegistry::new();
    /// registry.insert(vec![1, 2, 3])?;
    ///
    /// let len = registry.with(&TypeToken::<Vec<i32>>::new(), |v| v.len())?;
    /// assert_eq!(len, Some(3));
    /// # Ok::<(), RegistryError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Same as [`TypedRegistry::get`].
    pub fn with<K, F, R>(&self, _key: &K, f: F) -> Result<Option<R>, RegistryError>
    where
        K: TypeKey,
        F: FnOnce(&K::Value) -> R,
    {
        let store = self.lock()?;
        match store.get(&tag_of::<K>().type_id()) {
            Some(entry) => narrow_ref::<K::Value>(entry).map(|value| Some(f(value))),
            None => Ok(None),
        }
    }

    /// Runs `f` against a mutably borrowed value, updating it in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use typed_registry::{TypeToken, TypedRegistry, RegistryError};
    ///
    /// let registry = TypedRegistry::new();
    /// registry.insert(0u32)?;
    /// registry.with_mut(&TypeToken::<u32>::new(), |count| *count += 1)?;
    /// assert_eq!(registry.get(&TypeToken::<u32>::new())?, Some(1));
    /// # Ok::<(), RegistryError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Same as [`TypedRegistry::get`].
    pub fn with_mut<K, F, R>(&self, _key: &K, f: F) -> Result<Option<R>, RegistryError>
    where
        K: TypeKey,
        F: FnOnce(&mut K::Value) -> R,
    {
        let mut store = self.lock()?;
        match store.get_mut(&tag_of::<K>().type_id()) {
            Some(entry) => narrow_mut::<K::Value>(entry).map(|value| Some(f(value))),
            None => Ok(None),
        }
    }

    /// Removes and returns the value stored under `key`
    ///
    /// # Errors
    ///
    /// Same as [`TypedRegistry::get`].
    pub fn remove<K: TypeKey>(&self, _key: &K) -> Result<Option<K::Value>, RegistryError> {
        let tag = tag_of::<K>();
        let removed = self.lock()?.remove(&tag.type_id());
        match removed {
            Some(entry) => {
                tracing::trace!(type_name = tag.type_name(), "removed registered value");
                narrow_owned::<K::Value>(entry).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Returns true if a value is stored for `key`'s type
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::LockError` if the internal lock cannot be acquired.
    pub fn contains<K: TypeKey>(&self, _key: &K) -> Result<bool, RegistryError> {
        Ok(self.lock()?.contains_key(&tag_of::<K>().type_id()))
    }

    /// Returns the number of stored values
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::LockError` if the internal lock cannot be acquired.
    pub fn len(&self) -> Result<usize, RegistryError> {
        Ok(self.lock()?.len())
    }

    /// Returns true if the registry holds no values
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::LockError` if the internal lock cannot be acquired.
    pub fn is_empty(&self) -> Result<bool, RegistryError> {
        Ok(self.lock()?.is_empty())
    }

    /// Removes every stored value
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::LockError` if the internal lock cannot be acquired.
    pub fn clear(&self) -> Result<(), RegistryError> {
        self.lock()?.clear();
        Ok(())
    }

    /// Returns the names of all stored types, in no particular order
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::LockError` if the internal lock cannot be acquired.
    pub fn type_names(&self) -> Result<Vec<&'static str>, RegistryError> {
        Ok(self.lock()?.values().map(|entry| entry.tag.type_name()).collect())
    }
}

fn mismatch<T: 'static>(found: TypeTag) -> RegistryError {
    let expected = TypeTag::of::<T>().type_name();
    let found = found.type_name();
    tracing::error!(expected, found, "registry entry failed to narrow to its key type");
    RegistryError::TypeMismatch { expected, found }
}

fn narrow_ref<T: 'static>(entry: &AnyValue) -> Result<&T, RegistryError> {
    if !entry.is_type::<T>() {
        return Err(mismatch::<T>(entry.tag));
    }
    entry.downcast_ref::<T>().ok_or_else(|| mismatch::<T>(entry.tag))
}

fn narrow_mut<T: 'static>(entry: &mut AnyValue) -> Result<&mut T, RegistryError> {
    let found = entry.tag;
    if !entry.is_type::<T>() {
        return Err(mismatch::<T>(found));
    }
    entry.downcast_mut::<T>().ok_or_else(|| mismatch::<T>(found))
}

fn narrow_owned<T: 'static>(entry: AnyValue) -> Result<T, RegistryError> {
    entry.downcast::<T>().map_err(|entry| mismatch::<T>(entry.tag))
}

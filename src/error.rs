use thiserror::Error;

/// Errors that can occur when using a `TypedRegistry`
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The supplied key or value does not describe a valid entry
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// A stored value did not narrow to the type it was stored under.
    ///
    /// Insertion ties values to their keys, so this indicates a broken
    /// registry invariant rather than a caller mistake.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// Failed to acquire lock on the registry
    #[error("Failed to acquire lock")]
    LockError,
}

/// Errors raised while configuring a builder stage
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A field value was rejected; the stage is left unchanged
    #[error("Invalid argument for `{field}`: {reason}")]
    InvalidArgument { field: &'static str, reason: String },
}

impl BuildError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        BuildError::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }
}

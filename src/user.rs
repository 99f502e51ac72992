use crate::error::BuildError;
use crate::stage::Staged;
use std::fmt;

/// Largest age accepted by [`UserBuilder::age`]
pub const MAX_AGE: u32 = 150;

/// An immutable user profile, built through [`UserBuilder`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawUser"))]
pub struct User {
    name: String,
    age: u32,
    gender: Option<String>,
}

impl User {
    /// Starts a builder with the required name
    ///
    /// # Errors
    ///
    /// See [`UserBuilder::new`].
    pub fn builder(name: impl Into<String>) -> Result<UserBuilder, BuildError> {
        UserBuilder::new(name)
    }

    /// The user's display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Age in years; zero when never set
    pub fn age(&self) -> u32 {
        self.age
    }

    /// Gender, if one was given
    pub fn gender(&self) -> Option<&str> {
        self.gender.as_deref()
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name: {}, Age: {}", self.name, self.age)?;
        if let Some(gender) = &self.gender {
            write!(f, ", Gender: {}", gender)?;
        }
        Ok(())
    }
}

/// Stage for [`User`].
///
/// # Examples
///
/// ```
/// use typed_registry::{BuildError, UserBuilder};
///
/// let mut stage = UserBuilder::new("alice")?;
/// stage.age(30)?.gender("female");
///
/// // A rejected value leaves the stage as it was.
/// assert!(stage.age(200).is_err());
///
/// let user = stage.build();
/// assert_eq!(user.age(), 30);
/// assert_eq!(user.gender(), Some("female"));
/// # Ok::<(), BuildError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserBuilder {
    name: String,
    age: u32,
    gender: Option<String>,
}

impl UserBuilder {
    /// Creates a stage from the required name.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::InvalidArgument` if `name` is empty or blank.
    pub fn new(name: impl Into<String>) -> Result<Self, BuildError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(BuildError::invalid("name", "must not be blank"));
        }
        Ok(Self {
            name,
            age: 0,
            gender: None,
        })
    }

    /// Sets the age.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::InvalidArgument` if `age` exceeds [`MAX_AGE`];
    /// the stage keeps its previous age.
    pub fn age(&mut self, age: u32) -> Result<&mut Self, BuildError> {
        if age > MAX_AGE {
            return Err(BuildError::invalid(
                "age",
                format!("{} exceeds the maximum of {}", age, MAX_AGE),
            ));
        }
        self.age = age;
        Ok(self)
    }

    /// Sets the gender; any value is accepted
    pub fn gender(&mut self, gender: impl Into<String>) -> &mut Self {
        self.gender = Some(gender.into());
        self
    }

    /// Copies the current field values into a new [`User`]
    pub fn build(&self) -> User {
        tracing::debug!(has_gender = self.gender.is_some(), "built user");
        User {
            name: self.name.clone(),
            age: self.age,
            gender: self.gender.clone(),
        }
    }
}

impl Staged for UserBuilder {
    type Product = User;

    fn build(&self) -> User {
        UserBuilder::build(self)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawUser {
    name: String,
    #[serde(default)]
    age: u32,
    #[serde(default)]
    gender: Option<String>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawUser> for User {
    type Error = BuildError;

    fn try_from(raw: RawUser) -> Result<Self, Self::Error> {
        let mut stage = UserBuilder::new(raw.name)?;
        stage.age(raw.age)?;
        if let Some(gender) = raw.gender {
            stage.gender(gender);
        }
        Ok(stage.build())
    }
}

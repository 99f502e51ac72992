//! # typed-registry
//!
//! A type-keyed heterogeneous registry and staged builders for immutable values.
//!
//! The crate has two independent parts:
//!
//! - [`TypedRegistry`] stores at most one value per type. Keys are type tokens
//!   that carry the value type, so storing ties a value to its key at compile
//!   time and retrieving is a single checked downcast inside the registry
//!   rather than a cast at every call site.
//! - Staged builders ([`NutritionFactsBuilder`], [`UserBuilder`]) take the
//!   required fields up front, accept optional fields through chained setters,
//!   and finalize into immutable products ([`NutritionFacts`], [`User`]).
//!
//! ## Key Features
//!
//! - **Type-safe**: The key's type parameter decides what may be stored under it
//! - **Thread-safe**: The registry is built on `Arc<Mutex<_>>` and can be shared
//! - **Explicit absence**: Missing entries are `None`, never a default value
//! - **Validated construction**: Range-checked setters reject bad input with
//!   `BuildError` and leave the stage untouched
//!
//! ## Usage Examples
//!
//! ### Storing values by type
//!
//! ```rust
//! use typed_registry::{DataKey, RegistryError, TypeToken, TypedRegistry};
//!
//! fn main() -> Result<(), RegistryError> {
//!     let registry = TypedRegistry::new();
//!
//!     registry.put(&TypeToken::<String>::new(), "Hello".to_string())?;
//!     registry.put(&TypeToken::<i32>::new(), 2025)?;
//!     registry.insert(vec!["A", "B"])?;
//!
//!     let text = registry.get(&TypeToken::<String>::new())?;
//!     let number = registry.get(&TypeToken::<i32>::new())?;
//!     assert_eq!(text.as_deref(), Some("Hello"));
//!     assert_eq!(number, Some(2025));
//!
//!     // Named keys still address values by type
//!     let is_test = DataKey::<bool>::new("isTest")?;
//!     registry.put(&is_test, true)?;
//!     assert_eq!(registry.get(&is_test)?, Some(true));
//!
//!     // Nothing stored for this type
//!     assert_eq!(registry.get(&TypeToken::<f64>::new())?, None);
//!
//!     Ok(())
//! }
//! ```
//!
//! ### Sharing a registry between components
//!
//! ```rust
//! use typed_registry::{RegistryError, TypeToken, TypedRegistry};
//! use std::thread;
//!
//! #[derive(Clone)]
//! struct Counter(u64);
//!
//! fn main() -> Result<(), RegistryError> {
//!     let registry = TypedRegistry::new();
//!     registry.insert(Counter(0))?;
//!
//!     let handles: Vec<_> = (0..4)
//!         .map(|_| {
//!             let registry = registry.clone();
//!             thread::spawn(move || {
//!                 registry.with_mut(&TypeToken::<Counter>::new(), |c| c.0 += 1)
//!             })
//!         })
//!         .collect();
//!
//!     for handle in handles {
//!         handle.join().expect("worker panicked")?;
//!     }
//!
//!     let total = registry.with(&TypeToken::<Counter>::new(), |c| c.0)?;
//!     assert_eq!(total, Some(4));
//!     Ok(())
//! }
//! ```
//!
//! ### Building immutable values
//!
//! ```rust
//! use typed_registry::{BuildError, NutritionFacts, Staged, User};
//!
//! fn main() -> Result<(), BuildError> {
//!     let mut stage = NutritionFacts::builder(250, 1);
//!     stage.calories(140).sodium(35).carbohydrate(27);
//!
//!     let first = stage.build();
//!     let second = Staged::build(&stage);
//!     assert_eq!(first, second);
//!
//!     println!("{}", first);
//!
//!     // Range-checked fields reject bad input and keep the stage intact
//!     let mut user = User::builder("alice")?;
//!     user.age(30)?;
//!     match user.age(400) {
//!         Err(BuildError::InvalidArgument { field, reason }) => {
//!             println!("{} rejected: {}", field, reason)
//!         }
//!         Ok(_) => unreachable!(),
//!     }
//!     assert_eq!(user.build().age(), 30);
//!     Ok(())
//! }
//! ```

mod any_value;
mod error;
mod nutrition;
mod registry;
mod stage;
mod token;
mod user;

pub use error::{BuildError, RegistryError};
pub use nutrition::{NutritionFacts, NutritionFactsBuilder};
pub use registry::TypedRegistry;
pub use stage::Staged;
pub use token::{DataKey, TypeKey, TypeTag, TypeToken};
pub use user::{User, UserBuilder, MAX_AGE};

// Re-export std::any for convenience
pub use std::any::{Any, TypeId};

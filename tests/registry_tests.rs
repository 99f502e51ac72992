use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use typed_registry::{DataKey, RegistryError, TypeKey, TypeTag, TypeToken, TypedRegistry};

#[derive(Clone, Debug, PartialEq)]
struct AppConfig {
    name: String,
    debug: bool,
    max_connections: u32,
}

#[test]
fn test_heterogeneous_values() -> Result<(), RegistryError> {
    let registry = TypedRegistry::new();

    registry.put(&TypeToken::<String>::new(), "Hello".to_string())?;
    registry.put(&TypeToken::<i32>::new(), 2025)?;

    assert_eq!(
        registry.get(&TypeToken::<String>::new())?,
        Some("Hello".to_string())
    );
    assert_eq!(registry.get(&TypeToken::<i32>::new())?, Some(2025));
    assert_eq!(registry.len()?, 2);

    Ok(())
}

#[test]
fn test_basic_operations() {
    let registry = TypedRegistry::new();
    let key = TypeToken::<AppConfig>::new();

    registry
        .put(
            &key,
            AppConfig {
                name: "MyApp".to_string(),
                debug: true,
                max_connections: 100,
            },
        )
        .unwrap();

    assert!(registry.contains(&key).unwrap());

    registry
        .with_mut(&key, |cfg| {
            cfg.debug = false;
        })
        .unwrap();

    let debug = registry.with(&key, |cfg| cfg.debug).unwrap();
    assert_eq!(debug, Some(false));

    let removed = registry.remove(&key).unwrap();
    assert_eq!(removed.map(|cfg| cfg.max_connections), Some(100));
    assert!(!registry.contains(&key).unwrap());
    assert!(registry.is_empty().unwrap());
}

#[test]
fn test_never_stored_type_is_absent() -> Result<(), RegistryError> {
    let registry = TypedRegistry::new();

    assert_eq!(registry.get(&TypeToken::<String>::new())?, None);

    // An empty string is a value, not absence
    registry.insert(String::new())?;
    assert_eq!(registry.get(&TypeToken::<String>::new())?, Some(String::new()));

    Ok(())
}

#[test]
fn test_second_put_overwrites() -> Result<(), RegistryError> {
    let registry = TypedRegistry::new();
    let key = TypeToken::<Vec<u8>>::new();

    assert_eq!(registry.put(&key, vec![1])?, None);
    assert_eq!(registry.put(&key, vec![2, 3])?, Some(vec![1]));
    assert_eq!(registry.get(&key)?, Some(vec![2, 3]));

    Ok(())
}

#[test]
fn test_similar_types_do_not_collide() -> Result<(), RegistryError> {
    let registry = TypedRegistry::new();

    registry.insert(1i32)?;
    registry.insert(2i64)?;
    registry.insert(3u32)?;
    registry.insert(Some(4i32))?;

    assert_eq!(registry.get(&TypeToken::<i32>::new())?, Some(1));
    assert_eq!(registry.get(&TypeToken::<i64>::new())?, Some(2));
    assert_eq!(registry.get(&TypeToken::<u32>::new())?, Some(3));
    assert_eq!(registry.get(&TypeToken::<Option<i32>>::new())?, Some(Some(4)));

    Ok(())
}

#[test]
fn test_data_key_labels() -> Result<(), RegistryError> {
    let registry = TypedRegistry::new();
    let flags = DataKey::<HashMap<String, bool>>::new("feature-flags")?;

    let mut initial = HashMap::new();
    initial.insert("dark-mode".to_string(), true);
    registry.put(&flags, initial)?;

    let dark_mode = registry.with(&flags, |f| f.get("dark-mode").copied())?;
    assert_eq!(dark_mode, Some(Some(true)));
    assert_eq!(flags.name(), "feature-flags");

    assert!(matches!(
        DataKey::<u8>::new(""),
        Err(RegistryError::InvalidArgument(_))
    ));

    Ok(())
}

// A caller-defined key; its slot is decided by `Value` alone
struct Greeting;

impl TypeKey for Greeting {
    type Value = String;
}

#[test]
fn test_custom_key_stays_in_its_value_slot() -> Result<(), RegistryError> {
    let registry = TypedRegistry::new();
    registry.insert(7u8)?;

    assert_eq!(registry.put(&Greeting, "hello".to_string())?, None);

    assert_eq!(registry.get(&TypeToken::<u8>::new())?, Some(7));
    assert_eq!(registry.get(&Greeting)?, Some("hello".to_string()));
    assert_eq!(
        registry.get(&TypeToken::<String>::new())?,
        Some("hello".to_string())
    );
    assert_eq!(registry.len()?, 2);

    assert_eq!(registry.remove(&Greeting)?, Some("hello".to_string()));
    assert_eq!(registry.get(&TypeToken::<u8>::new())?, Some(7));

    Ok(())
}

#[test]
fn test_dynamic_insertion() -> Result<(), RegistryError> {
    let registry = TypedRegistry::new();

    let values: Vec<(TypeTag, Box<dyn Any + Send + Sync>)> = vec![
        (TypeTag::of::<String>(), Box::new("dynamic".to_string())),
        (TypeTag::of::<f32>(), Box::new(1.5f32)),
    ];
    for (tag, value) in values {
        registry.put_tagged(tag, value)?;
    }

    assert_eq!(
        registry.get(&TypeToken::<String>::new())?,
        Some("dynamic".to_string())
    );
    assert_eq!(registry.get(&TypeToken::<f32>::new())?, Some(1.5));

    let err = registry
        .put_tagged(TypeTag::of::<f32>(), Box::new(2.5f64))
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidArgument(_)));
    assert_eq!(registry.get(&TypeToken::<f32>::new())?, Some(1.5));
    assert_eq!(registry.get(&TypeToken::<f64>::new())?, None);

    Ok(())
}

#[test]
fn test_thread_safety() {
    let registry = Arc::new(TypedRegistry::new());
    registry.insert(0i32).unwrap();

    let mut handles = vec![];
    for _ in 0..10 {
        let registry = Arc::clone(&registry);
        handles.push(thread::spawn(move || {
            for _ in 0..100 {
                registry
                    .with_mut(&TypeToken::<i32>::new(), |counter| {
                        *counter += 1;
                    })
                    .unwrap();
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    let final_value = registry.get(&TypeToken::<i32>::new()).unwrap();
    assert_eq!(final_value, Some(1000)); // 10 threads * 100 increments
}

#[test]
fn test_error_display() {
    let lock_error = RegistryError::LockError;
    let invalid = RegistryError::InvalidArgument("bad key".to_string());
    let mismatch = RegistryError::TypeMismatch {
        expected: "u8",
        found: "i8",
    };

    assert_eq!(format!("{}", lock_error), "Failed to acquire lock");
    assert_eq!(format!("{}", invalid), "Invalid argument: bad key");
    assert_eq!(
        format!("{}", mismatch),
        "Type mismatch: expected u8, found i8"
    );
    assert!(format!("{:?}", lock_error).contains("LockError"));
}

#[test]
fn test_default_implementation() {
    let registry: TypedRegistry = Default::default();
    assert!(registry.is_empty().unwrap());

    registry.insert(42u16).unwrap();
    assert_eq!(registry.get(&TypeToken::<u16>::new()).unwrap(), Some(42));
}

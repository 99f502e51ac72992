use crate::token::TypeTag;
use std::any::Any;

/// A type-erased registry entry that remembers which type it was stored as
#[derive(Debug)]
pub(crate) struct AnyValue {
    pub(crate) tag: TypeTag,
    pub(crate) value: Box<dyn Any + Send + Sync>,
}

impl AnyValue {
    /// Wrap a concrete value; the tag always matches the value's type
    pub(crate) fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            tag: TypeTag::of::<T>(),
            value: Box::new(value),
        }
    }

    /// Wrap an already boxed value, rejecting it unless its runtime type is `tag`
    pub(crate) fn from_boxed(
        tag: TypeTag,
        value: Box<dyn Any + Send + Sync>,
    ) -> Result<Self, Box<dyn Any + Send + Sync>> {
        // Deref first: the Box itself is also `Any`.
        if (*value).type_id() == tag.type_id() {
            Ok(Self { tag, value })
        } else {
            Err(value)
        }
    }

    pub(crate) fn is_type<T: 'static>(&self) -> bool {
        self.tag.is::<T>()
    }

    pub(crate) fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    pub(crate) fn downcast_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.value.downcast_mut::<T>()
    }

    /// Consume the entry, returning the value or the entry unchanged on mismatch
    pub(crate) fn downcast<T: 'static>(self) -> Result<T, Self> {
        let tag = self.tag;
        match self.value.downcast::<T>() {
            Ok(boxed) => Ok(*boxed),
            Err(value) => Err(Self { tag, value }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_records_tag() {
        let entry = AnyValue::new(42u8);
        assert!(entry.is_type::<u8>());
        assert!(!entry.is_type::<u16>());
        assert_eq!(entry.downcast_ref::<u8>(), Some(&42));
        assert_eq!(entry.downcast_ref::<u16>(), None);
    }

    #[test]
    fn test_from_boxed_checks_runtime_type() {
        let ok = AnyValue::from_boxed(TypeTag::of::<String>(), Box::new("x".to_string()));
        assert!(ok.is_ok());

        let rejected = AnyValue::from_boxed(TypeTag::of::<String>(), Box::new(7i32));
        let value = rejected.expect_err("mismatched tag must be rejected");
        assert_eq!(value.downcast_ref::<i32>(), Some(&7));
    }

    #[test]
    fn test_downcast_round_trip_and_mismatch() {
        let mut entry = AnyValue::new(vec![1, 2]);
        if let Some(v) = entry.downcast_mut::<Vec<i32>>() {
            v.push(3);
        }

        let entry = match entry.downcast::<String>() {
            Ok(_) => panic!("Should have gotten type mismatch"),
            Err(entry) => entry,
        };
        assert_eq!(entry.downcast::<Vec<i32>>().ok(), Some(vec![1, 2, 3]));
    }
}

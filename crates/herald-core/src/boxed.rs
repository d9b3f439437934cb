//! Owning, copyable handle to zero or one value

use std::fmt;

use crate::{make_value, HeraldError, HeraldResult, Item, Streamable, Value};

/// Owning handle to an optional type-erased value
///
/// Cloning deep-copies the held value. Every typed or text operation on
/// an empty box fails with [`HeraldError::EmptyValue`].
#[derive(Default)]
pub struct ValueBox {
    inner: Option<Box<dyn Value>>,
}

impl ValueBox {
    /// Box a copy of `value`
    pub fn new<T: Streamable>(value: T) -> Self {
        ValueBox {
            inner: Some(Box::new(make_value(value))),
        }
    }

    /// A box holding nothing
    pub fn empty() -> Self {
        ValueBox::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_none()
    }

    /// Replace the held value, possibly with one of another type
    pub fn set<T: Streamable>(&mut self, value: T) {
        self.inner = Some(Box::new(make_value(value)));
    }

    fn value(&self) -> HeraldResult<&dyn Value> {
        self.inner.as_deref().ok_or(HeraldError::EmptyValue)
    }

    /// Tag of the held type
    pub fn tag(&self) -> HeraldResult<&'static str> {
        Ok(self.value()?.tag())
    }

    /// Does this box hold a `T`?
    pub fn holds<T: Streamable>(&self) -> bool {
        self.inner
            .as_deref()
            .is_some_and(|v| v.as_any().is::<Item<T>>())
    }

    /// Borrow the held value as `T`
    pub fn get_ref<T: Streamable>(&self) -> HeraldResult<&T> {
        let value = self.value()?;
        value
            .as_any()
            .downcast_ref::<Item<T>>()
            .map(Item::get)
            .ok_or_else(|| HeraldError::TypeMismatch {
                expected: T::TAG.to_string(),
                actual: value.tag().to_string(),
            })
    }

    /// Copy out the held value as `T`
    pub fn get<T: Streamable>(&self) -> HeraldResult<T> {
        self.get_ref::<T>().cloned()
    }

    /// Render the held value as text
    pub fn to_text(&self) -> HeraldResult<String> {
        Ok(self.value()?.to_text())
    }

    /// Overwrite the held value by parsing `text` with its own type's parser
    pub fn from_text(&mut self, text: &str) -> HeraldResult<()> {
        self.inner
            .as_deref_mut()
            .ok_or(HeraldError::EmptyValue)?
            .read_text(text)
    }
}

impl Clone for ValueBox {
    fn clone(&self) -> Self {
        ValueBox {
            inner: self.inner.as_ref().map(|v| v.clone_value()),
        }
    }
}

impl PartialEq for ValueBox {
    fn eq(&self, other: &Self) -> bool {
        match (&self.inner, &other.inner) {
            (None, None) => true,
            (Some(a), Some(b)) => a.eq_value(&**b),
            _ => false,
        }
    }
}

impl fmt::Debug for ValueBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Some(v) => v.fmt(f),
            None => f.write_str("Empty"),
        }
    }
}

impl<T: Streamable> From<T> for ValueBox {
    fn from(value: T) -> Self {
        ValueBox::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_box_rejects_access() {
        let mut empty = ValueBox::empty();
        assert!(empty.is_empty());
        assert!(matches!(empty.get::<i32>(), Err(HeraldError::EmptyValue)));
        assert!(matches!(empty.to_text(), Err(HeraldError::EmptyValue)));
        assert!(matches!(empty.from_text("1"), Err(HeraldError::EmptyValue)));
        assert!(matches!(empty.tag(), Err(HeraldError::EmptyValue)));
    }

    #[test]
    fn test_typed_access() {
        let b = ValueBox::new(5_i32);
        assert_eq!(b.get::<i32>().unwrap(), 5);
        assert!(b.holds::<i32>());
        assert!(!b.holds::<i64>());

        match b.get::<String>() {
            Err(HeraldError::TypeMismatch { expected, actual }) => {
                assert_eq!(expected, "String");
                assert_eq!(actual, "i32");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_clone_is_deep() {
        let original = ValueBox::new(10_u64);
        let mut copy = original.clone();
        copy.from_text("20").unwrap();

        assert_eq!(original.get::<u64>().unwrap(), 10);
        assert_eq!(copy.get::<u64>().unwrap(), 20);
        assert_ne!(original, copy);
    }

    #[test]
    fn test_set_changes_type() {
        let mut b = ValueBox::new(1_i32);
        b.set("one".to_string());
        assert_eq!(b.tag().unwrap(), "String");
        assert_eq!(b.to_text().unwrap(), "one");
    }

    #[test]
    fn test_equality() {
        assert_eq!(ValueBox::new('x'), ValueBox::from('x'));
        assert_ne!(ValueBox::new(1_u8), ValueBox::new(1_i8));
        assert_eq!(ValueBox::empty(), ValueBox::empty());
        assert_ne!(ValueBox::empty(), ValueBox::new(false));
    }

    #[test]
    fn test_debug_output() {
        assert_eq!(format!("{:?}", ValueBox::new(3_i32)), "i32(3)");
        assert_eq!(format!("{:?}", ValueBox::empty()), "Empty");
    }
}

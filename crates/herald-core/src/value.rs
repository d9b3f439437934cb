//! Type-erased values
//!
//! [`Value`] is the object-safe face of a single streamable value.
//! [`Item`] is its one generic implementation; the concrete type is
//! recovered through `Any` downcasting.

use std::any::Any;
use std::fmt;

use crate::{HeraldError, HeraldResult, Streamable};

/// One value of some streamable type
pub trait Value: fmt::Debug + Send + Sync {
    /// Stable tag of the held type
    fn tag(&self) -> &'static str;

    /// Render the held value as text
    fn to_text(&self) -> String;

    /// Overwrite the held value by parsing `text`
    ///
    /// On failure the held value is left untouched.
    fn read_text(&mut self, text: &str) -> HeraldResult<()>;

    /// Deep copy into independent storage
    fn clone_value(&self) -> Box<dyn Value>;

    /// Same tag and equal value
    fn eq_value(&self, other: &dyn Value) -> bool;

    fn as_any(&self) -> &dyn Any;
}

/// Concrete holder for a value of type `T`
#[derive(Clone, PartialEq)]
pub struct Item<T: Streamable> {
    value: T,
}

impl<T: Streamable> Item<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        Item { value }
    }

    #[inline]
    pub fn get(&self) -> &T {
        &self.value
    }
}

impl<T: Streamable> fmt::Debug for Item<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", T::TAG, self.value)
    }
}

impl<T: Streamable> Value for Item<T> {
    fn tag(&self) -> &'static str {
        T::TAG
    }

    fn to_text(&self) -> String {
        self.value.to_text()
    }

    fn read_text(&mut self, text: &str) -> HeraldResult<()> {
        self.value = T::parse_text(text).map_err(|reason| HeraldError::Parse {
            tag: T::TAG.to_string(),
            text: text.to_string(),
            reason,
        })?;
        Ok(())
    }

    fn clone_value(&self) -> Box<dyn Value> {
        Box::new(self.clone())
    }

    fn eq_value(&self, other: &dyn Value) -> bool {
        other
            .as_any()
            .downcast_ref::<Item<T>>()
            .is_some_and(|o| o.value == self.value)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Wrap a copy of `value`
#[inline]
pub fn make_value<T: Streamable>(value: T) -> Item<T> {
    Item::new(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_tag_and_text() {
        let item = make_value(5_i32);
        assert_eq!(item.tag(), "i32");
        assert_eq!(Value::to_text(&item), "5");
        assert_eq!(*item.get(), 5);
    }

    #[test]
    fn test_read_text_failure_keeps_value() {
        let mut item = make_value(7_u16);
        let err = item.read_text("-1").unwrap_err();
        assert!(matches!(err, HeraldError::Parse { ref tag, .. } if tag == "u16"));
        assert_eq!(*item.get(), 7);

        item.read_text("9").unwrap();
        assert_eq!(*item.get(), 9);
    }

    #[test]
    fn test_clone_value_is_independent() {
        let original = make_value("a".to_string());
        let mut copy = original.clone_value();
        copy.read_text("b").unwrap();

        assert_eq!(original.get(), "a");
        assert_eq!(copy.to_text(), "b");
    }

    #[test]
    fn test_eq_value_across_types() {
        let a = make_value(1_i32);
        let b = make_value(1_i64);
        assert!(a.eq_value(&make_value(1_i32)));
        assert!(!a.eq_value(&b));
        assert!(!a.eq_value(&make_value(2_i32)));
    }
}

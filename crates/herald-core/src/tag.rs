//! Streamable types and their stable tags
//!
//! Every type carried through a parameter list declares an explicit tag.
//! Tags are written into serialized text and used as registry keys, so
//! they must not change between builds.

use std::fmt;

/// A type that can be carried in a [`ValueBox`](crate::ValueBox)
pub trait Streamable: Clone + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Stable textual tag identifying this type
    const TAG: &'static str;

    /// Canonical text form
    fn to_text(&self) -> String;

    /// Inverse of [`Streamable::to_text`]
    fn parse_text(text: &str) -> Result<Self, String>;
}

/// Tag of a streamable type
#[inline]
pub fn tag_of<T: Streamable>() -> &'static str {
    T::TAG
}

macro_rules! impl_streamable {
    ($($ty:ty => $tag:literal),* $(,)?) => {
        $(
            impl Streamable for $ty {
                const TAG: &'static str = $tag;

                fn to_text(&self) -> String {
                    self.to_string()
                }

                fn parse_text(text: &str) -> Result<Self, String> {
                    text.parse::<$ty>().map_err(|e| e.to_string())
                }
            }
        )*
    };
}

impl_streamable! {
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    i128 => "i128",
    isize => "isize",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    u128 => "u128",
    usize => "usize",
    f32 => "f32",
    f64 => "f64",
    bool => "bool",
    char => "char",
}

impl Streamable for String {
    const TAG: &'static str = "String";

    fn to_text(&self) -> String {
        self.clone()
    }

    fn parse_text(text: &str) -> Result<Self, String> {
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_builtin_tags() {
        assert_eq!(tag_of::<i32>(), "i32");
        assert_eq!(tag_of::<String>(), "String");
        assert_ne!(tag_of::<u32>(), tag_of::<i32>());
    }

    #[test]
    fn test_integer_text() {
        assert_eq!((-42_i64).to_text(), "-42");
        assert_eq!(i64::parse_text("-42"), Ok(-42));
        assert!(u8::parse_text("256").is_err());
        assert!(i32::parse_text("five").is_err());
    }

    #[test]
    fn test_string_text_is_identity() {
        let s = "hello world".to_string();
        assert_eq!(s.to_text(), "hello world");
        assert_eq!(String::parse_text(""), Ok(String::new()));
    }

    #[test]
    fn test_float_and_bool_text() {
        assert_eq!(0.1_f64.to_text(), "0.1");
        assert_eq!(f64::parse_text("0.1"), Ok(0.1));
        assert_eq!(true.to_text(), "true");
        assert!(bool::parse_text("yes").is_err());
    }

    proptest! {
        #[test]
        fn prop_text_is_inverse(i in any::<i32>(), u in any::<u128>(), c in any::<char>(), s in ".*") {
            prop_assert_eq!(i32::parse_text(&i.to_text()), Ok(i));
            prop_assert_eq!(u128::parse_text(&u.to_text()), Ok(u));
            prop_assert_eq!(char::parse_text(&c.to_text()), Ok(c));
            prop_assert_eq!(String::parse_text(&s.to_text()), Ok(s.clone()));
        }
    }
}

//! Herald Core - Fundamental types
//!
//! This crate defines the types shared by every Herald crate:
//! - Streamable types and their stable tags
//! - Type-erased values (`Value`, `Item<T>`)
//! - The owning value handle (`ValueBox`)
//! - The error taxonomy

pub mod boxed;
pub mod error;
pub mod tag;
pub mod value;

pub use boxed::*;
pub use error::*;
pub use tag::*;
pub use value::*;

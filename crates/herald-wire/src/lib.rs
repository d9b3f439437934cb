//! Herald Wire - Text encodings for parameter lists
//!
//! This crate implements the formats a parameter list can be written in:
//! - `SimpleFormat`: `<tags joined by ~>,<values joined by ~>`
//! - `EscapedFormat`: the same layout with backslash escaping
//! - `JsonFormat`: a JSON object with parallel arrays

pub mod escaped;
pub mod format;
pub mod json;
pub mod simple;

pub use escaped::*;
pub use format::*;
pub use json::*;
pub use simple::*;

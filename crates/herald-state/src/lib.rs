//! Herald State - Process-wide type registry and parameter lists
//!
//! This crate implements the stateful half of serialization:
//! - Tag to sample-value registry (global default plus isolated instances)
//! - Parameter lists with typed positional access
//! - Serialize/deserialize through any `herald_wire::Format`

pub mod params;
pub mod registry;

pub use params::*;
pub use registry::*;

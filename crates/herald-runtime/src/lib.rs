//! Herald Runtime - Synchronous in-process event dispatch
//!
//! Handlers are registered against an event name and invoked in
//! registration order on the triggering thread. The free functions below
//! operate on the process-wide [`EventManager::global`] instance.

pub mod config;
pub mod handle;
pub mod manager;
pub mod telemetry;

pub use config::*;
pub use handle::*;
pub use manager::*;
pub use telemetry::{init_logging, TelemetryError};

pub use herald_core::{HandlerError, HeraldError, HeraldResult, Streamable, ValueBox};
pub use herald_state::{ParameterList, TypeRegistry};
pub use herald_wire::{EscapedFormat, Format, JsonFormat, SimpleFormat};

/// Register `handler` for `event` on the global manager
pub fn register_event<F>(event: &str, handler: F) -> SubscriptionHandle
where
    F: Fn(&ParameterList) -> Result<(), HandlerError> + Send + Sync + 'static,
{
    EventManager::global().register(event, handler)
}

/// Remove a registration from the global manager
pub fn unregister_event(handle: &SubscriptionHandle) -> bool {
    EventManager::global().unregister(handle)
}

/// Trigger `event` on the global manager
pub fn trigger_event(event: &str, params: &ParameterList) -> HeraldResult<usize> {
    EventManager::global().trigger(event, params)
}

/// Trigger `event` on the global manager with no parameters
pub fn trigger_empty(event: &str) -> HeraldResult<usize> {
    EventManager::global().trigger_empty(event)
}

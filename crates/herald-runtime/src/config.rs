//! Runtime configuration

/// What a dispatch does when a handler fails
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failing handler and return its error
    #[default]
    FailFast,
    /// Run every handler, then report all failures together
    Isolate,
}

/// Event manager configuration
#[derive(Clone, Debug)]
pub struct DispatchConfig {
    /// Default failure policy for `trigger`
    pub policy: FailurePolicy,
    /// Emit a debug record for every dispatch
    pub log_dispatch: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        DispatchConfig {
            policy: FailurePolicy::FailFast,
            log_dispatch: true,
        }
    }
}

/// Logging bootstrap configuration
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub default_directive: String,
    /// Include the event target in each record
    pub with_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            default_directive: "info".to_string(),
            with_target: true,
        }
    }
}

//! Error types for Herald

use thiserror::Error;

/// Boxed failure returned by an event handler
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Core Herald errors
#[derive(Error, Debug)]
pub enum HeraldError {
    // Value errors
    #[error("Value box is empty")]
    EmptyValue,

    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("Cannot parse {text:?} as {tag}: {reason}")]
    Parse {
        tag: String,
        text: String,
        reason: String,
    },

    // Registry errors
    #[error("Unknown type tag: {0}")]
    UnknownType(String),

    // Format errors
    #[error("Arity mismatch: {tags} tags, {values} values")]
    ArityMismatch { tags: usize, values: usize },

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    // Parameter list errors
    #[error("Index out of range: {index} >= {len}")]
    IndexOutOfRange { index: usize, len: usize },

    // Dispatch errors
    #[error("Handler for event {event:?} failed: {source}")]
    Handler {
        event: String,
        #[source]
        source: HandlerError,
    },

    #[error("{} handler(s) for event {event:?} failed", .failures.len())]
    HandlersFailed {
        event: String,
        failures: Vec<HeraldError>,
    },
}

impl HeraldError {
    /// Build a format error from any message
    pub fn format<S: Into<String>>(reason: S) -> Self {
        HeraldError::InvalidFormat(reason.into())
    }

    /// Is this a failure raised by a handler rather than by Herald itself?
    pub fn is_handler_failure(&self) -> bool {
        matches!(
            self,
            HeraldError::Handler { .. } | HeraldError::HandlersFailed { .. }
        )
    }
}

/// Result type for Herald operations
pub type HeraldResult<T> = Result<T, HeraldError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error_keeps_source() {
        let err = HeraldError::Handler {
            event: "greet".into(),
            source: "boom".into(),
        };
        assert!(err.is_handler_failure());
        assert_eq!(err.to_string(), "Handler for event \"greet\" failed: boom");
        assert_eq!(
            std::error::Error::source(&err).map(|s| s.to_string()),
            Some("boom".to_string())
        );
    }

    #[test]
    fn test_handlers_failed_counts() {
        let err = HeraldError::HandlersFailed {
            event: "num".into(),
            failures: vec![HeraldError::EmptyValue, HeraldError::EmptyValue],
        };
        assert_eq!(err.to_string(), "2 handler(s) for event \"num\" failed");
        assert!(!HeraldError::UnknownType("x".into()).is_handler_failure());
    }
}

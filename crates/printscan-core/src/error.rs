//! Error types for printscan-core.
//!
//! All query failures fall into three classes, and all three are recovered
//! locally at the query boundary — discovery and aggregation convert them
//! to absence instead of propagating:
//!
//! | Error | Meaning | Handling |
//! |-------|---------|----------|
//! | [`QueryError::Unreachable`] | No response or transport failure | Absence; only class worth retrying |
//! | [`QueryError::Protocol`] | Agent answered with an error-status | Absence; do not retry |
//! | [`QueryError::Empty`] | Agent answered with no bindings | Absence ("not found"); do not retry |
//!
//! A sweep that exhausts its range without a match is a normal outcome
//! (`Ok(None)`), not an error.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when querying a device.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QueryError {
    /// The target could not be reached at the transport level.
    #[error("target unreachable: {0}")]
    Unreachable(UnreachableReason),

    /// The remote agent returned a non-zero error-status.
    #[error("agent error-status {status} at error-index {index}")]
    Protocol {
        /// The error-status field from the response PDU.
        status: u32,
        /// The error-index field from the response PDU.
        index: u32,
    },

    /// The agent answered but the response carried no usable binding.
    /// Treated as "not found", not a hard failure.
    #[error("agent returned no bindings")]
    Empty,

    /// Invalid client or sweep configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Structured reasons for a transport-level failure.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new reasons
/// in future versions without breaking downstream code.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum UnreachableReason {
    /// No response within the per-query timeout.
    Timeout {
        /// The timeout that elapsed.
        duration: Duration,
    },
    /// Socket-level I/O failure (bind, send, or receive).
    Io(String),
    /// The SNMP session could not be established or used.
    Session(String),
}

impl std::fmt::Display for UnreachableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout { duration } => write!(f, "no response after {duration:?}"),
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
            Self::Session(msg) => write!(f, "session error: {msg}"),
        }
    }
}

impl QueryError {
    /// Create an unreachable error for an elapsed per-query timeout.
    pub fn timeout(duration: Duration) -> Self {
        Self::Unreachable(UnreachableReason::Timeout { duration })
    }

    /// Create an unreachable error from a socket-level failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Unreachable(UnreachableReason::Io(message.into()))
    }

    /// Create an unreachable error from a session failure.
    pub fn session(message: impl Into<String>) -> Self {
        Self::Unreachable(UnreachableReason::Session(message.into()))
    }

    /// Create a configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Whether retrying the query could plausibly succeed.
    ///
    /// Only transport-level failures are retryable; an agent that answered
    /// with an error or an empty binding will answer the same way again.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unreachable(_))
    }
}

impl From<std::io::Error> for QueryError {
    fn from(err: std::io::Error) -> Self {
        Self::Unreachable(UnreachableReason::Io(err.to_string()))
    }
}

/// Result type alias using printscan-core's [`QueryError`].
pub type Result<T> = std::result::Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QueryError::timeout(Duration::from_secs(2));
        assert!(err.to_string().contains("2s"));

        let err = QueryError::Protocol { status: 2, index: 1 };
        assert!(err.to_string().contains("error-status 2"));

        let err = QueryError::Empty;
        assert_eq!(err.to_string(), "agent returned no bindings");

        let err = QueryError::invalid_config("timeout must be positive");
        assert!(err.to_string().contains("timeout must be positive"));
    }

    #[test]
    fn test_retry_classification() {
        assert!(QueryError::timeout(Duration::from_secs(1)).is_retryable());
        assert!(QueryError::io("send failed").is_retryable());
        assert!(QueryError::session("bind failed").is_retryable());

        assert!(!QueryError::Empty.is_retryable());
        assert!(!QueryError::Protocol { status: 5, index: 0 }.is_retryable());
        assert!(!QueryError::invalid_config("bad prefix").is_retryable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err: QueryError = io_err.into();
        assert!(matches!(err, QueryError::Unreachable(_)));
        assert!(err.to_string().contains("refused"));
    }
}

//! Error types for printscan-types.

use thiserror::Error;

/// Errors from parsing a dotted-numeric object identifier.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseOidError {
    /// The input was empty or whitespace only.
    #[error("empty object identifier")]
    Empty,

    /// The input contained an empty segment (leading, trailing, or doubled dot).
    #[error("empty segment in object identifier '{input}'")]
    EmptySegment {
        /// The full input string.
        input: String,
    },

    /// A segment was not an unsigned decimal number.
    #[error("invalid segment '{segment}' in object identifier '{input}'")]
    InvalidSegment {
        /// The full input string.
        input: String,
        /// The offending segment.
        segment: String,
    },
}

/// Result type alias for object identifier parsing.
pub type ParseResult<T> = std::result::Result<T, ParseOidError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(ParseOidError::Empty.to_string(), "empty object identifier");

        let err = ParseOidError::InvalidSegment {
            input: "1.3.x".to_string(),
            segment: "x".to_string(),
        };
        assert!(err.to_string().contains("'x'"));
        assert!(err.to_string().contains("'1.3.x'"));
    }
}

//! Error types for the datastore client.
//!
//! Every expected failure mode is represented by the [`Error`] enum and is
//! recovered at the nearest boundary (codec, client, or dispatcher) rather
//! than propagated as a panic. We use `thiserror` for automatic `Display`
//! and `Error` trait implementations.
//!
//! # Categories
//!
//! | Category   | Variants                          | Description              |
//! |------------|-----------------------------------|--------------------------|
//! | Codec      | `MalformedInput`, `UnsupportedType` | Bad user input         |
//! | Store      | `KeyNotFound`, `TypeMismatch`     | Entry missing or wrong shape |
//! | Transport  | `BackendUnavailable`, `Timeout`   | Backend did not answer   |
//! | Dispatch   | `Dispatch`                        | Unknown command or arity |

use thiserror::Error;

/// Result type alias for datastore operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Datastore client errors.
///
/// Errors are structured so the interactive front end can render a one-line
/// diagnostic naming the offending key, token, or value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Input text cannot be parsed as the requested type.
    #[error("malformed input for {tag}: {text:?} ({reason})")]
    MalformedInput {
        /// The requested type token.
        tag: String,
        /// The offending input text.
        text: String,
        /// Parser detail.
        reason: String,
    },

    /// Unknown type token.
    #[error("unsupported type token: {token}")]
    UnsupportedType {
        /// The unrecognized token.
        token: String,
    },

    /// Key has never been stored.
    #[error("key not found: {key}")]
    KeyNotFound {
        /// The missing key.
        key: String,
    },

    /// Stored payload cannot be interpreted as the requested type.
    #[error("type mismatch for key {key}: stored value is not {tag} ({reason})")]
    TypeMismatch {
        /// The key whose payload was inspected.
        key: String,
        /// The requested type token.
        tag: String,
        /// Shape detail.
        reason: String,
    },

    /// The backend did not accept the operation.
    #[error("backend unavailable: {reason}")]
    BackendUnavailable {
        /// Why the backend could not be reached.
        reason: String,
    },

    /// The operation did not resolve within its deadline.
    #[error("operation on key {key} timed out after {ms}ms")]
    Timeout {
        /// The key the pending operation addressed.
        key: String,
        /// The configured deadline in milliseconds.
        ms: u64,
    },

    /// Unknown command token or wrong argument count.
    #[error("cannot dispatch {token} with {argc} argument(s): {reason}")]
    Dispatch {
        /// The command token as typed.
        token: String,
        /// Number of arguments supplied (including the token).
        argc: usize,
        /// What was wrong.
        reason: String,
    },
}

impl Error {
    /// Shorthand for a malformed-input error.
    pub fn malformed(tag: impl Into<String>, text: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedInput {
            tag: tag.into(),
            text: text.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a backend-unavailable error.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Error::BackendUnavailable {
            reason: reason.into(),
        }
    }

    /// True for failures produced by the codec layer.
    pub fn is_codec_error(&self) -> bool {
        matches!(
            self,
            Error::MalformedInput { .. } | Error::UnsupportedType { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_key() {
        let err = Error::KeyNotFound {
            key: "myIntKey".into(),
        };
        assert!(err.to_string().contains("myIntKey"));
    }

    #[test]
    fn display_names_the_type_token() {
        let err = Error::UnsupportedType {
            token: "quaternion".into(),
        };
        assert!(err.to_string().contains("quaternion"));
    }

    #[test]
    fn display_malformed_input_carries_text_and_reason() {
        let err = Error::malformed("int", "notANumber", "invalid digit");
        let msg = err.to_string();
        assert!(msg.contains("int"));
        assert!(msg.contains("notANumber"));
        assert!(msg.contains("invalid digit"));
    }

    #[test]
    fn display_timeout_carries_deadline() {
        let err = Error::Timeout {
            key: "slow".into(),
            ms: 5000,
        };
        let msg = err.to_string();
        assert!(msg.contains("slow"));
        assert!(msg.contains("5000"));
    }

    #[test]
    fn display_dispatch_carries_token_and_argc() {
        let err = Error::Dispatch {
            token: "/doesNotExist".into(),
            argc: 3,
            reason: "unknown command".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/doesNotExist"));
        assert!(msg.contains('3'));
    }

    #[test]
    fn codec_errors_are_classified() {
        assert!(Error::malformed("int", "x", "bad").is_codec_error());
        assert!(Error::UnsupportedType { token: "t".into() }.is_codec_error());
        assert!(!Error::KeyNotFound { key: "k".into() }.is_codec_error());
    }

    #[test]
    fn result_type_alias() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }

        fn returns_error() -> Result<i32> {
            Err(Error::unavailable("test"))
        }

        assert_eq!(returns_result().unwrap(), 42);
        assert!(returns_error().is_err());
    }
}

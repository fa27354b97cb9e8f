//! SDK error types.
//!
//! [`SdkError`] is the single error type returned by every fallible
//! operation in the SDK.  Failures fall into three families:
//!
//! * **validation** — bad input caught locally, before any network call;
//! * **transport** — connection refused, TLS failure, connect / handshake /
//!   read timeout, reported by the HTTP client;
//! * **protocol** — the appliance answered with a non-2xx status.
//!
//! None of them are retried or reinterpreted by the SDK.

use qumulo_models::ModelError;

/// Error type for all SDK operations.
#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    /// Invalid connection configuration (e.g. the HTTP client could not be built).
    #[error("configuration error: {0}")]
    Config(String),

    /// Input rejected locally; no request was sent.
    #[error("validation failed: {0}")]
    Validation(#[from] ModelError),

    /// The request never produced an HTTP response.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The appliance answered with a non-success status.
    #[error("appliance returned HTTP {status}: {message}")]
    Protocol {
        /// HTTP status code.
        status: u16,
        /// Error description extracted from the response body.
        message: String,
    },

    /// JSON serialization / deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O failure raised by a [`RestDispatch`](crate::RestDispatch)
    /// implementation that does its own socket work. [`HttpConnection`](crate::HttpConnection)
    /// reports those as [`SdkError::Transport`] instead.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SdkError {
    /// `true` when the failure is a connect, handshake or read timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout(),
            Self::Io(e) => e.kind() == std::io::ErrorKind::TimedOut,
            _ => false,
        }
    }

    /// HTTP status of a [`SdkError::Protocol`] failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Protocol { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_error_display_and_status() {
        let err = SdkError::Protocol {
            status: 401,
            message: "bad credentials".into(),
        };
        assert_eq!(err.to_string(), "appliance returned HTTP 401: bad credentials");
        assert_eq!(err.status(), Some(401));
        assert!(!err.is_timeout());
    }

    #[test]
    fn io_timeout_is_classified() {
        let err = SdkError::from(std::io::Error::from(std::io::ErrorKind::TimedOut));
        assert!(err.is_timeout());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn validation_wraps_model_error() {
        let err = SdkError::from(ModelError::NotPrintableAscii {
            field: "username".into(),
            position: 0,
        });
        assert!(matches!(err, SdkError::Validation(_)));
        assert!(err.to_string().starts_with("validation failed: username"));
    }
}

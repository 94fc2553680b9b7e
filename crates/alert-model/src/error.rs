//! Alert Error Types

use thiserror::Error;

/// Errors while constructing or updating an alert
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlertError {
    /// Payload failed to deserialize (missing required field, wrong type, ...)
    #[error("Invalid alert payload: {0}")]
    InvalidPayload(String),

    /// `url` is present but not an absolute http(s) URL
    #[error("Invalid alert url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// `lastReceived` could not be parsed as an RFC 3339 timestamp
    #[error("Invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp { value: String, reason: String },

    /// A request addressed a different alert
    #[error("Fingerprint mismatch: expected {expected:?}, got {actual:?}")]
    FingerprintMismatch { expected: String, actual: String },
}

impl From<serde_json::Error> for AlertError {
    fn from(err: serde_json::Error) -> Self {
        AlertError::InvalidPayload(err.to_string())
    }
}

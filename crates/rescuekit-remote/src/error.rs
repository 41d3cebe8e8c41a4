//! Error types for remote operations.

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

/// Errors produced by the identity client and the media uploader.
#[derive(Error, Debug)]
pub enum RemoteError {
    /// The request failed in transit or the response body could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend returned a non-success status without a structured field
    /// error map.
    #[error("request failed: {1} (status {0})")]
    Status(reqwest::StatusCode, String),

    /// The backend rejected the request with field-level validation errors.
    #[error("validation failed: {message}")]
    Validation {
        /// Summary message from the backend.
        message: String,
        /// Per-field error messages, keyed by field name.
        field_errors: BTreeMap<String, Vec<String>>,
    },

    /// The response was successful but did not have the expected shape.
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// A specialized Result type for remote operations.
pub type RemoteResult<T> = std::result::Result<T, RemoteError>;

/// Structured error body some backend mutations return.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    errors: Option<BTreeMap<String, Vec<String>>>,
}

/// Generic message used when the backend gives nothing usable.
const GENERIC_FAILURE: &str = "the request could not be completed";

impl RemoteError {
    /// Build an error from a non-success status and raw response body.
    ///
    /// A structured `{message, errors}` body becomes [`Self::Validation`]
    /// when the field map is non-empty; anything else falls back to
    /// [`Self::Status`] with the backend message or a generic one.
    #[must_use]
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => {
                let message = parsed
                    .message
                    .unwrap_or_else(|| GENERIC_FAILURE.to_string());
                match parsed.errors {
                    Some(field_errors) if !field_errors.is_empty() => Self::Validation {
                        message,
                        field_errors,
                    },
                    _ => Self::Status(status, message),
                }
            }
            Err(_) => Self::Status(status, GENERIC_FAILURE.to_string()),
        }
    }

    /// Create an unexpected-response error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::UnexpectedResponse(message.into())
    }

    /// Check if this error carries field-level validation detail.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// The per-field errors, if this is a validation failure.
    #[must_use]
    pub fn field_errors(&self) -> Option<&BTreeMap<String, Vec<String>>> {
        match self {
            Self::Validation { field_errors, .. } => Some(field_errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_with_field_errors() {
        let body = r#"{"message":"invalid profile","errors":{"phone":["must be a phone number"]}}"#;
        let err = RemoteError::from_status(StatusCode::UNPROCESSABLE_ENTITY, body);

        assert!(err.is_validation());
        let fields = err.field_errors().unwrap();
        assert_eq!(fields["phone"], vec!["must be a phone number"]);
        assert!(err.to_string().contains("invalid profile"));
    }

    #[test]
    fn test_from_status_with_message_only() {
        let body = r#"{"message":"not found"}"#;
        let err = RemoteError::from_status(StatusCode::NOT_FOUND, body);

        assert!(!err.is_validation());
        assert!(err.field_errors().is_none());
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_from_status_with_empty_error_map() {
        let body = r#"{"message":"bad request","errors":{}}"#;
        let err = RemoteError::from_status(StatusCode::BAD_REQUEST, body);
        assert!(matches!(err, RemoteError::Status(..)));
    }

    #[test]
    fn test_from_status_with_unparseable_body() {
        let err = RemoteError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");

        assert!(matches!(err, RemoteError::Status(..)));
        assert!(err.to_string().contains("could not be completed"));
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_from_status_with_empty_body() {
        let err = RemoteError::from_status(StatusCode::BAD_GATEWAY, "");
        assert!(matches!(err, RemoteError::Status(..)));
    }

    #[test]
    fn test_unexpected_display() {
        let err = RemoteError::unexpected("no url in upload response");
        assert!(err.to_string().contains("no url in upload response"));
    }
}

//! Error types for the Clinio SDK.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for SDK operations.
pub type Result<T> = std::result::Result<T, ClinioError>;

/// Message used when no better one can be extracted from a failure.
pub const DEFAULT_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Errors produced by the Clinio client.
#[derive(Error, Debug)]
pub enum ClinioError {
    /// Transport failure (connection, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        data: Option<serde_json::Value>,
    },

    /// URL construction failed before the request was sent.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A header could not be assembled; the request was never sent.
    #[error("Invalid header name: {0}")]
    HeaderName(#[from] reqwest::header::InvalidHeaderName),

    /// A header value could not be assembled; the request was never sent.
    #[error("Invalid header value: {0}")]
    HeaderValue(#[from] reqwest::header::InvalidHeaderValue),
}

impl ClinioError {
    /// HTTP status code, when the failure carries one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}

/// Normalized failure handed to calling code and the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorEnvelope {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Extract a human-readable message from any client error.
///
/// Priority: server `error` field, server `message` field, transport-level
/// message, caller fallback, generic default.
pub fn handle_api_error(error: &ClinioError, fallback: Option<&str>) -> ErrorEnvelope {
    let data = match error {
        ClinioError::Api { data, .. } => data.clone(),
        _ => None,
    };

    let from_body = |field: &str| {
        data.as_ref()
            .and_then(|value| value.get(field))
            .and_then(|value| value.as_str())
            .map(str::to_string)
    };

    let message = from_body("error")
        .or_else(|| from_body("message"))
        .or_else(|| match error {
            // The status line alone is not a user-facing message.
            ClinioError::Api { .. } => None,
            other => Some(other.to_string()),
        })
        .or_else(|| fallback.filter(|msg| !msg.is_empty()).map(str::to_string))
        .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());

    ErrorEnvelope {
        message,
        status: error.status_code(),
        data,
    }
}

//! Error type for the shop REST API client.

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Message used when the server gave no usable `message` of its own.
fn status_fallback(status: StatusCode) -> String {
    format!("HTTP error! status: {}", status.as_u16())
}

/// The single error produced by [`ApiClient`](super::ApiClient).
///
/// Transport failures, non-2xx responses and undecodable bodies all end up
/// here; only the message text tells them apart. `status` is set whenever a
/// response was actually received.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ApiError {
    message: String,
    status: Option<StatusCode>,
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    pub fn with_status(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
        }
    }

    /// Builds the error for a non-success response from its raw body.
    ///
    /// The server's `message` is used when the body is JSON and carries one,
    /// otherwise the message names the status code.
    pub fn from_response_body(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| status_fallback(status));
        Self::with_status(message, status)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self {
            message: format!("Request failed: {}", e),
            status: e.status(),
        }
    }
}

/// Error body returned by the API, e.g. `{"statusCode":401,"message":"Unauthorized"}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<Value>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        let message = match self.message? {
            Value::String(s) => s,
            // Validation failures arrive as a list of messages
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            _ => return None,
        };
        (!message.is_empty()).then_some(message)
    }
}

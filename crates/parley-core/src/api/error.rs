use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Broad cause of an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The server answered with a non-2xx status.
    Status,
    /// The request exceeded the adapter timeout.
    Timeout,
    /// The connection could not be established or was dropped.
    Network,
    /// A request or response body could not be (de)serialized.
    Serialization,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ApiErrorKind::Status => "HTTP error",
            ApiErrorKind::Timeout => "Request timed out",
            ApiErrorKind::Network => "Network error",
            ApiErrorKind::Serialization => "Serialization error",
        };
        f.write_str(label)
    }
}

/// Normalized failure shape returned by every `ApiClient`.
///
/// Callers only ever look at three things: the HTTP status (if the server
/// answered), the message the server put in its JSON body (if any), and
/// whether the failure was a timeout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {detail}")]
pub struct ApiError {
    kind: ApiErrorKind,
    status: Option<u16>,
    server_message: Option<String>,
    detail: String,
}

impl ApiError {
    /// Builds an error from a non-2xx response and its raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        Self {
            kind: ApiErrorKind::Status,
            status: Some(status),
            server_message: extract_server_message(body),
            detail: format!("Request failed with status code {status}"),
        }
    }

    pub fn status_code(status: u16, server_message: Option<String>) -> Self {
        Self {
            kind: ApiErrorKind::Status,
            status: Some(status),
            server_message,
            detail: format!("Request failed with status code {status}"),
        }
    }

    pub fn timeout(detail: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Timeout,
            status: None,
            server_message: None,
            detail: detail.into(),
        }
    }

    pub fn network(detail: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            status: None,
            server_message: None,
            detail: detail.into(),
        }
    }

    pub fn serialization(detail: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Serialization,
            status: None,
            server_message: None,
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> ApiErrorKind {
        self.kind
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Message supplied by the server in its error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        self.server_message.as_deref()
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// True for adapter timeouts and for a server-reported 408.
    pub fn is_timeout(&self) -> bool {
        self.kind == ApiErrorKind::Timeout || self.status == Some(408)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self.status, Some(500..=599))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

/// Reads the `message` field of a JSON error body.
///
/// Returns `None` for non-JSON bodies and for blank messages.
pub fn extract_server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

use std::fmt;

use serde_json::Value;

use super::error::ApiError;

/// HTTP verbs used by the chat backend contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Port through which the stores reach the backend.
///
/// Implementations are configured once (base URL, credentials, timeout) and
/// shared by every store. `path` is relative to the configured base URL, e.g.
/// `/auth/check`.
///
/// Any non-2xx response, transport failure or timeout must be reported as an
/// [`ApiError`]; implementations never retry.
#[async_trait::async_trait]
pub trait ApiClient: Send + Sync {
    /// Performs one request and returns the decoded JSON body.
    ///
    /// An empty success body is returned as `Value::Null`.
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError>;
}

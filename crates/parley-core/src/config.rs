//! HTTP client configuration.
//!
//! The base URL always ends in the API path segment exactly once, no matter
//! how the override was written (`http://host`, `http://host/`,
//! `http://host/api/`, ...).

use std::time::Duration;

/// Environment variable overriding the backend base URL.
pub const API_URL_ENV: &str = "PARLEY_API_URL";
/// Environment variable overriding the request timeout, in seconds.
pub const API_TIMEOUT_ENV: &str = "PARLEY_API_TIMEOUT_SECS";

pub const DEFAULT_API_URL: &str = "http://localhost:4000/api";
pub const API_PATH_SEGMENT: &str = "/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.as_ref()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.base_url = normalize_base_url(base_url.as_ref());
        self
    }

    /// Reads the process environment.
    pub fn from_env() -> Self {
        Self::default().apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies `PARLEY_API_URL` / `PARLEY_API_TIMEOUT_SECS` style overrides
    /// from an arbitrary lookup. Blank or unparsable values are ignored.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.base_url = normalize_base_url(&url);
        }
        if let Some(secs) = lookup(API_TIMEOUT_ENV).and_then(|v| v.trim().parse::<u64>().ok()) {
            if secs > 0 {
                self.timeout = Duration::from_secs(secs);
            }
        }
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Joins a backend path onto the base URL with exactly one separator.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

/// Normalizes a base URL so that it ends in [`API_PATH_SEGMENT`] exactly once.
///
/// Blank input falls back to [`DEFAULT_API_URL`].
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return DEFAULT_API_URL.to_string();
    }

    let mut root = trimmed;
    while let Some(stripped) = strip_api_segment(root) {
        root = stripped;
    }
    format!("{root}{API_PATH_SEGMENT}")
}

// Only strips a trailing segment that sits after the authority, so a host
// literally named "api" is left alone.
fn strip_api_segment(root: &str) -> Option<&str> {
    let stripped = root.strip_suffix(API_PATH_SEGMENT)?;
    let authority_start = root.find("://").map_or(0, |i| i + 3);
    (stripped.len() > authority_start).then(|| stripped.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_normalize_appends_segment_once() {
        assert_eq!(normalize_base_url("http://localhost:4000"), "http://localhost:4000/api");
        assert_eq!(normalize_base_url("http://localhost:4000/"), "http://localhost:4000/api");
        assert_eq!(normalize_base_url("http://localhost:4000/api"), "http://localhost:4000/api");
        assert_eq!(normalize_base_url("http://localhost:4000/api/"), "http://localhost:4000/api");
        assert_eq!(
            normalize_base_url("https://chat.example.com/api/api"),
            "https://chat.example.com/api"
        );
    }

    #[test]
    fn test_normalize_keeps_host_named_api() {
        assert_eq!(normalize_base_url("http://api"), "http://api/api");
        assert_eq!(normalize_base_url("https://api.example.com"), "https://api.example.com/api");
    }

    #[test]
    fn test_normalize_blank_falls_back_to_default() {
        assert_eq!(normalize_base_url("   "), DEFAULT_API_URL);
    }

    #[test]
    fn test_endpoint_joins_with_single_slash() {
        let config = ClientConfig::new("http://localhost:4000");
        assert_eq!(config.endpoint("/auth/check"), "http://localhost:4000/api/auth/check");
        assert_eq!(config.endpoint("auth/signup"), "http://localhost:4000/api/auth/signup");
    }

    #[test]
    fn test_apply_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (API_URL_ENV, "https://chat.example.com/"),
            (API_TIMEOUT_ENV, "25"),
        ]);
        let config =
            ClientConfig::default().apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.base_url(), "https://chat.example.com/api");
        assert_eq!(config.timeout(), Duration::from_secs(25));
    }

    #[test]
    fn test_invalid_overrides_are_ignored() {
        let env: HashMap<&str, &str> =
            HashMap::from([(API_URL_ENV, "  "), (API_TIMEOUT_ENV, "soon")]);
        let config =
            ClientConfig::default().apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config, ClientConfig::default());
    }
}

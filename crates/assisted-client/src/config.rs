//! API client configuration.

use std::time::Duration;

/// Default Assisted Installer API base URL.
pub const DEFAULT_API_URL: &str = "https://api.openshift.com/api/assisted-install/v2";

/// Configuration for the Assisted Installer API client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL including the API version segment.
    pub base_url: String,

    /// Whole-request timeout in seconds.
    pub request_timeout_seconds: u64,

    /// Connect timeout in seconds.
    pub connect_timeout_seconds: u64,
}

impl ApiConfig {
    fn default_base_url() -> String {
        DEFAULT_API_URL.to_string()
    }

    const fn default_request_timeout() -> u64 {
        30
    }

    const fn default_connect_timeout() -> u64 {
        5
    }

    /// Configuration pointing at `base_url` with default timeouts.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Get the request timeout as a `Duration`.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Get the connect timeout as a `Duration`.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    /// Absolute URL for an API path such as `/clusters`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            request_timeout_seconds: Self::default_request_timeout(),
            connect_timeout_seconds: Self::default_connect_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ApiConfig::default();
        assert_eq!(
            config.base_url,
            "https://api.openshift.com/api/assisted-install/v2"
        );
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.connect_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn url_joins_without_double_slash() {
        let config = ApiConfig::with_base_url("http://localhost:8090/api/v2/");
        assert_eq!(
            config.url("/clusters/deadbeef"),
            "http://localhost:8090/api/v2/clusters/deadbeef"
        );
        assert_eq!(config.url("clusters"), "http://localhost:8090/api/v2/clusters");
    }
}

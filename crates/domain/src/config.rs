//! Client configuration for the accounting API
//!
//! The base URL is always supplied by the caller; no host is baked into the
//! library, so tests and environment overrides can point the client at any
//! deployment.

use std::time::Duration;

/// Configuration for one accounting API deployment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the API, without a trailing slash
    base_url: String,

    /// Timeout applied to every request
    pub timeout: Duration,
}

impl ApiConfig {
    /// Create a configuration for the given base URL.
    ///
    /// A trailing slash on the base URL is trimmed so endpoint paths can be
    /// appended uniformly.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, timeout: Duration::from_secs(30) }
    }

    /// Override the per-request timeout (default: 30 seconds).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the configured base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the token endpoint
    #[must_use]
    pub fn token_url(&self) -> String {
        format!("{}/OAuth20/Token", self.base_url)
    }

    /// URL listing every object of a model namespace within a folder
    #[must_use]
    pub fn collection_url(&self, namespace: &str, folder: &str) -> String {
        format!(
            "{}/app/{}/Folder/{}",
            self.base_url,
            urlencoding::encode(namespace),
            urlencoding::encode(folder)
        )
    }

    /// URL of a single object addressed by model and code within a folder
    #[must_use]
    pub fn object_url(&self, model: &str, code: &str, folder: &str) -> String {
        format!(
            "{}/app/{}/{}/Folder/{}",
            self.base_url,
            urlencoding::encode(model),
            urlencoding::encode(code),
            urlencoding::encode(folder)
        )
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the API configuration.
    use super::*;

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let config = ApiConfig::new("https://accounting.example.com/api/");
        assert_eq!(config.base_url(), "https://accounting.example.com/api");
    }

    #[test]
    fn builds_token_url() {
        let config = ApiConfig::new("https://accounting.example.com/api");
        assert_eq!(config.token_url(), "https://accounting.example.com/api/OAuth20/Token");
    }

    #[test]
    fn builds_collection_and_object_urls() {
        let config = ApiConfig::new("https://accounting.example.com/api");

        assert_eq!(
            config.collection_url("Sale", "ACME"),
            "https://accounting.example.com/api/app/Sale/Folder/ACME"
        );
        assert_eq!(
            config.object_url("Invoice", "F0001", "ACME"),
            "https://accounting.example.com/api/app/Invoice/F0001/Folder/ACME"
        );
    }

    #[test]
    fn encodes_path_segments() {
        let config = ApiConfig::new("https://accounting.example.com/api");

        let url = config.collection_url("Sale", "North Branch");
        assert_eq!(url, "https://accounting.example.com/api/app/Sale/Folder/North%20Branch");
    }

    #[test]
    fn default_timeout_is_thirty_seconds() {
        let config = ApiConfig::new("https://accounting.example.com/api");
        assert_eq!(config.timeout, Duration::from_secs(30));

        let config = config.with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}

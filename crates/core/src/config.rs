//! API endpoint configuration
//!
//! Resolved from the command line (`--host`, `--no-ssl`) and handed to the
//! REST adapter when a client is built.

use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};

/// Host serving the REST API
pub const DEFAULT_HOST: &str = "api.twitter.com";

/// Per-request timeout applied by the HTTP adapter
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where and how to reach the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub host: String,
    pub ssl: bool,
    pub timeout_secs: u64,
}

impl ApiConfig {
    pub fn new(host: impl Into<String>, ssl: bool) -> Self {
        Self {
            host: host.into(),
            ssl,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Base URL with the scheme implied by `ssl`
    pub fn base_url(&self) -> Result<Url> {
        let scheme = if self.ssl { "https" } else { "http" };
        let host = self.host.trim().trim_end_matches('/');
        if host.is_empty() {
            return Err(Error::Config("API host cannot be empty".to_string()));
        }
        Url::parse(&format!("{scheme}://{host}/"))
            .map_err(|e| Error::Config(format!("Invalid API host '{host}': {e}")))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url().unwrap().as_str(), "https://api.twitter.com/");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_no_ssl_base_url() {
        let config = ApiConfig::new("localhost:8080", false);
        assert_eq!(config.base_url().unwrap().as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_invalid_host() {
        assert!(matches!(
            ApiConfig::new("  ", true).base_url(),
            Err(Error::Config(_))
        ));
        assert!(ApiConfig::new("bad host name", true).base_url().is_err());
    }
}

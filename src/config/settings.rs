//! Settings structures for esquery-rs configuration

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Main settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub search: SearchSettings,
    pub outgoing: OutgoingSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Config(format!("cannot read {}: {}", path.as_ref().display(), e))
        })?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Merge with environment variables (ESQUERY_* prefix)
    pub fn merge_env(&mut self) {
        self.merge_from(|key| std::env::var(key).ok());
    }

    fn merge_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("ESQUERY_HOST") {
            self.server.host = val;
        }
        if let Some(val) = lookup("ESQUERY_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = lookup("ESQUERY_SCHEME") {
            self.server.scheme = val;
        }
        if let Some(val) = lookup("ESQUERY_DEFAULT_INDEX") {
            self.search.default_index = val;
        }
        if let Some(val) = lookup("ESQUERY_REQUEST_TIMEOUT") {
            if let Ok(secs) = val.parse() {
                self.outgoing.request_timeout = secs;
            }
        }
    }

    /// Base URL of the engine
    pub fn base_url(&self) -> Result<Url> {
        self.server.base_url()
    }
}

/// Engine endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Engine host name or address
    pub host: String,
    /// Engine HTTP port
    pub port: u16,
    /// `http` or `https`
    pub scheme: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: crate::DEFAULT_HOST.to_string(),
            port: crate::DEFAULT_PORT,
            scheme: "http".to_string(),
        }
    }
}

impl ServerSettings {
    pub fn base_url(&self) -> Result<Url> {
        if self.host.trim().is_empty() {
            return Err(Error::invalid_argument("engine host must not be empty"));
        }
        let raw = format!("{}://{}:{}", self.scheme, self.host, self.port);
        Url::parse(&raw).map_err(|e| Error::Config(format!("invalid engine URL {}: {}", raw, e)))
    }
}

/// Search behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Index searched when an intent names no target
    pub default_index: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_index: crate::DEFAULT_INDEX.to_string(),
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Client-side request timeout in seconds
    pub request_timeout: f64,
    /// Idle connections kept per host
    pub pool_maxsize: usize,
    /// Verify TLS certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// Extra headers to send with every request
    pub extra_headers: HashMap<String, String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 30.0,
            pool_maxsize: 10,
            verify_ssl: true,
            proxies: ProxySettings::default(),
            extra_headers: HashMap::new(),
        }
    }
}

impl OutgoingSettings {
    /// Client-side request timeout; must be finite and positive
    pub fn timeout(&self) -> Result<Duration> {
        if self.request_timeout <= 0.0 {
            return Err(Error::Config(format!(
                "request_timeout must be positive, got {}",
                self.request_timeout
            )));
        }
        Duration::try_from_secs_f64(self.request_timeout).map_err(|e| {
            Error::Config(format!("invalid request_timeout {}: {}", self.request_timeout, e))
        })
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.server.host, "localhost");
        assert_eq!(settings.server.port, 9200);
        assert_eq!(settings.search.default_index, "kibana_sample_data_ecommerce");
        assert_eq!(
            settings.base_url().unwrap().as_str(),
            "http://localhost:9200/"
        );
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let settings = Settings::from_yaml(
            "server:\n  host: search.internal\nsearch:\n  default_index: orders\n",
        )
        .unwrap();

        assert_eq!(settings.server.host, "search.internal");
        assert_eq!(settings.server.port, 9200);
        assert_eq!(settings.search.default_index, "orders");
        assert!(settings.outgoing.verify_ssl);
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let err = Settings::from_yaml("server: [").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("ESQUERY_HOST", "es01"),
            ("ESQUERY_PORT", "9300"),
            ("ESQUERY_DEFAULT_INDEX", "nested_test"),
            ("ESQUERY_REQUEST_TIMEOUT", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let mut settings = Settings::default();
        settings.merge_from(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(settings.server.host, "es01");
        assert_eq!(settings.server.port, 9300);
        assert_eq!(settings.search.default_index, "nested_test");
        assert_eq!(settings.outgoing.request_timeout, 30.0);
    }

    #[test]
    fn test_empty_host_rejected() {
        let mut settings = Settings::default();
        settings.server.host = "  ".to_string();
        assert!(matches!(
            settings.base_url(),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_request_timeout_must_be_finite_and_positive() {
        let mut outgoing = OutgoingSettings::default();
        assert_eq!(outgoing.timeout().unwrap(), Duration::from_secs(30));

        for bad in [-1.0, 0.0, f64::NAN, f64::INFINITY] {
            outgoing.request_timeout = bad;
            assert!(matches!(outgoing.timeout(), Err(Error::Config(_))), "{bad}");
        }
    }

    #[test]
    fn test_negative_timeout_from_env_is_reported() {
        let mut settings = Settings::default();
        settings.merge_from(|key| (key == "ESQUERY_REQUEST_TIMEOUT").then(|| "-1".to_string()));

        assert_eq!(settings.outgoing.request_timeout, -1.0);
        assert!(matches!(settings.outgoing.timeout(), Err(Error::Config(_))));
    }
}

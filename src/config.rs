//! Client configuration
//!
//! Configuration can be built in code, read from the environment
//! (`FASTLY_API_KEY`, `FASTLY_API_URL`), or loaded from a YAML file.

use crate::error::{Error, Result, ResultExt};
use crate::types::DEFAULT_ENDPOINT;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the API token
pub const API_KEY_ENV_VAR: &str = "FASTLY_API_KEY";

/// Environment variable overriding the API endpoint
pub const ENDPOINT_ENV_VAR: &str = "FASTLY_API_URL";

/// Configuration for the API client
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL for all requests
    pub endpoint: String,
    /// API token, sent as `Fastly-Key`
    pub api_key: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            timeout: Duration::from_secs(30),
            user_agent: format!("fastly-api-rs/{}", env!("CARGO_PKG_VERSION")),
            default_headers: HashMap::new(),
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("default_headers", &self.default_headers)
            .finish()
    }
}

/// On-disk representation of [`ClientConfig`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    endpoint: Option<String>,
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    timeout_secs: Option<u64>,
    #[serde(default)]
    user_agent: Option<String>,
    #[serde(default)]
    headers: HashMap<String, String>,
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Build a config from `FASTLY_API_KEY` and the optional `FASTLY_API_URL`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV_VAR)
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::missing_field(API_KEY_ENV_VAR))?;

        let mut builder = Self::builder().api_key(api_key);
        if let Some(endpoint) = lookup(ENDPOINT_ENV_VAR).filter(|e| !e.trim().is_empty()) {
            builder = builder.endpoint(endpoint);
        }
        Ok(builder.build())
    }

    /// Parse a config from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let file: ConfigFile = serde_yaml::from_str(yaml)?;
        let mut config = Self::default();

        if let Some(endpoint) = file.endpoint {
            config.endpoint = endpoint;
        }
        config.api_key = file.api_key;
        if let Some(secs) = file.timeout_secs {
            if secs == 0 {
                return Err(Error::config("timeout_secs must be greater than zero"));
            }
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(agent) = file.user_agent {
            config.user_agent = agent;
        }
        config.default_headers = file.headers;

        url::Url::parse(&config.endpoint)?;
        Ok(config)
    }

    /// Load a YAML config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }
}

/// Builder for [`ClientConfig`]
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the endpoint
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = url.into();
        self
    }

    /// Set the API token
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, "https://api.fastly.com");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.api_key.is_none());
        assert!(config.user_agent.starts_with("fastly-api-rs/"));
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::builder()
            .endpoint("http://localhost:8080")
            .api_key("secret")
            .timeout(Duration::from_secs(5))
            .header("X-Custom", "value")
            .user_agent("test-agent/1.0")
            .build();

        assert_eq!(config.endpoint, "http://localhost:8080");
        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(
            config.default_headers.get("X-Custom"),
            Some(&"value".to_string())
        );
        assert_eq!(config.user_agent, "test-agent/1.0");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ClientConfig::builder().api_key("super-secret").build();
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_from_lookup() {
        let config = ClientConfig::from_lookup(|key| match key {
            API_KEY_ENV_VAR => Some("abc".to_string()),
            ENDPOINT_ENV_VAR => Some("http://127.0.0.1:9000".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("abc"));
        assert_eq!(config.endpoint, "http://127.0.0.1:9000");
    }

    #[test]
    fn test_from_lookup_missing_key() {
        let err = ClientConfig::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { ref field } if field == API_KEY_ENV_VAR));
    }

    #[test]
    fn test_from_yaml_str() {
        let yaml = r#"
endpoint: "http://localhost:1234"
api_key: "k"
timeout_secs: 7
headers:
  X-Trace: "on"
"#;
        let config = ClientConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.endpoint, "http://localhost:1234");
        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert_eq!(config.timeout, Duration::from_secs(7));
        assert_eq!(config.default_headers.get("X-Trace"), Some(&"on".to_string()));
    }

    #[test]
    fn test_from_yaml_rejects_zero_timeout() {
        let err = ClientConfig::from_yaml_str("timeout_secs: 0").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_from_yaml_rejects_bad_endpoint() {
        let err = ClientConfig::from_yaml_str("endpoint: \"not a url\"").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key: from-file").unwrap();

        let config = ClientConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.endpoint, "https://api.fastly.com");
    }

    #[test]
    fn test_from_file_errors_name_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.yaml");
        let err = ClientConfig::from_file(&missing).unwrap_err();
        assert!(err.to_string().contains("missing.yaml"));

        let bad = dir.path().join("bad.yaml");
        std::fs::write(&bad, "timeout_secs: 0\n").unwrap();
        let err = ClientConfig::from_file(&bad).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("bad.yaml"));
        assert!(message.contains("timeout_secs must be greater than zero"));
    }
}

//! Centralized configuration management for studyflow

use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Result, Context};

/// Default scheduling endpoint used when nothing else is configured
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/schedule";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Full URL of the scheduling endpoint
    pub endpoint: String,
    /// File that receives log output
    pub log_file: PathBuf,
    /// HTTP client configuration
    pub http: HttpConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: "studyflow/0.1.0".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            log_file: PathBuf::from("./studyflow.log"),
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var("STUDYFLOW_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        let log_file = std::env::var("STUDYFLOW_LOG_FILE")
            .unwrap_or_else(|_| "./studyflow.log".to_string())
            .into();

        let http = HttpConfig {
            timeout_seconds: parse_env_var("STUDYFLOW_HTTP_TIMEOUT_SECONDS")?.unwrap_or(30),
            user_agent: std::env::var("STUDYFLOW_USER_AGENT")
                .unwrap_or_else(|_| "studyflow/0.1.0".to_string()),
        };

        Ok(Config {
            endpoint,
            log_file,
            http,
        })
    }

    /// Replace the endpoint, e.g. from a command line flag
    pub fn with_endpoint(mut self, endpoint: Option<String>) -> Self {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        self
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.endpoint)
            .with_context(|| format!("Invalid scheduling endpoint: {}", self.endpoint))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow::anyhow!(
                "Scheduling endpoint must use http or https: {}",
                self.endpoint
            ));
        }

        if self.http.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("HTTP timeout must be at least one second"));
        }

        if let Some(parent) = self.log_file.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(anyhow::anyhow!(
                    "Log file directory does not exist: {}",
                    parent.display()
                ));
            }
        }

        Ok(())
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.endpoint, "http://localhost:8000/schedule");
        assert_eq!(config.http.timeout_seconds, 30);
        assert_eq!(config.http_timeout(), Duration::from_secs(30));
        config.validate().unwrap();
    }

    #[test]
    fn test_endpoint_override() {
        let config = Config::default().with_endpoint(Some("http://127.0.0.1:9000/plan".to_string()));
        assert_eq!(config.endpoint, "http://127.0.0.1:9000/plan");

        let config = Config::default().with_endpoint(None);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.endpoint = "localhost:8000/schedule".to_string();
        assert!(config.validate().is_err());

        config.endpoint = "ftp://localhost/schedule".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.http.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_file_directory_must_exist() {
        let dir = tempfile::tempdir().unwrap();

        let mut config = Config::default();
        config.log_file = dir.path().join("studyflow.log");
        config.validate().unwrap();

        config.log_file = dir.path().join("missing").join("studyflow.log");
        assert!(config.validate().is_err());
    }
}

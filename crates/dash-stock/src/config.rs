//! Configuration for dashboard data operations

use crate::error::{Result, StockError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use url::Url;

/// Default Alpha Vantage query endpoint
pub const ALPHA_VANTAGE_BASE_URL: &str = "https://www.alphavantage.co/query";

/// Default number of news items shown per ticker
pub const DEFAULT_NEWS_LIMIT: usize = 10;

/// Environment variable holding the Alpha Vantage credential
pub const ALPHA_VANTAGE_KEY_ENV: &str = "ALPHA_VANTAGE_API_KEY";

/// Configuration passed to the dashboard at startup
#[derive(Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Alpha Vantage API key, required by the fundamentals and news sections
    #[serde(skip_serializing, default)]
    pub alpha_vantage_api_key: Option<String>,

    /// Alpha Vantage query endpoint
    pub alpha_vantage_base_url: Url,

    /// Request timeout duration
    pub request_timeout: Duration,

    /// Maximum number of news items rendered
    pub news_limit: usize,

    /// Style sheet embedded in the page; `None` uses the built-in one
    pub stylesheet: Option<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            alpha_vantage_api_key: None,
            alpha_vantage_base_url: default_base_url(),
            request_timeout: Duration::from_secs(30),
            news_limit: DEFAULT_NEWS_LIMIT,
            stylesheet: None,
        }
    }
}

fn default_base_url() -> Url {
    Url::parse(ALPHA_VANTAGE_BASE_URL).expect("static Alpha Vantage URL is valid")
}

impl fmt::Debug for DashboardConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DashboardConfig")
            .field(
                "alpha_vantage_api_key",
                &self.alpha_vantage_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("alpha_vantage_base_url", &self.alpha_vantage_base_url.as_str())
            .field("request_timeout", &self.request_timeout)
            .field("news_limit", &self.news_limit)
            .field("stylesheet", &self.stylesheet.as_ref().map(String::len))
            .finish()
    }
}

impl DashboardConfig {
    /// Create a new configuration builder
    pub fn builder() -> DashboardConfigBuilder {
        DashboardConfigBuilder::default()
    }

    /// Load Alpha Vantage API key from environment
    pub fn with_env_api_key(mut self) -> Self {
        if let Some(key) = env_api_key() {
            self.alpha_vantage_api_key = Some(key);
        }
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.news_limit == 0 {
            return Err(StockError::ConfigError(
                "news_limit must be greater than 0".to_string(),
            ));
        }

        if !matches!(self.alpha_vantage_base_url.scheme(), "http" | "https") {
            return Err(StockError::ConfigError(format!(
                "unsupported Alpha Vantage URL scheme: {}",
                self.alpha_vantage_base_url.scheme()
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(StockError::ConfigError(
                "request_timeout must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// The configured credential, or a config error naming the variable to set
    pub fn require_api_key(&self) -> Result<&str> {
        require_api_key(self.alpha_vantage_api_key.as_deref())
    }
}

/// A non-blank Alpha Vantage key, or a config error naming the variable to set
pub(crate) fn require_api_key(key: Option<&str>) -> Result<&str> {
    key.filter(|key| !key.trim().is_empty()).ok_or_else(|| {
        StockError::ConfigError(format!(
            "Alpha Vantage API key not configured; set {ALPHA_VANTAGE_KEY_ENV}"
        ))
    })
}

fn env_api_key() -> Option<String> {
    std::env::var(ALPHA_VANTAGE_KEY_ENV)
        .ok()
        .filter(|key| !key.trim().is_empty())
}

/// Builder for DashboardConfig
#[derive(Debug, Default)]
pub struct DashboardConfigBuilder {
    alpha_vantage_api_key: Option<String>,
    alpha_vantage_base_url: Option<String>,
    request_timeout: Option<Duration>,
    news_limit: Option<usize>,
    stylesheet: Option<String>,
}

impl DashboardConfigBuilder {
    /// Set Alpha Vantage API key
    pub fn alpha_vantage_api_key(mut self, key: impl Into<String>) -> Self {
        self.alpha_vantage_api_key = Some(key.into());
        self
    }

    /// Load Alpha Vantage API key from environment, keeping an explicit key if set
    pub fn with_env_api_key(mut self) -> Self {
        if self.alpha_vantage_api_key.is_none() {
            self.alpha_vantage_api_key = env_api_key();
        }
        self
    }

    /// Point the Alpha Vantage client at another endpoint
    pub fn alpha_vantage_base_url(mut self, url: impl Into<String>) -> Self {
        self.alpha_vantage_base_url = Some(url.into());
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Set how many news items are rendered
    pub fn news_limit(mut self, limit: usize) -> Self {
        self.news_limit = Some(limit);
        self
    }

    /// Replace the built-in style sheet
    pub fn stylesheet(mut self, css: impl Into<String>) -> Self {
        self.stylesheet = Some(css.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<DashboardConfig> {
        let defaults = DashboardConfig::default();

        let alpha_vantage_base_url = match self.alpha_vantage_base_url {
            Some(raw) => Url::parse(&raw).map_err(|e| {
                StockError::ConfigError(format!("invalid Alpha Vantage URL '{raw}': {e}"))
            })?,
            None => defaults.alpha_vantage_base_url,
        };

        let config = DashboardConfig {
            alpha_vantage_api_key: self.alpha_vantage_api_key,
            alpha_vantage_base_url,
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            news_limit: self.news_limit.unwrap_or(defaults.news_limit),
            stylesheet: self.stylesheet,
        };

        config.validate()?;
        Ok(config)
    }
}

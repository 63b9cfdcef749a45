//! Error types for dashboard data operations

use thiserror::Error;

/// Errors raised while fetching or preparing dashboard data
#[derive(Debug, Error)]
pub enum StockError {
    /// Provider answered with a non-success HTTP status
    #[error("API error: {0}")]
    ApiError(String),

    /// Provider answered with a usage-limit notice instead of data
    #[error("Rate limit exceeded for {provider}: {message}")]
    RateLimitExceeded {
        provider: String,
        message: String,
    },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// Alpha Vantage API error
    #[error("Alpha Vantage error: {0}")]
    AlphaVantageError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Page rendering error
    #[error("Render error: {0}")]
    RenderError(String),
}

impl StockError {
    /// Short provider-independent label used in section banners
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ApiError(_) | Self::YahooFinanceError(_) | Self::AlphaVantageError(_) => {
                "provider"
            }
            Self::RateLimitExceeded { .. } => "rate_limit",
            Self::NetworkError(_) => "network",
            Self::JsonError(_) => "decode",
            Self::ConfigError(_) => "config",
            Self::RenderError(_) => "render",
        }
    }
}

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, StockError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StockError::ApiError("HTTP error: 503 Service Unavailable".to_string());
        assert_eq!(err.to_string(), "API error: HTTP error: 503 Service Unavailable");

        let err = StockError::RateLimitExceeded {
            provider: "Alpha Vantage".to_string(),
            message: "5 calls per minute".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Rate limit exceeded for Alpha Vantage: 5 calls per minute"
        );
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(StockError::ConfigError("x".into()).kind(), "config");
        assert_eq!(StockError::YahooFinanceError("x".into()).kind(), "provider");

        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(StockError::from(json_err).kind(), "decode");
    }
}

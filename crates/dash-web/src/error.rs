//! Error type for the HTTP layer, mapped to responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use dash_stock::StockError;
use serde_json::json;

/// Application error type with HTTP response mapping.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Internal server error (500).
    #[error("Internal error: {0}")]
    Internal(String),

    /// Error from the dashboard library (500 unless it is a config problem).
    #[error(transparent)]
    Stock(#[from] StockError),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Stock(StockError::ConfigError(_)) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Stock(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::error!(status = status.as_u16(), error = %self, "request failed");

        let body = axum::Json(json!({
            "error": self.to_string(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::Internal("template error: missing block".into());
        assert_eq!(err.to_string(), "Internal error: template error: missing block");

        let err = AppError::from(StockError::ConfigError("no key".into()));
        assert_eq!(err.to_string(), "Configuration error: no key");
    }

    #[test]
    fn test_status_mapping() {
        let response = AppError::Internal("boom".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = AppError::from(StockError::ConfigError("x".into())).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}

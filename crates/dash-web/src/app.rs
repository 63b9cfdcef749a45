//! Axum application builder
//!
//! Routes:
//! - `GET /` - dashboard page
//! - `GET /api/dashboard` - the same pass as JSON
//! - `GET /health` - liveness probe

use std::time::Duration;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::routes::{api, health, page};
use crate::state::AppState;

/// Default listen port
pub const DEFAULT_PORT: u16 = 8501;
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Create the Axum application with all routes.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .route("/", get(page::dashboard_page))
        .route("/api/dashboard", get(api::dashboard_json))
        .route("/health", get(health::health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Where the server listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// Read `DASHBOARD_HOST` and `DASHBOARD_PORT`, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var("DASHBOARD_HOST").ok(),
            std::env::var("DASHBOARD_PORT").ok(),
        )
    }

    fn from_vars(host: Option<String>, port: Option<String>) -> Self {
        let port = port
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let host = host
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.into());

        Self { host, port }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

//! Configuration management utilities

use serde::{Deserialize, Serialize};

/// Application-level settings shared by every binary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application name
    pub app_name: String,
    /// Environment (development, production, ...)
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "stock-dashboard".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Read the environment name from `DASHBOARD_ENV`, falling back to the defaults
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(environment) = std::env::var("DASHBOARD_ENV") {
            if !environment.trim().is_empty() {
                config.environment = environment.trim().to_string();
            }
        }
        config
    }

    /// Whether this process runs in production
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

//! Stock dashboard workflow
//!
//! This crate holds everything behind the dashboard page except HTTP and HTML:
//!
//! - Query validation (ticker plus date range) that gates all fetching
//! - Daily price history from Yahoo Finance
//! - Return analytics: daily change, annualized return and volatility,
//!   risk-adjusted return
//! - Annual balance sheet, income statement and cash flow from Alpha Vantage
//! - News with provider-computed sentiment from Alpha Vantage
//! - SVG line-chart geometry for the adjusted close
//!
//! # Architecture
//!
//! [`DashboardEngine`] runs one rendering pass per request. It talks to the
//! providers through the traits in [`providers`], so tests swap in mocks and
//! the web layer never sees a concrete client.
//!
//! # Example
//!
//! ```rust,ignore
//! use dash_stock::{DashboardConfig, DashboardEngine, DashboardRequest, QueryInput, Section};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = DashboardConfig::builder().with_env_api_key().build()?;
//!     let engine = DashboardEngine::from_config(&config)?;
//!
//!     let request = DashboardRequest::new(QueryInput::new("AAPL", "2024-01-01", "2024-06-30"))
//!         .with_section(Section::Returns);
//!     let view = engine.render(&request).await;
//!     println!("{}", serde_json::to_string_pretty(&view)?);
//!
//!     Ok(())
//! }
//! ```

pub mod analytics;
pub mod api;
pub mod chart;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod providers;
pub mod query;

// Re-export main types for convenience
pub use analytics::{ReturnMetrics, ReturnRow, ReturnsAnalysis, analyze_returns};
pub use chart::LineChart;
pub use config::DashboardConfig;
pub use engine::{
    DashboardEngine, DashboardRequest, DashboardView, LoadedView, Section, SectionSet,
    SectionState, SessionStage,
};
pub use error::{Result, StockError};
pub use models::{FinancialStatement, NewsItem, PriceBar, PriceSeries, StatementKind};
pub use query::{InputWarning, Query, QueryInput};

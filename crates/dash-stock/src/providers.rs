//! Seams between the dashboard workflow and the external data providers
//!
//! The engine only talks to these traits; [`crate::api`] holds the real
//! clients. With the `mock` feature (always on in this crate's tests) each
//! trait also gets a `mockall` double, e.g. `MockPriceProvider`.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{FinancialStatement, NewsItem, PriceSeries, StatementKind};
use crate::query::Query;

/// Daily price history source
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Bars for `[query.start_date, query.end_date)`. No rows is `Ok` with an empty series.
    async fn daily_history(&self, query: &Query) -> Result<PriceSeries>;
}

/// Annual financial statement source
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait FundamentalsProvider: Send + Sync {
    /// `Ok(None)` when the provider has no such statement for the ticker.
    async fn annual_statement(
        &self,
        ticker: &str,
        kind: StatementKind,
    ) -> Result<Option<FinancialStatement>>;
}

/// News feed source; sentiment scores arrive precomputed
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// Items in feed order, possibly empty.
    async fn feed(&self, ticker: &str) -> Result<Vec<NewsItem>>;
}

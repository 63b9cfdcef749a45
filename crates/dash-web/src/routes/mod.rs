//! Route handlers
//!
//! - [`page`]: the HTML dashboard
//! - [`api`]: JSON mirror of the dashboard
//! - [`health`]: liveness probe

pub mod api;
pub mod health;
pub mod page;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use dash_stock::providers::{MockFundamentalsProvider, MockNewsProvider, MockPriceProvider};
    use dash_stock::{DashboardEngine, PriceBar, PriceSeries};

    use crate::page::PageRenderer;
    use crate::state::AppState;

    pub fn series(ticker: &str, closes: &[f64]) -> PriceSeries {
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PriceBar {
                date: NaiveDate::from_ymd_opt(2024, 5, 1 + i as u32).unwrap(),
                open: c,
                high: c,
                low: c,
                close: c,
                adj_close: c,
                volume: 1_000,
            })
            .collect();
        PriceSeries::new(ticker, bars)
    }

    pub fn state(
        prices: MockPriceProvider,
        fundamentals: MockFundamentalsProvider,
        news: MockNewsProvider,
    ) -> AppState {
        let engine =
            DashboardEngine::new(Arc::new(prices), Arc::new(fundamentals), Arc::new(news), 10);
        AppState::new(engine, PageRenderer::new(None).unwrap())
    }

    /// Providers that must never be called
    pub fn idle_state() -> AppState {
        let mut prices = MockPriceProvider::new();
        prices.expect_daily_history().never();
        let mut fundamentals = MockFundamentalsProvider::new();
        fundamentals.expect_annual_statement().never();
        let mut news = MockNewsProvider::new();
        news.expect_feed().never();
        state(prices, fundamentals, news)
    }
}

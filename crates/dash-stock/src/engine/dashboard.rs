//! Dashboard engine - runs one rendering pass top to bottom

use std::sync::Arc;

use tracing::Instrument;

use crate::analytics::analyze_returns;
use crate::api::{AlphaVantageClient, YahooFinanceClient};
use crate::chart::LineChart;
use crate::config::DashboardConfig;
use crate::error::{Result, StockError};
use crate::models::{PriceSeries, StatementKind};
use crate::providers::{FundamentalsProvider, NewsProvider, PriceProvider};
use crate::query::Query;

use super::request::{DashboardRequest, Section};
use super::view::{
    DashboardView, LoadedView, NO_PRICE_DATA, NO_PRICING_DATA, NewsFeed, NumberedNews,
    SectionState, StatementSection,
};

/// Runs the workflow against a set of providers.
///
/// Holds no per-query state: every pass fetches what it shows, so N passes
/// with a section active mean N fetches for that section.
pub struct DashboardEngine {
    prices: Arc<dyn PriceProvider>,
    fundamentals: Arc<dyn FundamentalsProvider>,
    news: Arc<dyn NewsProvider>,
    news_limit: usize,
}

impl std::fmt::Debug for DashboardEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardEngine")
            .field("news_limit", &self.news_limit)
            .finish_non_exhaustive()
    }
}

impl DashboardEngine {
    pub fn new(
        prices: Arc<dyn PriceProvider>,
        fundamentals: Arc<dyn FundamentalsProvider>,
        news: Arc<dyn NewsProvider>,
        news_limit: usize,
    ) -> Self {
        Self {
            prices,
            fundamentals,
            news,
            news_limit,
        }
    }

    /// Yahoo Finance for prices, Alpha Vantage for statements and news
    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        config.validate()?;
        let yahoo = Arc::new(YahooFinanceClient::new(config.request_timeout));
        let alpha_vantage = Arc::new(AlphaVantageClient::from_config(config)?);

        if config.alpha_vantage_api_key.is_none() {
            tracing::warn!("no Alpha Vantage API key; fundamentals and news will report an error");
        }

        Ok(Self::new(
            yahoo,
            alpha_vantage.clone(),
            alpha_vantage,
            config.news_limit,
        ))
    }

    pub fn news_limit(&self) -> usize {
        self.news_limit
    }

    /// Run one pass. Provider failures are reported inside their section.
    pub async fn render(&self, request: &DashboardRequest) -> DashboardView {
        let query = match request.input.validate() {
            Ok(query) => query,
            Err(warning) => {
                tracing::debug!(%warning, "query incomplete, skipping fetches");
                return DashboardView::warning(warning);
            }
        };

        let span = tracing::info_span!(
            "dashboard_pass",
            query = %query.fingerprint(),
            sections = ?request.sections.iter().collect::<Vec<_>>()
        );

        self.render_query(query, request).instrument(span).await
    }

    async fn render_query(&self, query: Query, request: &DashboardRequest) -> DashboardView {
        let prices = self.fetch_prices(&query).await;

        let chart = match &prices {
            Ok(series) => LineChart::adjusted_close(series)
                .map_or_else(|| SectionState::empty(NO_PRICE_DATA), SectionState::ready),
            Err(message) => SectionState::failed(message.clone()),
        };

        let returns = request
            .sections
            .contains(Section::Returns)
            .then(|| returns_section(&prices));

        let fundamentals = if request.sections.contains(Section::Fundamentals) {
            Some(self.fundamentals_section(&query.ticker).await)
        } else {
            None
        };

        let news = if request.sections.contains(Section::News) {
            Some(self.news_section(&query.ticker).await)
        } else {
            None
        };

        DashboardView::Loaded(Box::new(LoadedView {
            query,
            chart,
            returns,
            fundamentals,
            news,
        }))
    }

    async fn fetch_prices(&self, query: &Query) -> std::result::Result<PriceSeries, String> {
        match self.prices.daily_history(query).await {
            Ok(series) => {
                tracing::info!(rows = series.len(), "price history loaded");
                Ok(series)
            }
            Err(e) => Err(report("price history", &e)),
        }
    }

    /// Three independent calls; one failing or empty does not affect the others
    async fn fundamentals_section(&self, ticker: &str) -> Vec<StatementSection> {
        let mut sections = Vec::with_capacity(StatementKind::ALL.len());

        for kind in StatementKind::ALL {
            let state = match self.fundamentals.annual_statement(ticker, kind).await {
                Ok(Some(statement)) if !statement.is_empty() => SectionState::ready(statement),
                Ok(_) => SectionState::empty(kind.no_data_message()),
                Err(e) => SectionState::failed(report(kind.title(), &e)),
            };
            sections.push(StatementSection {
                kind,
                title: kind.title().to_string(),
                state,
            });
        }

        sections
    }

    async fn news_section(&self, ticker: &str) -> SectionState<NewsFeed> {
        match self.news.feed(ticker).await {
            Ok(items) => {
                let items: Vec<NumberedNews> = items
                    .into_iter()
                    .take(self.news_limit)
                    .enumerate()
                    .map(|(i, item)| NumberedNews {
                        number: i + 1,
                        item,
                    })
                    .collect();
                tracing::info!(items = items.len(), "news feed loaded");
                SectionState::ready(NewsFeed {
                    header: format!("News of {ticker}"),
                    items,
                })
            }
            Err(e) => SectionState::failed(report("news", &e)),
        }
    }
}

fn returns_section(
    prices: &std::result::Result<PriceSeries, String>,
) -> SectionState<crate::analytics::ReturnsAnalysis> {
    match prices {
        Ok(series) => analyze_returns(series)
            .map_or_else(|| SectionState::empty(NO_PRICING_DATA), SectionState::ready),
        Err(message) => SectionState::failed(message.clone()),
    }
}

/// Log a recovered provider failure and produce the banner text
fn report(what: &str, err: &StockError) -> String {
    tracing::warn!(section = what, kind = err.kind(), error = %err, "provider call failed");
    format!("Could not load {what}: {err}")
}

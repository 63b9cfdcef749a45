//! Yahoo Finance API client

use crate::error::{Result, StockError};
use crate::models::{PriceBar, PriceSeries};
use crate::providers::PriceProvider;
use crate::query::Query;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::time::Duration;
use time::OffsetDateTime;
use yahoo_finance_api as yahoo;

/// Yahoo Finance API client
#[derive(Debug, Clone)]
pub struct YahooFinanceClient {
    timeout: Duration,
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Get daily history for `[start, end)`
    pub async fn get_historical_quotes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceBar>> {
        let provider = yahoo::YahooConnector::new()
            .map_err(|e| StockError::YahooFinanceError(e.to_string()))?;

        let start_odt = to_offset_datetime(start)?;
        let end_odt = to_offset_datetime(end)?;

        tracing::debug!(symbol, %start, %end, "fetching Yahoo daily history");

        let response = tokio::time::timeout(
            self.timeout,
            provider.get_quote_history(symbol, start_odt, end_odt),
        )
        .await
        .map_err(|_| {
            StockError::YahooFinanceError(format!(
                "request timed out after {}s",
                self.timeout.as_secs()
            ))
        })?;

        let response = match response {
            Ok(response) => response,
            Err(e) if is_no_data(&e) => return Ok(Vec::new()),
            Err(e) => return Err(StockError::YahooFinanceError(e.to_string())),
        };

        let quotes = match response.quotes() {
            Ok(quotes) => quotes,
            Err(e) if is_no_data(&e) => return Ok(Vec::new()),
            Err(e) => return Err(StockError::YahooFinanceError(e.to_string())),
        };
        let gmtoffset = response
            .metadata()
            .map_err(|e| StockError::YahooFinanceError(e.to_string()))?
            .gmtoffset;

        Ok(bars_from_quotes(&quotes, gmtoffset, start, end))
    }
}

/// Convert connector quotes to bars dated in the exchange's local time.
///
/// The chart API can return bars on or after `end`; those are dropped. The
/// connector fills a missing adjusted close with zero, so such bars fall back
/// to the close, and bars with no usable price at all are skipped.
fn bars_from_quotes(
    quotes: &[yahoo::Quote],
    gmtoffset: i32,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<PriceBar> {
    quotes
        .iter()
        .filter_map(|q| {
            let local = q.timestamp + i64::from(gmtoffset);
            let date = DateTime::<Utc>::from_timestamp(local, 0)?.date_naive();
            let adj_close = [q.adjclose, q.close].into_iter().find(|p| is_price(*p))?;
            Some(PriceBar {
                date,
                open: q.open,
                high: q.high,
                low: q.low,
                close: q.close,
                adj_close,
                volume: q.volume,
            })
        })
        .filter(|bar| bar.date >= start && bar.date < end)
        .collect()
}

fn is_price(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

impl Default for YahooFinanceClient {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

#[async_trait]
impl PriceProvider for YahooFinanceClient {
    async fn daily_history(&self, query: &Query) -> Result<PriceSeries> {
        let bars = self
            .get_historical_quotes(&query.ticker, query.start_date, query.end_date)
            .await?;
        Ok(PriceSeries::new(query.ticker.clone(), bars))
    }
}

fn to_offset_datetime(date: NaiveDate) -> Result<OffsetDateTime> {
    let timestamp = date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp();
    OffsetDateTime::from_unix_timestamp(timestamp)
        .map_err(|e| StockError::YahooFinanceError(format!("Invalid date {date}: {e}")))
}

/// Answers that mean "nothing for this ticker and range" rather than a failure.
///
/// An unknown symbol comes back as a chart error with code `Not Found`.
fn is_no_data(err: &yahoo::YahooError) -> bool {
    match err {
        yahoo::YahooError::NoResult | yahoo::YahooError::NoQuotes => true,
        yahoo::YahooError::ApiError(message) => message
            .code
            .as_deref()
            .is_some_and(|code| code.eq_ignore_ascii_case("Not Found")),
        _ => false,
    }
}

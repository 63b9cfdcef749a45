//! Alpha Vantage API client: annual statements and news sentiment

use crate::config::{self, DashboardConfig};
use crate::error::{Result, StockError};
use crate::models::{FinancialStatement, NewsItem, StatementKind, StatementRow};
use crate::providers::{FundamentalsProvider, NewsProvider};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use url::Url;

const PROVIDER: &str = "Alpha Vantage";

/// Report fields that label a column rather than form a line item
const PERIOD_FIELD: &str = "fiscalDateEnding";
const CURRENCY_FIELD: &str = "reportedCurrency";

/// How many articles to ask for; the dashboard truncates further
const NEWS_REQUEST_LIMIT: &str = "50";

/// Alpha Vantage API client
#[derive(Debug, Clone)]
pub struct AlphaVantageClient {
    client: Client,
    api_key: Option<String>,
    base_url: Url,
}

/// Raw statement payload (`BALANCE_SHEET`, `INCOME_STATEMENT`, `CASH_FLOW`)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatementResponse {
    #[serde(default)]
    annual_reports: Vec<Map<String, Value>>,
}

/// `NEWS_SENTIMENT` payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsSentimentResponse {
    #[serde(default)]
    pub feed: Vec<NewsArticle>,
}

/// One article of the news feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
    #[serde(default)]
    pub title: String,
    pub url: Option<String>,
    #[serde(default)]
    pub time_published: String,
    #[serde(default)]
    pub summary: String,
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub overall_sentiment_score: Option<f64>,
    #[serde(default)]
    pub ticker_sentiment: Vec<TickerSentiment>,
}

/// Per-ticker sentiment attached to an article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickerSentiment {
    pub ticker: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub relevance_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ticker_sentiment_score: Option<f64>,
}

impl StatementKind {
    /// Alpha Vantage `function` parameter
    pub fn function(self) -> &'static str {
        match self {
            Self::BalanceSheet => "BALANCE_SHEET",
            Self::IncomeStatement => "INCOME_STATEMENT",
            Self::CashFlow => "CASH_FLOW",
        }
    }
}

impl AlphaVantageClient {
    /// Create a new Alpha Vantage client.
    ///
    /// A missing key is not an error here; every call reports it instead so a
    /// page can still render its other sections.
    pub fn new(
        api_key: Option<String>,
        base_url: Url,
        timeout: std::time::Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }

    pub fn from_config(config: &DashboardConfig) -> Result<Self> {
        Self::new(
            config.alpha_vantage_api_key.clone(),
            config.alpha_vantage_base_url.clone(),
            config.request_timeout,
        )
    }

    fn api_key(&self) -> Result<&str> {
        config::require_api_key(self.api_key.as_deref())
    }

    /// Run one query and return the body after screening provider-level errors
    async fn query(&self, params: &[(&str, &str)]) -> Result<Value> {
        let api_key = self.api_key()?;

        let response = self
            .client
            .get(self.base_url.clone())
            .query(params)
            .query(&[("apikey", api_key)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StockError::ApiError(format!(
                "HTTP error: {}",
                response.status()
            )));
        }

        let data: Value = response.json().await?;
        check_api_error(&data)?;
        Ok(data)
    }

    /// Get one annual statement; `None` when the provider has nothing for the symbol
    pub async fn get_annual_statement(
        &self,
        symbol: &str,
        kind: StatementKind,
    ) -> Result<Option<FinancialStatement>> {
        tracing::debug!(symbol, function = kind.function(), "fetching Alpha Vantage statement");
        let data = self
            .query(&[("function", kind.function()), ("symbol", symbol)])
            .await?;
        parse_statement(kind, symbol, data)
    }

    /// Get the news feed for a symbol, newest first
    pub async fn get_news_sentiment(&self, symbol: &str) -> Result<Vec<NewsItem>> {
        tracing::debug!(symbol, "fetching Alpha Vantage news sentiment");
        let data = self
            .query(&[
                ("function", "NEWS_SENTIMENT"),
                ("tickers", symbol),
                ("sort", "LATEST"),
                ("limit", NEWS_REQUEST_LIMIT),
            ])
            .await?;
        parse_news(symbol, data)
    }
}

#[async_trait]
impl FundamentalsProvider for AlphaVantageClient {
    async fn annual_statement(
        &self,
        ticker: &str,
        kind: StatementKind,
    ) -> Result<Option<FinancialStatement>> {
        self.get_annual_statement(ticker, kind).await
    }
}

#[async_trait]
impl NewsProvider for AlphaVantageClient {
    async fn feed(&self, ticker: &str) -> Result<Vec<NewsItem>> {
        self.get_news_sentiment(ticker).await
    }
}

/// Alpha Vantage answers 200 with an explanatory object instead of data
fn check_api_error(data: &Value) -> Result<()> {
    if let Some(error) = data.get("Error Message") {
        return Err(StockError::AlphaVantageError(value_text(error)));
    }

    if let Some(note) = data.get("Note") {
        return Err(StockError::RateLimitExceeded {
            provider: PROVIDER.to_string(),
            message: value_text(note),
        });
    }

    if let Some(info) = data.get("Information") {
        let message = value_text(info);
        let lower = message.to_lowercase();
        if lower.contains("rate limit") || lower.contains("call frequency") || lower.contains("requests per") {
            return Err(StockError::RateLimitExceeded {
                provider: PROVIDER.to_string(),
                message,
            });
        }
        return Err(StockError::AlphaVantageError(message));
    }

    Ok(())
}

fn value_text(value: &Value) -> String {
    value
        .as_str()
        .map_or_else(|| value.to_string(), ToString::to_string)
}

/// Turn a statement payload into a line-items-by-year table
fn parse_statement(
    kind: StatementKind,
    symbol: &str,
    data: Value,
) -> Result<Option<FinancialStatement>> {
    // unknown symbols come back as `{}`
    if data.as_object().is_none_or(Map::is_empty) {
        return Ok(None);
    }

    let response: StatementResponse = serde_json::from_value(data)?;
    let reports = response.annual_reports;
    if reports.is_empty() {
        return Ok(None);
    }

    let periods: Vec<String> = reports
        .iter()
        .map(|report| report.get(PERIOD_FIELD).map(value_text).unwrap_or_default())
        .collect();

    let currency = reports
        .iter()
        .find_map(|report| report.get(CURRENCY_FIELD).map(value_text));

    // line items in the provider's order, taking any item a later year adds
    let mut items: Vec<&str> = Vec::new();
    for report in &reports {
        for key in report.keys() {
            if key != PERIOD_FIELD && key != CURRENCY_FIELD && !items.contains(&key.as_str()) {
                items.push(key.as_str());
            }
        }
    }

    let rows = items
        .into_iter()
        .map(|item| StatementRow {
            item: item.to_string(),
            values: reports
                .iter()
                .map(|report| report.get(item).map(value_text))
                .collect(),
        })
        .collect();

    Ok(Some(FinancialStatement {
        kind,
        ticker: symbol.to_string(),
        currency,
        periods,
        rows,
    }))
}

/// Map the feed to news items.
///
/// Title sentiment is the score the provider assigns to the requested ticker;
/// summary sentiment is the article's overall score.
fn parse_news(symbol: &str, data: Value) -> Result<Vec<NewsItem>> {
    let response: NewsSentimentResponse = serde_json::from_value(data)?;

    Ok(response
        .feed
        .into_iter()
        .map(|article| {
            let title_sentiment = article
                .ticker_sentiment
                .iter()
                .find(|t| t.ticker.eq_ignore_ascii_case(symbol))
                .and_then(|t| t.ticker_sentiment_score);

            NewsItem {
                published: format_published(&article.time_published),
                title: article.title,
                summary: article.summary,
                url: article.url,
                source: article.source,
                title_sentiment,
                summary_sentiment: article.overall_sentiment_score,
            }
        })
        .collect())
}

/// `20240105T133000` -> `2024-01-05 13:30:00`; anything else passes through
fn format_published(raw: &str) -> String {
    NaiveDateTime::parse_from_str(raw, "%Y%m%dT%H%M%S")
        .map_or_else(|_| raw.to_string(), |dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Scores arrive as JSON numbers or as numeric strings
fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn balance_sheet_payload() -> Value {
        json!({
            "symbol": "IBM",
            "annualReports": [
                {
                    "fiscalDateEnding": "2023-12-31",
                    "reportedCurrency": "USD",
                    "totalAssets": "135241000000",
                    "totalLiabilities": "112628000000"
                },
                {
                    "fiscalDateEnding": "2022-12-31",
                    "reportedCurrency": "USD",
                    "totalAssets": "127243000000",
                    "totalLiabilities": "105222000000",
                    "goodwill": "None"
                }
            ],
            "quarterlyReports": []
        })
    }

    #[test]
    fn test_client_creation() {
        let config = DashboardConfig::builder()
            .alpha_vantage_api_key("test_key")
            .build()
            .unwrap();
        let client = AlphaVantageClient::from_config(&config).unwrap();
        assert_eq!(client.api_key().unwrap(), "test_key");
    }

    #[test]
    fn test_missing_key_reported_on_use() {
        let client = AlphaVantageClient::new(
            None,
            Url::parse("https://www.alphavantage.co/query").unwrap(),
            Duration::from_secs(5),
        )
        .unwrap();
        let err = client.api_key().unwrap_err();
        assert!(matches!(err, StockError::ConfigError(_)));
        assert!(err.to_string().contains(config::ALPHA_VANTAGE_KEY_ENV));

        let blank = AlphaVantageClient::new(
            Some("   ".into()),
            Url::parse("https://www.alphavantage.co/query").unwrap(),
            Duration::from_secs(5),
        )
        .unwrap();
        assert!(blank.api_key().is_err());
    }

    #[test]
    fn test_parse_statement_table() {
        let statement = parse_statement(StatementKind::BalanceSheet, "IBM", balance_sheet_payload())
            .unwrap()
            .unwrap();

        assert_eq!(statement.periods, vec!["2023-12-31", "2022-12-31"]);
        assert_eq!(statement.currency.as_deref(), Some("USD"));

        let items: Vec<&str> = statement.rows.iter().map(|r| r.item.as_str()).collect();
        assert_eq!(items, vec!["totalAssets", "totalLiabilities", "goodwill"]);

        let goodwill = &statement.rows[2];
        assert_eq!(goodwill.values, vec![None, Some("None".to_string())]);
    }

    #[test]
    fn test_parse_statement_absent() {
        assert!(parse_statement(StatementKind::CashFlow, "ZZZZ", json!({})).unwrap().is_none());
        assert!(
            parse_statement(StatementKind::CashFlow, "ZZZZ", json!({"symbol": "ZZZZ", "annualReports": []}))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_api_error_screening() {
        let err = check_api_error(&json!({"Error Message": "Invalid API call."})).unwrap_err();
        assert!(matches!(err, StockError::AlphaVantageError(ref m) if m == "Invalid API call."));

        let err = check_api_error(&json!({"Note": "Thank you for using Alpha Vantage!"})).unwrap_err();
        assert!(matches!(err, StockError::RateLimitExceeded { .. }));

        let err = check_api_error(&json!({
            "Information": "We have detected your API key as demo and our standard API rate limit is 25 requests per day."
        }))
        .unwrap_err();
        assert!(matches!(err, StockError::RateLimitExceeded { .. }));

        let err = check_api_error(&json!({"Information": "Invalid inputs."})).unwrap_err();
        assert!(matches!(err, StockError::AlphaVantageError(_)));

        assert!(check_api_error(&balance_sheet_payload()).is_ok());
    }

    #[test]
    fn test_parse_news_sentiment() {
        let payload = json!({
            "items": "2",
            "feed": [
                {
                    "title": "Apple beats estimates",
                    "url": "https://example.com/a",
                    "time_published": "20240105T133000",
                    "summary": "Quarterly results were strong.",
                    "source": "Wire",
                    "overall_sentiment_score": 0.31,
                    "ticker_sentiment": [
                        {"ticker": "MSFT", "relevance_score": "0.1", "ticker_sentiment_score": "0.05"},
                        {"ticker": "AAPL", "relevance_score": "0.9", "ticker_sentiment_score": "0.42"}
                    ]
                },
                {
                    "title": "Market wrap",
                    "time_published": "not-a-date",
                    "summary": "",
                    "ticker_sentiment": []
                }
            ]
        });

        let items = parse_news("aapl", payload).unwrap();
        assert_eq!(items.len(), 2);

        assert_eq!(items[0].published, "2024-01-05 13:30:00");
        assert_eq!(items[0].title_sentiment, Some(0.42));
        assert_eq!(items[0].summary_sentiment, Some(0.31));

        assert_eq!(items[1].title, "Market wrap");
        assert_eq!(items[1].published, "not-a-date");
        assert_eq!(items[1].title_sentiment, None);
        assert_eq!(items[1].summary_sentiment, None);
    }

    #[test]
    fn test_parse_news_without_feed() {
        let items = parse_news("AAPL", json!({"items": "0"})).unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    #[ignore] // Requires API key and network access
    async fn test_get_balance_sheet() {
        let config = DashboardConfig::default().with_env_api_key();
        let client = AlphaVantageClient::from_config(&config).unwrap();
        let statement = client
            .get_annual_statement("IBM", StatementKind::BalanceSheet)
            .await
            .unwrap();
        assert!(statement.is_some());
    }
}

//! Data carried through a rendering pass

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One trading day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub adj_close: f64,
    pub volume: u64,
}

/// Daily bars for one ticker, ascending by date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub ticker: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Sorts by date and keeps the last bar seen for a duplicated date.
    pub fn new(ticker: impl Into<String>, mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|b| b.date);
        let mut deduped: Vec<PriceBar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match deduped.last_mut() {
                Some(last) if last.date == bar.date => *last = bar,
                _ => deduped.push(bar),
            }
        }
        Self {
            ticker: ticker.into(),
            bars: deduped,
        }
    }

    pub fn empty(ticker: impl Into<String>) -> Self {
        Self::new(ticker, Vec::new())
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first(&self) -> Option<&PriceBar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }
}

/// The three annual statements shown in the fundamentals section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    BalanceSheet,
    IncomeStatement,
    CashFlow,
}

impl StatementKind {
    /// Render order
    pub const ALL: [StatementKind; 3] = [
        StatementKind::BalanceSheet,
        StatementKind::IncomeStatement,
        StatementKind::CashFlow,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::BalanceSheet => "Balance Sheet",
            Self::IncomeStatement => "Income Statement",
            Self::CashFlow => "Cash Flow Statement",
        }
    }

    pub fn no_data_message(self) -> &'static str {
        match self {
            Self::BalanceSheet => "No balance sheet data available.",
            Self::IncomeStatement => "No income statement data available.",
            Self::CashFlow => "No cash flow statement data available.",
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A line item with one value per reporting period
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementRow {
    pub item: String,
    pub values: Vec<Option<String>>,
}

/// An annual statement laid out as line items by reporting year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialStatement {
    pub kind: StatementKind,
    pub ticker: String,
    pub currency: Option<String>,
    /// Fiscal period end dates, newest first as reported
    pub periods: Vec<String>,
    pub rows: Vec<StatementRow>,
}

impl FinancialStatement {
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty() || self.rows.is_empty()
    }
}

/// A news entry with provider-computed sentiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub published: String,
    pub title: String,
    pub summary: String,
    pub url: Option<String>,
    pub source: Option<String>,
    pub title_sentiment: Option<f64>,
    pub summary_sentiment: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, adj_close: f64) -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: adj_close,
            high: adj_close,
            low: adj_close,
            close: adj_close,
            adj_close,
            volume: 100,
        }
    }

    #[test]
    fn test_series_sorted_and_deduplicated() {
        let series = PriceSeries::new("AAPL", vec![bar(3, 3.0), bar(1, 1.0), bar(3, 3.5), bar(2, 2.0)]);

        let closes: Vec<f64> = series.bars().iter().map(|b| b.adj_close).collect();
        assert_eq!(closes, vec![1.0, 2.0, 3.5]);
        assert_eq!(series.first().unwrap().date.to_string(), "2024-01-01");
    }

    #[test]
    fn test_statement_kind_labels() {
        assert_eq!(StatementKind::ALL.len(), 3);
        assert_eq!(StatementKind::CashFlow.to_string(), "Cash Flow Statement");
        assert_eq!(
            StatementKind::BalanceSheet.no_data_message(),
            "No balance sheet data available."
        );
        assert_eq!(
            serde_json::to_string(&StatementKind::IncomeStatement).unwrap(),
            "\"income_statement\""
        );
    }
}

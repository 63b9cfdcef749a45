//! User query: ticker plus date range, and the checks that gate every fetch

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date format produced by HTML date inputs
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw widget values as the user left them
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryInput {
    pub ticker: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

/// Why a query could not be built; each maps to a single warning line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputWarning {
    /// Ticker empty or a date unset
    MissingFields,
    /// A date field holds something other than `YYYY-MM-DD`
    InvalidDate { field: String, value: String },
    /// Start date later than end date
    StartAfterEnd { start: NaiveDate, end: NaiveDate },
}

impl InputWarning {
    pub fn message(&self) -> String {
        match self {
            Self::MissingFields => {
                "Please enter a value for Ticker, Start date, and End date.".to_string()
            }
            Self::InvalidDate { field, value } => {
                format!("{field} '{value}' is not a valid date (expected YYYY-MM-DD).")
            }
            Self::StartAfterEnd { start, end } => {
                format!("Start date {start} must not be after End date {end}.")
            }
        }
    }
}

impl fmt::Display for InputWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// A validated query
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Query {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Query {
    /// `TICKER|start|end`, the label of a rendering pass in logs
    pub fn fingerprint(&self) -> String {
        format!(
            "{}|{}|{}",
            self.ticker,
            self.start_date.format(DATE_FORMAT),
            self.end_date.format(DATE_FORMAT)
        )
    }
}

impl QueryInput {
    pub fn new(
        ticker: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        Self {
            ticker: Some(ticker.into()),
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }

    /// Build a [`Query`], or the single warning the page should show instead.
    pub fn validate(&self) -> Result<Query, InputWarning> {
        let ticker = non_empty(self.ticker.as_deref());
        let start = non_empty(self.start.as_deref());
        let end = non_empty(self.end.as_deref());

        let (Some(ticker), Some(start), Some(end)) = (ticker, start, end) else {
            return Err(InputWarning::MissingFields);
        };

        let start_date = parse_date("Start date", start)?;
        let end_date = parse_date("End date", end)?;

        if start_date > end_date {
            return Err(InputWarning::StartAfterEnd {
                start: start_date,
                end: end_date,
            });
        }

        Ok(Query {
            ticker: ticker.to_uppercase(),
            start_date,
            end_date,
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, InputWarning> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| InputWarning::InvalidDate {
        field: field.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_query() {
        let query = QueryInput::new(" aapl ", "2024-01-02", "2024-03-28")
            .validate()
            .unwrap();

        assert_eq!(query.ticker, "AAPL");
        assert_eq!(query.start_date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(query.fingerprint(), "AAPL|2024-01-02|2024-03-28");
    }

    #[test]
    fn test_missing_fields() {
        let cases = [
            QueryInput::default(),
            QueryInput::new("", "2024-01-01", "2024-02-01"),
            QueryInput::new("   ", "2024-01-01", "2024-02-01"),
            QueryInput::new("MSFT", "", "2024-02-01"),
            QueryInput {
                end: None,
                ..QueryInput::new("MSFT", "2024-01-01", "")
            },
        ];

        for input in cases {
            assert_eq!(input.validate(), Err(InputWarning::MissingFields), "{input:?}");
        }
        assert_eq!(
            InputWarning::MissingFields.message(),
            "Please enter a value for Ticker, Start date, and End date."
        );
    }

    #[test]
    fn test_invalid_date() {
        let err = QueryInput::new("MSFT", "01/02/2024", "2024-02-01")
            .validate()
            .unwrap_err();
        assert!(matches!(err, InputWarning::InvalidDate { ref field, .. } if field == "Start date"));
    }

    #[test]
    fn test_start_after_end_rejected() {
        let err = QueryInput::new("MSFT", "2024-03-01", "2024-02-01")
            .validate()
            .unwrap_err();
        assert!(matches!(err, InputWarning::StartAfterEnd { .. }));
        assert!(err.to_string().contains("must not be after"));

        // same day is allowed
        assert!(QueryInput::new("MSFT", "2024-03-01", "2024-03-01").validate().is_ok());
    }

    #[test]
    fn test_fingerprint_changes_with_any_field() {
        let base = QueryInput::new("IBM", "2024-01-01", "2024-06-01").validate().unwrap();
        let other_ticker = QueryInput::new("MSFT", "2024-01-01", "2024-06-01").validate().unwrap();
        let other_end = QueryInput::new("IBM", "2024-01-01", "2024-06-02").validate().unwrap();

        assert_ne!(base.fingerprint(), other_ticker.fingerprint());
        assert_ne!(base.fingerprint(), other_end.fingerprint());
    }
}

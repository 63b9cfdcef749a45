//! Return statistics derived from a daily price series

use serde::{Deserialize, Serialize};

use crate::models::{PriceBar, PriceSeries};

/// Trading days used to annualize daily statistics
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// A price row with its day-over-day change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnRow {
    #[serde(flatten)]
    pub bar: PriceBar,
    /// Fractional change of adjusted close versus the previous row
    pub pct_change: f64,
}

/// Annualized summary of the daily changes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnMetrics {
    /// Mean daily change x 252, in percent
    pub annual_return_pct: f64,
    /// Population standard deviation x sqrt(252), in percent
    pub annual_std_pct: f64,
    /// Return per unit of volatility; `None` when volatility is zero
    pub risk_adjusted_return: Option<f64>,
}

/// Output of the returns section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnsAnalysis {
    pub rows: Vec<ReturnRow>,
    pub metrics: ReturnMetrics,
}

/// Day-over-day changes. The result is one shorter than the input.
pub fn pct_changes(values: &[f64]) -> Vec<f64> {
    values
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) / pair[0])
        .collect()
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Standard deviation with divisor `n`
pub fn population_std(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

impl ReturnMetrics {
    /// Annualize daily changes.
    ///
    /// `None` for an empty slice, or when a change is not a real number
    /// (a zero or missing price upstream).
    pub fn from_daily_changes(changes: &[f64]) -> Option<Self> {
        let daily_mean = mean(changes).filter(|m| m.is_finite())?;
        let daily_std = population_std(changes).filter(|s| s.is_finite())?;

        let annual_return_pct = daily_mean * TRADING_DAYS_PER_YEAR * 100.0;
        let annual_std_pct = daily_std * TRADING_DAYS_PER_YEAR.sqrt() * 100.0;

        let risk_adjusted_return = if annual_std_pct > 0.0 {
            Some(annual_return_pct / annual_std_pct).filter(|r| r.is_finite())
        } else {
            None
        };

        Some(Self {
            annual_return_pct,
            annual_std_pct,
            risk_adjusted_return,
        })
    }
}

/// Build the returns table and its metrics.
///
/// Needs at least two bars; the first bar has no prior close and is dropped.
pub fn analyze_returns(series: &PriceSeries) -> Option<ReturnsAnalysis> {
    if series.len() < 2 {
        return None;
    }

    let closes: Vec<f64> = series.bars().iter().map(|b| b.adj_close).collect();
    let changes = pct_changes(&closes);
    let metrics = ReturnMetrics::from_daily_changes(&changes)?;

    let rows = series
        .bars()
        .iter()
        .skip(1)
        .zip(changes)
        .map(|(bar, pct_change)| ReturnRow {
            bar: bar.clone(),
            pct_change,
        })
        .collect();

    Some(ReturnsAnalysis { rows, metrics })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PriceBar {
                date: start + chrono::Duration::days(i as i64),
                open: c,
                high: c,
                low: c,
                close: c,
                adj_close: c,
                volume: 1_000,
            })
            .collect();
        PriceSeries::new("TEST", bars)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_pct_changes() {
        let changes = pct_changes(&[100.0, 110.0, 99.0]);
        assert_eq!(changes.len(), 2);
        assert!(approx(changes[0], 0.10));
        assert!(approx(changes[1], -0.10));
        assert!(pct_changes(&[5.0]).is_empty());
    }

    #[test]
    fn test_population_std() {
        // mean 5, squared deviations sum to 32 over 8 values
        let std = population_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!(approx(std, 2.0));
        assert!(population_std(&[]).is_none());
    }

    #[test]
    fn test_analyze_drops_first_row() {
        let analysis = analyze_returns(&series(&[100.0, 110.0, 99.0, 99.0])).unwrap();
        assert_eq!(analysis.rows.len(), 3);
        assert_eq!(analysis.rows[0].bar.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert!(approx(analysis.rows[0].pct_change, 0.10));
    }

    #[test]
    fn test_metrics_values() {
        let analysis = analyze_returns(&series(&[100.0, 110.0, 99.0])).unwrap();
        let m = analysis.metrics;

        // changes +0.1 and -0.1: mean 0, population std 0.1
        assert!(approx(m.annual_return_pct, 0.0));
        assert!(approx(m.annual_std_pct, 0.1 * 252f64.sqrt() * 100.0));
        assert!(approx(m.risk_adjusted_return.unwrap(), 0.0));
    }

    #[test]
    fn test_constant_price_is_undefined_ratio() {
        let analysis = analyze_returns(&series(&[50.0, 50.0, 50.0])).unwrap();
        assert!(approx(analysis.metrics.annual_std_pct, 0.0));
        assert!(analysis.metrics.annual_return_pct.is_finite());
        assert_eq!(analysis.metrics.risk_adjusted_return, None);
    }

    #[test]
    fn test_zero_price_yields_no_metrics() {
        assert!(analyze_returns(&series(&[0.0, 10.0, 11.0])).is_none());
        assert!(ReturnMetrics::from_daily_changes(&[0.1, f64::NAN]).is_none());

        let metrics = ReturnMetrics::from_daily_changes(&[0.01, -0.02, 0.015]).unwrap();
        assert!(metrics.annual_return_pct.is_finite());
        assert!(metrics.annual_std_pct.is_finite());
    }

    #[test]
    fn test_too_short_series() {
        assert!(analyze_returns(&series(&[])).is_none());
        assert!(analyze_returns(&series(&[42.0])).is_none());
        assert_eq!(analyze_returns(&series(&[1.0, 2.0])).unwrap().rows.len(), 1);
    }

    #[test]
    fn test_row_serializes_flat() {
        let analysis = analyze_returns(&series(&[10.0, 11.0])).unwrap();
        let json = serde_json::to_value(&analysis.rows[0]).unwrap();
        assert_eq!(json["adj_close"], 11.0);
        assert!(json.get("bar").is_none());
        assert!(json["pct_change"].as_f64().is_some());
    }
}

//! Line chart geometry for the adjusted-close series
//!
//! Produces plain SVG coordinates so the page needs no charting script.

use serde::{Deserialize, Serialize};

use crate::models::PriceSeries;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 360.0;
const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 16.0;
const MARGIN_BOTTOM: f64 = 36.0;

/// Ready-to-draw line chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChart {
    pub title: String,
    pub width: f64,
    pub height: f64,
    /// SVG `points` attribute, `x,y` pairs separated by spaces
    pub points: String,
    pub point_count: usize,
    pub first_date: String,
    pub last_date: String,
    pub min_price: f64,
    pub max_price: f64,
    /// Plot area corners, for axis lines and labels
    pub plot_left: f64,
    pub plot_right: f64,
    pub plot_top: f64,
    pub plot_bottom: f64,
}

pub fn chart_title(ticker: &str) -> String {
    format!("Stock Price Movements for {ticker}")
}

impl LineChart {
    /// Adjusted close against date. `None` for an empty series.
    pub fn adjusted_close(series: &PriceSeries) -> Option<Self> {
        let first = series.first()?;
        let last = series.last()?;

        let (min_price, max_price) = series
            .bars()
            .iter()
            .map(|b| b.adj_close)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });

        let plot_left = MARGIN_LEFT;
        let plot_right = WIDTH - MARGIN_RIGHT;
        let plot_top = MARGIN_TOP;
        let plot_bottom = HEIGHT - MARGIN_BOTTOM;

        let span_days = (last.date - first.date).num_days() as f64;
        let price_span = max_price - min_price;

        let points = series
            .bars()
            .iter()
            .map(|bar| {
                let x = if span_days > 0.0 {
                    let offset = (bar.date - first.date).num_days() as f64;
                    plot_left + offset / span_days * (plot_right - plot_left)
                } else {
                    (plot_left + plot_right) / 2.0
                };
                // flat series sit mid-height
                let y = if price_span > 0.0 {
                    plot_bottom - (bar.adj_close - min_price) / price_span * (plot_bottom - plot_top)
                } else {
                    (plot_top + plot_bottom) / 2.0
                };
                format!("{x:.2},{y:.2}")
            })
            .collect::<Vec<_>>()
            .join(" ");

        Some(Self {
            title: chart_title(&series.ticker),
            width: WIDTH,
            height: HEIGHT,
            points,
            point_count: series.len(),
            first_date: first.date.to_string(),
            last_date: last.date.to_string(),
            min_price,
            max_price,
            plot_left,
            plot_right,
            plot_top,
            plot_bottom,
        })
    }
}

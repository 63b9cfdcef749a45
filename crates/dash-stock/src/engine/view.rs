//! Result of one rendering pass, ready for a template or JSON

use serde::{Deserialize, Serialize};

use crate::analytics::ReturnsAnalysis;
use crate::chart::LineChart;
use crate::models::{FinancialStatement, NewsItem, StatementKind};
use crate::query::{InputWarning, Query};

use super::request::SectionSet;

/// Message shown when the price provider has no rows for the query
pub const NO_PRICE_DATA: &str = "No data available for the selected dates or ticker.";

/// Message shown in the returns section when fewer than two rows exist
pub const NO_PRICING_DATA: &str = "No pricing data available.";

/// Outcome of one section: data, an explained absence, or a reported failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SectionState<T> {
    Ready { data: T },
    Empty { message: String },
    Failed { message: String },
}

impl<T> SectionState<T> {
    pub fn ready(data: T) -> Self {
        Self::Ready { data }
    }

    pub fn empty(message: impl Into<String>) -> Self {
        Self::Empty {
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Ready { data } => Some(data),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// One statement within the fundamentals section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementSection {
    pub kind: StatementKind,
    pub title: String,
    pub state: SectionState<FinancialStatement>,
}

/// A news item with its 1-based position in the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberedNews {
    pub number: usize,
    #[serde(flatten)]
    pub item: NewsItem,
}

/// The truncated news feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsFeed {
    pub header: String,
    pub items: Vec<NumberedNews>,
}

/// Everything shown for a valid query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadedView {
    pub query: Query,
    pub chart: SectionState<LineChart>,
    /// `None` when the section's toggle was not active in this pass
    pub returns: Option<SectionState<ReturnsAnalysis>>,
    pub fundamentals: Option<Vec<StatementSection>>,
    pub news: Option<SectionState<NewsFeed>>,
}

impl LoadedView {
    /// Toggle sections rendered in this pass
    pub fn shown_sections(&self) -> SectionSet {
        SectionSet {
            returns: self.returns.is_some(),
            fundamentals: self.fundamentals.is_some(),
            news: self.news.is_some(),
        }
    }
}

/// Where the session stands after a pass.
///
/// `QueryEntered` means the query was valid but the price fetch failed, so
/// no chart is on screen. The toggle sections shown on top of a stage come
/// from [`DashboardView::shown_sections`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStage {
    NoQuery,
    QueryEntered,
    PriceShown,
}

/// Complete output of a rendering pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum DashboardView {
    /// Input incomplete or invalid; nothing was fetched
    Warning {
        warning: InputWarning,
        message: String,
    },
    Loaded(Box<LoadedView>),
}

impl DashboardView {
    pub fn warning(warning: InputWarning) -> Self {
        let message = warning.message();
        Self::Warning { warning, message }
    }

    pub fn stage(&self) -> SessionStage {
        match self {
            Self::Warning { .. } => SessionStage::NoQuery,
            Self::Loaded(view) if view.chart.is_failed() => SessionStage::QueryEntered,
            Self::Loaded(_) => SessionStage::PriceShown,
        }
    }

    pub fn shown_sections(&self) -> SectionSet {
        self.loaded()
            .map_or_else(SectionSet::none, LoadedView::shown_sections)
    }

    pub fn loaded(&self) -> Option<&LoadedView> {
        match self {
            Self::Loaded(view) => Some(view),
            Self::Warning { .. } => None,
        }
    }
}

//! HTML rendering of a dashboard pass with MiniJinja

use dash_stock::{DashboardView, Section, StockError};
use minijinja::{Environment, context};
use serde::Serialize;
use url::Url;

use crate::error::{AppError, AppResult};
use crate::params::FormState;

const TEMPLATE_NAME: &str = "dashboard.html";
const TEMPLATE: &str = include_str!("../templates/dashboard.html");

/// Style sheet used when none is configured
pub const DEFAULT_STYLESHEET: &str = include_str!("../static/dashboard.css");

const PAGE_TITLE: &str = "STOCK DASHBOARD";

#[derive(Debug, Serialize)]
struct Toggle {
    param: &'static str,
    label: &'static str,
}

/// Compiled page template plus the configured style sheet
pub struct PageRenderer {
    env: Environment<'static>,
    stylesheet: String,
}

impl PageRenderer {
    pub fn new(stylesheet: Option<String>) -> AppResult<Self> {
        let mut env = Environment::new();
        env.add_filter("fixed", fixed);
        env.add_filter("ratio", ratio);
        env.add_filter("sentiment", sentiment);
        env.add_filter("web_link", web_link);
        env.add_template(TEMPLATE_NAME, TEMPLATE)
            .map_err(|e| AppError::Internal(format!("template error: {e}")))?;

        Ok(Self {
            env,
            stylesheet: stylesheet.unwrap_or_else(|| DEFAULT_STYLESHEET.to_string()),
        })
    }

    pub fn stylesheet(&self) -> &str {
        &self.stylesheet
    }

    /// Render the full page for a pass
    pub fn render(&self, form: &FormState, view: &DashboardView) -> AppResult<String> {
        let toggles: Vec<Toggle> = Section::ALL
            .into_iter()
            .map(|section| Toggle {
                param: section.param(),
                label: section.toggle_label(),
            })
            .collect();

        let template = self
            .env
            .get_template(TEMPLATE_NAME)
            .map_err(|e| AppError::Internal(format!("template error: {e}")))?;

        template
            .render(context! {
                title => PAGE_TITLE,
                stylesheet => &self.stylesheet,
                form => form,
                toggles => toggles,
                view => view,
            })
            .map_err(|e| {
                tracing::error!("Template render error: {}", e);
                AppError::from(StockError::RenderError(e.to_string()))
            })
    }
}

impl std::fmt::Debug for PageRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageRenderer")
            .field("stylesheet_len", &self.stylesheet.len())
            .finish_non_exhaustive()
    }
}

fn fixed(value: f64, digits: Option<usize>) -> String {
    format!("{value:.prec$}", prec = digits.unwrap_or(2))
}

/// Risk-adjusted return; absent when volatility is zero
fn ratio(value: Option<f64>) -> String {
    value.map_or_else(|| "undefined".to_string(), |v| format!("{v:.4}"))
}

/// Sentiment scores keep the provider's precision; missing ones read `None`
fn sentiment(value: Option<f64>) -> String {
    value.map_or_else(|| "None".to_string(), |v| v.to_string())
}

/// Article links are only rendered for `http` and `https` targets
fn web_link(value: Option<String>) -> Option<String> {
    let url = Url::parse(value?.trim()).ok()?;
    matches!(url.scheme(), "http" | "https").then(|| url.into())
}

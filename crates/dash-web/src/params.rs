//! Query-string parameters shared by the page and the JSON API

use dash_stock::{DashboardRequest, QueryInput, SectionSet};
use serde::{Deserialize, Deserializer, Serialize};

/// `?ticker=&start=&end=&returns=1&fundamentals=1&news=1`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardParams {
    pub ticker: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub returns: bool,
    #[serde(default, deserialize_with = "flag")]
    pub fundamentals: bool,
    #[serde(default, deserialize_with = "flag")]
    pub news: bool,
}

/// Widget values echoed back into the sidebar form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormState {
    pub ticker: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl DashboardParams {
    pub fn form_state(&self) -> FormState {
        FormState {
            ticker: self.ticker.clone(),
            start: self.start.clone(),
            end: self.end.clone(),
        }
    }

    pub fn to_request(&self) -> DashboardRequest {
        DashboardRequest {
            input: QueryInput {
                ticker: self.ticker.clone(),
                start: self.start.clone(),
                end: self.end.clone(),
            },
            sections: SectionSet {
                returns: self.returns,
                fundamentals: self.fundamentals,
                news: self.news,
            },
        }
    }
}

/// Toggle flags: `1`, `true`, `on` or `yes` (any case) switch a section on
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.is_some_and(|v| {
        matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "on" | "yes"
        )
    }))
}

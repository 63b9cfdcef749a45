//! `GET /` - the dashboard page

use axum::extract::{Query, State};
use axum::response::Html;

use crate::error::AppResult;
use crate::params::DashboardParams;
use crate::state::AppState;

/// Run one rendering pass and return it as HTML.
///
/// Provider failures are already folded into the view, so the only errors
/// left here are template failures.
pub async fn dashboard_page(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> AppResult<Html<String>> {
    let view = state.engine.render(&params.to_request()).await;
    let html = state.renderer.render(&params.form_state(), &view)?;
    Ok(Html(html))
}

//! `GET /api/dashboard` - JSON rendition of a pass

use axum::Json;
use axum::extract::{Query, State};
use dash_stock::DashboardView;

use crate::params::DashboardParams;
use crate::state::AppState;

pub async fn dashboard_json(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> Json<DashboardView> {
    Json(state.engine.render(&params.to_request()).await)
}

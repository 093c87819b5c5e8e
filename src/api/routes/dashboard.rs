//! Dashboard Routes
//!
//! Each request is one render pass: load the roster, resolve the selection,
//! render.
//!
//! - GET / - HTML dashboard
//! - GET /api/v1/dashboard - The same view as JSON
//! - GET /api/v1/chart - Only the chart, as JSON
//! - GET /api/v1/roster - The loaded roster, as JSON

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Html,
    Json,
};
use std::sync::Arc;

use crate::api::dto::RosterResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::report::selection::{resolve, SelectionParams};
use crate::report::{build_chart, render, render_html, BarChart, DashboardView};
use crate::roster::LoadError;

/// Selection from the query string; a bad `mode` or `subject` is a 400
fn selection_params(
    query: Result<Query<SelectionParams>, QueryRejection>,
) -> ApiResult<SelectionParams> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| ApiError::Validation(rejection.body_text()))
}

async fn render_view(state: &AppState, params: &SelectionParams) -> ApiResult<DashboardView> {
    let roster = state.load_roster().await?;

    if let Err(e) = &roster {
        tracing::warn!(
            path = %state.config.roster.path.display(),
            error = %e,
            "Roster failed to load; rendering error page"
        );
    }

    Ok(render(
        roster.as_ref(),
        params,
        &state.config.dashboard,
        &state.config.theme,
    ))
}

/// GET /
///
/// Full dashboard page. A roster that fails to load still returns 200 with
/// the error shown in place of the cards and chart.
pub async fn dashboard_page(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SelectionParams>, QueryRejection>,
) -> ApiResult<Html<String>> {
    let params = selection_params(query)?;
    let view = render_view(&state, &params).await?;
    Ok(Html(render_html(&view, &state.config.theme)))
}

/// GET /api/v1/dashboard
///
/// The view description behind the page.
pub async fn dashboard_json(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SelectionParams>, QueryRejection>,
) -> ApiResult<Json<DashboardView>> {
    let params = selection_params(query)?;
    Ok(Json(render_view(&state, &params).await?))
}

/// GET /api/v1/chart
///
/// Bar chart for the selection. Fails with 503 if the roster does not load.
pub async fn chart_json(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SelectionParams>, QueryRejection>,
) -> ApiResult<Json<BarChart>> {
    let params = selection_params(query)?;
    let roster = state.load_roster().await??;
    let selection = resolve(&roster, &params);

    tracing::debug!(?selection, "Building chart");

    Ok(Json(build_chart(&roster, &selection, &state.config.theme)))
}

/// GET /api/v1/roster
pub async fn roster_json(State(state): State<Arc<AppState>>) -> ApiResult<Json<RosterResponse>> {
    let roster = state.load_roster().await??;
    let class = roster
        .class_header()
        .ok_or(ApiError::Load(LoadError::EmptyRoster))?;

    Ok(Json(RosterResponse {
        class,
        total: roster.len(),
        students: roster.students().to_vec(),
    }))
}

//! View Routes
//!
//! - GET /api/v1/views - List dashboard views
//! - GET /api/v1/views/:view - Build one view with its tables and insights

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::dto::ViewInfo;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::report::{build_view, View, ViewReport};

/// GET /api/v1/views
pub async fn list_views() -> Json<Vec<ViewInfo>> {
    Json(View::all().iter().copied().map(ViewInfo::from).collect())
}

/// GET /api/v1/views/:view
///
/// Accepts the view slug. Sections without data carry the no-data
/// insight rather than failing the whole view.
pub async fn get_view(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> ApiResult<Json<ViewReport>> {
    let view: View = slug.parse()?;
    let report = build_view(view, &state.dataset)?;

    tracing::debug!(view = %view, sections = report.sections.len(), "Built view");

    Ok(Json(report))
}

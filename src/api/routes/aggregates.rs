//! Aggregate Routes
//!
//! Raw summary tables for clients that draw their own charts.
//!
//! - GET /api/v1/aggregates - List available aggregates
//! - GET /api/v1/aggregates/:name - Compute one aggregate as JSON or CSV

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::analytics::AggregateKind;
use crate::api::dto::{AggregateInfo, AggregateParams};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::report::{render_aggregate, OutputFormat};

/// GET /api/v1/aggregates
pub async fn list_aggregates() -> Json<Vec<AggregateInfo>> {
    Json(
        AggregateKind::all()
            .iter()
            .copied()
            .map(AggregateInfo::from)
            .collect(),
    )
}

/// GET /api/v1/aggregates/:name
pub async fn get_aggregate(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(params): Query<AggregateParams>,
) -> ApiResult<Response> {
    let kind: AggregateKind = name.parse()?;

    let format: OutputFormat = params.format.parse().map_err(ApiError::Validation)?;
    let content_type = match format {
        OutputFormat::Json => "application/json",
        OutputFormat::Csv => "text/csv",
        OutputFormat::Table => {
            return Err(ApiError::Validation(
                "format must be json or csv".to_string(),
            ))
        }
    };

    let table = kind.compute(&state.dataset)?;
    let body = render_aggregate(&table, format)?;

    tracing::debug!(aggregate = %kind, format = ?format, bytes = body.len(), "Computed aggregate");

    let disposition = match format {
        OutputFormat::Csv => format!("attachment; filename=\"{}.csv\"", kind.name()),
        _ => "inline".to_string(),
    };

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

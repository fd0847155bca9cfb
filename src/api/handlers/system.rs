//! Service health handler.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult, MessageResponse};
use crate::db::Database;

/// Reported when the service and its store are both reachable
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
}

/// Health check
///
/// Answers 200 only if the record store responds to a trivial query
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Service and store are up", body = HealthResponse),
        (status = 503, description = "Store unreachable", body = MessageResponse)
    )
)]
#[instrument(skip(state))]
pub async fn health<D: Database>(
    State(state): State<AppState<D>>,
) -> ApiResult<Json<HealthResponse>> {
    state.db().ping().await.map_err(ApiError::unavailable)?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

//! Attendance roll handlers.
//!
//! Standard CRUD plus `mark_present`, which flips `present` on without
//! requiring the caller to resend the name.

use axum::{Json, extract::State, http::StatusCode};
use tracing::{info, instrument};

use super::records;
use crate::api::AppState;
use crate::api::error::{ApiResult, MessageResponse};
use crate::api::extract::{IdParam, JsonBody};
use crate::db::{Attendance, AttendanceFields, Database, FieldValue};

/// List the attendance roll
#[utoipa::path(
    get,
    path = "/attendance",
    tag = "attendance",
    responses(
        (status = 200, description = "All attendance records", body = Vec<Attendance>),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_attendance<D: Database>(
    State(state): State<AppState<D>>,
) -> ApiResult<Json<Vec<Attendance>>> {
    records::list::<D, Attendance>(&state).await
}

/// Get an attendance record by ID
#[utoipa::path(
    get,
    path = "/attendance/{id}",
    tag = "attendance",
    params(
        ("id" = i64, Path, description = "Attendance record ID")
    ),
    responses(
        (status = 200, description = "Attendance record found", body = Attendance),
        (status = 400, description = "Invalid attendance record ID", body = MessageResponse),
        (status = 404, description = "Attendance record not found", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_attendance<D: Database>(
    State(state): State<AppState<D>>,
    id: IdParam<Attendance>,
) -> ApiResult<Json<Attendance>> {
    records::get::<D, Attendance>(&state, id.id).await
}

/// Add a pupil to the attendance roll
#[utoipa::path(
    post,
    path = "/attendance",
    tag = "attendance",
    request_body = AttendanceFields,
    responses(
        (status = 201, description = "Attendance record created", body = Attendance),
        (status = 400, description = "Invalid request payload", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_attendance<D: Database>(
    State(state): State<AppState<D>>,
    JsonBody(fields): JsonBody<AttendanceFields>,
) -> ApiResult<(StatusCode, Json<Attendance>)> {
    records::create::<D, Attendance>(&state, fields).await
}

/// Update an attendance record
#[utoipa::path(
    put,
    path = "/attendance/{id}",
    tag = "attendance",
    params(
        ("id" = i64, Path, description = "Attendance record ID")
    ),
    request_body = AttendanceFields,
    responses(
        (status = 200, description = "Attendance record updated", body = MessageResponse),
        (status = 400, description = "Invalid ID or payload", body = MessageResponse),
        (status = 404, description = "Attendance record not found", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_attendance<D: Database>(
    State(state): State<AppState<D>>,
    id: IdParam<Attendance>,
    JsonBody(fields): JsonBody<AttendanceFields>,
) -> ApiResult<Json<MessageResponse>> {
    records::update::<D, Attendance>(&state, id.id, fields).await
}

/// Delete an attendance record
#[utoipa::path(
    delete,
    path = "/attendance/{id}",
    tag = "attendance",
    params(
        ("id" = i64, Path, description = "Attendance record ID")
    ),
    responses(
        (status = 200, description = "Attendance record deleted", body = MessageResponse),
        (status = 400, description = "Invalid attendance record ID", body = MessageResponse),
        (status = 404, description = "Attendance record not found", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_attendance<D: Database>(
    State(state): State<AppState<D>>,
    id: IdParam<Attendance>,
) -> ApiResult<Json<MessageResponse>> {
    records::delete::<D, Attendance>(&state, id.id).await
}

/// Mark a pupil present
///
/// Sets `present` to true and returns the updated record
#[utoipa::path(
    put,
    path = "/attendance/{id}/present",
    tag = "attendance",
    params(
        ("id" = i64, Path, description = "Attendance record ID")
    ),
    responses(
        (status = 200, description = "Pupil marked present", body = Attendance),
        (status = 400, description = "Invalid attendance record ID", body = MessageResponse),
        (status = 404, description = "Attendance record not found", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[instrument(skip(state))]
pub async fn mark_present<D: Database>(
    State(state): State<AppState<D>>,
    id: IdParam<Attendance>,
) -> ApiResult<Json<Attendance>> {
    records::set_field::<D, Attendance>(&state, id.id, "present", FieldValue::Bool(true))
        .await?;
    let record = records::fetch::<D, Attendance>(&state, id.id).await?;

    info!(id = record.id, name = %record.name, "Marked present");
    Ok(Json(record))
}

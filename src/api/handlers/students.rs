//! Student handlers.

use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use super::records;
use crate::api::AppState;
use crate::api::error::{ApiResult, MessageResponse};
use crate::api::extract::{IdParam, JsonBody};
use crate::db::{Database, Student, StudentFields};

/// List all students
#[utoipa::path(
    get,
    path = "/students",
    tag = "students",
    responses(
        (status = 200, description = "All students", body = Vec<Student>),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_students<D: Database>(
    State(state): State<AppState<D>>,
) -> ApiResult<Json<Vec<Student>>> {
    records::list::<D, Student>(&state).await
}

/// Get a student by ID
#[utoipa::path(
    get,
    path = "/students/{id}",
    tag = "students",
    params(
        ("id" = i64, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student found", body = Student),
        (status = 400, description = "Invalid student ID", body = MessageResponse),
        (status = 404, description = "Student not found", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_student<D: Database>(
    State(state): State<AppState<D>>,
    id: IdParam<Student>,
) -> ApiResult<Json<Student>> {
    records::get::<D, Student>(&state, id.id).await
}

/// Enrol a new student
#[utoipa::path(
    post,
    path = "/students",
    tag = "students",
    request_body = StudentFields,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 400, description = "Invalid request payload", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_student<D: Database>(
    State(state): State<AppState<D>>,
    JsonBody(fields): JsonBody<StudentFields>,
) -> ApiResult<(StatusCode, Json<Student>)> {
    records::create::<D, Student>(&state, fields).await
}

/// Rename a student
#[utoipa::path(
    put,
    path = "/students/{id}",
    tag = "students",
    params(
        ("id" = i64, Path, description = "Student ID")
    ),
    request_body = StudentFields,
    responses(
        (status = 200, description = "Student updated", body = MessageResponse),
        (status = 400, description = "Invalid ID or payload", body = MessageResponse),
        (status = 404, description = "Student not found", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_student<D: Database>(
    State(state): State<AppState<D>>,
    id: IdParam<Student>,
    JsonBody(fields): JsonBody<StudentFields>,
) -> ApiResult<Json<MessageResponse>> {
    records::update::<D, Student>(&state, id.id, fields).await
}

/// Remove a student
#[utoipa::path(
    delete,
    path = "/students/{id}",
    tag = "students",
    params(
        ("id" = i64, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student deleted", body = MessageResponse),
        (status = 400, description = "Invalid student ID", body = MessageResponse),
        (status = 404, description = "Student not found", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_student<D: Database>(
    State(state): State<AppState<D>>,
    id: IdParam<Student>,
) -> ApiResult<Json<MessageResponse>> {
    records::delete::<D, Student>(&state, id.id).await
}

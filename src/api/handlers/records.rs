//! Generic CRUD handler bodies.
//!
//! Each function runs the Validate → Execute → Respond half of a request for
//! any [`Record`] type; parsing happens in the extractors. The per-entity
//! modules are thin wrappers that pin `R` and carry the OpenAPI annotations.

use axum::Json;
use axum::http::StatusCode;
use tracing::debug;

use crate::api::AppState;
use crate::api::error::{Action, ApiError, ApiResult, MessageResponse};
use crate::db::{Database, DbError, FieldValue, Record, RecordId, RecordRepository};

fn validate<R: Record>(fields: &R::Fields) -> ApiResult<()> {
    R::validate(fields).map_err(|e| {
        debug!(entity = R::ENTITY, error = %e, "Rejected record fields");
        match e {
            DbError::Validation { message } => ApiError::invalid_payload(Some(&message)),
            other => ApiError::invalid_payload(Some(&other.to_string())),
        }
    })
}

pub(crate) async fn list<D: Database, R: Record>(state: &AppState<D>) -> ApiResult<Json<Vec<R>>> {
    let records = state
        .db()
        .records::<R>()
        .list()
        .await
        .map_err(|e| ApiError::store::<R>(Action::List, e))?;

    Ok(Json(records))
}

/// Load one record, answering 404 when it does not exist.
pub(crate) async fn fetch<D: Database, R: Record>(
    state: &AppState<D>,
    id: RecordId,
) -> ApiResult<R> {
    state
        .db()
        .records::<R>()
        .get(id)
        .await
        .map_err(|e| ApiError::from_db::<R>(Action::Get, e))
}

pub(crate) async fn get<D: Database, R: Record>(
    state: &AppState<D>,
    id: RecordId,
) -> ApiResult<Json<R>> {
    fetch::<D, R>(state, id).await.map(Json)
}

pub(crate) async fn create<D: Database, R: Record>(
    state: &AppState<D>,
    fields: R::Fields,
) -> ApiResult<(StatusCode, Json<R>)> {
    validate::<R>(&fields)?;

    let id = state
        .db()
        .records::<R>()
        .insert(&fields)
        .await
        .map_err(|e| ApiError::store::<R>(Action::Create, e))?;

    debug!(entity = R::ENTITY, id, "Created record");
    Ok((StatusCode::CREATED, Json(R::from_parts(id, fields))))
}

/// Overwrite a record's fields; zero rows affected means it does not exist.
pub(crate) async fn overwrite<D: Database, R: Record>(
    state: &AppState<D>,
    id: RecordId,
    fields: &R::Fields,
) -> ApiResult<()> {
    let affected = state
        .db()
        .records::<R>()
        .update(id, fields)
        .await
        .map_err(|e| ApiError::store::<R>(Action::Update, e))?;

    if affected == 0 {
        return Err(ApiError::not_found::<R>());
    }
    Ok(())
}

/// Set a single column without reading the row first.
pub(crate) async fn set_field<D: Database, R: Record>(
    state: &AppState<D>,
    id: RecordId,
    column: &'static str,
    value: FieldValue,
) -> ApiResult<()> {
    let affected = state
        .db()
        .records::<R>()
        .set_field(id, column, value)
        .await
        .map_err(|e| ApiError::store::<R>(Action::Update, e))?;

    if affected == 0 {
        return Err(ApiError::not_found::<R>());
    }
    Ok(())
}

pub(crate) async fn update<D: Database, R: Record>(
    state: &AppState<D>,
    id: RecordId,
    fields: R::Fields,
) -> ApiResult<Json<MessageResponse>> {
    validate::<R>(&fields)?;
    overwrite::<D, R>(state, id, &fields).await?;

    Ok(Json(MessageResponse::new(format!(
        "{} updated successfully",
        R::ENTITY
    ))))
}

pub(crate) async fn delete<D: Database, R: Record>(
    state: &AppState<D>,
    id: RecordId,
) -> ApiResult<Json<MessageResponse>> {
    let affected = state
        .db()
        .records::<R>()
        .delete(id)
        .await
        .map_err(|e| ApiError::store::<R>(Action::Delete, e))?;

    if affected == 0 {
        return Err(ApiError::not_found::<R>());
    }

    Ok(Json(MessageResponse::new(format!(
        "{} deleted successfully",
        R::ENTITY
    ))))
}

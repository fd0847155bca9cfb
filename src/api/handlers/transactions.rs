//! Transaction handlers.

use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use super::records;
use crate::api::AppState;
use crate::api::error::{ApiResult, MessageResponse};
use crate::api::extract::{IdParam, JsonBody};
use crate::db::{Database, Transaction, TransactionFields};

/// List all transactions
///
/// Returns every transaction ordered by id; an empty array when there are none
#[utoipa::path(
    get,
    path = "/transactions",
    tag = "transactions",
    responses(
        (status = 200, description = "All transactions", body = Vec<Transaction>),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_transactions<D: Database>(
    State(state): State<AppState<D>>,
) -> ApiResult<Json<Vec<Transaction>>> {
    records::list::<D, Transaction>(&state).await
}

/// Get a transaction by ID
#[utoipa::path(
    get,
    path = "/transactions/{id}",
    tag = "transactions",
    params(
        ("id" = i64, Path, description = "Transaction ID")
    ),
    responses(
        (status = 200, description = "Transaction found", body = Transaction),
        (status = 400, description = "Invalid transaction ID", body = MessageResponse),
        (status = 404, description = "Transaction not found", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_transaction<D: Database>(
    State(state): State<AppState<D>>,
    id: IdParam<Transaction>,
) -> ApiResult<Json<Transaction>> {
    records::get::<D, Transaction>(&state, id.id).await
}

/// Create a new transaction
///
/// Creates a transaction and returns it with its assigned ID
#[utoipa::path(
    post,
    path = "/transactions",
    tag = "transactions",
    request_body = TransactionFields,
    responses(
        (status = 201, description = "Transaction created", body = Transaction),
        (status = 400, description = "Invalid request payload", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[instrument(skip(state))]
pub async fn create_transaction<D: Database>(
    State(state): State<AppState<D>>,
    JsonBody(fields): JsonBody<TransactionFields>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    records::create::<D, Transaction>(&state, fields).await
}

/// Update a transaction
///
/// Overwrites the description and amount of an existing transaction
#[utoipa::path(
    put,
    path = "/transactions/{id}",
    tag = "transactions",
    params(
        ("id" = i64, Path, description = "Transaction ID")
    ),
    request_body = TransactionFields,
    responses(
        (status = 200, description = "Transaction updated", body = MessageResponse),
        (status = 400, description = "Invalid ID or payload", body = MessageResponse),
        (status = 404, description = "Transaction not found", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[instrument(skip(state))]
pub async fn update_transaction<D: Database>(
    State(state): State<AppState<D>>,
    id: IdParam<Transaction>,
    JsonBody(fields): JsonBody<TransactionFields>,
) -> ApiResult<Json<MessageResponse>> {
    records::update::<D, Transaction>(&state, id.id, fields).await
}

/// Delete a transaction
#[utoipa::path(
    delete,
    path = "/transactions/{id}",
    tag = "transactions",
    params(
        ("id" = i64, Path, description = "Transaction ID")
    ),
    responses(
        (status = 200, description = "Transaction deleted", body = MessageResponse),
        (status = 400, description = "Invalid transaction ID", body = MessageResponse),
        (status = 404, description = "Transaction not found", body = MessageResponse),
        (status = 500, description = "Internal server error", body = MessageResponse)
    )
)]
#[instrument(skip(state))]
pub async fn delete_transaction<D: Database>(
    State(state): State<AppState<D>>,
    id: IdParam<Transaction>,
) -> ApiResult<Json<MessageResponse>> {
    records::delete::<D, Transaction>(&state, id.id).await
}

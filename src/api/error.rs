//! Per-request API errors.
//!
//! Every handler returns [`ApiError`] on failure; it renders as a status code
//! plus a `{"message": ...}` body. Store failures are logged with their cause
//! and answered with a generic message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::db::{DbError, Record};

/// Message body used for confirmations and errors alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Transaction not found")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The store operation a handler was performing when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Action {
    fn describe<R: Record>(self) -> String {
        let entity = R::ENTITY.to_lowercase();
        match self {
            Action::List => format!("get {}", R::COLLECTION),
            Action::Get => format!("get {}", entity),
            Action::Create => format!("create {}", entity),
            Action::Update => format!("update {}", entity),
            Action::Delete => format!("delete {}", entity),
        }
    }
}

/// Request-scoped failure with an HTTP mapping.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed path parameter or body (400).
    #[error("{message}")]
    InvalidInput { message: String },

    /// No row matches the identifier (404).
    #[error("{message}")]
    NotFound { message: String },

    /// The store cannot be reached at all (503, logged).
    #[error("{message}")]
    Unavailable {
        message: String,
        #[source]
        source: DbError,
    },

    /// Any other storage failure (500, logged).
    #[error("{message}")]
    Store {
        message: String,
        #[source]
        source: DbError,
    },
}

impl ApiError {
    pub fn invalid_id<R: Record>() -> Self {
        Self::InvalidInput {
            message: format!("Invalid {} ID", R::ENTITY.to_lowercase()),
        }
    }

    /// A body that could not be read, optionally with the validation reason.
    pub fn invalid_payload(reason: Option<&str>) -> Self {
        let message = match reason {
            Some(reason) => format!("Invalid request payload: {}", reason),
            None => "Invalid request payload".to_string(),
        };
        Self::InvalidInput { message }
    }

    pub fn not_found<R: Record>() -> Self {
        Self::NotFound {
            message: format!("{} not found", R::ENTITY),
        }
    }

    pub fn store<R: Record>(action: Action, source: DbError) -> Self {
        Self::Store {
            message: format!("Failed to {}", action.describe::<R>()),
            source,
        }
    }

    pub fn unavailable(source: DbError) -> Self {
        Self::Unavailable {
            message: "Database unavailable".to_string(),
            source,
        }
    }

    /// Map a repository error, treating `NotFound` as 404.
    pub fn from_db<R: Record>(action: Action, err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => Self::not_found::<R>(),
            other => Self::store::<R>(action, other),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::InvalidInput { message } | Self::NotFound { message } => message,
            Self::Unavailable { message, source } | Self::Store { message, source } => {
                tracing::error!(error = %source, "{}", message);
                message
            }
        };

        (status, Json(MessageResponse { message })).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

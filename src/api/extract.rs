//! Custom Axum extractors.
//!
//! Both reject with [`ApiError::InvalidInput`] so that malformed input never
//! reaches the store and always answers with a JSON message.

use std::fmt;
use std::marker::PhantomData;

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::ApiError;
use crate::db::{Record, RecordId};

/// Extract and validate an integer record ID from the `{id}` path segment.
pub struct IdParam<R> {
    pub id: RecordId,
    _record: PhantomData<fn() -> R>,
}

impl<R> fmt::Debug for IdParam<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IdParam").field(&self.id).finish()
    }
}

impl<S, R> FromRequestParts<S> for IdParam<R>
where
    S: Send + Sync,
    R: Record,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::invalid_id::<R>())?;

        let id = raw.parse::<RecordId>().map_err(|_| {
            debug!(raw = %raw, entity = R::ENTITY, "Rejected non-integer id");
            ApiError::invalid_id::<R>()
        })?;

        Ok(Self {
            id,
            _record: PhantomData,
        })
    }
}

/// JSON request body whose rejection is a 400 with a JSON message.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                debug!(%rejection, "Rejected request body");
                ApiError::invalid_payload(None)
            })?;

        Ok(Self(value))
    }
}

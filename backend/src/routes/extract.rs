//! Request extractors
//!
//! `JsonBody` behaves like `axum::Json` but reports unreadable bodies
//! (bad syntax, missing fields, wrong content type) as `400` validation
//! errors in the API's error format instead of axum's plain-text `422`.

use crate::error::ApiError;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;

/// JSON body extractor with API-shaped rejections
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                debug!(error = %rejection.body_text(), "JSON body rejected");
                Err(ApiError::Validation(rejection.body_text()))
            }
        }
    }
}

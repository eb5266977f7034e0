//! Request extractors

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use mpc_common::validation::Validate;

use crate::{ApiError, ApiResult};

/// JSON body whose rejections render as 400 `{"message": ...}`
///
/// axum's own `Json` answers malformed bodies with 415/422 and plain text.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}

/// Pass `payload` through, or fail with its field errors
pub fn validated<T: Validate>(payload: T) -> ApiResult<T> {
    let errors = payload.validate();
    if errors.is_empty() {
        Ok(payload)
    } else {
        Err(ApiError::Validation(errors))
    }
}

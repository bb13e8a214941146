// mapping of core errors onto HTTP responses

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use race_core::{AuthError, CoreError, EventClientError, StoreError};
use serde_json::json;
use tracing::error;

/// Handler-level error: any core error, rendered as a problem body with
/// the status the error kind maps to.
pub struct ApiError(pub CoreError);

impl<E: Into<CoreError>> From<E> for ApiError {
    fn from(error: E) -> Self {
        ApiError(error.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            CoreError::Auth(AuthError::Unauthorized) => StatusCode::UNAUTHORIZED,
            CoreError::Auth(AuthError::Forbidden) => StatusCode::FORBIDDEN,
            CoreError::Auth(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CoreError::Events(
                EventClientError::EventNotFound(_) | EventClientError::FormatNotFound(_),
            ) => StatusCode::NOT_FOUND,
            CoreError::Events(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CoreError::NotFound(_) | CoreError::Store(StoreError::NotFound) => {
                StatusCode::NOT_FOUND
            }
            CoreError::AlreadyExists(_) | CoreError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CoreError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CoreError::Store(_) | CoreError::Inconsistent(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %self.0, "request_failed");
        }
        (status, Json(json!({ "detail": self.0.to_string() }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

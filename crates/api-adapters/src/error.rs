//! Boundary error wrapper.
//!
//! Maps the core's tagged error kinds onto HTTP statuses:
//! Validation 400, Forbidden 403, NotFound 404, Conflict 409, Store 502.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use domains::AppError;

/// Newtype carrying an [`AppError`] across the axum boundary.
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Store(err) => {
                // Backend detail goes to the log, not to the caller.
                error!(error = %err, "store failure surfaced at the boundary");
                (
                    StatusCode::BAD_GATEWAY,
                    "the content store is unavailable".to_string(),
                )
            }
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}

//! Unified API error type with Axum `IntoResponse` support.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use bistro_agent::AssistantError;

/// API error type that converts to proper HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    /// An external capability (generator, speech) is down.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl From<AssistantError> for ApiError {
    fn from(err: AssistantError) -> Self {
        tracing::error!(error = %err, "assistant call failed");
        match err {
            AssistantError::GenerationUnavailable(_) => {
                ApiError::ServiceUnavailable("generation unavailable".into())
            }
            AssistantError::Speech(_) => ApiError::ServiceUnavailable("speech unavailable".into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
        };

        let body = json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Convenience alias.
pub type ApiResult<T> = Result<T, ApiError>;

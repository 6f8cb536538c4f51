use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

/// Everything a handler can fail with, mapped to an HTTP status and a
/// short `{"detail": ...}` body.
///
/// Unknown-user and wrong-password both collapse into `InvalidCredentials`
/// so a login response never reveals whether a username exists.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("username already exists")]
    UsernameTaken,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("not authorized")]
    Unauthorized,
    #[error("not allowed")]
    Forbidden,
    #[error("content not found")]
    NotFound,
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::UsernameTaken => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials | ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(source) => {
                // Log the cause server-side; the client gets a generic message.
                error!("internal error: {:#}", source);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = Json(serde_json::json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}

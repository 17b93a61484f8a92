//! Request-level error type shared by both services
//!
//! Handlers return `Result<_, AppError>` and use `?` on store calls;
//! the `IntoResponse` impl maps each variant to the status code and
//! plain-text body the HTTP contract documents.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug)]
pub enum AppError {
    /// Creation request missing the required URL field
    BadRequest,
    /// Requested short key has no mapping
    NotFound,
    /// Every generated candidate key collided within the retry budget
    KeySpaceExhausted,
    /// Underlying key-value store operation failed
    Store(redb::Error),
}

impl From<redb::Error> for AppError {
    fn from(err: redb::Error) -> Self {
        Self::Store(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest => (StatusCode::BAD_REQUEST, "Bad Request"),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not Found"),
            AppError::KeySpaceExhausted => {
                (StatusCode::SERVICE_UNAVAILABLE, "Key space exhausted")
            }
            AppError::Store(err) => {
                tracing::error!(error = %err, "store operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        };

        (status, body).into_response()
    }
}

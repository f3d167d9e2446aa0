use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use extgate_engine::UpdateError;

/// Errors returned to clients. Every variant is a client input error and is
/// rendered as a single line of plain text with status 400.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request too large")]
    BodyTooLarge,

    #[error("Error reading body {0}")]
    ReadBody(UpdateError),
}

impl From<UpdateError> for ApiError {
    fn from(error: UpdateError) -> Self {
        match error {
            UpdateError::BodyTooLarge => ApiError::BodyTooLarge,
            other => ApiError::ReadBody(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::debug!("Rejecting request: {}", self);
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

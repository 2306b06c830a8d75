//! Mapping from `RoverError` to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::warn;

use rover_contracts::error::RoverError;

/// A `RoverError` on its way out of a handler.
#[derive(Debug)]
pub struct ApiError(pub RoverError);

impl From<RoverError> for ApiError {
    fn from(err: RoverError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            RoverError::StyleUnavailable { reason } => {
                warn!(reason = %reason, "style document not found");
                (StatusCode::NOT_FOUND, Json(json!({ "detail": "style.json not found" }))).into_response()
            }
            other => {
                warn!(error = %other, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()).into_response()
            }
        }
    }
}

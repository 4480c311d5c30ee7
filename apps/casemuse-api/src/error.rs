//! Error types for the Case Muse API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generator::GeneratorError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Generation(#[from] GeneratorError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServerError::Generation(e) => {
                // Details go to the log; the client gets a generic failure
                // it can show inline and dismiss.
                tracing::error!("Generation failed: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Failed to generate test cases. Please try again.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

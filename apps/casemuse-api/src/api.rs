//! API handlers for the Case Muse server
//!
//! Provides REST endpoints for:
//! - Test case generation from a target URL
//! - Health checking

use axum::{extract::State, Json};
use serde::Serialize;
use tracing::info;

use casemuse_core::{validate_target_url, GenerateTestCasesRequest, GenerateTestCasesResponse};

use crate::error::ServerError;
use crate::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "casemuse-api",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Handler: POST /api/generate-test-cases
///
/// Validates the target URL before anything else; a malformed URL never
/// reaches the generator. An empty draft list is a successful response.
pub async fn handle_generate_test_cases(
    State(state): State<AppState>,
    Json(req): Json<GenerateTestCasesRequest>,
) -> Result<Json<GenerateTestCasesResponse>, ServerError> {
    let url = validate_target_url(&req.url)
        .map_err(|e| ServerError::InvalidRequest(e.to_string()))?;

    info!("Generate request: url={}", url);

    let drafts = state.generator.generate(&url).await?;

    info!("Generated {} draft test case(s)", drafts.len());

    Ok(Json(GenerateTestCasesResponse { test_cases: drafts }))
}

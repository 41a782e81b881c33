// HTTP route handlers for the Drill API

use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{IntoResponse, Json},
};
use drill_common::types::SubmissionRequest;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::AppState;

/// POST /api/run - Execute code through the judge and relay its response
pub async fn run_code(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SubmissionRequest>,
) -> impl IntoResponse {
    // Only used to correlate log lines; the judge never sees it
    let submission_id = Uuid::new_v4();

    info!(
        submission_id = %submission_id,
        language_id = payload.language_id,
        source_size = payload.source_code.len(),
        stdin_size = payload.stdin.len(),
        "Forwarding submission to judge"
    );

    match state.judge.submit(&payload).await {
        Ok(body) => {
            info!(submission_id = %submission_id, "Judge response relayed");
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            error!(submission_id = %submission_id, error = %e, "Execution failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "error": "Execution failed",
                    "details": e.to_string(),
                })),
            )
                .into_response()
        }
    }
}

/// Any method other than POST on /api/run
pub async fn method_not_allowed(method: Method) -> impl IntoResponse {
    warn!(method = %method, "Rejected request with unsupported method");
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(serde_json::json!({
            "error": "Method not allowed"
        })),
    )
}

/// GET /status - Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

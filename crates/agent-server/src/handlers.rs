//! HTTP Handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use travel_planner::DEFAULT_MAX_ITERATIONS;

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub ollama_connected: bool,
    pub tools: usize,
}

#[derive(Debug, Deserialize)]
pub struct PlanRequest {
    /// Free-form trip request, e.g. "Plan a 3-day trip to Paris from Delhi"
    pub message: String,

    /// Agent-step ceiling for this request
    #[serde(default)]
    pub max_iterations: Option<usize>,

    /// Export the plan to this Markdown file after planning
    #[serde(default)]
    pub export_path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub plan: String,
    pub request_id: String,
    pub exported_to: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let ollama_connected = state.provider.health_check().await.unwrap_or(false);

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        ollama_connected,
        tools: state.agent.agent().tools().len(),
    })
}

/// Plan a trip from a free-form request
pub async fn plan_handler(
    State(state): State<AppState>,
    Json(payload): Json<PlanRequest>,
) -> Result<Json<PlanResponse>, (StatusCode, Json<ErrorResponse>)> {
    let max_iterations = payload.max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS);
    let request_id = uuid::Uuid::new_v4().to_string();

    tracing::info!(%request_id, max_iterations, "planning request received");

    let plan = state
        .agent
        .plan_trip(&payload.message, max_iterations)
        .await
        .map_err(|e| {
            tracing::error!(%request_id, "planning failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                    code: "PLANNING_ERROR".into(),
                }),
            )
        })?;

    let exported_to = match payload.export_path {
        Some(path) => {
            let written = state.exporter.export(&plan, &path).map_err(|e| {
                tracing::error!(%request_id, "export failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse {
                        error: e.to_string(),
                        code: "EXPORT_ERROR".into(),
                    }),
                )
            })?;
            Some(written.display().to_string())
        }
        None => None,
    };

    Ok(Json(PlanResponse {
        plan,
        request_id,
        exported_to,
    }))
}

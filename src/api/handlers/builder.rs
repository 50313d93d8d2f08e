use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::response::{ApiError, AppJson};
use crate::catalog;
use crate::script;
use crate::AppState;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Deserialize, Serialize)]
pub struct ScriptRequest {
    pub os: String,
    pub programs: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScriptResponse {
    pub script: String,
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn list_programs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    catalog::list_names(&state.db)
        .map(Json)
        .map_err(|e| ApiError::internal(e.to_string()))
}

pub async fn generate_script(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<ScriptRequest>,
) -> Result<Json<ScriptResponse>, ApiError> {
    validate_script_request(&req)?;

    let generated = script::generate(&state.db, &state.renderer, &req.programs, &req.os)
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to generate install script");
            ApiError::internal("Failed to generate install script")
        })?;

    tracing::debug!(
        os = %req.os,
        programs = generated.programs.len(),
        skipped = generated.skipped.len(),
        "Generated install script"
    );

    Ok(Json(ScriptResponse {
        script: generated.script,
    }))
}

// ============================================================================
// Helpers
// ============================================================================

/// The OS ends up inside the script text, so it must stay on one line.
fn validate_script_request(req: &ScriptRequest) -> Result<(), ApiError> {
    if req.os.chars().any(char::is_control) {
        return Err(ApiError::bad_request("os must not contain control characters"));
    }
    Ok(())
}

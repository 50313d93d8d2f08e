use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub programs: usize,
    pub status: String,
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn root() -> Json<&'static str> {
    Json("Hello World")
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (status, programs) = match state.db.list_program_names() {
        Ok(names) => ("healthy", names.len()),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not read the catalog");
            ("degraded", 0)
        }
    };

    Json(HealthResponse {
        programs,
        status: status.to_string(),
    })
}

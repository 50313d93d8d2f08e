use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{auth_error, blocking};
use crate::api::extract::{access_token_cookie, removal_cookie, CurrentUser};
use crate::api::response::{ApiError, AppForm, AppJson, MessageResponse};
use crate::auth;
use crate::AppState;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Deserialize, Serialize)]
pub struct RegisterRequest {
    pub password: String,
    pub username: String,
}

/// Form-encoded password-flow login
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub password: String,
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AuthStatusResponse {
    pub authenticated: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MeResponse {
    pub role: String,
    pub username: String,
}

// ============================================================================
// Handlers
// ============================================================================

pub async fn register(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<RegisterRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let db = state.db.clone();
    blocking(move || auth::register(&db, &req.username, &req.password))
        .await?
        .map_err(auth_error)?;

    Ok(MessageResponse::json("User successfully created"))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    AppForm(form): AppForm<LoginForm>,
) -> Result<(CookieJar, Json<MessageResponse>), ApiError> {
    let db = state.db.clone();
    let user = blocking(move || auth::authenticate(&db, &form.username, &form.password))
        .await?
        .map_err(auth_error)?;

    let issued = state.signer.issue(&user.username).map_err(auth_error)?;
    let max_age = state.signer.ttl().num_seconds();

    tracing::debug!(username = %user.username, expires_at = %issued.expires_at, "Issued access token");

    Ok((
        jar.add(access_token_cookie(issued.token, max_age)),
        MessageResponse::json("Login successful"),
    ))
}

/// Clears the cookie only. The token itself stays valid until it expires.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    (
        jar.add(removal_cookie()),
        MessageResponse::json("Logged out successfully"),
    )
}

pub async fn auth_status(user: Option<CurrentUser>) -> impl IntoResponse {
    let authenticated = user.is_some();
    let status = if authenticated {
        StatusCode::OK
    } else {
        StatusCode::UNAUTHORIZED
    };
    (status, Json(AuthStatusResponse { authenticated }))
}

pub async fn me(CurrentUser(user): CurrentUser) -> Json<MeResponse> {
    Json(MeResponse {
        role: user.role,
        username: user.username,
    })
}

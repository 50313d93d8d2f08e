use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Auth routes -- registration, cookie login/logout, identity
    let auth_routes = Router::new()
        .route("/api/v1/auth/register", post(handlers::register))
        .route("/api/v1/auth/login", post(handlers::login))
        .route("/api/v1/auth/logout", post(handlers::logout))
        .route("/api/v1/auth/status", get(handlers::auth_status))
        .route("/api/v1/auth/me", get(handlers::me));

    // Builder routes -- catalog listing and script generation
    let builder_routes = Router::new()
        .route("/api/v1/builder/programs", get(handlers::list_programs))
        .route(
            "/api/v1/builder/generate-script",
            post(handlers::generate_script),
        );

    let misc_routes = Router::new()
        .route("/api/v1/", get(handlers::root))
        .route("/api/v1/health", get(handlers::health));

    let cors = cors_layer(&state.config.server.allowed_origins);

    Router::new()
        .merge(auth_routes)
        .merge(builder_routes)
        .merge(misc_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Credentialed CORS for the configured frontend origins
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(_) if o == "*" => {
                tracing::warn!("Ignoring wildcard CORS origin with credentials enabled");
                None
            }
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(60 * 60))
}

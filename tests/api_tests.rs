//! HTTP-level tests driving the router directly

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use dotconfig::catalog::{self, parse_manifest};
use dotconfig::config::{AuthConfig, CatalogConfig, Config, ServerConfig};
use dotconfig::script::ScriptRenderer;
use dotconfig::storage::Database;
use dotconfig::{api, AppState};
use jsonwebtoken::Algorithm;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

const MANIFEST: &str = r#"[
    {"name": "git", "install_command": {"mac": "brew install git", "linux": "apt install git"}},
    {"name": "curl", "install_command": {"linux": "apt install curl"}}
]"#;

fn setup_app() -> (Router, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db = Database::open(temp_dir.path()).unwrap();
    catalog::seed(&db, &parse_manifest(MANIFEST).unwrap()).unwrap();

    let config = Config {
        auth: AuthConfig {
            algorithm: Algorithm::HS256,
            secret_key: "api-test-secret-key-long-enough-xx".to_string(),
            token_ttl_minutes: 30,
        },
        catalog: CatalogConfig::default(),
        server: ServerConfig::default(),
    };
    let renderer = ScriptRenderer::builtin().unwrap();
    let state = Arc::new(AppState::new(config, db, renderer));
    (api::create_router(state), temp_dir)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn login_request(username: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/auth/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!("username={username}&password={password}")))
        .unwrap()
}

fn status_request(cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri("/api/v1/auth/status");
    if let Some(c) = cookie {
        builder = builder.header(header::COOKIE, c);
    }
    builder.body(Body::empty()).unwrap()
}

async fn register(app: &Router, username: &str, password: &str) -> StatusCode {
    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/register",
            json!({"username": username, "password": password}),
        ))
        .await
        .unwrap()
        .status()
}

/// Returns the `name=value` pair from the login response's Set-Cookie header
async fn login_cookie(app: &Router, username: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(login_request(username, password))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    set_cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn test_register_login_status_logout() {
    let (app, _temp) = setup_app();

    assert_eq!(register(&app, "alice", "pw").await, StatusCode::OK);

    let response = app
        .clone()
        .oneshot(login_request("alice", "pw"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("access_token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("Secure"));
    assert!(set_cookie.contains("SameSite=None"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Max-Age=1800"));
    assert_eq!(body_json(response).await["message"], "Login successful");

    let cookie = set_cookie.split(';').next().unwrap().to_string();
    let response = app
        .clone()
        .oneshot(status_request(Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["authenticated"], true);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/auth/logout")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cleared = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(cleared.starts_with("access_token=;"));
    assert!(cleared.contains("Max-Age=0"));
    assert!(cleared.contains("Path=/"));
}

#[tokio::test]
async fn test_register_duplicate_is_conflict() {
    let (app, _temp) = setup_app();

    assert_eq!(register(&app, "alice", "pw").await, StatusCode::OK);
    assert_eq!(register(&app, "alice", "pw2").await, StatusCode::CONFLICT);

    // The first registration still works
    login_cookie(&app, "alice", "pw").await;
}

#[tokio::test]
async fn test_register_rejects_bad_input() {
    let (app, _temp) = setup_app();

    assert_eq!(register(&app, "", "pw").await, StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/auth/register",
            json!({"username": "bob"}),
        ))
        .await
        .unwrap();
    assert!(response.status().is_client_error());
    assert_eq!(body_json(response).await["status"], "fail");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let (app, _temp) = setup_app();
    register(&app, "real_user", "right").await;

    let ghost = app
        .clone()
        .oneshot(login_request("ghost", "anything"))
        .await
        .unwrap();
    let wrong = app
        .clone()
        .oneshot(login_request("real_user", "wrong"))
        .await
        .unwrap();

    assert_eq!(ghost.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert!(ghost.headers().get(header::SET_COOKIE).is_none());
    assert_eq!(body_json(ghost).await, body_json(wrong).await);
}

#[tokio::test]
async fn test_status_without_valid_cookie() {
    let (app, _temp) = setup_app();

    for cookie in [None, Some("access_token=not-a-jwt"), Some("other=1")] {
        let response = app.clone().oneshot(status_request(cookie)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["authenticated"], false);
    }
}

#[tokio::test]
async fn test_me_requires_auth() {
    let (app, _temp) = setup_app();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api/v1/auth/me").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    register(&app, "alice", "pw").await;
    let cookie = login_cookie(&app, "alice", "pw").await;
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/auth/me")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["role"], "user");
}

#[tokio::test]
async fn test_list_programs() {
    let (app, _temp) = setup_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/builder/programs")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!(["curl", "git"]));
}

#[tokio::test]
async fn test_generate_script() {
    let (app, _temp) = setup_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/builder/generate-script",
            json!({"programs": ["git", "curl", "ghost"], "os": "mac"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let script = body_json(response).await["script"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(script.contains("\nbrew install git\n"));
    assert!(!script.contains("curl"));
    assert!(!script.contains("ghost"));

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/builder/generate-script",
            json!({"programs": ["git"], "os": ""}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let script = body_json(response).await["script"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(script.contains("Nothing to install"));
    assert!(!script.contains("install git"));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/builder/generate-script",
            json!({"programs": ["git"], "os": "mac\necho pwned"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_root_and_health() {
    let (app, _temp) = setup_app();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/api/v1/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_json(response).await, json!("Hello World"));

    let response = app
        .oneshot(Request::builder().uri("/api/v1/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["programs"], 2);
}

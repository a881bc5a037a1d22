#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use socialconnect_api::auth::jwt::JwtConfig;
use socialconnect_api::config::ServerConfig;
use socialconnect_api::router::build_app_router;
use socialconnect_api::state::AppState;
use socialconnect_db::MemoryStore;

pub const TEST_PASSWORD: &str = "secret123";

/// Build a test `ServerConfig` with safe defaults and fixed token secrets.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        cors_methods: vec![Method::GET, Method::POST, Method::PATCH, Method::DELETE],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            access_secret: "test-access-secret".to_string(),
            refresh_secret: "test-refresh-secret".to_string(),
            access_token_expiry_secs: 3600,
            refresh_token_expiry_secs: 14 * 24 * 3600,
        },
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack. The store handle is returned so tests can
/// seed or inspect it directly.
pub fn build_test_app() -> (Router, Arc<MemoryStore>) {
    let config = test_config();
    let store = Arc::new(MemoryStore::new());
    let state = AppState::new(store.clone(), config.clone());
    (build_app_router(state, &config), store)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("Content-Type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

/// POST with no body (follow, like, mark-read).
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    send(app, Method::PATCH, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Account helpers
// ---------------------------------------------------------------------------

/// Register `username` (email `<username>@test.com`) and return the user JSON.
pub async fn register(app: &Router, username: &str) -> serde_json::Value {
    let body = serde_json::json!({
        "email": format!("{username}@test.com"),
        "username": username,
        "password": TEST_PASSWORD,
    });
    let response = post_json(app.clone(), "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["user"].clone()
}

/// Log in and return the full login response JSON.
pub async fn login(app: &Router, identifier: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({ "identifier": identifier, "password": password });
    let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

/// Register and log in; returns `(user_id, access_token)`.
pub async fn signup(app: &Router, username: &str) -> (i64, String) {
    let user = register(app, username).await;
    let json = login(app, username, TEST_PASSWORD).await;
    let token = json["accessToken"].as_str().unwrap().to_string();
    (user["id"].as_i64().unwrap(), token)
}

/// Create a post as the token's owner and return its id.
pub async fn create_post(app: &Router, token: &str, content: &str) -> i64 {
    let response = post_json_auth(
        app.clone(),
        "/api/v1/posts",
        token,
        serde_json::json!({ "content": content }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

//! HTTP-level integration tests for the `/auth` endpoints and the access
//! token extractor.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, get, get_auth, login, post_json, post_json_auth, register, signup, TEST_PASSWORD,
};
use serde_json::json;

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Registration returns 201 with the sanitized profile and default role.
#[tokio::test]
async fn test_register_success() {
    let (app, _store) = common::build_test_app();

    let user = register(&app, "alice").await;

    assert!(user["id"].is_i64());
    assert_eq!(user["email"], "alice@test.com");
    assert_eq!(user["username"], "alice");
    assert_eq!(user["role"], "User");
    assert!(user.get("password_hash").is_none(), "hash must never be serialized");
}

/// A second account with the same email is rejected with 409.
#[tokio::test]
async fn test_register_duplicate_email() {
    let (app, _store) = common::build_test_app();
    register(&app, "alice").await;

    let body = json!({
        "email": "alice@test.com",
        "username": "alice2",
        "password": TEST_PASSWORD,
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "Email already in use");
}

/// A second account with the same username is rejected with 409.
#[tokio::test]
async fn test_register_duplicate_username() {
    let (app, _store) = common::build_test_app();
    register(&app, "alice").await;

    let body = json!({
        "email": "other@test.com",
        "username": "alice",
        "password": TEST_PASSWORD,
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"], "Username already exists");
}

/// Malformed email, short username and short password all fail validation.
#[tokio::test]
async fn test_register_validation_errors() {
    let (app, _store) = common::build_test_app();

    for body in [
        json!({ "email": "not-an-email", "username": "alice", "password": TEST_PASSWORD }),
        json!({ "email": "a@test.com", "username": "al", "password": TEST_PASSWORD }),
        json!({ "email": "a@test.com", "username": "bad name", "password": TEST_PASSWORD }),
        json!({ "email": "a@test.com", "username": "alice", "password": "12345" }),
    ] {
        let response = post_json(app.clone(), "/api/v1/auth/register", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}

/// A body missing required fields is answered with the JSON error shape.
#[tokio::test]
async fn test_register_missing_fields_returns_bad_request() {
    let (app, _store) = common::build_test_app();

    let response = post_json(app, "/api/v1/auth/register", json!({ "email": "a@test.com" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Login works with either email or username and returns both tokens.
#[tokio::test]
async fn test_login_by_email_or_username() {
    let (app, _store) = common::build_test_app();
    let user = register(&app, "alice").await;

    for identifier in ["alice", "alice@test.com"] {
        let json = login(&app, identifier, TEST_PASSWORD).await;
        assert!(json["accessToken"].is_string());
        assert!(json["refreshToken"].is_string());
        assert_eq!(json["user"]["id"], user["id"]);
    }
}

/// Wrong password and unknown identifier are indistinguishable.
#[tokio::test]
async fn test_login_invalid_credentials() {
    let (app, _store) = common::build_test_app();
    register(&app, "alice").await;

    for (identifier, password) in [("alice", "wrong-password"), ("ghost", TEST_PASSWORD)] {
        let body = json!({ "identifier": identifier, "password": password });
        let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["code"], "INVALID_CREDENTIALS");
        assert_eq!(json["error"], "Invalid credentials");
    }
}

// ---------------------------------------------------------------------------
// Refresh and logout
// ---------------------------------------------------------------------------

/// A live refresh token yields a working access token.
#[tokio::test]
async fn test_token_refresh() {
    let (app, _store) = common::build_test_app();
    register(&app, "alice").await;
    let session = login(&app, "alice", TEST_PASSWORD).await;

    let response = post_json(
        app.clone(),
        "/api/v1/auth/token/refresh",
        json!({ "refreshToken": session["refreshToken"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let access = json["accessToken"].as_str().unwrap();
    let me = get_auth(app, "/api/v1/users/me", access).await;
    assert_eq!(me.status(), StatusCode::OK);
}

/// Missing token is 400, garbage or an access token is 401.
#[tokio::test]
async fn test_token_refresh_rejections() {
    let (app, _store) = common::build_test_app();
    register(&app, "alice").await;
    let session = login(&app, "alice", TEST_PASSWORD).await;

    let response = post_json(app.clone(), "/api/v1/auth/token/refresh", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "MISSING_TOKEN");

    for token in [json!("not-a-jwt"), session["accessToken"].clone()] {
        let response = post_json(
            app.clone(),
            "/api/v1/auth/token/refresh",
            json!({ "refreshToken": token }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["code"], "INVALID_TOKEN");
    }
}

/// After logout the refresh token no longer works, and logout stays `ok`.
#[tokio::test]
async fn test_logout_revokes_refresh_token() {
    let (app, _store) = common::build_test_app();
    register(&app, "alice").await;
    let session = login(&app, "alice", TEST_PASSWORD).await;
    let body = json!({ "refreshToken": session["refreshToken"] });

    for _ in 0..2 {
        let response = post_json(app.clone(), "/api/v1/auth/logout", body.clone()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["ok"], true);
    }

    let response = post_json(app, "/api/v1/auth/token/refresh", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// Logout without any usable token still succeeds.
#[tokio::test]
async fn test_logout_without_token_succeeds() {
    let (app, _store) = common::build_test_app();

    for body in [json!({}), json!({ "refreshToken": "garbage" }), json!("nonsense")] {
        let response = post_json(app.clone(), "/api/v1/auth/logout", body).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["ok"], true);
    }
}

/// Logout keeps answering `ok` even when the store is down.
#[tokio::test]
async fn test_logout_survives_store_failure() {
    let (app, store) = common::build_test_app();
    register(&app, "alice").await;
    let session = login(&app, "alice", TEST_PASSWORD).await;

    store.set_unavailable(true);
    let response = post_json(
        app,
        "/api/v1/auth/logout",
        json!({ "refreshToken": session["refreshToken"] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["ok"], true);
}

// ---------------------------------------------------------------------------
// Change password
// ---------------------------------------------------------------------------

/// The new password works and the old one stops working.
#[tokio::test]
async fn test_change_password() {
    let (app, _store) = common::build_test_app();
    let (_id, token) = signup(&app, "alice").await;

    let response = post_json_auth(
        app.clone(),
        "/api/v1/auth/change-password",
        &token,
        json!({ "oldPassword": TEST_PASSWORD, "newPassword": "another-secret" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let old = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "identifier": "alice", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(old.status(), StatusCode::UNAUTHORIZED);
    login(&app, "alice", "another-secret").await;
}

/// A wrong old password is a validation error.
#[tokio::test]
async fn test_change_password_wrong_old_password() {
    let (app, _store) = common::build_test_app();
    let (_id, token) = signup(&app, "alice").await;

    let response = post_json_auth(
        app,
        "/api/v1/auth/change-password",
        &token,
        json!({ "oldPassword": "not-it", "newPassword": "another-secret" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Old password incorrect");
}

// ---------------------------------------------------------------------------
// Access token extractor
// ---------------------------------------------------------------------------

/// Protected routes reject missing, malformed and refresh-class tokens.
#[tokio::test]
async fn test_protected_route_requires_access_token() {
    let (app, _store) = common::build_test_app();
    register(&app, "alice").await;
    let session = login(&app, "alice", TEST_PASSWORD).await;

    let response = get(app.clone(), "/api/v1/users/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Missing Authorization header");

    let refresh = session["refreshToken"].as_str().unwrap();
    for token in ["garbage", refresh] {
        let response = get_auth(app.clone(), "/api/v1/users/me", token).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
    }
}

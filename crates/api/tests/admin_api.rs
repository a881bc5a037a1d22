//! HTTP-level integration tests for the admin-only endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_post, delete_auth, get, get_auth, login, signup, TEST_PASSWORD};

/// Sign up `root`, promote it to admin in the store and return a fresh access token
/// carrying the new role.
async fn admin_token(app: &axum::Router, store: &socialconnect_db::MemoryStore) -> String {
    let (id, _token) = signup(app, "root").await;
    assert!(store.set_user_role(id, "Admin").await);
    let json = login(app, "root", TEST_PASSWORD).await;
    assert_eq!(json["user"]["role"], "Admin");
    json["accessToken"].as_str().unwrap().to_string()
}

/// Regular users are forbidden; anonymous callers are unauthorized.
#[tokio::test]
async fn test_admin_routes_require_admin_role() {
    let (app, _store) = common::build_test_app();
    let (_alice, token) = signup(&app, "alice").await;

    for uri in ["/api/v1/admin/users", "/api/v1/admin/posts", "/api/v1/admin/stats"] {
        let response = get_auth(app.clone(), uri, &token).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await["error"], "Admin role required");

        let response = get(app.clone(), uri).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

/// Admin listings expose every user and post.
#[tokio::test]
async fn test_admin_lists_users_and_posts() {
    let (app, store) = common::build_test_app();
    let (_alice, alice_token) = signup(&app, "alice").await;
    create_post(&app, &alice_token, "one").await;
    create_post(&app, &alice_token, "two").await;
    let token = admin_token(&app, &store).await;

    let json = body_json(get_auth(app.clone(), "/api/v1/admin/users", &token).await).await;
    let users = json["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u["email"].is_string()));
    assert!(users.iter().all(|u| u.get("password_hash").is_none()));

    let json = body_json(get_auth(app, "/api/v1/admin/posts?limit=500", &token).await).await;
    assert_eq!(json["posts"].as_array().unwrap().len(), 2);
    assert_eq!(json["limit"], 100);
}

/// Admins may remove any post; a second removal is 404.
#[tokio::test]
async fn test_admin_deletes_any_post() {
    let (app, store) = common::build_test_app();
    let (_alice, alice_token) = signup(&app, "alice").await;
    let post_id = create_post(&app, &alice_token, "moderate me").await;
    let token = admin_token(&app, &store).await;
    let uri = format!("/api/v1/admin/posts/{post_id}");

    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["ok"], true);

    let response = delete_auth(app.clone(), &uri, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(app, &format!("/api/v1/posts/{post_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Stats count users, posts and today's logins.
#[tokio::test]
async fn test_admin_stats() {
    let (app, store) = common::build_test_app();
    let (_alice, alice_token) = signup(&app, "alice").await;
    create_post(&app, &alice_token, "one").await;
    let token = admin_token(&app, &store).await;

    let response = get_auth(app, "/api/v1/admin/stats", &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total_users"], 2);
    assert_eq!(json["total_posts"], 1);
    assert_eq!(json["active_today"], 2);
}

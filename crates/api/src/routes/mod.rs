pub mod admin;
pub mod auth;
pub mod health;
pub mod notification;
pub mod posts;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/...             register, login, token refresh, logout, change-password
/// /users/...            profiles and follow edges
/// /posts/...            posts, likes and comments
/// /feed                 authenticated feed
/// /notifications/...    the caller's notifications
/// /admin/...            admin-only listings, moderation and stats
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/posts", posts::router())
        .route("/feed", get(handlers::feed::feed))
        .nest("/notifications", notification::router())
        .nest("/admin", admin::router())
}

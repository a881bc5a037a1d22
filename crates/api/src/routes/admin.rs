//! Route definitions for the `/admin` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the `Admin` role (enforced by handler extractors).
///
/// ```text
/// GET    /users         -> list_users
/// GET    /posts         -> list_posts
/// DELETE /posts/{id}    -> delete_post
/// GET    /stats         -> stats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users))
        .route("/posts", get(admin::list_posts))
        .route("/posts/{id}", delete(admin::delete_post))
        .route("/stats", get(admin::stats))
}

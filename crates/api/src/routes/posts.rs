//! Route definitions for the `/posts` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::posts;
use crate::state::AppState;

/// Routes mounted at `/posts`.
///
/// ```text
/// GET    /                              -> list_posts
/// POST   /                              -> create_post (requires auth)
/// GET    /{id}                          -> get_post
/// PATCH  /{id}                          -> update_post (author)
/// DELETE /{id}                          -> delete_post (author)
/// POST   /{id}/like                     -> like (requires auth)
/// DELETE /{id}/like                     -> unlike (requires auth)
/// GET    /{id}/like-status              -> like_status (requires auth)
/// GET    /{id}/comments                 -> list_comments
/// POST   /{id}/comments                 -> create_comment (requires auth)
/// DELETE /{id}/comments/{comment_id}    -> delete_comment (comment author)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(posts::list_posts).post(posts::create_post))
        .route(
            "/{id}",
            get(posts::get_post)
                .patch(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/{id}/like", post(posts::like).delete(posts::unlike))
        .route("/{id}/like-status", get(posts::like_status))
        .route(
            "/{id}/comments",
            get(posts::list_comments).post(posts::create_comment),
        )
        .route(
            "/{id}/comments/{comment_id}",
            delete(posts::delete_comment),
        )
}

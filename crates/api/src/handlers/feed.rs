//! Handler for the authenticated feed.

use std::collections::HashSet;

use axum::extract::State;
use axum::Json;
use socialconnect_core::types::DbId;
use socialconnect_db::models::post::FeedPost;

use crate::error::AppResult;
use crate::extract::ApiQuery;
use crate::handlers::posts::PostListResponse;
use crate::middleware::auth::AuthUser;
use crate::query::{PageParams, MAX_PAGE_SIZE};
use crate::state::AppState;

/// GET /api/v1/feed
///
/// All posts, newest first, each flagged with whether the caller liked it.
pub async fn feed(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> AppResult<Json<PostListResponse<FeedPost>>> {
    let page = params.resolve(MAX_PAGE_SIZE);
    let posts = state.store.list_posts(page.limit, page.offset).await?;

    let ids: Vec<DbId> = posts.iter().map(|p| p.id).collect();
    let liked: HashSet<DbId> = state
        .store
        .liked_among(auth.user_id, &ids)
        .await?
        .into_iter()
        .collect();

    let posts = posts
        .into_iter()
        .map(|post| FeedPost {
            liked_by_me: liked.contains(&post.id),
            post,
        })
        .collect();

    Ok(Json(PostListResponse {
        posts,
        page: page.page,
        limit: page.limit,
    }))
}

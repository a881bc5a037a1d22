//! Admin-only handlers. Every handler takes [`RequireAdmin`].

use axum::extract::State;
use axum::Json;
use chrono::{NaiveTime, Utc};
use serde::Serialize;
use socialconnect_core::error::CoreError;
use socialconnect_core::types::DbId;
use socialconnect_db::models::post::Post;
use socialconnect_db::models::user::UserProfile;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, ApiQuery};
use crate::handlers::posts::PostListResponse;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{PageParams, MAX_ADMIN_PAGE_SIZE};
use crate::response::Ack;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserProfile>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_users: i64,
    pub total_posts: i64,
    /// Users whose last login falls on the current UTC day.
    pub active_today: i64,
}

/// GET /api/v1/admin/users
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<UserListResponse>> {
    let users = state.store.list_users().await?;
    Ok(Json(UserListResponse {
        users: users.iter().map(UserProfile::from).collect(),
    }))
}

/// GET /api/v1/admin/posts
pub async fn list_posts(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> AppResult<Json<PostListResponse<Post>>> {
    let page = params.resolve(MAX_ADMIN_PAGE_SIZE);
    let posts = state.store.list_posts(page.limit, page.offset).await?;
    Ok(Json(PostListResponse {
        posts,
        page: page.page,
        limit: page.limit,
    }))
}

/// DELETE /api/v1/admin/posts/{post_id}
///
/// Removes any post regardless of author.
pub async fn delete_post(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ApiPath(post_id): ApiPath<DbId>,
) -> AppResult<Json<Ack>> {
    if !state.store.delete_post(post_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Post",
            id: post_id,
        }));
    }
    tracing::info!(post_id, admin_id = admin.user_id, "Post removed by admin");
    Ok(Json(Ack::ok()))
}

/// GET /api/v1/admin/stats
pub async fn stats(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<StatsResponse>> {
    let start_of_day = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();

    let total_users = state.store.count_users().await?;
    let total_posts = state.store.count_posts().await?;
    let active_today = state.store.count_users_active_since(start_of_day).await?;

    Ok(Json(StatsResponse {
        total_users,
        total_posts,
        active_today,
    }))
}

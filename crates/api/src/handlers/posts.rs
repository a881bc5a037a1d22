//! Handlers for the `/posts` resource and its likes and comments.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use socialconnect_core::error::CoreError;
use socialconnect_core::types::DbId;
use socialconnect_core::validation::{
    validate_post_category, DEFAULT_POST_CATEGORY, POST_CONTENT_MAX_LENGTH,
};
use socialconnect_db::models::comment::Comment;
use socialconnect_db::models::post::{CreatePost, Post, UpdatePost};
use socialconnect_db::models::user::UserSummary;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::query::{PageParams, MAX_PAGE_SIZE};
use crate::response::{Ack, Created};
use crate::social::graph;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /posts`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = POST_CONTENT_MAX_LENGTH, message = "must be 1-280 characters"))]
    pub content: String,
    #[validate(url(message = "must be a valid URL"))]
    pub image_url: Option<String>,
    #[validate(custom(function = "validate_post_category"))]
    pub category: Option<String>,
}

/// Request body for `PATCH /posts/{id}`. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = POST_CONTENT_MAX_LENGTH, message = "must be 1-280 characters"))]
    pub content: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub image_url: Option<String>,
    #[validate(custom(function = "validate_post_category"))]
    pub category: Option<String>,
}

/// Request body for `POST /posts/{id}/comments`.
///
/// Length is enforced by the comment operation itself.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct PostListResponse<T: Serialize> {
    pub posts: Vec<T>,
    pub page: i64,
    pub limit: i64,
}

#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    pub post: Post,
    pub author: UserSummary,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub post: Post,
}

#[derive(Debug, Serialize)]
pub struct LikeStatusResponse {
    pub liked: bool,
}

#[derive(Debug, Serialize)]
pub struct CommentListResponse {
    pub comments: Vec<Comment>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) async fn find_post(state: &AppState, id: DbId) -> AppResult<Post> {
    state
        .store
        .find_post(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Post", id }))
}

/// Load a post and make sure `user_id` wrote it.
async fn owned_post(state: &AppState, id: DbId, user_id: DbId) -> AppResult<Post> {
    let post = find_post(state, id).await?;
    if post.author_id != user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the author can modify this post".into(),
        )));
    }
    Ok(post)
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

/// GET /api/v1/posts
///
/// Public listing, newest first.
pub async fn list_posts(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PageParams>,
) -> AppResult<Json<PostListResponse<Post>>> {
    let page = params.resolve(MAX_PAGE_SIZE);
    let posts = state.store.list_posts(page.limit, page.offset).await?;
    Ok(Json(PostListResponse {
        posts,
        page: page.page,
        limit: page.limit,
    }))
}

/// POST /api/v1/posts
pub async fn create_post(
    auth: AuthUser,
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreatePostRequest>,
) -> AppResult<(StatusCode, Json<Created>)> {
    let post = state
        .store
        .create_post(&CreatePost {
            author_id: auth.user_id,
            content: input.content,
            image_url: input.image_url,
            category: input
                .category
                .unwrap_or_else(|| DEFAULT_POST_CATEGORY.to_string()),
        })
        .await?;

    tracing::info!(post_id = post.id, user_id = auth.user_id, "Post created");
    Ok((StatusCode::CREATED, Json(Created { id: post.id })))
}

/// GET /api/v1/posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    ApiPath(post_id): ApiPath<DbId>,
) -> AppResult<Json<PostDetailResponse>> {
    let post = find_post(&state, post_id).await?;
    let author = state
        .store
        .find_user_by_id(post.author_id)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!("Post {post_id} has no author {}", post.author_id))
        })?;

    Ok(Json(PostDetailResponse {
        post,
        author: UserSummary::from(&author),
    }))
}

/// PATCH /api/v1/posts/{post_id}
pub async fn update_post(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(post_id): ApiPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdatePostRequest>,
) -> AppResult<Json<PostResponse>> {
    owned_post(&state, post_id, auth.user_id).await?;

    let update = UpdatePost {
        content: input.content,
        image_url: input.image_url,
        category: input.category,
    };
    let post = state
        .store
        .update_post(post_id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Post",
            id: post_id,
        }))?;

    tracing::info!(post_id, user_id = auth.user_id, "Post updated");
    Ok(Json(PostResponse { post }))
}

/// DELETE /api/v1/posts/{post_id}
pub async fn delete_post(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(post_id): ApiPath<DbId>,
) -> AppResult<Json<Ack>> {
    owned_post(&state, post_id, auth.user_id).await?;
    state.store.delete_post(post_id).await?;

    tracing::info!(post_id, user_id = auth.user_id, "Post deleted");
    Ok(Json(Ack::ok()))
}

// ---------------------------------------------------------------------------
// Likes
// ---------------------------------------------------------------------------

/// POST /api/v1/posts/{post_id}/like
pub async fn like(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(post_id): ApiPath<DbId>,
) -> AppResult<Json<Ack>> {
    graph::like(state.store.as_ref(), auth.user_id, post_id).await?;
    Ok(Json(Ack::ok()))
}

/// DELETE /api/v1/posts/{post_id}/like
pub async fn unlike(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(post_id): ApiPath<DbId>,
) -> AppResult<Json<Ack>> {
    graph::unlike(state.store.as_ref(), auth.user_id, post_id).await?;
    Ok(Json(Ack::ok()))
}

/// GET /api/v1/posts/{post_id}/like-status
pub async fn like_status(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(post_id): ApiPath<DbId>,
) -> AppResult<Json<LikeStatusResponse>> {
    let liked = graph::like_status(state.store.as_ref(), auth.user_id, post_id).await?;
    Ok(Json(LikeStatusResponse { liked }))
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// GET /api/v1/posts/{post_id}/comments
///
/// Oldest first.
pub async fn list_comments(
    State(state): State<AppState>,
    ApiPath(post_id): ApiPath<DbId>,
) -> AppResult<Json<CommentListResponse>> {
    find_post(&state, post_id).await?;
    let comments = state.store.list_comments(post_id).await?;
    Ok(Json(CommentListResponse { comments }))
}

/// POST /api/v1/posts/{post_id}/comments
pub async fn create_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(post_id): ApiPath<DbId>,
    ValidatedJson(input): ValidatedJson<CreateCommentRequest>,
) -> AppResult<(StatusCode, Json<Ack>)> {
    graph::comment(state.store.as_ref(), auth.user_id, post_id, &input.content).await?;
    Ok((StatusCode::CREATED, Json(Ack::ok())))
}

/// DELETE /api/v1/posts/{post_id}/comments/{comment_id}
pub async fn delete_comment(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath((post_id, comment_id)): ApiPath<(DbId, DbId)>,
) -> AppResult<Json<Ack>> {
    graph::delete_comment(state.store.as_ref(), auth.user_id, post_id, comment_id).await?;
    Ok(Json(Ack::ok()))
}

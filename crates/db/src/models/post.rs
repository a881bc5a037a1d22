//! Post entity model and DTOs.

use serde::Serialize;
use socialconnect_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `posts` table, with derived like/comment counters.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    pub id: DbId,
    pub author_id: DbId,
    pub content: String,
    pub image_url: Option<String>,
    pub category: String,
    pub like_count: i64,
    pub comment_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A post annotated with the viewer's like state (feed entries).
#[derive(Debug, Clone, Serialize)]
pub struct FeedPost {
    #[serde(flatten)]
    pub post: Post,
    pub liked_by_me: bool,
}

/// DTO for creating a new post.
#[derive(Debug, Clone)]
pub struct CreatePost {
    pub author_id: DbId,
    pub content: String,
    pub image_url: Option<String>,
    pub category: String,
}

/// DTO for updating a post. All fields are optional.
#[derive(Debug, Clone, Default)]
pub struct UpdatePost {
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
}

//! Comment entity model and DTOs.

use serde::Serialize;
use socialconnect_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub post_id: DbId,
    pub author_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new comment.
#[derive(Debug, Clone)]
pub struct CreateComment {
    pub post_id: DbId,
    pub author_id: DbId,
    pub content: String,
}

//! Repository for the `posts` table.

use socialconnect_core::types::DbId;
use sqlx::PgPool;

use crate::models::post::{CreatePost, Post, UpdatePost};

/// Post projection with like/comment counters derived from the edge tables.
const SELECT_POST: &str = "SELECT p.id, p.author_id, p.content, p.image_url, p.category, \
     (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id) AS like_count, \
     (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comment_count, \
     p.created_at, p.updated_at \
     FROM posts p";

/// Provides CRUD operations for posts.
pub struct PostRepo;

impl PostRepo {
    /// Insert a new post, returning the created row (counters start at zero).
    pub async fn create(pool: &PgPool, input: &CreatePost) -> Result<Post, sqlx::Error> {
        sqlx::query_as::<_, Post>(
            "INSERT INTO posts (author_id, content, image_url, category)
             VALUES ($1, $2, $3, $4)
             RETURNING id, author_id, content, image_url, category,
                       0::BIGINT AS like_count, 0::BIGINT AS comment_count,
                       created_at, updated_at",
        )
        .bind(input.author_id)
        .bind(&input.content)
        .bind(&input.image_url)
        .bind(&input.category)
        .fetch_one(pool)
        .await
    }

    /// Find a post by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("{SELECT_POST} WHERE p.id = $1");
        sqlx::query_as::<_, Post>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List posts newest first.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Post>, sqlx::Error> {
        let query = format!(
            "{SELECT_POST} ORDER BY p.created_at DESC, p.id DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Post>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a post. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePost,
    ) -> Result<Option<Post>, sqlx::Error> {
        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE posts SET
                content = COALESCE($2, content),
                image_url = COALESCE($3, image_url),
                category = COALESCE($4, category),
                updated_at = NOW()
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(&input.content)
        .bind(&input.image_url)
        .bind(&input.category)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some(id) => Self::find_by_id(pool, id).await,
            None => Ok(None),
        }
    }

    /// Delete a post. Likes, comments and notifications cascade.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of posts.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(pool)
            .await
    }
}

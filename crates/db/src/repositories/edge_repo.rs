//! Repositories for the `follows` and `likes` edge tables.
//!
//! Inserts are idempotent: a duplicate pair is absorbed by
//! `ON CONFLICT DO NOTHING` and reported as "not created" rather than as an
//! error.

use socialconnect_core::types::DbId;
use sqlx::PgPool;

/// Follow edges between users.
pub struct FollowRepo;

impl FollowRepo {
    /// Ensure `follower_id -> following_id` exists. Returns `true` if the edge is new.
    pub async fn insert(
        pool: &PgPool,
        follower_id: DbId,
        following_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO follows (follower_id, following_id) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_follows_pair DO NOTHING",
        )
        .bind(follower_id)
        .bind(following_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove the edge if present. Returns `true` if a row was removed.
    pub async fn delete(
        pool: &PgPool,
        follower_id: DbId,
        following_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND following_id = $2")
                .bind(follower_id)
                .bind(following_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn exists(
        pool: &PgPool,
        follower_id: DbId,
        following_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM follows WHERE follower_id = $1 AND following_id = $2)",
        )
        .bind(follower_id)
        .bind(following_id)
        .fetch_one(pool)
        .await
    }
}

/// Like edges between users and posts.
pub struct LikeRepo;

impl LikeRepo {
    /// Ensure `user_id` likes `post_id`. Returns `true` if the edge is new.
    pub async fn insert(pool: &PgPool, user_id: DbId, post_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO likes (user_id, post_id) VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_likes_pair DO NOTHING",
        )
        .bind(user_id)
        .bind(post_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(pool: &PgPool, user_id: DbId, post_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND post_id = $2")
            .bind(user_id)
            .bind(post_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn exists(pool: &PgPool, user_id: DbId, post_id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM likes WHERE user_id = $1 AND post_id = $2)",
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_one(pool)
        .await
    }

    /// The subset of `post_ids` that `user_id` has liked.
    pub async fn liked_among(
        pool: &PgPool,
        user_id: DbId,
        post_ids: &[DbId],
    ) -> Result<Vec<DbId>, sqlx::Error> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_scalar("SELECT post_id FROM likes WHERE user_id = $1 AND post_id = ANY($2)")
            .bind(user_id)
            .bind(post_ids)
            .fetch_all(pool)
            .await
    }
}

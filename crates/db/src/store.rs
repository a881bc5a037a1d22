//! The persistence seam used by the API layer.
//!
//! [`Store`] is an object-safe handle over every table the service touches.
//! [`PgStore`] backs it with PostgreSQL through the repositories;
//! [`MemoryStore`](crate::memory::MemoryStore) provides the same semantics
//! in-process for tests and local experiments.

use async_trait::async_trait;
use socialconnect_core::types::{DbId, Timestamp};

use crate::models::comment::{Comment, CreateComment};
use crate::models::notification::{CreateNotification, Notification};
use crate::models::post::{CreatePost, Post, UpdatePost};
use crate::models::session::{CreateSession, Session};
use crate::models::user::{CreateUser, ProfileCounts, UpdateProfile, User};
use crate::repositories::{
    CommentRepo, FollowRepo, LikeRepo, NotificationRepo, PostRepo, SessionRepo, UserRepo,
};
use crate::DbPool;

/// Unique constraint on `users.email`.
pub const UQ_USERS_EMAIL: &str = "uq_users_email";
/// Unique constraint on `users.username`.
pub const UQ_USERS_USERNAME: &str = "uq_users_username";
/// Unique constraint on `sessions.token_hash`.
pub const UQ_SESSIONS_TOKEN_HASH: &str = "uq_sessions_token_hash";

/// PostgreSQL SQLSTATE for `unique_violation`.
const PG_UNIQUE_VIOLATION: &str = "23505";

/// Errors returned by a [`Store`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An insert or update collided with a unique constraint.
    ///
    /// Carries the constraint name so callers can tell which field clashed
    /// without inspecting error text.
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// Any other failure of the underlying database.
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl StoreError {
    /// `true` if this is a violation of the given unique constraint.
    pub fn is_unique_violation(&self, constraint: &str) -> bool {
        matches!(self, Self::UniqueViolation(c) if c == constraint)
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some(PG_UNIQUE_VIOLATION) {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                return Self::UniqueViolation(constraint);
            }
        }
        Self::Database(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Keyed record service over users, sessions, posts, comments, edges and
/// notifications.
///
/// Implementations must enforce uniqueness of user email/username and
/// session token hashes (reported as [`StoreError::UniqueViolation`]), and
/// must treat duplicate follow/like inserts as a successful no-op.
#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap liveness probe used by `/health`.
    async fn health_check(&self) -> StoreResult<()>;

    // -- users --------------------------------------------------------------

    async fn create_user(&self, input: &CreateUser) -> StoreResult<User>;
    async fn find_user_by_id(&self, id: DbId) -> StoreResult<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;
    async fn list_users(&self) -> StoreResult<Vec<User>>;
    async fn update_profile(&self, id: DbId, input: &UpdateProfile) -> StoreResult<Option<User>>;
    async fn record_login(&self, id: DbId) -> StoreResult<()>;
    async fn update_password(&self, id: DbId, password_hash: &str) -> StoreResult<bool>;
    async fn count_users(&self) -> StoreResult<i64>;
    async fn count_users_active_since(&self, since: Timestamp) -> StoreResult<i64>;
    async fn profile_counts(&self, id: DbId) -> StoreResult<ProfileCounts>;

    // -- sessions -----------------------------------------------------------

    async fn create_session(&self, input: &CreateSession) -> StoreResult<Session>;
    async fn find_session_by_token_hash(&self, hash: &str) -> StoreResult<Option<Session>>;
    async fn blacklist_session(&self, hash: &str) -> StoreResult<bool>;

    // -- posts --------------------------------------------------------------

    async fn create_post(&self, input: &CreatePost) -> StoreResult<Post>;
    async fn find_post(&self, id: DbId) -> StoreResult<Option<Post>>;
    async fn list_posts(&self, limit: i64, offset: i64) -> StoreResult<Vec<Post>>;
    async fn update_post(&self, id: DbId, input: &UpdatePost) -> StoreResult<Option<Post>>;
    async fn delete_post(&self, id: DbId) -> StoreResult<bool>;
    async fn count_posts(&self) -> StoreResult<i64>;

    // -- comments -----------------------------------------------------------

    async fn create_comment(&self, input: &CreateComment) -> StoreResult<Comment>;
    async fn find_comment(&self, id: DbId) -> StoreResult<Option<Comment>>;
    async fn list_comments(&self, post_id: DbId) -> StoreResult<Vec<Comment>>;
    async fn delete_comment(&self, id: DbId) -> StoreResult<bool>;

    // -- edges --------------------------------------------------------------

    /// Ensure the follow edge exists. Returns `true` if it was newly created.
    async fn insert_follow(&self, follower_id: DbId, following_id: DbId) -> StoreResult<bool>;
    async fn delete_follow(&self, follower_id: DbId, following_id: DbId) -> StoreResult<bool>;
    async fn is_following(&self, follower_id: DbId, following_id: DbId) -> StoreResult<bool>;

    /// Ensure the like edge exists. Returns `true` if it was newly created.
    async fn insert_like(&self, user_id: DbId, post_id: DbId) -> StoreResult<bool>;
    async fn delete_like(&self, user_id: DbId, post_id: DbId) -> StoreResult<bool>;
    async fn has_liked(&self, user_id: DbId, post_id: DbId) -> StoreResult<bool>;
    async fn liked_among(&self, user_id: DbId, post_ids: &[DbId]) -> StoreResult<Vec<DbId>>;

    // -- notifications ------------------------------------------------------

    async fn create_notification(&self, input: &CreateNotification) -> StoreResult<Notification>;
    async fn list_notifications(
        &self,
        recipient_id: DbId,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Notification>>;
    /// Mark one notification read if it belongs to `recipient_id`.
    async fn mark_notification_read(&self, id: DbId, recipient_id: DbId) -> StoreResult<bool>;
    async fn mark_all_notifications_read(&self, recipient_id: DbId) -> StoreResult<u64>;
    async fn unread_notification_count(&self, recipient_id: DbId) -> StoreResult<i64>;
}

// ---------------------------------------------------------------------------
// PostgreSQL
// ---------------------------------------------------------------------------

/// [`Store`] backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn health_check(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await.map_err(Into::into)
    }

    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        Ok(UserRepo::create(&self.pool, input).await?)
    }

    async fn find_user_by_id(&self, id: DbId) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_email(&self.pool, email).await?)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_username(&self.pool, username).await?)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(UserRepo::list(&self.pool).await?)
    }

    async fn update_profile(&self, id: DbId, input: &UpdateProfile) -> StoreResult<Option<User>> {
        Ok(UserRepo::update_profile(&self.pool, id, input).await?)
    }

    async fn record_login(&self, id: DbId) -> StoreResult<()> {
        Ok(UserRepo::record_login(&self.pool, id).await?)
    }

    async fn update_password(&self, id: DbId, password_hash: &str) -> StoreResult<bool> {
        Ok(UserRepo::update_password(&self.pool, id, password_hash).await?)
    }

    async fn count_users(&self) -> StoreResult<i64> {
        Ok(UserRepo::count(&self.pool).await?)
    }

    async fn count_users_active_since(&self, since: Timestamp) -> StoreResult<i64> {
        Ok(UserRepo::count_active_since(&self.pool, since).await?)
    }

    async fn profile_counts(&self, id: DbId) -> StoreResult<ProfileCounts> {
        Ok(UserRepo::profile_counts(&self.pool, id).await?)
    }

    async fn create_session(&self, input: &CreateSession) -> StoreResult<Session> {
        Ok(SessionRepo::create(&self.pool, input).await?)
    }

    async fn find_session_by_token_hash(&self, hash: &str) -> StoreResult<Option<Session>> {
        Ok(SessionRepo::find_by_token_hash(&self.pool, hash).await?)
    }

    async fn blacklist_session(&self, hash: &str) -> StoreResult<bool> {
        Ok(SessionRepo::blacklist_by_token_hash(&self.pool, hash).await?)
    }

    async fn create_post(&self, input: &CreatePost) -> StoreResult<Post> {
        Ok(PostRepo::create(&self.pool, input).await?)
    }

    async fn find_post(&self, id: DbId) -> StoreResult<Option<Post>> {
        Ok(PostRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_posts(&self, limit: i64, offset: i64) -> StoreResult<Vec<Post>> {
        Ok(PostRepo::list(&self.pool, limit, offset).await?)
    }

    async fn update_post(&self, id: DbId, input: &UpdatePost) -> StoreResult<Option<Post>> {
        Ok(PostRepo::update(&self.pool, id, input).await?)
    }

    async fn delete_post(&self, id: DbId) -> StoreResult<bool> {
        Ok(PostRepo::delete(&self.pool, id).await?)
    }

    async fn count_posts(&self) -> StoreResult<i64> {
        Ok(PostRepo::count(&self.pool).await?)
    }

    async fn create_comment(&self, input: &CreateComment) -> StoreResult<Comment> {
        Ok(CommentRepo::create(&self.pool, input).await?)
    }

    async fn find_comment(&self, id: DbId) -> StoreResult<Option<Comment>> {
        Ok(CommentRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_comments(&self, post_id: DbId) -> StoreResult<Vec<Comment>> {
        Ok(CommentRepo::list_for_post(&self.pool, post_id).await?)
    }

    async fn delete_comment(&self, id: DbId) -> StoreResult<bool> {
        Ok(CommentRepo::delete(&self.pool, id).await?)
    }

    async fn insert_follow(&self, follower_id: DbId, following_id: DbId) -> StoreResult<bool> {
        Ok(FollowRepo::insert(&self.pool, follower_id, following_id).await?)
    }

    async fn delete_follow(&self, follower_id: DbId, following_id: DbId) -> StoreResult<bool> {
        Ok(FollowRepo::delete(&self.pool, follower_id, following_id).await?)
    }

    async fn is_following(&self, follower_id: DbId, following_id: DbId) -> StoreResult<bool> {
        Ok(FollowRepo::exists(&self.pool, follower_id, following_id).await?)
    }

    async fn insert_like(&self, user_id: DbId, post_id: DbId) -> StoreResult<bool> {
        Ok(LikeRepo::insert(&self.pool, user_id, post_id).await?)
    }

    async fn delete_like(&self, user_id: DbId, post_id: DbId) -> StoreResult<bool> {
        Ok(LikeRepo::delete(&self.pool, user_id, post_id).await?)
    }

    async fn has_liked(&self, user_id: DbId, post_id: DbId) -> StoreResult<bool> {
        Ok(LikeRepo::exists(&self.pool, user_id, post_id).await?)
    }

    async fn liked_among(&self, user_id: DbId, post_ids: &[DbId]) -> StoreResult<Vec<DbId>> {
        Ok(LikeRepo::liked_among(&self.pool, user_id, post_ids).await?)
    }

    async fn create_notification(&self, input: &CreateNotification) -> StoreResult<Notification> {
        Ok(NotificationRepo::create(&self.pool, input).await?)
    }

    async fn list_notifications(
        &self,
        recipient_id: DbId,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Notification>> {
        Ok(
            NotificationRepo::list_for_recipient(&self.pool, recipient_id, unread_only, limit, offset)
                .await?,
        )
    }

    async fn mark_notification_read(&self, id: DbId, recipient_id: DbId) -> StoreResult<bool> {
        Ok(NotificationRepo::mark_read(&self.pool, id, recipient_id).await?)
    }

    async fn mark_all_notifications_read(&self, recipient_id: DbId) -> StoreResult<u64> {
        Ok(NotificationRepo::mark_all_read(&self.pool, recipient_id).await?)
    }

    async fn unread_notification_count(&self, recipient_id: DbId) -> StoreResult<i64> {
        Ok(NotificationRepo::unread_count(&self.pool, recipient_id).await?)
    }
}

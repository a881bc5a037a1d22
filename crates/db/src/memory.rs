//! In-process [`Store`] with the same observable semantics as [`PgStore`].
//!
//! Uniqueness is checked against the same constraint names the migrations
//! declare, edge inserts are idempotent, and deleting a post removes its
//! comments, likes and notifications the way `ON DELETE CASCADE` does.
//!
//! [`PgStore`]: crate::store::PgStore

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use socialconnect_core::types::{DbId, Timestamp};
use tokio::sync::RwLock;

use crate::models::comment::{Comment, CreateComment};
use crate::models::notification::{CreateNotification, Notification};
use crate::models::post::{CreatePost, Post, UpdatePost};
use crate::models::session::{CreateSession, Session};
use crate::models::user::{CreateUser, ProfileCounts, UpdateProfile, User};
use crate::store::{
    Store, StoreError, StoreResult, UQ_SESSIONS_TOKEN_HASH, UQ_USERS_EMAIL, UQ_USERS_USERNAME,
};

#[derive(Default)]
struct Tables {
    next_id: DbId,
    users: Vec<User>,
    sessions: Vec<Session>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    /// `(follower_id, following_id)`
    follows: Vec<(DbId, DbId)>,
    /// `(user_id, post_id)`
    likes: Vec<(DbId, DbId)>,
    notifications: Vec<Notification>,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }

    /// Fill in the derived counters the SQL query computes with subqueries.
    fn with_counts(&self, post: &Post) -> Post {
        let mut post = post.clone();
        post.like_count = self.likes.iter().filter(|(_, p)| *p == post.id).count() as i64;
        post.comment_count = self
            .comments
            .iter()
            .filter(|c| c.post_id == post.id)
            .count() as i64;
        post
    }

    fn user_mut(&mut self, id: DbId) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }
}

/// Newest first, ties broken by id, matching `ORDER BY created_at DESC, id DESC`.
fn newest_first(a: (Timestamp, DbId), b: (Timestamp, DbId)) -> std::cmp::Ordering {
    b.cmp(&a)
}

fn page<T>(items: Vec<T>, limit: i64, offset: i64) -> Vec<T> {
    items
        .into_iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .collect()
}

/// A [`Store`] kept entirely in memory behind a [`RwLock`].
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail as if the database went away.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }

    /// Overwrite a session's expiry. Lets tests age a session without waiting.
    pub async fn set_session_expiry(&self, token_hash: &str, expires_at: Timestamp) -> bool {
        let mut tables = self.tables.write().await;
        match tables
            .sessions
            .iter_mut()
            .find(|s| s.token_hash == token_hash)
        {
            Some(session) => {
                session.expires_at = expires_at;
                true
            }
            None => false,
        }
    }

    /// Overwrite a user's role. Stands in for promoting an account by hand.
    pub async fn set_user_role(&self, id: DbId, role: &str) -> bool {
        let mut tables = self.tables.write().await;
        match tables.user_mut(id) {
            Some(user) => {
                user.role = role.to_string();
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        self.check_available()
    }

    // -- users --------------------------------------------------------------

    async fn create_user(&self, input: &CreateUser) -> StoreResult<User> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == input.email) {
            return Err(StoreError::UniqueViolation(UQ_USERS_EMAIL.into()));
        }
        if tables.users.iter().any(|u| u.username == input.username) {
            return Err(StoreError::UniqueViolation(UQ_USERS_USERNAME.into()));
        }
        let now = Utc::now();
        let user = User {
            id: tables.next_id(),
            email: input.email.clone(),
            username: input.username.clone(),
            password_hash: input.password_hash.clone(),
            role: input.role.clone(),
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            bio: None,
            avatar_url: None,
            website: None,
            location: None,
            profile_visibility: socialconnect_core::validation::DEFAULT_PROFILE_VISIBILITY.into(),
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_id(&self, id: DbId) -> StoreResult<Option<User>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let mut users = tables.users.clone();
        users.sort_by(|a, b| newest_first((a.created_at, a.id), (b.created_at, b.id)));
        Ok(users)
    }

    async fn update_profile(&self, id: DbId, input: &UpdateProfile) -> StoreResult<Option<User>> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let Some(user) = tables.user_mut(id) else {
            return Ok(None);
        };
        if let Some(bio) = &input.bio {
            user.bio = Some(bio.clone());
        }
        if let Some(avatar_url) = &input.avatar_url {
            user.avatar_url = Some(avatar_url.clone());
        }
        if let Some(website) = &input.website {
            user.website = Some(website.clone());
        }
        if let Some(location) = &input.location {
            user.location = Some(location.clone());
        }
        if let Some(visibility) = &input.profile_visibility {
            user.profile_visibility = visibility.clone();
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }

    async fn record_login(&self, id: DbId) -> StoreResult<()> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if let Some(user) = tables.user_mut(id) {
            user.last_login = Some(Utc::now());
        }
        Ok(())
    }

    async fn update_password(&self, id: DbId, password_hash: &str) -> StoreResult<bool> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        match tables.user_mut(id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count_users(&self) -> StoreResult<i64> {
        self.check_available()?;
        Ok(self.tables.read().await.users.len() as i64)
    }

    async fn count_users_active_since(&self, since: Timestamp) -> StoreResult<i64> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .filter(|u| u.last_login.is_some_and(|at| at >= since))
            .count() as i64)
    }

    async fn profile_counts(&self, id: DbId) -> StoreResult<ProfileCounts> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(ProfileCounts {
            followers_count: tables.follows.iter().filter(|(_, f)| *f == id).count() as i64,
            following_count: tables.follows.iter().filter(|(f, _)| *f == id).count() as i64,
            posts_count: tables.posts.iter().filter(|p| p.author_id == id).count() as i64,
        })
    }

    // -- sessions -----------------------------------------------------------

    async fn create_session(&self, input: &CreateSession) -> StoreResult<Session> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if tables
            .sessions
            .iter()
            .any(|s| s.token_hash == input.token_hash)
        {
            return Err(StoreError::UniqueViolation(UQ_SESSIONS_TOKEN_HASH.into()));
        }
        let session = Session {
            id: tables.next_id(),
            user_id: input.user_id,
            token_hash: input.token_hash.clone(),
            expires_at: input.expires_at,
            blacklisted: false,
            created_at: Utc::now(),
        };
        tables.sessions.push(session.clone());
        Ok(session)
    }

    async fn find_session_by_token_hash(&self, hash: &str) -> StoreResult<Option<Session>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables.sessions.iter().find(|s| s.token_hash == hash).cloned())
    }

    async fn blacklist_session(&self, hash: &str) -> StoreResult<bool> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        match tables.sessions.iter_mut().find(|s| s.token_hash == hash) {
            Some(session) => {
                session.blacklisted = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // -- posts --------------------------------------------------------------

    async fn create_post(&self, input: &CreatePost) -> StoreResult<Post> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let post = Post {
            id: tables.next_id(),
            author_id: input.author_id,
            content: input.content.clone(),
            image_url: input.image_url.clone(),
            category: input.category.clone(),
            like_count: 0,
            comment_count: 0,
            created_at: now,
            updated_at: now,
        };
        tables.posts.push(post.clone());
        Ok(post)
    }

    async fn find_post(&self, id: DbId) -> StoreResult<Option<Post>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .posts
            .iter()
            .find(|p| p.id == id)
            .map(|p| tables.with_counts(p)))
    }

    async fn list_posts(&self, limit: i64, offset: i64) -> StoreResult<Vec<Post>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let mut posts: Vec<Post> = tables.posts.iter().map(|p| tables.with_counts(p)).collect();
        posts.sort_by(|a, b| newest_first((a.created_at, a.id), (b.created_at, b.id)));
        Ok(page(posts, limit, offset))
    }

    async fn update_post(&self, id: DbId, input: &UpdatePost) -> StoreResult<Option<Post>> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let Some(post) = tables.posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if let Some(content) = &input.content {
            post.content = content.clone();
        }
        if let Some(image_url) = &input.image_url {
            post.image_url = Some(image_url.clone());
        }
        if let Some(category) = &input.category {
            post.category = category.clone();
        }
        post.updated_at = Utc::now();
        let post = post.clone();
        Ok(Some(tables.with_counts(&post)))
    }

    async fn delete_post(&self, id: DbId) -> StoreResult<bool> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let before = tables.posts.len();
        tables.posts.retain(|p| p.id != id);
        if tables.posts.len() == before {
            return Ok(false);
        }
        tables.comments.retain(|c| c.post_id != id);
        tables.likes.retain(|(_, p)| *p != id);
        tables.notifications.retain(|n| n.post_id != Some(id));
        Ok(true)
    }

    async fn count_posts(&self) -> StoreResult<i64> {
        self.check_available()?;
        Ok(self.tables.read().await.posts.len() as i64)
    }

    // -- comments -----------------------------------------------------------

    async fn create_comment(&self, input: &CreateComment) -> StoreResult<Comment> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let comment = Comment {
            id: tables.next_id(),
            post_id: input.post_id,
            author_id: input.author_id,
            content: input.content.clone(),
            created_at: Utc::now(),
        };
        tables.comments.push(comment.clone());
        Ok(comment)
    }

    async fn find_comment(&self, id: DbId) -> StoreResult<Option<Comment>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn list_comments(&self, post_id: DbId) -> StoreResult<Vec<Comment>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by_key(|c| (c.created_at, c.id));
        Ok(comments)
    }

    async fn delete_comment(&self, id: DbId) -> StoreResult<bool> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let before = tables.comments.len();
        tables.comments.retain(|c| c.id != id);
        Ok(tables.comments.len() < before)
    }

    // -- edges --------------------------------------------------------------

    async fn insert_follow(&self, follower_id: DbId, following_id: DbId) -> StoreResult<bool> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let edge = (follower_id, following_id);
        if tables.follows.contains(&edge) {
            return Ok(false);
        }
        tables.follows.push(edge);
        Ok(true)
    }

    async fn delete_follow(&self, follower_id: DbId, following_id: DbId) -> StoreResult<bool> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let before = tables.follows.len();
        tables.follows.retain(|e| *e != (follower_id, following_id));
        Ok(tables.follows.len() < before)
    }

    async fn is_following(&self, follower_id: DbId, following_id: DbId) -> StoreResult<bool> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables.follows.contains(&(follower_id, following_id)))
    }

    async fn insert_like(&self, user_id: DbId, post_id: DbId) -> StoreResult<bool> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let edge = (user_id, post_id);
        if tables.likes.contains(&edge) {
            return Ok(false);
        }
        tables.likes.push(edge);
        Ok(true)
    }

    async fn delete_like(&self, user_id: DbId, post_id: DbId) -> StoreResult<bool> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let before = tables.likes.len();
        tables.likes.retain(|e| *e != (user_id, post_id));
        Ok(tables.likes.len() < before)
    }

    async fn has_liked(&self, user_id: DbId, post_id: DbId) -> StoreResult<bool> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables.likes.contains(&(user_id, post_id)))
    }

    async fn liked_among(&self, user_id: DbId, post_ids: &[DbId]) -> StoreResult<Vec<DbId>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .likes
            .iter()
            .filter(|(u, p)| *u == user_id && post_ids.contains(p))
            .map(|(_, p)| *p)
            .collect())
    }

    // -- notifications ------------------------------------------------------

    async fn create_notification(&self, input: &CreateNotification) -> StoreResult<Notification> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let notification = Notification {
            id: tables.next_id(),
            recipient_id: input.recipient_id,
            sender_id: input.sender_id,
            notification_type: input.notification_type.clone(),
            post_id: input.post_id,
            message: input.message.clone(),
            is_read: false,
            created_at: Utc::now(),
        };
        tables.notifications.push(notification.clone());
        Ok(notification)
    }

    async fn list_notifications(
        &self,
        recipient_id: DbId,
        unread_only: bool,
        limit: i64,
        offset: i64,
    ) -> StoreResult<Vec<Notification>> {
        self.check_available()?;
        let tables = self.tables.read().await;
        let mut items: Vec<Notification> = tables
            .notifications
            .iter()
            .filter(|n| n.recipient_id == recipient_id && (!unread_only || !n.is_read))
            .cloned()
            .collect();
        items.sort_by(|a, b| newest_first((a.created_at, a.id), (b.created_at, b.id)));
        Ok(page(items, limit, offset))
    }

    async fn mark_notification_read(&self, id: DbId, recipient_id: DbId) -> StoreResult<bool> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        match tables
            .notifications
            .iter_mut()
            .find(|n| n.id == id && n.recipient_id == recipient_id && !n.is_read)
        {
            Some(notification) => {
                notification.is_read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_all_notifications_read(&self, recipient_id: DbId) -> StoreResult<u64> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let mut marked = 0;
        for n in tables
            .notifications
            .iter_mut()
            .filter(|n| n.recipient_id == recipient_id && !n.is_read)
        {
            n.is_read = true;
            marked += 1;
        }
        Ok(marked)
    }

    async fn unread_notification_count(&self, recipient_id: DbId) -> StoreResult<i64> {
        self.check_available()?;
        let tables = self.tables.read().await;
        Ok(tables
            .notifications
            .iter()
            .filter(|n| n.recipient_id == recipient_id && !n.is_read)
            .count() as i64)
    }
}

//! Follow, like and comment operations.
//!
//! Edge inserts are idempotent; a notification is written only when an edge
//! is newly created, so repeating a follow or like never notifies twice.
//! Comments are not edges and notify every time.

use socialconnect_core::error::CoreError;
use socialconnect_core::notifications::NotificationKind;
use socialconnect_core::types::DbId;
use socialconnect_core::validation::validate_comment_content;
use socialconnect_db::models::comment::{Comment, CreateComment};
use socialconnect_db::models::post::Post;
use socialconnect_db::Store;

use super::fanout::notify;
use crate::error::{AppError, AppResult};

async fn existing_post<S: Store + ?Sized>(store: &S, post_id: DbId) -> AppResult<Post> {
    store
        .find_post(post_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Post",
            id: post_id,
        }))
}

/// `actor` starts following `target`.
pub async fn follow<S: Store + ?Sized>(store: &S, actor: DbId, target: DbId) -> AppResult<()> {
    if actor == target {
        return Err(CoreError::InvalidOperation("You cannot follow yourself".into()).into());
    }
    if store.find_user_by_id(target).await?.is_none() {
        return Err(CoreError::NotFound {
            entity: "User",
            id: target,
        }
        .into());
    }

    let created = store.insert_follow(actor, target).await?;
    if created {
        notify(store, NotificationKind::Follow, actor, target, None).await?;
    }
    tracing::info!(follower_id = actor, following_id = target, created, "Follow");
    Ok(())
}

/// Remove the follow edge if present.
pub async fn unfollow<S: Store + ?Sized>(store: &S, actor: DbId, target: DbId) -> AppResult<()> {
    let removed = store.delete_follow(actor, target).await?;
    tracing::info!(follower_id = actor, following_id = target, removed, "Unfollow");
    Ok(())
}

/// `actor` likes `post_id`; the author hears about it unless it is their own post.
pub async fn like<S: Store + ?Sized>(store: &S, actor: DbId, post_id: DbId) -> AppResult<()> {
    let post = existing_post(store, post_id).await?;

    let created = store.insert_like(actor, post.id).await?;
    if created {
        notify(
            store,
            NotificationKind::Like,
            actor,
            post.author_id,
            Some(post.id),
        )
        .await?;
    }
    tracing::info!(user_id = actor, post_id, created, "Like");
    Ok(())
}

/// Remove the like edge if present.
pub async fn unlike<S: Store + ?Sized>(store: &S, actor: DbId, post_id: DbId) -> AppResult<()> {
    let removed = store.delete_like(actor, post_id).await?;
    tracing::info!(user_id = actor, post_id, removed, "Unlike");
    Ok(())
}

/// Whether `actor` currently likes `post_id`.
pub async fn like_status<S: Store + ?Sized>(
    store: &S,
    actor: DbId,
    post_id: DbId,
) -> AppResult<bool> {
    Ok(store.has_liked(actor, post_id).await?)
}

/// Add a comment by `actor` to `post_id`.
pub async fn comment<S: Store + ?Sized>(
    store: &S,
    actor: DbId,
    post_id: DbId,
    content: &str,
) -> AppResult<Comment> {
    let post = existing_post(store, post_id).await?;
    validate_comment_content(content)?;

    let comment = store
        .create_comment(&CreateComment {
            post_id: post.id,
            author_id: actor,
            content: content.to_string(),
        })
        .await?;
    notify(
        store,
        NotificationKind::Comment,
        actor,
        post.author_id,
        Some(post.id),
    )
    .await?;

    tracing::info!(comment_id = comment.id, post_id, user_id = actor, "Comment created");
    Ok(comment)
}

/// Delete one of `actor`'s own comments on `post_id`.
pub async fn delete_comment<S: Store + ?Sized>(
    store: &S,
    actor: DbId,
    post_id: DbId,
    comment_id: DbId,
) -> AppResult<()> {
    let comment = store
        .find_comment(comment_id)
        .await?
        .filter(|c| c.post_id == post_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Comment",
            id: comment_id,
        }))?;

    if comment.author_id != actor {
        return Err(CoreError::Forbidden("You can only delete your own comments".into()).into());
    }

    store.delete_comment(comment.id).await?;
    tracing::info!(comment_id, post_id, user_id = actor, "Comment deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use socialconnect_db::models::post::CreatePost;
    use socialconnect_db::models::user::CreateUser;
    use socialconnect_db::MemoryStore;

    use super::*;

    async fn user(store: &MemoryStore, name: &str) -> DbId {
        store
            .create_user(&CreateUser {
                email: format!("{name}@example.com"),
                username: name.into(),
                password_hash: "hash".into(),
                role: "User".into(),
                first_name: None,
                last_name: None,
            })
            .await
            .unwrap()
            .id
    }

    async fn post(store: &MemoryStore, author_id: DbId) -> DbId {
        store
            .create_post(&CreatePost {
                author_id,
                content: "hello".into(),
                image_url: None,
                category: "general".into(),
            })
            .await
            .unwrap()
            .id
    }

    async fn inbox(store: &MemoryStore, user_id: DbId) -> Vec<(String, DbId, Option<DbId>)> {
        store
            .list_notifications(user_id, false, 100, 0)
            .await
            .unwrap()
            .into_iter()
            .map(|n| (n.notification_type, n.sender_id, n.post_id))
            .collect()
    }

    #[tokio::test]
    async fn follow_creates_edge_and_notifies_once() {
        let store = MemoryStore::new();
        let alice = user(&store, "alice").await;
        let bob = user(&store, "bob").await;

        follow(&store, bob, alice).await.unwrap();
        follow(&store, bob, alice).await.unwrap();

        assert!(store.is_following(bob, alice).await.unwrap());
        assert_eq!(store.profile_counts(alice).await.unwrap().followers_count, 1);
        assert_eq!(inbox(&store, alice).await, vec![("follow".to_string(), bob, None)]);
    }

    #[tokio::test]
    async fn self_follow_is_invalid_and_silent() {
        let store = MemoryStore::new();
        let alice = user(&store, "alice").await;

        assert_matches!(
            follow(&store, alice, alice).await,
            Err(AppError::Core(CoreError::InvalidOperation(_)))
        );
        assert!(!store.is_following(alice, alice).await.unwrap());
        assert!(inbox(&store, alice).await.is_empty());
    }

    #[tokio::test]
    async fn follow_of_missing_user_is_not_found() {
        let store = MemoryStore::new();
        let alice = user(&store, "alice").await;

        assert_matches!(
            follow(&store, alice, 999).await,
            Err(AppError::Core(CoreError::NotFound { entity: "User", id: 999 }))
        );
    }

    #[tokio::test]
    async fn refollow_after_unfollow_notifies_again() {
        let store = MemoryStore::new();
        let alice = user(&store, "alice").await;
        let bob = user(&store, "bob").await;

        follow(&store, bob, alice).await.unwrap();
        unfollow(&store, bob, alice).await.unwrap();
        assert!(!store.is_following(bob, alice).await.unwrap());
        unfollow(&store, bob, alice).await.unwrap();

        follow(&store, bob, alice).await.unwrap();
        assert_eq!(inbox(&store, alice).await.len(), 2);
    }

    #[tokio::test]
    async fn like_notifies_author_once() {
        let store = MemoryStore::new();
        let alice = user(&store, "alice").await;
        let bob = user(&store, "bob").await;
        let p = post(&store, alice).await;

        like(&store, bob, p).await.unwrap();
        like(&store, bob, p).await.unwrap();

        assert!(like_status(&store, bob, p).await.unwrap());
        assert_eq!(store.find_post(p).await.unwrap().unwrap().like_count, 1);
        assert_eq!(inbox(&store, alice).await, vec![("like".to_string(), bob, Some(p))]);
    }

    #[tokio::test]
    async fn liking_own_post_does_not_notify() {
        let store = MemoryStore::new();
        let alice = user(&store, "alice").await;
        let p = post(&store, alice).await;

        like(&store, alice, p).await.unwrap();
        assert!(store.has_liked(alice, p).await.unwrap());
        assert!(inbox(&store, alice).await.is_empty());
    }

    #[tokio::test]
    async fn like_of_missing_post_is_not_found() {
        let store = MemoryStore::new();
        let alice = user(&store, "alice").await;
        assert_matches!(
            like(&store, alice, 42).await,
            Err(AppError::Core(CoreError::NotFound { entity: "Post", .. }))
        );
    }

    #[tokio::test]
    async fn unlike_removes_edge() {
        let store = MemoryStore::new();
        let alice = user(&store, "alice").await;
        let bob = user(&store, "bob").await;
        let p = post(&store, alice).await;

        like(&store, bob, p).await.unwrap();
        unlike(&store, bob, p).await.unwrap();
        assert!(!like_status(&store, bob, p).await.unwrap());
        unlike(&store, bob, p).await.unwrap();
    }

    #[tokio::test]
    async fn every_comment_notifies_author() {
        let store = MemoryStore::new();
        let alice = user(&store, "alice").await;
        let bob = user(&store, "bob").await;
        let p = post(&store, alice).await;

        comment(&store, bob, p, "hi").await.unwrap();
        comment(&store, bob, p, "again").await.unwrap();
        comment(&store, alice, p, "thanks").await.unwrap();

        assert_eq!(store.list_comments(p).await.unwrap().len(), 3);
        assert_eq!(inbox(&store, alice).await.len(), 2);
        assert!(inbox(&store, bob).await.is_empty());
    }

    #[tokio::test]
    async fn comment_length_is_enforced() {
        let store = MemoryStore::new();
        let alice = user(&store, "alice").await;
        let p = post(&store, alice).await;

        assert_matches!(
            comment(&store, alice, p, "").await,
            Err(AppError::Core(CoreError::Validation(_)))
        );
        assert_matches!(
            comment(&store, alice, p, &"x".repeat(201)).await,
            Err(AppError::Core(CoreError::Validation(_)))
        );
        assert!(comment(&store, alice, p, &"x".repeat(200)).await.is_ok());
    }

    #[tokio::test]
    async fn comment_on_missing_post_is_not_found() {
        let store = MemoryStore::new();
        let alice = user(&store, "alice").await;
        assert_matches!(
            comment(&store, alice, 77, "hi").await,
            Err(AppError::Core(CoreError::NotFound { entity: "Post", .. }))
        );
    }

    #[tokio::test]
    async fn only_author_deletes_comment() {
        let store = MemoryStore::new();
        let alice = user(&store, "alice").await;
        let bob = user(&store, "bob").await;
        let p = post(&store, alice).await;
        let c = comment(&store, bob, p, "hi").await.unwrap();

        assert_matches!(
            delete_comment(&store, alice, p, c.id).await,
            Err(AppError::Core(CoreError::Forbidden(_)))
        );
        delete_comment(&store, bob, p, c.id).await.unwrap();
        assert_matches!(
            delete_comment(&store, bob, p, c.id).await,
            Err(AppError::Core(CoreError::NotFound { entity: "Comment", .. }))
        );
    }

    #[tokio::test]
    async fn comment_must_belong_to_post_in_path() {
        let store = MemoryStore::new();
        let alice = user(&store, "alice").await;
        let p1 = post(&store, alice).await;
        let p2 = post(&store, alice).await;
        let c = comment(&store, alice, p1, "hi").await.unwrap();

        assert_matches!(
            delete_comment(&store, alice, p2, c.id).await,
            Err(AppError::Core(CoreError::NotFound { .. }))
        );
    }

    #[tokio::test]
    async fn store_failure_surfaces() {
        let store = MemoryStore::new();
        let alice = user(&store, "alice").await;
        let bob = user(&store, "bob").await;
        store.set_unavailable(true);

        assert_matches!(follow(&store, bob, alice).await, Err(AppError::Store(_)));
    }
}

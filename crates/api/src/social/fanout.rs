//! Notification fan-out for social actions.

use socialconnect_core::notifications::{should_notify, NotificationKind};
use socialconnect_core::types::DbId;
use socialconnect_db::models::notification::{CreateNotification, Notification};
use socialconnect_db::{Store, StoreResult};

/// Write a notification for `recipient_id` about `sender_id`'s action.
///
/// Returns `Ok(None)` without touching the store when the sender is the
/// recipient. Store failures are returned to the caller.
pub async fn notify<S: Store + ?Sized>(
    store: &S,
    kind: NotificationKind,
    sender_id: DbId,
    recipient_id: DbId,
    post_id: Option<DbId>,
) -> StoreResult<Option<Notification>> {
    if !should_notify(sender_id, recipient_id) {
        tracing::debug!(sender_id, kind = kind.as_str(), "Self-interaction, no notification");
        return Ok(None);
    }

    let notification = store
        .create_notification(&CreateNotification {
            recipient_id,
            sender_id,
            notification_type: kind.as_str().to_string(),
            post_id,
            message: kind.message().to_string(),
        })
        .await?;

    tracing::debug!(
        notification_id = notification.id,
        recipient_id,
        sender_id,
        kind = kind.as_str(),
        "Notification created"
    );
    Ok(Some(notification))
}

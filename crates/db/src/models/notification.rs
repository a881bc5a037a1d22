//! Notification entity model and DTOs.

use serde::Serialize;
use socialconnect_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub recipient_id: DbId,
    pub sender_id: DbId,
    pub notification_type: String,
    pub post_id: Option<DbId>,
    pub message: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a notification.
#[derive(Debug, Clone)]
pub struct CreateNotification {
    pub recipient_id: DbId,
    pub sender_id: DbId,
    pub notification_type: String,
    pub post_id: Option<DbId>,
    pub message: String,
}

//! Handlers for the `/notifications` resource.
//!
//! All endpoints require authentication via [`AuthUser`] and only ever see
//! the caller's own notifications.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use socialconnect_core::types::DbId;
use socialconnect_db::models::notification::Notification;

use crate::error::AppResult;
use crate::extract::{ApiPath, ApiQuery};
use crate::middleware::auth::AuthUser;
use crate::response::Ack;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query / response types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /notifications`.
#[derive(Debug, Deserialize)]
pub struct NotificationQuery {
    /// If `true`, return only unread notifications. Defaults to `false`.
    pub unread_only: Option<bool>,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

/// Maximum page size for notification listing.
const MAX_LIMIT: i64 = 100;

/// Default page size for notification listing.
const DEFAULT_LIMIT: i64 = 50;

#[derive(Debug, Serialize)]
pub struct NotificationListResponse {
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Serialize)]
pub struct UnreadCountResponse {
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct MarkAllReadResponse {
    pub ok: bool,
    pub marked_read: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/notifications
///
/// Newest first, optionally restricted to unread ones.
pub async fn list_notifications(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<NotificationQuery>,
) -> AppResult<Json<NotificationListResponse>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);
    let unread_only = params.unread_only.unwrap_or(false);

    let notifications = state
        .store
        .list_notifications(auth.user_id, unread_only, limit, offset)
        .await?;

    Ok(Json(NotificationListResponse { notifications }))
}

/// GET /api/v1/notifications/unread-count
pub async fn unread_count(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<UnreadCountResponse>> {
    let count = state.store.unread_notification_count(auth.user_id).await?;
    Ok(Json(UnreadCountResponse { count }))
}

/// POST /api/v1/notifications/{id}/read
///
/// Marks the notification read if it belongs to the caller. Someone else's
/// or a non-existent id is accepted and changes nothing.
pub async fn mark_read(
    auth: AuthUser,
    State(state): State<AppState>,
    ApiPath(notification_id): ApiPath<DbId>,
) -> AppResult<Json<Ack>> {
    let updated = state
        .store
        .mark_notification_read(notification_id, auth.user_id)
        .await?;
    tracing::debug!(notification_id, user_id = auth.user_id, updated, "Mark read");
    Ok(Json(Ack::ok()))
}

/// POST /api/v1/notifications/mark-all-read
pub async fn mark_all_read(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<MarkAllReadResponse>> {
    let marked_read = state
        .store
        .mark_all_notifications_read(auth.user_id)
        .await?;
    tracing::info!(user_id = auth.user_id, marked_read, "Marked all notifications read");
    Ok(Json(MarkAllReadResponse {
        ok: true,
        marked_read,
    }))
}

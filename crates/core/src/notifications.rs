//! Notification kinds and the fan-out suppression rule.

use crate::types::DbId;

pub const NOTIFICATION_FOLLOW: &str = "follow";
pub const NOTIFICATION_LIKE: &str = "like";
pub const NOTIFICATION_COMMENT: &str = "comment";

/// The social actions that produce a notification for another user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Follow,
    Like,
    Comment,
}

impl NotificationKind {
    /// Stored value of the `notification_type` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Follow => NOTIFICATION_FOLLOW,
            Self::Like => NOTIFICATION_LIKE,
            Self::Comment => NOTIFICATION_COMMENT,
        }
    }

    /// Human-readable message shown to the recipient.
    pub fn message(self) -> &'static str {
        match self {
            Self::Follow => "started following you",
            Self::Like => "liked your post",
            Self::Comment => "commented on your post",
        }
    }
}

/// A user is never notified about their own action.
///
/// Every fan-out path must go through this check before writing.
pub fn should_notify(sender_id: DbId, recipient_id: DbId) -> bool {
    sender_id != recipient_id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_values_are_lowercase_names() {
        assert_eq!(NotificationKind::Follow.as_str(), "follow");
        assert_eq!(NotificationKind::Like.as_str(), "like");
        assert_eq!(NotificationKind::Comment.as_str(), "comment");
    }

    #[test]
    fn self_interactions_are_suppressed() {
        assert!(!should_notify(7, 7));
        assert!(should_notify(7, 8));
    }

    #[test]
    fn messages_match_action() {
        assert_eq!(NotificationKind::Like.message(), "liked your post");
        assert_eq!(NotificationKind::Follow.message(), "started following you");
    }
}

//! Refresh-token session model and DTOs.

use socialconnect_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A session row from the `sessions` table.
///
/// Only the SHA-256 digest of the refresh token is stored.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub blacklisted: bool,
    pub created_at: Timestamp,
}

/// Why a session can no longer be exchanged for access tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Blacklisted,
    Expired,
}

impl Session {
    /// Classify the session at instant `now`.
    ///
    /// Blacklisting wins over expiry: once revoked, a session reports
    /// `Blacklisted` for the rest of its life.
    pub fn state_at(&self, now: Timestamp) -> SessionState {
        if self.blacklisted {
            SessionState::Blacklisted
        } else if now >= self.expires_at {
            SessionState::Expired
        } else {
            SessionState::Active
        }
    }
}

/// DTO for creating a new session.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
}

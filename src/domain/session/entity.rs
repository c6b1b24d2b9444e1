//! Refresh session entity

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::user::UserId;

/// Lifetime of every refresh session, independent of the access token TTL
pub const REFRESH_SESSION_TTL_DAYS: i64 = 30;

/// A single outstanding refresh grant
///
/// Redeeming the token does not consume the record; expired records are left
/// in place for external cleanup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshSession {
    user_id: UserId,
    #[serde(skip_serializing)]
    token: String,
    expires_at: DateTime<Utc>,
}

impl RefreshSession {
    pub fn new(user_id: UserId, token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            user_id,
            token: token.into(),
            expires_at,
        }
    }

    /// Create a session issued now with the fixed refresh lifetime
    pub fn issue(user_id: UserId, token: impl Into<String>) -> Self {
        Self::new(
            user_id,
            token,
            Utc::now() + Duration::days(REFRESH_SESSION_TTL_DAYS),
        )
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether the session's expiry lies strictly before `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::user::User;

/// Represents a user session, stored server-side under a random token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The ID of the user this session belongs to.
    pub user_id: i64,
    /// The timestamp when the session was created.
    pub created_at: DateTime<Utc>,
    /// The timestamp when the session expires.
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Creates a session for `user_id` that lasts `duration_days`.
    pub fn new(user_id: i64, duration_days: i64) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            created_at: now,
            expires_at: now + Duration::days(duration_days),
        }
    }

    /// Whether the session is past its expiry.
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// The authenticated caller, attached to the request by the auth middleware.
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// The token the session is stored under.
    pub session_id: String,
    pub session: Session,
    pub user: User,
}

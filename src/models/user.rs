use chrono::{DateTime, Utc};
use serde::Serialize;

/// Represents a user in the system.
#[derive(Serialize, Clone, Debug)]
pub struct User {
    /// The unique identifier for the user.
    pub id: i64,
    /// The user's email address.
    pub email: String,
    /// The user's Argon2id password hash (PHC string, salt included).
    #[serde(skip_serializing)]
    pub password: String,
    /// The timestamp when the user was created.
    pub created_at: DateTime<Utc>,
    /// The timestamp when the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A user that has not been stored yet.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    /// Stamps the creation time on an already-hashed credential.
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

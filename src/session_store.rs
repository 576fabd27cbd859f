use std::{collections::HashMap, sync::Arc};

use redis::{aio::ConnectionManager, AsyncCommands};
use tokio::sync::Mutex;

use crate::{
    error::{AppError, Result},
    models::session::Session,
};

/// Server-side session storage, keyed by the token held in the session cookie.
#[derive(Clone)]
pub enum SessionStore {
    /// JSON records under `session:{token}` with a TTL.
    Redis(ConnectionManager),
    /// A process-local map. Expired entries are swept on insert and on read.
    Memory(Arc<Mutex<HashMap<String, Session>>>),
}

fn redis_key(token: &str) -> String {
    format!("session:{}", token)
}

impl SessionStore {
    /// Connects to Redis and returns a store backed by it.
    pub async fn redis(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;
        Ok(SessionStore::Redis(manager))
    }

    /// Creates an empty in-process store.
    pub fn memory() -> Self {
        SessionStore::Memory(Arc::new(Mutex::new(HashMap::new())))
    }

    /// Stores `session` under `token` until it expires.
    pub async fn insert(&self, token: &str, session: &Session) -> Result<()> {
        match self {
            SessionStore::Redis(manager) => {
                let ttl = (session.expires_at - session.created_at).num_seconds().max(1) as u64;
                let session_json = sonic_rs::to_string(session)
                    .map_err(|e| AppError::Internal(format!("Session serialization failed: {}", e)))?;

                let mut conn = manager.clone();
                let _: () = conn.set_ex(redis_key(token), session_json, ttl).await?;
            }
            SessionStore::Memory(map) => {
                let mut map = map.lock().await;
                map.retain(|_, stored| !stored.is_expired());
                map.insert(token.to_string(), session.clone());
            }
        }

        tracing::debug!("✅ Session stored for user: {}", session.user_id);
        Ok(())
    }

    /// Loads the session stored under `token`, if any and not expired.
    pub async fn get(&self, token: &str) -> Result<Option<Session>> {
        let session = match self {
            SessionStore::Redis(manager) => {
                let mut conn = manager.clone();
                let session_json: Option<String> = conn.get(redis_key(token)).await?;

                match session_json {
                    Some(json) => match sonic_rs::from_str::<Session>(&json) {
                        Ok(session) => Some(session),
                        Err(e) => {
                            tracing::warn!("❌ Invalid session JSON: {}", e);
                            None
                        }
                    },
                    None => None,
                }
            }
            SessionStore::Memory(map) => map.lock().await.get(token).cloned(),
        };

        match session {
            Some(session) if session.is_expired() => {
                tracing::debug!("Session expired for user: {}", session.user_id);
                self.remove(token).await?;
                Ok(None)
            }
            other => Ok(other),
        }
    }

    /// Removes the session stored under `token`. Removing a missing session succeeds.
    pub async fn remove(&self, token: &str) -> Result<()> {
        match self {
            SessionStore::Redis(manager) => {
                let mut conn = manager.clone();
                let _: () = conn.del(redis_key(token)).await?;
            }
            SessionStore::Memory(map) => {
                map.lock().await.remove(token);
            }
        }
        Ok(())
    }
}

use deadpool_postgres::Pool;
use tower_cookies::Key;
use crate::config::{Config, SessionBackend};
use crate::error::{AppError, Result};
use crate::session_store::SessionStore;

/// The application's state.
#[derive(Clone)]
pub struct AppState {
    /// The database connection pool.
    pub db: Pool,
    /// Server-side session storage.
    pub sessions: SessionStore,
    /// The key that signs the session cookie.
    pub cookie_key: Key,
    /// The application's configuration.
    pub config: Config,
}

impl AppState {
    /// Creates a new `AppState`, connecting to every backing service.
    ///
    /// Fails if the database is unreachable or the schema cannot be created;
    /// the service cannot run without storage.
    ///
    /// # Arguments
    ///
    /// * `config` - The application's configuration.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `AppState`.
    pub async fn new(config: &Config) -> Result<Self> {
        let db = crate::db::create_pool(&config.database_url)?;
        tracing::info!("✅ PostgreSQL Pool initialized with deadpool-postgres");

        crate::db::ensure_schema(&db).await?;

        let sessions = match config.session_backend {
            SessionBackend::Redis => {
                let store = SessionStore::redis(&config.redis_url).await?;
                tracing::info!("✅ Redis session store connected");
                store
            }
            SessionBackend::Memory => {
                tracing::warn!("⚠️ Using in-memory sessions; they are lost on restart");
                SessionStore::memory()
            }
        };

        Self::from_parts(config, db, sessions)
    }

    /// Assembles an `AppState` from already-built parts.
    pub fn from_parts(config: &Config, db: Pool, sessions: SessionStore) -> Result<Self> {
        let cookie_key = Key::try_from(config.session_secret.as_slice())
            .map_err(|e| AppError::Internal(format!("Invalid cookie key: {:?}", e)))?;

        Ok(AppState {
            db,
            sessions,
            cookie_key,
            config: config.clone(),
        })
    }
}

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use zeroize::{Zeroize, Zeroizing};

/// Minimum length of the cookie signing secret, in bytes.
pub const MIN_SESSION_SECRET_BYTES: usize = 64;

/// Longest session lifetime accepted, in days.
pub const MAX_SESSION_DURATION_DAYS: i64 = 3650;

/// Where server-side sessions are kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionBackend {
    /// Sessions live in Redis and survive restarts.
    Redis,
    /// Sessions live in process memory. Single instance only.
    Memory,
}

impl FromStr for SessionBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(SessionBackend::Redis),
            "memory" => Ok(SessionBackend::Memory),
            other => anyhow::bail!("Unknown SESSION_BACKEND '{}' (expected redis or memory)", other),
        }
    }
}

/// The application's configuration.
#[derive(Clone)]
pub struct Config {
    /// The PostgreSQL connection string (URL or key=value form).
    pub database_url: String,
    /// The address the HTTP server binds to.
    pub listen_addr: SocketAddr,
    /// The secret used to sign the session cookie.
    pub session_secret: Zeroizing<Vec<u8>>,
    /// The session store backend.
    pub session_backend: SessionBackend,
    /// The URL of the Redis server.
    pub redis_url: String,
    /// The duration of a session in days.
    pub session_duration_days: i64,
    /// The directory holding front-end component folders.
    pub components_dir: PathBuf,
    /// The directory served for unmatched paths.
    pub public_dir: PathBuf,
    /// Whether cookies carry the `Secure` attribute.
    pub secure_cookies: bool,
    /// Origins allowed by CORS.
    pub cors_origins: Vec<String>,
}

impl Config {
    /// Creates a new `Config` from environment variables.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Config`.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Creates a new `Config` from an arbitrary variable lookup.
    ///
    /// # Arguments
    ///
    /// * `var` - Returns the value of a variable, or `None` when unset.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Config`.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut secret_hex = var("SESSION_SECRET")
            .context("SESSION_SECRET must be set (generate with: openssl rand -hex 64)")?;

        let secret_bytes = hex::decode(secret_hex.trim())
            .context("SESSION_SECRET must be valid hexadecimal")?;

        secret_hex.zeroize();

        if secret_bytes.len() < MIN_SESSION_SECRET_BYTES {
            anyhow::bail!(
                "SESSION_SECRET must be at least {} bytes ({} hex characters)",
                MIN_SESSION_SECRET_BYTES,
                MIN_SESSION_SECRET_BYTES * 2
            );
        }

        let session_duration_days: i64 = var("SESSION_DURATION_DAYS")
            .unwrap_or_else(|| "7".to_string())
            .parse()
            .context("Invalid SESSION_DURATION_DAYS")?;

        if session_duration_days <= 0 {
            anyhow::bail!("SESSION_DURATION_DAYS must be positive");
        }

        if session_duration_days > MAX_SESSION_DURATION_DAYS {
            anyhow::bail!(
                "SESSION_DURATION_DAYS must be at most {}",
                MAX_SESSION_DURATION_DAYS
            );
        }

        let cors_origins = var("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000,http://127.0.0.1:3000".to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            database_url: var("DATABASE_URL").context("DATABASE_URL must be set")?,
            listen_addr: var("LISTEN_ADDR")
                .unwrap_or_else(|| "127.0.0.1:3000".to_string())
                .parse()
                .context("Invalid LISTEN_ADDR")?,
            session_secret: Zeroizing::new(secret_bytes),
            session_backend: var("SESSION_BACKEND")
                .unwrap_or_else(|| "redis".to_string())
                .parse()?,
            redis_url: var("REDIS_URL")
                .unwrap_or_else(|| "redis://127.0.0.1:6379".to_string()),
            session_duration_days,
            components_dir: var("COMPONENTS_DIR")
                .unwrap_or_else(|| "./client/src/components".to_string())
                .into(),
            public_dir: var("PUBLIC_DIR")
                .unwrap_or_else(|| "./public".to_string())
                .into(),
            secure_cookies: var("APP_ENV")
                .map(|app_env| app_env == "production")
                .unwrap_or(false),
            cors_origins,
        })
    }
}

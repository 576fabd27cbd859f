#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use sentencebox::{
    build_router, db, session_store::SessionStore, AppState, Config,
};
use tempfile::TempDir;

/// A database URL that never answers; the pool only connects on first use.
pub const UNREACHABLE_DATABASE_URL: &str = "host=127.0.0.1 port=1 user=nobody dbname=nothing";

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Builds a config for tests without touching the process environment.
pub fn test_config(database_url: &str, components_dir: &Path) -> Config {
    let secret = "5a".repeat(64);
    let components = components_dir.to_string_lossy().to_string();
    Config::from_vars(|key| match key {
        "DATABASE_URL" => Some(database_url.to_string()),
        "SESSION_SECRET" => Some(secret.clone()),
        "SESSION_BACKEND" => Some("memory".to_string()),
        "COMPONENTS_DIR" => Some(components.clone()),
        _ => None,
    })
    .unwrap()
}

/// A unique email per call, so tests can share one database.
pub fn unique_email(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}_{}_{}@example.com", prefix, nanos, n)
}

// Shared test context
pub struct TestContext {
    pub client: reqwest::Client,
    pub base_url: String,
    _components: TempDir,
}

impl TestContext {
    /// A fresh client with its own cookie jar, against the same server.
    pub fn new_client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .unwrap()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn register(&self, client: &reqwest::Client, email: &str, password: &str) -> reqwest::Response {
        client
            .post(self.url("/api/users"))
            .form(&[("email", email), ("password", password)])
            .send()
            .await
            .unwrap()
    }

    pub async fn login(&self, client: &reqwest::Client, email: &str, password: &str) -> reqwest::Response {
        client
            .post(self.url("/api/login"))
            .form(&[("email", email), ("password", password)])
            .send()
            .await
            .unwrap()
    }

    /// Registers and logs in a new user on `client`.
    pub async fn signed_in_user(&self, client: &reqwest::Client, prefix: &str) -> String {
        let email = unique_email(prefix);
        let reg = self.register(client, &email, "SecurePass123!").await;
        assert_eq!(reg.status().as_u16(), 200, "Registration failed");
        let login = self.login(client, &email, "SecurePass123!").await;
        assert_eq!(login.status().as_u16(), 200, "Login failed");
        email
    }

    pub async fn add_sentence(&self, client: &reqwest::Client, text: &str, url: &str) -> reqwest::Response {
        client
            .post(self.url("/api/sentences"))
            .form(&[("text", text), ("url", url)])
            .send()
            .await
            .unwrap()
    }
}

/// Reads `TEST_DATABASE_URL`. Database tests are `#[ignore]`d, so reaching
/// this without the variable means they were requested explicitly.
pub fn test_database_url() -> String {
    std::env::var("TEST_DATABASE_URL")
        .expect("TEST_DATABASE_URL must be set to run the database tests")
}

/// Starts the full application on an ephemeral port against `TEST_DATABASE_URL`.
pub async fn spawn_app() -> TestContext {
    let database_url = test_database_url();
    let components = tempfile::tempdir().unwrap();
    std::fs::create_dir(components.path().join("jquery")).unwrap();

    let config = test_config(&database_url, components.path());
    let pool = db::create_pool(&database_url).unwrap();
    db::ensure_schema(&pool).await.unwrap();
    let state = AppState::from_parts(&config, pool, SessionStore::memory()).unwrap();
    let app = build_router(state).unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    let client = reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .unwrap();

    TestContext {
        client,
        base_url: format!("http://{}", addr),
        _components: components,
    }
}

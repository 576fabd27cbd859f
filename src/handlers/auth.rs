use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
    Extension, Form,
};
use tower_cookies::{Cookies, Cookie};
use tower_cookies::cookie::time::Duration;
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    middleware_layer::auth::{extract_session_token, SESSION_COOKIE},
    models::session::{AuthContext, Session},
    response,
    services::auth as auth_service,
    state::AppState,
};

/// The form fields for user login.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// The response payload for authentication-related requests.
#[derive(Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub message: String,
}

/// Creates the session cookie carrying `value`.
fn create_session_cookie(value: String, max_age_days: i64, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, value);

    cookie.set_http_only(true);
    if secure {
        cookie.set_secure(true);
    }

    cookie.set_same_site(tower_cookies::cookie::SameSite::Lax);
    cookie.set_max_age(Duration::days(max_age_days));
    cookie.set_path("/");

    cookie
}

/// Handles user login.
///
/// Any session the caller already had is discarded before a new one is bound.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    tracing::info!("🔐 Login attempt for: {}", form.email);

    let user = auth_service::authenticate_user(&state.db, &form.email, form.password).await?;

    if let Some(previous) = extract_session_token(&cookies, &state) {
        state.sessions.remove(&previous).await?;
        tracing::debug!("Discarded previous session");
    }

    let session_id = crate::crypto::token::generate_session_token();
    let session = Session::new(user.id, state.config.session_duration_days);
    state.sessions.insert(&session_id, &session).await?;

    cookies.signed(&state.cookie_key).add(create_session_cookie(
        session_id,
        state.config.session_duration_days,
        state.config.secure_cookies,
    ));

    tracing::info!("✅ User logged in: {}", user.id);

    response::json(
        StatusCode::OK,
        &AuthResponse {
            success: true,
            message: format!("User id is {}", user.id),
        },
    )
}

/// Handles user logout.
#[axum::debug_handler]
pub async fn logout(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    cookies: Cookies,
) -> Result<Response> {
    tracing::info!("👋 Logout for user: {}", ctx.user.id);

    state.sessions.remove(&ctx.session_id).await?;

    let mut session_cookie = Cookie::new(SESSION_COOKIE, "");
    session_cookie.set_max_age(Duration::seconds(0));
    session_cookie.set_path("/");
    cookies.remove(session_cookie);

    tracing::info!("✅ User logged out: {}", ctx.user.id);

    response::json(
        StatusCode::ACCEPTED,
        &AuthResponse {
            success: true,
            message: "Logout successful".to_string(),
        },
    )
}

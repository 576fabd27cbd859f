use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tower_cookies::Cookies;

use crate::{
    error::{AppError, Result},
    models::session::AuthContext,
    repositories::user as user_repo,
    state::AppState,
};

/// The name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session_id";

/// Extracts the session token from the signed session cookie.
///
/// # Arguments
///
/// * `cookies` - The request cookies.
/// * `state` - The application state, for the signing key.
///
/// # Returns
///
/// An `Option` containing the token if the cookie is present and its signature is valid.
pub fn extract_session_token(cookies: &Cookies, state: &AppState) -> Option<String> {
    cookies
        .signed(&state.cookie_key)
        .get(SESSION_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty())
}

/// A middleware that requires a valid session whose user still exists.
///
/// On success the request carries an `AuthContext` extension; otherwise the
/// request is answered with 403 and the handler never runs.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `cookies` - The request cookies.
/// * `request` - The incoming request.
/// * `next` - The next middleware in the chain.
///
/// # Returns
///
/// A `Response` or an `AppError`.
pub async fn require_auth(
    State(state): State<AppState>,
    cookies: Cookies,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response> {
    tracing::debug!("🔐 Checking authentication...");

    let session_id = extract_session_token(&cookies, &state).ok_or_else(|| {
        tracing::warn!("❌ No valid session_id cookie found");
        AppError::Unauthorized
    })?;

    let session = state.sessions.get(&session_id).await?.ok_or_else(|| {
        tracing::warn!("❌ Session not found or expired");
        AppError::Unauthorized
    })?;

    let user = match user_repo::find_by_id(&state.db, session.user_id).await? {
        Some(user) => user,
        None => {
            tracing::warn!("❌ Session refers to missing user: {}", session.user_id);
            state.sessions.remove(&session_id).await?;
            return Err(AppError::Unauthorized);
        }
    };

    tracing::debug!("✅ User authenticated: {}", user.id);

    request.extensions_mut().insert(AuthContext {
        session_id,
        session,
        user,
    });

    Ok(next.run(request).await)
}

use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
    Extension, Form,
};
use serde::Deserialize;

use crate::{
    error::Result,
    models::session::AuthContext,
    response,
    services::auth as auth_service,
    state::AppState,
    validation::auth::{validate_email, validate_password},
};

/// The form fields for user registration.
#[derive(Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Handles user registration.
#[axum::debug_handler]
pub async fn create_user(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    tracing::info!("📝 Register attempt for: {}", form.email);
    validate_email(&form.email)?;
    validate_password(&form.password)?;

    let user = auth_service::register_user(&state.db, form.email, form.password).await?;

    response::json(StatusCode::OK, &user)
}

/// Returns the authenticated user.
#[axum::debug_handler]
pub async fn me(Extension(ctx): Extension<AuthContext>) -> Result<Response> {
    response::json(StatusCode::OK, &ctx.user)
}

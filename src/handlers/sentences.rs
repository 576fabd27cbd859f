use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Response,
    Extension, Form,
};
use serde::Deserialize;

use crate::{
    error::Result,
    models::session::AuthContext,
    response,
    services::sentences as sentence_service,
    state::AppState,
};

/// The form fields for submitting a sentence.
#[derive(Deserialize)]
pub struct CreateSentenceForm {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub url: String,
}

/// Stores a sentence for the caller.
#[axum::debug_handler]
pub async fn create_sentence(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Form(form): Form<CreateSentenceForm>,
) -> Result<Response> {
    let sentence =
        sentence_service::create_sentence(&state, ctx.user.id, form.text, form.url).await?;

    response::json(StatusCode::OK, &sentence)
}

/// Lists the caller's sentences.
#[axum::debug_handler]
pub async fn list_sentences(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<Response> {
    let sentences = sentence_service::list_sentences(&state, ctx.user.id).await?;
    response::json(StatusCode::OK, &sentences)
}

/// Deletes one of the caller's sentences.
#[axum::debug_handler]
pub async fn delete_sentence(
    State(state): State<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(sentence_id): Path<i64>,
) -> Result<Response> {
    sentence_service::delete_sentence(&state, ctx.user.id, sentence_id).await?;

    response::json(
        StatusCode::OK,
        &sonic_rs::json!({
            "success": true,
            "message": "Sentence deleted successfully"
        }),
    )
}

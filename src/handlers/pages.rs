use axum::{extract::State, response::Html};

use crate::{assets, error::Result, state::AppState, views};

/// Renders the landing page with the current component scripts.
#[axum::debug_handler]
pub async fn home(State(state): State<AppState>) -> Result<Html<String>> {
    let scripts = assets::js_components(&state.config.components_dir).await?;
    Ok(Html(views::render_home(&scripts)))
}

use crate::{
    error::{AppError, Result},
    models::sentence::{NewSentence, Sentence, SentenceFilter},
    repositories::sentence as sentence_repo,
    state::AppState,
};

/// Validates and stores a sentence owned by `user_id`.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `user_id` - The ID of the user submitting the sentence.
/// * `text` - The sentence text.
/// * `url` - The page the sentence was taken from.
///
/// # Returns
///
/// A `Result` containing the stored `Sentence`, or `AppError::Validation`.
pub async fn create_sentence(
    state: &AppState,
    user_id: i64,
    text: String,
    url: String,
) -> Result<Sentence> {
    let sentence = NewSentence::new(user_id, text, url);
    sentence.validate()?;

    let stored = sentence_repo::insert_sentence(&state.db, &sentence).await?;
    tracing::info!("✅ Sentence {} stored for user {}", stored.id, user_id);
    Ok(stored)
}

/// Lists the sentences owned by `user_id`, oldest first.
pub async fn list_sentences(state: &AppState, user_id: i64) -> Result<Vec<Sentence>> {
    sentence_repo::list_sentences(&state.db, SentenceFilter::Owner(user_id)).await
}

/// Deletes one of `user_id`'s sentences.
///
/// A sentence that does not exist or belongs to someone else is `AppError::NotFound`.
pub async fn delete_sentence(state: &AppState, user_id: i64, sentence_id: i64) -> Result<()> {
    let removed =
        sentence_repo::delete_sentence(&state.db, sentence_id, SentenceFilter::Owner(user_id))
            .await?;

    if removed == 0 {
        return Err(AppError::NotFound);
    }

    tracing::info!("🗑️ Sentence {} deleted by user {}", sentence_id, user_id);
    Ok(())
}

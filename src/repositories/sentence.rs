use deadpool_postgres::Pool;
use tokio_postgres::Row;
use crate::{
    error::{AppError, Result},
    models::sentence::{NewSentence, Sentence, SentenceFilter},
};

fn row_to_sentence(row: &Row) -> Result<Sentence> {
    Ok(Sentence {
        id: row.try_get("id").map_err(|_| AppError::MissingData("id".to_string()))?,
        user_id: row.try_get("user_id").map_err(|_| AppError::MissingData("user_id".to_string()))?,
        text: row.try_get("text").map_err(|_| AppError::MissingData("text".to_string()))?,
        url: row.try_get("url").map_err(|_| AppError::MissingData("url".to_string()))?,
        created_at: row.try_get("created_at").map_err(|_| AppError::MissingData("created_at".to_string()))?,
    })
}

/// Inserts a sentence and returns it with its generated id.
///
/// The caller is expected to have validated it.
pub async fn insert_sentence(pool: &Pool, sentence: &NewSentence) -> Result<Sentence> {
    let client = pool.get().await?;
    let statement = client
        .prepare_cached(
            r#"
            INSERT INTO sentences (user_id, text, url, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, text, url, created_at
            "#,
        )
        .await?;

    let row = client
        .query_one(
            &statement,
            &[&sentence.user_id, &sentence.text, &sentence.url, &sentence.created_at],
        )
        .await?;
    row_to_sentence(&row)
}

/// Lists sentences in ascending id order.
///
/// # Arguments
///
/// * `pool` - The database connection pool.
/// * `filter` - `All`, or only those owned by one user.
///
/// # Returns
///
/// A `Result` containing the matching sentences.
pub async fn list_sentences(pool: &Pool, filter: SentenceFilter) -> Result<Vec<Sentence>> {
    let client = pool.get().await?;
    let owner = filter.owner();
    let statement = client
        .prepare_cached(
            r#"
            SELECT id, user_id, text, url, created_at
            FROM sentences
            WHERE ($1::BIGINT IS NULL OR user_id = $1)
            ORDER BY id ASC
            "#,
        )
        .await?;

    let rows = client.query(&statement, &[&owner]).await?;
    rows.iter().map(row_to_sentence).collect()
}

/// Deletes a sentence by id.
///
/// With `SentenceFilter::Owner` the row is only removed if that user owns it.
///
/// # Returns
///
/// The number of rows removed, 0 or 1.
pub async fn delete_sentence(pool: &Pool, sentence_id: i64, filter: SentenceFilter) -> Result<u64> {
    let client = pool.get().await?;
    let owner = filter.owner();
    let statement = client
        .prepare_cached(
            r#"
            DELETE FROM sentences
            WHERE id = $1 AND ($2::BIGINT IS NULL OR user_id = $2)
            "#,
        )
        .await?;

    Ok(client.execute(&statement, &[&sentence_id, &owner]).await?)
}

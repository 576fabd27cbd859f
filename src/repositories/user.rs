use deadpool_postgres::Pool;
use tokio_postgres::{error::SqlState, Row};
use crate::{
    error::{AppError, Result},
    models::user::{NewUser, User},
};

const USER_COLUMNS: &str = "id, email, password, created_at, updated_at";

/// A helper function to map a `tokio_postgres::Row` to a `User`.
fn row_to_user(row: &Row) -> Result<User> {
    Ok(User {
        id: row.try_get("id").map_err(|_| AppError::MissingData("id".to_string()))?,
        email: row.try_get("email").map_err(|_| AppError::MissingData("email".to_string()))?,
        password: row.try_get("password").map_err(|_| AppError::MissingData("password".to_string()))?,
        created_at: row.try_get("created_at").map_err(|_| AppError::MissingData("created_at".to_string()))?,
        updated_at: row.try_get("updated_at").map_err(|_| AppError::MissingData("updated_at".to_string()))?,
    })
}

/// Inserts a new user and returns it with its generated id.
///
/// An email that is already registered yields `AppError::Conflict`.
pub async fn create_user(pool: &Pool, user: &NewUser) -> Result<User> {
    let client = pool.get().await?;
    let query = format!(
        "INSERT INTO users (email, password, created_at, updated_at) \
         VALUES ($1, $2, $3, $3) RETURNING {USER_COLUMNS}"
    );
    let statement = client.prepare_cached(&query).await?;

    let row = client
        .query_one(&statement, &[&user.email, &user.password_hash, &user.created_at])
        .await
        .map_err(|e| {
            if e.code() == Some(&SqlState::UNIQUE_VIOLATION) {
                AppError::Conflict("Email is already registered".to_string())
            } else {
                AppError::Database(e)
            }
        })?;
    row_to_user(&row)
}

/// Finds a user by their email address.
pub async fn find_by_email(pool: &Pool, email: &str) -> Result<Option<User>> {
    let client = pool.get().await?;
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
    let statement = client.prepare_cached(&query).await?;

    let row = client.query_opt(&statement, &[&email]).await?;
    row.map(|r| row_to_user(&r)).transpose()
}

/// Finds a user by their ID.
pub async fn find_by_id(pool: &Pool, user_id: i64) -> Result<Option<User>> {
    let client = pool.get().await?;
    let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
    let statement = client.prepare_cached(&query).await?;

    let row = client.query_opt(&statement, &[&user_id]).await?;
    row.map(|r| row_to_user(&r)).transpose()
}

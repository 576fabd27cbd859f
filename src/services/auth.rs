use crate::error::{AppError, Result};
use crate::models::user::{NewUser, User};
use crate::repositories::user as user_repo;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder,
};
use deadpool_postgres::Pool;
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroize;

/// The memory cost for Argon2 in MB.
const ARGON2_MEMORY_MB: u32 = 19;
/// The number of iterations for Argon2.
const ARGON2_ITERATIONS: u32 = 3;
/// The parallelism factor for Argon2.
const ARGON2_PARALLELISM: u32 = 6;

/// The message returned for every failed login.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Hashes a password using Argon2id with a fresh random salt.
///
/// # Arguments
///
/// * `password` - The password to hash.
///
/// # Returns
///
/// A `Result` containing the PHC-format hash, salt included.
pub fn hash_password(password: &str) -> Result<String> {
    let mut password_bytes = password.as_bytes().to_vec();

    let mut salt_bytes = [0u8; 16];
    OsRng
        .try_fill_bytes(&mut salt_bytes)
        .map_err(|e| AppError::Internal(format!("Failed to generate salt: {}", e)))?;

    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| AppError::Crypto(format!("Salt encoding error: {}", e)))?;

    let argon2 = Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        ParamsBuilder::new()
            .m_cost(ARGON2_MEMORY_MB * 1024)
            .t_cost(ARGON2_ITERATIONS)
            .p_cost(ARGON2_PARALLELISM)
            .build()
            .map_err(|e| AppError::Crypto(format!("Argon2 params: {}", e)))?,
    );

    let password_hash = argon2
        .hash_password(&password_bytes, &salt)
        .map_err(|e| AppError::Crypto(format!("Argon2 hash error: {}", e)))?
        .to_string();

    password_bytes.zeroize();
    tracing::debug!("Password hashed successfully with Argon2");
    Ok(password_hash)
}

/// Verifies a password against a stored hash.
///
/// # Arguments
///
/// * `password` - The password to verify.
/// * `hash` - The PHC-format hash to verify against.
///
/// # Returns
///
/// A `Result` containing `true` if the password matches, `false` otherwise.
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let mut password_bytes = password.as_bytes().to_vec();
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Crypto(format!("Hash parse error: {}", e)))?;

    let result = match Argon2::default().verify_password(&password_bytes, &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::Crypto(format!("Verify error: {}", e))),
    };

    password_bytes.zeroize();
    tracing::debug!("Password verification completed");
    result
}

/// Runs a blocking Argon2 operation off the async executor.
async fn blocking<T, F>(op: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
}

/// Registers a new user.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `email` - The user's email address, already validated.
/// * `password` - The user's plaintext password, already validated.
///
/// # Returns
///
/// A `Result` containing the created `User`.
pub async fn register_user(db: &Pool, email: String, password: String) -> Result<User> {
    tracing::debug!("🔐 Creating user: {}", email);

    let hashed_password = blocking(move || hash_password(&password)).await?;
    let user = user_repo::create_user(db, &NewUser::new(email, hashed_password)).await?;

    tracing::info!("✅ User created with ID: {}", user.id);
    Ok(user)
}

/// Authenticates a user by email and password.
///
/// Unknown emails and wrong passwords produce the same error.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `email` - The submitted email address.
/// * `password` - The submitted password.
///
/// # Returns
///
/// A `Result` containing the authenticated `User`.
pub async fn authenticate_user(db: &Pool, email: &str, password: String) -> Result<User> {
    tracing::debug!("🔐 Authenticating user: {}", email);

    let user = user_repo::find_by_email(db, email)
        .await?
        .ok_or_else(|| AppError::Authentication(INVALID_CREDENTIALS.to_string()))?;

    let stored_hash = user.password.clone();
    if !blocking(move || verify_password(&password, &stored_hash)).await? {
        return Err(AppError::Authentication(INVALID_CREDENTIALS.to_string()));
    }

    tracing::info!("✅ User authenticated: {}", user.id);

    Ok(user)
}

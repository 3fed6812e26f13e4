use crate::errors::AppError;
use crate::models::user::UNUSABLE_PASSWORD_PREFIX;
use rand::distributions::Alphanumeric;
use rand::Rng;
use tokio::task::spawn_blocking;

/// bcrypt is CPU-bound, so hashing runs off the async workers.
pub(super) async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|_| AppError::Persistence("Hashing failed".to_string()))?
        .map_err(|e| AppError::Persistence(e.to_string()))
}

pub(super) async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|_| AppError::Persistence("Password verification error".to_string()))?
        .map_err(|e| AppError::Persistence(e.to_string()))
}

/// A stored value no password can verify against.
pub(super) fn unusable_password() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(40)
        .map(char::from)
        .collect();
    format!("{}{}", UNUSABLE_PASSWORD_PREFIX, suffix)
}

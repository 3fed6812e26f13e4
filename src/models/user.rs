use chrono::{DateTime, Utc};

/// Stored user row. Deliberately not `Serialize`: the hash must only leave
/// the store through the user serializer's allow-list.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
}

impl User {
    /// Whether the stored password can ever match (see `UNUSABLE_PASSWORD_PREFIX`).
    pub fn has_usable_password(&self) -> bool {
        !self.password.starts_with(UNUSABLE_PASSWORD_PREFIX)
    }
}

/// Marks accounts created without a password. bcrypt hashes start with `$`.
pub const UNUSABLE_PASSWORD_PREFIX: &str = "!";

/// Values for creating or fully updating a user.
///
/// `password` is plaintext and is hashed by the store. On update, `None`
/// keeps the current hash.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: Option<String>,
    pub is_active: bool,
}

impl NewUser {
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: None,
            is_active: true,
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }
}

use super::{Mode, Writable};
use crate::errors::AppError;
use crate::models::{NewUser, User};
use crate::utils::validation::{
    required, validate_email_or_blank, validate_payload, INVALID_STRING, USERNAME_RE,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const FIELDS: &[&str] = &["id", "username", "email"];

#[derive(Debug, Serialize)]
pub struct UserOut {
    pub id: i64,
    pub username: String,
    pub email: String,
}

impl From<&User> for UserOut {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        }
    }
}

/// `password` is accepted on input and never rendered.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UserInput {
    #[validate(length(min = 1, max = 150, message = "Ensure this field has between 1 and 150 characters."))]
    #[validate(regex(
        path = "USERNAME_RE",
        message = "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
    ))]
    pub username: Option<String>,

    #[validate(custom = "validate_email_or_blank")]
    pub email: Option<String>,

    #[validate(length(min = 8, max = 128, message = "Password must be between 8 and 128 characters"))]
    pub password: Option<String>,
}

impl Writable for UserInput {
    const WRITABLE: &'static [(&'static str, &'static str)] = &[("username", INVALID_STRING), ("email", INVALID_STRING), ("password", INVALID_STRING)];
}

impl UserInput {
    pub fn resolve(self, current: Option<&User>, mode: Mode) -> Result<NewUser, AppError> {
        let mut errors = validate_payload(&self);
        let fallback = mode.fallback(current);

        let username = required(
            &mut errors,
            "username",
            self.username,
            fallback.map(|u| u.username.clone()),
        );
        let (Some(username), true) = (username, errors.is_empty()) else {
            return Err(errors.into());
        };

        Ok(NewUser {
            username,
            email: self
                .email
                .or_else(|| fallback.map(|u| u.email.clone()))
                .unwrap_or_default(),
            password: self.password,
            is_active: current.map_or(true, |u| u.is_active),
        })
    }
}

//! Wire representations of the entities.
//!
//! Each entity declares its exposed fields in a static `FIELDS` table and a
//! matching output struct; nothing outside that list reaches a response.
//! Input payloads are all-optional so one type serves create, full update
//! (`PUT`) and partial update (`PATCH`); `resolve` decides which fields are
//! required.

pub mod activity;
pub mod leaderboard;
pub mod team;
pub mod user;
pub mod workout;

pub use activity::{ActivityInput, ActivityOut};
pub use leaderboard::{LeaderboardInput, LeaderboardOut};
pub use team::{TeamInput, TeamOut};
pub use user::{UserInput, UserOut};
pub use workout::{WorkoutInput, WorkoutOut};

use crate::errors::{AppError, FieldErrors, NON_FIELD_ERRORS};
use crate::utils::validation::{required, validate_payload, INVALID_PK, NOT_NULL};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use validator::Validate;

/// How an input payload is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    /// `PUT`: every required field must be supplied.
    Replace,
    /// `PATCH`: absent fields keep their stored value.
    Partial,
}

impl Mode {
    /// The stored record, but only when absent input fields should fall back to it.
    fn fallback<'a, T>(self, current: Option<&'a T>) -> Option<&'a T> {
        match self {
            Mode::Partial => current,
            Mode::Create | Mode::Replace => None,
        }
    }
}

/// An input payload read from a JSON object one field at a time, so every
/// malformed field is reported under its own name.
pub trait Writable: DeserializeOwned {
    /// Writable wire fields, each with the message used when its value has the
    /// wrong type or format. Other keys are ignored.
    const WRITABLE: &'static [(&'static str, &'static str)];

    fn from_body(body: Value) -> Result<Self, AppError> {
        let Value::Object(object) = body else {
            return Err(AppError::field(
                NON_FIELD_ERRORS,
                "Invalid data. Expected a dictionary.",
            ));
        };

        let mut fields = FieldErrors::new();
        for &(name, invalid) in Self::WRITABLE {
            let Some(value) = object.get(name) else {
                continue;
            };
            if value.is_null() {
                fields.insert(name.to_string(), vec![NOT_NULL.to_string()]);
                continue;
            }
            let mut single = Map::new();
            single.insert(name.to_string(), value.clone());
            if serde_json::from_value::<Self>(Value::Object(single)).is_err() {
                fields.insert(name.to_string(), vec![invalid.to_string()]);
            }
        }
        if !fields.is_empty() {
            return Err(AppError::Validation(fields));
        }

        serde_json::from_value(Value::Object(object))
            .map_err(|err| AppError::BadRequest(err.to_string()))
    }
}

/// Body of the association endpoints, e.g. `{"user": 3}`.
#[derive(Debug, Deserialize, Validate)]
pub struct LinkInput {
    #[validate(range(min = 1, message = "Invalid pk - object does not exist."))]
    pub user: Option<i64>,
}

impl Writable for LinkInput {
    const WRITABLE: &'static [(&'static str, &'static str)] = &[("user", INVALID_PK)];
}

impl LinkInput {
    pub fn user_id(self) -> Result<i64, AppError> {
        let mut errors = validate_payload(&self);
        let user = required(&mut errors, "user", self.user, None);
        let (Some(user), true) = (user, errors.is_empty()) else {
            return Err(errors.into());
        };
        Ok(user)
    }
}

/// Sort and dedupe an id list coming off the wire.
fn id_set(mut ids: Vec<i64>) -> Vec<i64> {
    ids.sort_unstable();
    ids.dedup();
    ids
}

use super::{Mode, Writable};
use crate::errors::AppError;
use crate::models::{Activity, NewActivity};
use crate::utils::validation::{
    required, validate_payload, INVALID_DATE, INVALID_INTEGER, INVALID_PK, INVALID_STRING,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const FIELDS: &[&str] = &["id", "user", "activity_type", "duration", "calories", "date"];

#[derive(Debug, Serialize)]
pub struct ActivityOut {
    pub id: i64,
    pub user: i64,
    pub activity_type: String,
    pub duration: i64,
    pub calories: i64,
    pub date: NaiveDate,
}

impl From<&Activity> for ActivityOut {
    fn from(activity: &Activity) -> Self {
        Self {
            id: activity.id,
            user: activity.user_id,
            activity_type: activity.activity_type.clone(),
            duration: activity.duration,
            calories: activity.calories,
            date: activity.date,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct ActivityInput {
    pub user: Option<i64>,

    #[validate(length(min = 1, max = 100, message = "Ensure this field has between 1 and 100 characters."))]
    pub activity_type: Option<String>,

    #[validate(range(min = 0, message = "Ensure this value is greater than or equal to 0."))]
    pub duration: Option<i64>,

    #[validate(range(min = 0, message = "Ensure this value is greater than or equal to 0."))]
    pub calories: Option<i64>,

    pub date: Option<NaiveDate>,
}

impl Writable for ActivityInput {
    const WRITABLE: &'static [(&'static str, &'static str)] = &[
        ("user", INVALID_PK),
        ("activity_type", INVALID_STRING),
        ("duration", INVALID_INTEGER),
        ("calories", INVALID_INTEGER),
        ("date", INVALID_DATE),
    ];
}

impl ActivityInput {
    pub fn resolve(self, current: Option<&Activity>, mode: Mode) -> Result<NewActivity, AppError> {
        let mut errors = validate_payload(&self);
        let fallback = mode.fallback(current);

        let user_id = required(&mut errors, "user", self.user, fallback.map(|a| a.user_id));
        let activity_type = required(
            &mut errors,
            "activity_type",
            self.activity_type,
            fallback.map(|a| a.activity_type.clone()),
        );
        let duration = required(&mut errors, "duration", self.duration, fallback.map(|a| a.duration));
        let calories = required(&mut errors, "calories", self.calories, fallback.map(|a| a.calories));
        let date = required(&mut errors, "date", self.date, fallback.map(|a| a.date));

        let (Some(user_id), Some(activity_type), Some(duration), Some(calories), Some(date), true) =
            (user_id, activity_type, duration, calories, date, errors.is_empty())
        else {
            return Err(errors.into());
        };

        Ok(NewActivity {
            user_id,
            activity_type,
            duration,
            calories,
            date,
        })
    }
}

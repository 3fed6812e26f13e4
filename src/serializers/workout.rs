use super::{id_set, Mode, Writable};
use crate::errors::AppError;
use crate::models::{NewWorkout, Workout};
use crate::utils::validation::{required, validate_payload, INVALID_PK_LIST, INVALID_STRING};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const FIELDS: &[&str] = &["id", "name", "description", "difficulty", "suggested_for"];

#[derive(Debug, Serialize)]
pub struct WorkoutOut {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub difficulty: String,
    pub suggested_for: Vec<i64>,
}

impl From<&Workout> for WorkoutOut {
    fn from(workout: &Workout) -> Self {
        Self {
            id: workout.id,
            name: workout.name.clone(),
            description: workout.description.clone(),
            difficulty: workout.difficulty.clone(),
            suggested_for: workout.suggested_for.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct WorkoutInput {
    #[validate(length(min = 1, max = 100, message = "Ensure this field has between 1 and 100 characters."))]
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Ensure this field has between 1 and 50 characters."))]
    pub difficulty: Option<String>,

    pub suggested_for: Option<Vec<i64>>,
}

impl Writable for WorkoutInput {
    const WRITABLE: &'static [(&'static str, &'static str)] = &[
        ("name", INVALID_STRING),
        ("description", INVALID_STRING),
        ("difficulty", INVALID_STRING),
        ("suggested_for", INVALID_PK_LIST),
    ];
}

impl WorkoutInput {
    pub fn resolve(self, current: Option<&Workout>, mode: Mode) -> Result<NewWorkout, AppError> {
        let mut errors = validate_payload(&self);
        let fallback = mode.fallback(current);

        let name = required(&mut errors, "name", self.name, fallback.map(|w| w.name.clone()));
        let difficulty = required(
            &mut errors,
            "difficulty",
            self.difficulty,
            fallback.map(|w| w.difficulty.clone()),
        );
        let (Some(name), Some(difficulty), true) = (name, difficulty, errors.is_empty()) else {
            return Err(errors.into());
        };

        Ok(NewWorkout {
            name,
            description: self
                .description
                .or_else(|| fallback.map(|w| w.description.clone()))
                .unwrap_or_default(),
            difficulty,
            suggested_for: id_set(
                self.suggested_for
                    .or_else(|| fallback.map(|w| w.suggested_for.clone()))
                    .unwrap_or_default(),
            ),
        })
    }
}

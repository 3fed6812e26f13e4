use super::{id_set, Mode, Writable};
use crate::errors::AppError;
use crate::models::{NewTeam, Team};
use crate::utils::validation::{required, validate_payload, INVALID_PK_LIST, INVALID_STRING};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const FIELDS: &[&str] = &["id", "name", "members", "created_at"];

#[derive(Debug, Serialize)]
pub struct TeamOut {
    pub id: i64,
    pub name: String,
    pub members: Vec<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<&Team> for TeamOut {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id,
            name: team.name.clone(),
            members: team.members.clone(),
            created_at: team.created_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct TeamInput {
    #[validate(length(min = 1, max = 100, message = "Ensure this field has between 1 and 100 characters."))]
    pub name: Option<String>,

    pub members: Option<Vec<i64>>,
}

impl Writable for TeamInput {
    const WRITABLE: &'static [(&'static str, &'static str)] = &[("name", INVALID_STRING), ("members", INVALID_PK_LIST)];
}

impl TeamInput {
    /// `description` is not on the wire, so it always carries over from `current`.
    pub fn resolve(self, current: Option<&Team>, mode: Mode) -> Result<NewTeam, AppError> {
        let mut errors = validate_payload(&self);
        let fallback = mode.fallback(current);

        let name = required(&mut errors, "name", self.name, fallback.map(|t| t.name.clone()));
        let (Some(name), true) = (name, errors.is_empty()) else {
            return Err(errors.into());
        };

        Ok(NewTeam {
            name,
            description: current.map(|t| t.description.clone()).unwrap_or_default(),
            members: id_set(
                self.members
                    .or_else(|| fallback.map(|t| t.members.clone()))
                    .unwrap_or_default(),
            ),
        })
    }
}

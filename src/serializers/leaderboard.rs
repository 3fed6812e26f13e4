use super::{Mode, Writable};
use crate::errors::AppError;
use crate::models::{LeaderboardEntry, NewLeaderboardEntry};
use crate::utils::validation::{
    required, validate_payload, INVALID_DATE, INVALID_INTEGER, INVALID_PK,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const FIELDS: &[&str] = &["id", "team", "score", "week"];

#[derive(Debug, Serialize)]
pub struct LeaderboardOut {
    pub id: i64,
    pub team: i64,
    pub score: i64,
    pub week: NaiveDate,
}

impl From<&LeaderboardEntry> for LeaderboardOut {
    fn from(entry: &LeaderboardEntry) -> Self {
        Self {
            id: entry.id,
            team: entry.team_id,
            score: entry.score,
            week: entry.week,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct LeaderboardInput {
    pub team: Option<i64>,

    #[validate(range(min = 0, message = "Ensure this value is greater than or equal to 0."))]
    pub score: Option<i64>,

    pub week: Option<NaiveDate>,
}

impl Writable for LeaderboardInput {
    const WRITABLE: &'static [(&'static str, &'static str)] = &[("team", INVALID_PK), ("score", INVALID_INTEGER), ("week", INVALID_DATE)];
}

impl LeaderboardInput {
    pub fn resolve(
        self,
        current: Option<&LeaderboardEntry>,
        mode: Mode,
    ) -> Result<NewLeaderboardEntry, AppError> {
        let mut errors = validate_payload(&self);
        let fallback = mode.fallback(current);

        let team_id = required(&mut errors, "team", self.team, fallback.map(|e| e.team_id));
        let score = required(&mut errors, "score", self.score, fallback.map(|e| e.score));
        let week = required(&mut errors, "week", self.week, fallback.map(|e| e.week));

        let (Some(team_id), Some(score), Some(week), true) =
            (team_id, score, week, errors.is_empty())
        else {
            return Err(errors.into());
        };

        Ok(NewLeaderboardEntry {
            team_id,
            score,
            week,
        })
    }
}

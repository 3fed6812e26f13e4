//! Sample data for demos and local development.
//!
//! Inserts run one by one without a surrounding transaction: the first
//! failure stops the run and whatever was inserted before it stays.

use crate::db::Store;
use crate::errors::AppError;
use crate::models::{NewActivity, NewLeaderboardEntry, NewTeam, NewUser, NewWorkout};
use chrono::NaiveDate;
use log::info;
use std::fmt;

const SAMPLE_PASSWORD: &str = "testpass";

/// Rows created by one `populate` run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub teams: usize,
    pub activities: usize,
    pub workouts: usize,
    pub leaderboard: usize,
}

impl fmt::Display for SeedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} users, {} teams, {} activities, {} workouts, {} leaderboard entries",
            self.users, self.teams, self.activities, self.workouts, self.leaderboard
        )
    }
}

fn day(year: i32, month: u32, day: u32) -> Result<NaiveDate, AppError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        AppError::Persistence(format!("invalid sample date {}-{}-{}", year, month, day))
    })
}

/// Create the sample users, teams, activities, workouts and leaderboard.
///
/// Not idempotent: on a store that already holds the sample users the first
/// insert fails with a duplicate `username`.
pub async fn populate(store: &Store) -> Result<SeedSummary, AppError> {
    let mut summary = SeedSummary::default();

    let alice = store
        .create_user(NewUser::new("alice", "alice@example.com").with_password(SAMPLE_PASSWORD))
        .await?;
    let bob = store
        .create_user(NewUser::new("bob", "bob@example.com").with_password(SAMPLE_PASSWORD))
        .await?;
    let carol = store
        .create_user(NewUser::new("carol", "carol@example.com").with_password(SAMPLE_PASSWORD))
        .await?;
    summary.users = 3;

    let alpha = store
        .create_team(NewTeam {
            description: "High-performance team".to_string(),
            ..NewTeam::new("Team Alpha")
        })
        .await?;
    let beta = store
        .create_team(NewTeam {
            description: "Beginners team".to_string(),
            ..NewTeam::new("Team Beta")
        })
        .await?;
    summary.teams = 2;

    store.add_team_member(alpha.id, alice.id).await?;
    store.add_team_member(alpha.id, bob.id).await?;
    store.add_team_member(beta.id, carol.id).await?;

    for (user_id, activity_type, duration, calories, date) in [
        (alice.id, "run", 30, 250, day(2024, 1, 1)?),
        (bob.id, "bike", 45, 400, day(2024, 1, 2)?),
        (carol.id, "swim", 60, 500, day(2024, 1, 3)?),
    ] {
        store
            .create_activity(NewActivity {
                user_id,
                activity_type: activity_type.to_string(),
                duration,
                calories,
                date,
            })
            .await?;
        summary.activities += 1;
    }

    let cardio = store
        .create_workout(NewWorkout {
            name: "Cardio Blast".to_string(),
            description: "Intense cardio".to_string(),
            difficulty: "Medium".to_string(),
            suggested_for: Vec::new(),
        })
        .await?;
    let strength = store
        .create_workout(NewWorkout {
            name: "Fuerza Total".to_string(),
            description: "Full-body strength training".to_string(),
            difficulty: "High".to_string(),
            suggested_for: Vec::new(),
        })
        .await?;
    summary.workouts = 2;

    store.add_workout_suggestion(cardio.id, alice.id).await?;
    store.add_workout_suggestion(cardio.id, carol.id).await?;
    store.add_workout_suggestion(strength.id, bob.id).await?;

    let week = day(2024, 1, 7)?;
    for (team_id, score) in [(alpha.id, 650), (beta.id, 500)] {
        store
            .create_leaderboard_entry(NewLeaderboardEntry {
                team_id,
                score,
                week,
            })
            .await?;
        summary.leaderboard += 1;
    }

    info!("Seeded {}", summary);
    Ok(summary)
}

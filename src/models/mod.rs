//! Persisted record types and their insert/update payloads.

pub mod activity;
pub mod leaderboard;
pub mod team;
pub mod user;
pub mod workout;

pub use activity::{Activity, NewActivity};
pub use leaderboard::{LeaderboardEntry, NewLeaderboardEntry};
pub use team::{NewTeam, Team};
pub use user::{NewUser, User};
pub use workout::{NewWorkout, Workout};

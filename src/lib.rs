//! OctoFit Tracker backend.
//!
//! REST collections for users, teams, activities, workouts and the weekly
//! team leaderboard, a read-only admin listing, and a seeding routine.

pub mod admin;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod seed;
pub mod serializers;
pub mod utils;

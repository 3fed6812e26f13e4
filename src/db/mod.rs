//! SQLite-backed persistence client.
//!
//! `Store` owns the connection pool and exposes typed CRUD operations per
//! entity. It is built from `Config` once at startup and cloned into every
//! worker.

mod activities;
mod association;
mod leaderboard;
mod passwords;
mod teams;
mod users;
mod workouts;

pub use association::{Association, TEAM_MEMBERS, WORKOUT_SUGGESTIONS};
pub use leaderboard::LeaderboardFilter;

use crate::config::Config;
use crate::errors::AppError;
use log::info;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::SqliteConnection;
use std::str::FromStr;
use std::time::Duration;

/// Database client.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
    bcrypt_cost: u32,
}

/// Limit/offset window for list operations. `None` means unbounded.
#[derive(Debug, Clone, Copy, Default)]
pub struct Page {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Page {
    // SQLite treats a negative LIMIT as "no limit".
    pub(crate) fn limit(&self) -> i64 {
        self.limit.unwrap_or(-1)
    }

    pub(crate) fn offset(&self) -> i64 {
        self.offset.unwrap_or(0)
    }
}

impl Store {
    /// Connect to the configured database and apply pending migrations.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        // In-memory databases live and die with their connection, so pooled
        // connections are never recycled.
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await?;

        info!("Connected to database at {}", config.database_url);

        let store = Self {
            pool,
            bcrypt_cost: config.bcrypt_cost,
        };
        store.migrate().await?;
        Ok(store)
    }

    /// Apply embedded migrations from `migrations/`.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Delete every row of every entity and reset id sequences.
    pub async fn flush(&self) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        for table in [
            "team_members",
            "workout_suggestions",
            "leaderboard",
            "activities",
            "workouts",
            "teams",
            "users",
            "sqlite_sequence",
        ] {
            sqlx::query(&format!("DELETE FROM {}", table))
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        info!("Flushed all tables");
        Ok(())
    }

    /// Number of rows in an entity table.
    pub async fn count(&self, table: &'static str) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Fail with `ReferentialIntegrity` on `field` unless `table` has a row with `id`.
async fn ensure_exists(
    conn: &mut SqliteConnection,
    table: &'static str,
    id: i64,
    field: &'static str,
) -> Result<(), AppError> {
    let found = sqlx::query_scalar::<_, i64>(&format!(
        "SELECT COUNT(*) FROM {} WHERE id = ?",
        table
    ))
    .bind(id)
    .fetch_one(&mut *conn)
    .await?;

    if found == 0 {
        return Err(AppError::ReferentialIntegrity {
            field,
            message: format!("Invalid pk \"{}\" - object does not exist.", id),
        });
    }
    Ok(())
}

/// Touch row `id` of `table` so the surrounding transaction holds the write
/// lock before it reads. Fails with `NotFound` if the row is missing.
async fn lock_row(
    conn: &mut SqliteConnection,
    table: &'static str,
    id: i64,
    entity: &str,
) -> Result<(), AppError> {
    let result = sqlx::query(&format!("UPDATE {} SET id = id WHERE id = ?", table))
        .bind(id)
        .execute(&mut *conn)
        .await?;

    if result.rows_affected() == 0 {
        return Err(not_found(entity));
    }
    Ok(())
}

/// Rename the generic duplicate-key error produced by `From<sqlx::Error>`.
fn on_duplicate(field: &'static str, message: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |err| match AppError::from(err) {
        AppError::DuplicateKey { .. } => AppError::DuplicateKey {
            field,
            message: message.to_string(),
        },
        other => other,
    }
}

fn not_found(entity: &str) -> AppError {
    AppError::NotFound(format!("{} not found", entity))
}

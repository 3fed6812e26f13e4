use super::{ensure_exists, not_found, on_duplicate, Page, Store};
use crate::errors::AppError;
use crate::models::{LeaderboardEntry, NewLeaderboardEntry};
use chrono::NaiveDate;
use log::info;

const ENTRY_COLUMNS: &str = "id, team_id, score, week";
const DUPLICATE_WEEK: &str = "The fields team, week must make a unique set.";

/// Optional narrowing for leaderboard listings.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeaderboardFilter {
    pub team_id: Option<i64>,
    pub week: Option<NaiveDate>,
}

impl Store {
    pub async fn create_leaderboard_entry(
        &self,
        new: NewLeaderboardEntry,
    ) -> Result<LeaderboardEntry, AppError> {
        let mut conn = self.pool().acquire().await?;
        ensure_exists(&mut conn, "teams", new.team_id, "team").await?;

        let entry = sqlx::query_as::<_, LeaderboardEntry>(&format!(
            "INSERT INTO leaderboard (team_id, score, week) VALUES (?, ?, ?) RETURNING {}",
            ENTRY_COLUMNS
        ))
        .bind(new.team_id)
        .bind(new.score)
        .bind(new.week)
        .fetch_one(&mut *conn)
        .await
        .map_err(on_duplicate(crate::errors::NON_FIELD_ERRORS, DUPLICATE_WEEK))?;

        info!(
            "Recorded score {} for team {} in week {}",
            entry.score, entry.team_id, entry.week
        );
        Ok(entry)
    }

    pub async fn get_leaderboard_entry(&self, id: i64) -> Result<LeaderboardEntry, AppError> {
        sqlx::query_as::<_, LeaderboardEntry>(&format!(
            "SELECT {} FROM leaderboard WHERE id = ?",
            ENTRY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?
        .ok_or_else(|| not_found("Leaderboard entry"))
    }

    /// Entries ranked by score, highest first.
    pub async fn list_leaderboard(
        &self,
        filter: LeaderboardFilter,
        page: Page,
    ) -> Result<Vec<LeaderboardEntry>, AppError> {
        let entries = sqlx::query_as::<_, LeaderboardEntry>(&format!(
            "SELECT {} FROM leaderboard \
             WHERE (? IS NULL OR team_id = ?) AND (? IS NULL OR week = ?) \
             ORDER BY score DESC, id LIMIT ? OFFSET ?",
            ENTRY_COLUMNS
        ))
        .bind(filter.team_id)
        .bind(filter.team_id)
        .bind(filter.week)
        .bind(filter.week)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool())
        .await?;
        Ok(entries)
    }

    pub async fn update_leaderboard_entry(
        &self,
        id: i64,
        changes: NewLeaderboardEntry,
    ) -> Result<LeaderboardEntry, AppError> {
        let mut conn = self.pool().acquire().await?;
        ensure_exists(&mut conn, "teams", changes.team_id, "team").await?;

        let entry = sqlx::query_as::<_, LeaderboardEntry>(&format!(
            "UPDATE leaderboard SET team_id = ?, score = ?, week = ? WHERE id = ? RETURNING {}",
            ENTRY_COLUMNS
        ))
        .bind(changes.team_id)
        .bind(changes.score)
        .bind(changes.week)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(on_duplicate(crate::errors::NON_FIELD_ERRORS, DUPLICATE_WEEK))?
        .ok_or_else(|| not_found("Leaderboard entry"))?;

        info!("Updated leaderboard entry {}", id);
        Ok(entry)
    }

    pub async fn delete_leaderboard_entry(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM leaderboard WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found("Leaderboard entry"));
        }
        info!("Deleted leaderboard entry {}", id);
        Ok(())
    }
}

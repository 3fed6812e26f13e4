use super::{lock_row, not_found, Page, Store, TEAM_MEMBERS};
use crate::errors::AppError;
use crate::models::{NewTeam, Team, User};
use chrono::Utc;
use log::info;
use sqlx::SqliteConnection;

const TEAM_COLUMNS: &str = "id, name, description, created_at";

impl Store {
    /// Insert a team and its member set in one transaction.
    pub async fn create_team(&self, new: NewTeam) -> Result<Team, AppError> {
        let mut tx = self.pool().begin().await?;

        let mut team = sqlx::query_as::<_, Team>(&format!(
            "INSERT INTO teams (name, description, created_at) VALUES (?, ?, ?) RETURNING {}",
            TEAM_COLUMNS
        ))
        .bind(&new.name)
        .bind(&new.description)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        TEAM_MEMBERS.replace(&mut tx, team.id, &new.members).await?;
        team.members = TEAM_MEMBERS.load(&mut tx, team.id).await?;
        tx.commit().await?;

        info!("Created team {} ({}) with {} members", team.name, team.id, team.members.len());
        Ok(team)
    }

    pub async fn get_team(&self, id: i64) -> Result<Team, AppError> {
        let mut conn = self.pool().acquire().await?;
        fetch_team(&mut conn, id).await
    }

    pub async fn list_teams(&self, page: Page) -> Result<Vec<Team>, AppError> {
        let mut conn = self.pool().acquire().await?;
        let mut teams = sqlx::query_as::<_, Team>(&format!(
            "SELECT {} FROM teams ORDER BY id LIMIT ? OFFSET ?",
            TEAM_COLUMNS
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&mut *conn)
        .await?;

        for team in teams.iter_mut() {
            team.members = TEAM_MEMBERS.load(&mut conn, team.id).await?;
        }
        Ok(teams)
    }

    /// Overwrite name, description and the full member set.
    pub async fn update_team(&self, id: i64, changes: NewTeam) -> Result<Team, AppError> {
        let mut tx = self.pool().begin().await?;

        let result = sqlx::query("UPDATE teams SET name = ?, description = ? WHERE id = ?")
            .bind(&changes.name)
            .bind(&changes.description)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(not_found("Team"));
        }

        TEAM_MEMBERS.replace(&mut tx, id, &changes.members).await?;
        let team = fetch_team(&mut tx, id).await?;
        tx.commit().await?;

        info!("Updated team {}", id);
        Ok(team)
    }

    /// Delete a team together with its memberships and leaderboard rows.
    pub async fn delete_team(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM teams WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found("Team"));
        }
        info!("Deleted team {}", id);
        Ok(())
    }

    /// Add a member. Adding an existing member is a no-op.
    pub async fn add_team_member(&self, team_id: i64, user_id: i64) -> Result<Team, AppError> {
        let mut tx = self.pool().begin().await?;
        lock_row(&mut tx, "teams", team_id, "Team").await?;

        let added = TEAM_MEMBERS.add(&mut tx, team_id, &[user_id], "user").await?;
        let team = fetch_team(&mut tx, team_id).await?;
        tx.commit().await?;

        if added > 0 {
            info!("Added user {} to team {}", user_id, team_id);
        }
        Ok(team)
    }

    pub async fn remove_team_member(&self, team_id: i64, user_id: i64) -> Result<(), AppError> {
        let mut tx = self.pool().begin().await?;
        lock_row(&mut tx, "teams", team_id, "Team").await?;

        if !TEAM_MEMBERS.remove(&mut tx, team_id, user_id).await? {
            return Err(AppError::NotFound(format!(
                "User {} is not a member of team {}",
                user_id, team_id
            )));
        }
        tx.commit().await?;

        info!("Removed user {} from team {}", user_id, team_id);
        Ok(())
    }

    /// Member users of a team, by id.
    pub async fn team_members(&self, team_id: i64) -> Result<Vec<User>, AppError> {
        self.get_team(team_id).await?;
        self.linked_users(&TEAM_MEMBERS, team_id).await
    }
}

async fn fetch_team(conn: &mut SqliteConnection, id: i64) -> Result<Team, AppError> {
    let mut team = sqlx::query_as::<_, Team>(&format!(
        "SELECT {} FROM teams WHERE id = ?",
        TEAM_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(|| not_found("Team"))?;

    team.members = TEAM_MEMBERS.load(conn, id).await?;
    Ok(team)
}

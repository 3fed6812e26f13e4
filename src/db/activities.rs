use super::{ensure_exists, not_found, Page, Store};
use crate::errors::AppError;
use crate::models::{Activity, NewActivity};
use log::info;

const ACTIVITY_COLUMNS: &str = "id, user_id, activity_type, duration, calories, date";

impl Store {
    pub async fn create_activity(&self, new: NewActivity) -> Result<Activity, AppError> {
        let mut conn = self.pool().acquire().await?;
        ensure_exists(&mut conn, "users", new.user_id, "user").await?;

        let activity = sqlx::query_as::<_, Activity>(&format!(
            "INSERT INTO activities (user_id, activity_type, duration, calories, date) \
             VALUES (?, ?, ?, ?, ?) RETURNING {}",
            ACTIVITY_COLUMNS
        ))
        .bind(new.user_id)
        .bind(&new.activity_type)
        .bind(new.duration)
        .bind(new.calories)
        .bind(new.date)
        .fetch_one(&mut *conn)
        .await?;

        info!(
            "Created activity {} ({}) for user {}",
            activity.id, activity.activity_type, activity.user_id
        );
        Ok(activity)
    }

    pub async fn get_activity(&self, id: i64) -> Result<Activity, AppError> {
        sqlx::query_as::<_, Activity>(&format!(
            "SELECT {} FROM activities WHERE id = ?",
            ACTIVITY_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?
        .ok_or_else(|| not_found("Activity"))
    }

    /// List activities, optionally only those owned by `user_id`.
    pub async fn list_activities(
        &self,
        user_id: Option<i64>,
        page: Page,
    ) -> Result<Vec<Activity>, AppError> {
        let activities = sqlx::query_as::<_, Activity>(&format!(
            "SELECT {} FROM activities WHERE (? IS NULL OR user_id = ?) \
             ORDER BY id LIMIT ? OFFSET ?",
            ACTIVITY_COLUMNS
        ))
        .bind(user_id)
        .bind(user_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool())
        .await?;
        Ok(activities)
    }

    pub async fn update_activity(
        &self,
        id: i64,
        changes: NewActivity,
    ) -> Result<Activity, AppError> {
        let mut conn = self.pool().acquire().await?;
        ensure_exists(&mut conn, "users", changes.user_id, "user").await?;

        let activity = sqlx::query_as::<_, Activity>(&format!(
            "UPDATE activities SET user_id = ?, activity_type = ?, duration = ?, calories = ?, \
             date = ? WHERE id = ? RETURNING {}",
            ACTIVITY_COLUMNS
        ))
        .bind(changes.user_id)
        .bind(&changes.activity_type)
        .bind(changes.duration)
        .bind(changes.calories)
        .bind(changes.date)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| not_found("Activity"))?;

        info!("Updated activity {}", id);
        Ok(activity)
    }

    pub async fn delete_activity(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM activities WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found("Activity"));
        }
        info!("Deleted activity {}", id);
        Ok(())
    }
}

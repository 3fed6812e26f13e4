use super::{lock_row, not_found, Page, Store, WORKOUT_SUGGESTIONS};
use crate::errors::AppError;
use crate::models::{NewWorkout, User, Workout};
use log::info;
use sqlx::SqliteConnection;

const WORKOUT_COLUMNS: &str = "id, name, description, difficulty";

impl Store {
    pub async fn create_workout(&self, new: NewWorkout) -> Result<Workout, AppError> {
        let mut tx = self.pool().begin().await?;

        let mut workout = sqlx::query_as::<_, Workout>(&format!(
            "INSERT INTO workouts (name, description, difficulty) VALUES (?, ?, ?) RETURNING {}",
            WORKOUT_COLUMNS
        ))
        .bind(&new.name)
        .bind(&new.description)
        .bind(&new.difficulty)
        .fetch_one(&mut *tx)
        .await?;

        WORKOUT_SUGGESTIONS
            .replace(&mut tx, workout.id, &new.suggested_for)
            .await?;
        workout.suggested_for = WORKOUT_SUGGESTIONS.load(&mut tx, workout.id).await?;
        tx.commit().await?;

        info!("Created workout {} ({})", workout.name, workout.id);
        Ok(workout)
    }

    pub async fn get_workout(&self, id: i64) -> Result<Workout, AppError> {
        let mut conn = self.pool().acquire().await?;
        fetch_workout(&mut conn, id).await
    }

    pub async fn list_workouts(&self, page: Page) -> Result<Vec<Workout>, AppError> {
        let mut conn = self.pool().acquire().await?;
        let mut workouts = sqlx::query_as::<_, Workout>(&format!(
            "SELECT {} FROM workouts ORDER BY id LIMIT ? OFFSET ?",
            WORKOUT_COLUMNS
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&mut *conn)
        .await?;

        for workout in workouts.iter_mut() {
            workout.suggested_for = WORKOUT_SUGGESTIONS.load(&mut conn, workout.id).await?;
        }
        Ok(workouts)
    }

    pub async fn update_workout(&self, id: i64, changes: NewWorkout) -> Result<Workout, AppError> {
        let mut tx = self.pool().begin().await?;

        let result = sqlx::query(
            "UPDATE workouts SET name = ?, description = ?, difficulty = ? WHERE id = ?",
        )
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(&changes.difficulty)
        .bind(id)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Err(not_found("Workout"));
        }

        WORKOUT_SUGGESTIONS
            .replace(&mut tx, id, &changes.suggested_for)
            .await?;
        let workout = fetch_workout(&mut tx, id).await?;
        tx.commit().await?;

        info!("Updated workout {}", id);
        Ok(workout)
    }

    pub async fn delete_workout(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found("Workout"));
        }
        info!("Deleted workout {}", id);
        Ok(())
    }

    /// Suggest a workout to a user. Suggesting twice is a no-op.
    pub async fn add_workout_suggestion(
        &self,
        workout_id: i64,
        user_id: i64,
    ) -> Result<Workout, AppError> {
        let mut tx = self.pool().begin().await?;
        lock_row(&mut tx, "workouts", workout_id, "Workout").await?;

        WORKOUT_SUGGESTIONS
            .add(&mut tx, workout_id, &[user_id], "user")
            .await?;
        let workout = fetch_workout(&mut tx, workout_id).await?;
        tx.commit().await?;
        Ok(workout)
    }

    pub async fn remove_workout_suggestion(
        &self,
        workout_id: i64,
        user_id: i64,
    ) -> Result<(), AppError> {
        let mut tx = self.pool().begin().await?;
        lock_row(&mut tx, "workouts", workout_id, "Workout").await?;

        if !WORKOUT_SUGGESTIONS.remove(&mut tx, workout_id, user_id).await? {
            return Err(AppError::NotFound(format!(
                "Workout {} is not suggested for user {}",
                workout_id, user_id
            )));
        }
        tx.commit().await?;
        Ok(())
    }

    pub async fn workout_suggested_users(&self, workout_id: i64) -> Result<Vec<User>, AppError> {
        self.get_workout(workout_id).await?;
        self.linked_users(&WORKOUT_SUGGESTIONS, workout_id).await
    }
}

async fn fetch_workout(conn: &mut SqliteConnection, id: i64) -> Result<Workout, AppError> {
    let mut workout = sqlx::query_as::<_, Workout>(&format!(
        "SELECT {} FROM workouts WHERE id = ?",
        WORKOUT_COLUMNS
    ))
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?
    .ok_or_else(|| not_found("Workout"))?;

    workout.suggested_for = WORKOUT_SUGGESTIONS.load(conn, id).await?;
    Ok(workout)
}

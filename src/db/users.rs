use super::passwords::{hash_password, unusable_password, verify_password};
use super::{not_found, on_duplicate, Association, Page, Store};
use crate::errors::AppError;
use crate::models::{NewUser, User};
use chrono::Utc;
use log::info;

const USER_COLUMNS: &str = "id, username, email, password, is_active, date_joined";
const DUPLICATE_USERNAME: &str = "A user with that username already exists.";

impl Store {
    pub async fn create_user(&self, new: NewUser) -> Result<User, AppError> {
        let password = match new.password {
            Some(plain) => hash_password(plain, self.bcrypt_cost).await?,
            None => unusable_password(),
        };

        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (username, email, password, is_active, date_joined) \
             VALUES (?, ?, ?, ?, ?) RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&new.username)
        .bind(&new.email)
        .bind(&password)
        .bind(new.is_active)
        .bind(Utc::now())
        .fetch_one(self.pool())
        .await
        .map_err(on_duplicate("username", DUPLICATE_USERNAME))?;

        info!("Created user {} ({})", user.username, user.id);
        Ok(user)
    }

    pub async fn get_user(&self, id: i64) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {} FROM users WHERE id = ?", USER_COLUMNS))
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| not_found("User"))
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE username = ?",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(self.pool())
        .await?
        .ok_or_else(|| not_found("User"))
    }

    pub async fn list_users(&self, page: Page) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users ORDER BY id LIMIT ? OFFSET ?",
            USER_COLUMNS
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool())
        .await?;
        Ok(users)
    }

    /// Overwrite a user's fields. The password hash is only replaced when
    /// `changes.password` is set.
    pub async fn update_user(&self, id: i64, changes: NewUser) -> Result<User, AppError> {
        let password = match changes.password {
            Some(plain) => Some(hash_password(plain, self.bcrypt_cost).await?),
            None => None,
        };

        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET username = ?, email = ?, is_active = ?, \
             password = COALESCE(?, password) WHERE id = ? RETURNING {}",
            USER_COLUMNS
        ))
        .bind(&changes.username)
        .bind(&changes.email)
        .bind(changes.is_active)
        .bind(password)
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(on_duplicate("username", DUPLICATE_USERNAME))?
        .ok_or_else(|| not_found("User"))?;

        info!("Updated user {}", user.id);
        Ok(user)
    }

    /// Delete a user. Their activities and memberships go with them.
    pub async fn delete_user(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found("User"));
        }
        info!("Deleted user {}", id);
        Ok(())
    }

    /// Check a plaintext password against the stored hash.
    pub async fn check_password(&self, username: &str, password: &str) -> Result<bool, AppError> {
        let user = self.get_user_by_username(username).await?;
        if !user.has_usable_password() {
            return Ok(false);
        }
        verify_password(password.to_string(), user.password).await
    }

    /// Users linked to `owner` through `association`, by id.
    pub(crate) async fn linked_users(
        &self,
        association: &Association,
        owner: i64,
    ) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT u.id, u.username, u.email, u.password, u.is_active, u.date_joined \
             FROM users u JOIN {table} l ON l.{member} = u.id \
             WHERE l.{owner} = ? ORDER BY u.id",
            table = association.table,
            member = association.member_column,
            owner = association.owner_column,
        ))
        .bind(owner)
        .fetch_all(self.pool())
        .await?;
        Ok(users)
    }
}

//! Many-to-many link tables with set semantics.

use super::ensure_exists;
use crate::errors::AppError;
use sqlx::SqliteConnection;

/// A link table keyed by `(owner, member)`.
#[derive(Debug, Clone, Copy)]
pub struct Association {
    pub table: &'static str,
    pub owner_column: &'static str,
    pub member_column: &'static str,
    /// Table the member ids point into
    pub member_table: &'static str,
    /// Wire field reported when a member id does not resolve
    pub field: &'static str,
}

pub const TEAM_MEMBERS: Association = Association {
    table: "team_members",
    owner_column: "team_id",
    member_column: "user_id",
    member_table: "users",
    field: "members",
};

pub const WORKOUT_SUGGESTIONS: Association = Association {
    table: "workout_suggestions",
    owner_column: "workout_id",
    member_column: "user_id",
    member_table: "users",
    field: "suggested_for",
};

impl Association {
    /// Member ids of `owner`, ascending.
    pub(crate) async fn load(
        &self,
        conn: &mut SqliteConnection,
        owner: i64,
    ) -> Result<Vec<i64>, AppError> {
        let ids = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT {member} FROM {table} WHERE {owner} = ? ORDER BY {member}",
            member = self.member_column,
            table = self.table,
            owner = self.owner_column,
        ))
        .bind(owner)
        .fetch_all(&mut *conn)
        .await?;
        Ok(ids)
    }

    /// Add members, ignoring pairs that already exist. Returns how many were new.
    pub(crate) async fn add(
        &self,
        conn: &mut SqliteConnection,
        owner: i64,
        members: &[i64],
        field: &'static str,
    ) -> Result<u64, AppError> {
        let sql = format!(
            "INSERT INTO {table} ({owner}, {member}) VALUES (?, ?) ON CONFLICT DO NOTHING",
            table = self.table,
            owner = self.owner_column,
            member = self.member_column,
        );

        let mut inserted = 0;
        for &member in members {
            ensure_exists(&mut *conn, self.member_table, member, field).await?;
            inserted += sqlx::query(&sql)
                .bind(owner)
                .bind(member)
                .execute(&mut *conn)
                .await?
                .rows_affected();
        }
        Ok(inserted)
    }

    /// Replace the member set of `owner`.
    pub(crate) async fn replace(
        &self,
        conn: &mut SqliteConnection,
        owner: i64,
        members: &[i64],
    ) -> Result<(), AppError> {
        sqlx::query(&format!(
            "DELETE FROM {} WHERE {} = ?",
            self.table, self.owner_column
        ))
        .bind(owner)
        .execute(&mut *conn)
        .await?;
        self.add(conn, owner, members, self.field).await?;
        Ok(())
    }

    /// Remove one member. Returns false if the pair did not exist.
    pub(crate) async fn remove(
        &self,
        conn: &mut SqliteConnection,
        owner: i64,
        member: i64,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(&format!(
            "DELETE FROM {} WHERE {} = ? AND {} = ?",
            self.table, self.owner_column, self.member_column
        ))
        .bind(owner)
        .bind(member)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}

//! Read-only operator listings.
//!
//! Every entity registers the columns shown in its list view and the columns
//! searched by `?q=`. Foreign keys display the referenced row's label rather
//! than its id. Listings hold no state of their own.

use crate::db::{Page, Store};
use crate::errors::AppError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

#[derive(Debug, Clone, Copy)]
pub enum ColumnKind {
    Integer,
    Text,
    Bool,
    Date,
    Timestamp,
}

#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    expr: &'static str,
    kind: ColumnKind,
}

const fn column(name: &'static str, expr: &'static str, kind: ColumnKind) -> Column {
    Column { name, expr, kind }
}

#[derive(Debug)]
pub struct ModelAdmin {
    pub model: &'static str,
    /// `FROM` clause; the listed table is always aliased `r`.
    from: &'static str,
    pub list_display: &'static [Column],
    pub search_fields: &'static [Column],
}

use ColumnKind::*;

pub static REGISTRY: &[ModelAdmin] = &[
    ModelAdmin {
        model: "users",
        from: "users r",
        list_display: &[
            column("username", "r.username", Text),
            column("email", "r.email", Text),
            column("is_active", "r.is_active", Bool),
        ],
        search_fields: &[
            column("username", "r.username", Text),
            column("email", "r.email", Text),
        ],
    },
    ModelAdmin {
        model: "teams",
        from: "teams r",
        list_display: &[
            column("name", "r.name", Text),
            column("created_at", "r.created_at", Timestamp),
        ],
        search_fields: &[column("name", "r.name", Text)],
    },
    ModelAdmin {
        model: "activities",
        from: "activities r JOIN users u ON u.id = r.user_id",
        list_display: &[
            column("user", "u.username", Text),
            column("activity_type", "r.activity_type", Text),
            column("duration", "r.duration", Integer),
            column("calories", "r.calories", Integer),
            column("date", "r.date", Date),
        ],
        search_fields: &[column("activity_type", "r.activity_type", Text)],
    },
    ModelAdmin {
        model: "workouts",
        from: "workouts r",
        list_display: &[
            column("name", "r.name", Text),
            column("difficulty", "r.difficulty", Text),
        ],
        search_fields: &[column("name", "r.name", Text)],
    },
    ModelAdmin {
        model: "leaderboard",
        from: "leaderboard r JOIN teams t ON t.id = r.team_id",
        list_display: &[
            column("team", "t.name", Text),
            column("score", "r.score", Integer),
            column("week", "r.week", Date),
        ],
        search_fields: &[],
    },
];

pub fn find(model: &str) -> Option<&'static ModelAdmin> {
    REGISTRY.iter().find(|admin| admin.model == model)
}

#[derive(Debug, Serialize)]
pub struct ModelSummary {
    pub model: &'static str,
    pub columns: Vec<&'static str>,
    pub search_fields: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct AdminRow {
    pub id: i64,
    pub values: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct ChangeList {
    pub model: &'static str,
    pub columns: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub rows: Vec<AdminRow>,
}

impl ModelAdmin {
    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            model: self.model,
            columns: self.list_display.iter().map(|c| c.name).collect(),
            search_fields: self.search_fields.iter().map(|c| c.name).collect(),
        }
    }

    fn select_sql(&self, searching: bool) -> String {
        let exprs: Vec<&str> = self.list_display.iter().map(|c| c.expr).collect();
        let mut sql = format!("SELECT r.id, {} FROM {}", exprs.join(", "), self.from);
        if searching && !self.search_fields.is_empty() {
            let clauses: Vec<String> = self
                .search_fields
                .iter()
                .map(|c| format!("{} LIKE ? ESCAPE '\\'", c.expr))
                .collect();
            sql.push_str(&format!(" WHERE ({})", clauses.join(" OR ")));
        }
        sql.push_str(" ORDER BY r.id LIMIT ? OFFSET ?");
        sql
    }

    /// Rows of the list view, optionally narrowed by a case-insensitive
    /// substring match on any search field.
    pub async fn changelist(
        &self,
        store: &Store,
        query: Option<&str>,
        page: Page,
    ) -> Result<ChangeList, AppError> {
        let query = query.map(str::trim).filter(|q| !q.is_empty());
        let sql = self.select_sql(query.is_some());

        let mut statement = sqlx::query(&sql);
        if let Some(q) = query {
            let pattern = format!("%{}%", escape_like(q));
            for _ in self.search_fields {
                statement = statement.bind(pattern.clone());
            }
        }
        let rows = statement
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(store.pool())
            .await?;

        let rows = rows
            .iter()
            .map(|row| self.decode(row))
            .collect::<Result<Vec<_>, sqlx::Error>>()?;

        Ok(ChangeList {
            model: self.model,
            columns: self.list_display.iter().map(|c| c.name).collect(),
            query: query.map(str::to_string),
            rows,
        })
    }

    fn decode(&self, row: &SqliteRow) -> Result<AdminRow, sqlx::Error> {
        let id: i64 = row.try_get(0)?;
        let values = self
            .list_display
            .iter()
            .enumerate()
            .map(|(i, column)| cell(row, i + 1, column.kind))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(AdminRow { id, values })
    }
}

fn cell(row: &SqliteRow, index: usize, kind: ColumnKind) -> Result<Value, sqlx::Error> {
    let value = match kind {
        Integer => Value::from(row.try_get::<i64, _>(index)?),
        Text => Value::from(row.try_get::<String, _>(index)?),
        Bool => Value::from(row.try_get::<bool, _>(index)?),
        Date => {
            let date: NaiveDate = row.try_get(index)?;
            json!(date)
        }
        Timestamp => {
            let at: DateTime<Utc> = row.try_get(index)?;
            json!(at)
        }
    };
    Ok(value)
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

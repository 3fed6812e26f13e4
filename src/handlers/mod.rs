pub mod activity;
pub mod admin;
pub mod leaderboard;
pub mod root;
pub mod team;
pub mod user;
pub mod workout;

use crate::db::Page;
use crate::errors::AppError;
use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct PageQuery {
    #[validate(range(min = 0, message = "Limit must be a non-negative integer"))]
    limit: Option<i64>,

    #[validate(range(min = 0, message = "Offset must be a non-negative integer"))]
    offset: Option<i64>,
}

impl PageQuery {
    pub fn page(&self) -> Result<Page, AppError> {
        self.validate()?;
        Ok(Page {
            limit: self.limit,
            offset: self.offset,
        })
    }
}

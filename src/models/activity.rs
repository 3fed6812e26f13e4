use chrono::NaiveDate;

#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct Activity {
    pub id: i64,
    pub user_id: i64,
    pub activity_type: String,
    /// Minutes
    pub duration: i64,
    pub calories: i64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct NewActivity {
    pub user_id: i64,
    pub activity_type: String,
    pub duration: i64,
    pub calories: i64,
    pub date: NaiveDate,
}

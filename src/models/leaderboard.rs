use chrono::NaiveDate;

/// One team's score for the reporting week starting at `week`.
#[derive(sqlx::FromRow, Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub id: i64,
    pub team_id: i64,
    pub score: i64,
    pub week: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct NewLeaderboardEntry {
    pub team_id: i64,
    pub score: i64,
    pub week: NaiveDate,
}

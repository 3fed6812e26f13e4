#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Workout {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub difficulty: String,
    /// User ids this workout is suggested for, ascending.
    #[sqlx(skip)]
    pub suggested_for: Vec<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct NewWorkout {
    pub name: String,
    pub description: String,
    pub difficulty: String,
    pub suggested_for: Vec<i64>,
}

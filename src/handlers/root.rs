use actix_web::HttpResponse;
use serde_json::json;

// GET /api
pub async fn api_root() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "users": "/api/users/",
        "teams": "/api/teams/",
        "activities": "/api/activities/",
        "workouts": "/api/workouts/",
        "leaderboard": "/api/leaderboard/",
    }))
}

use crate::db::{LeaderboardFilter, Page, Store};
use crate::errors::AppError;
use crate::serializers::{LeaderboardInput, LeaderboardOut, Mode, Writable};
use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

#[derive(Deserialize, Validate)]
pub struct LeaderboardQuery {
    team: Option<i64>,
    week: Option<NaiveDate>,

    #[validate(range(min = 0, message = "Limit must be a non-negative integer"))]
    limit: Option<i64>,

    #[validate(range(min = 0, message = "Offset must be a non-negative integer"))]
    offset: Option<i64>,
}

// GET /api/leaderboard
pub async fn list_leaderboard(
    store: web::Data<Store>,
    query: web::Query<LeaderboardQuery>,
) -> Result<HttpResponse, AppError> {
    query.validate()?;

    let filter = LeaderboardFilter {
        team_id: query.team,
        week: query.week,
    };
    let page = Page {
        limit: query.limit,
        offset: query.offset,
    };
    let entries = store.list_leaderboard(filter, page).await?;
    let body: Vec<LeaderboardOut> = entries.iter().map(LeaderboardOut::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

// POST /api/leaderboard
pub async fn create_entry(
    store: web::Data<Store>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let new = LeaderboardInput::from_body(payload.into_inner())?.resolve(None, Mode::Create)?;
    let entry = store.create_leaderboard_entry(new).await?;
    Ok(HttpResponse::Created().json(LeaderboardOut::from(&entry)))
}

// GET /api/leaderboard/{id}
pub async fn get_entry(
    store: web::Data<Store>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let entry = store.get_leaderboard_entry(*id).await?;
    Ok(HttpResponse::Ok().json(LeaderboardOut::from(&entry)))
}

// PUT /api/leaderboard/{id}
pub async fn replace_entry(
    store: web::Data<Store>,
    id: web::Path<i64>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let input = LeaderboardInput::from_body(payload.into_inner())?;
    update(&store, *id, input, Mode::Replace).await
}

// PATCH /api/leaderboard/{id}
pub async fn partial_update_entry(
    store: web::Data<Store>,
    id: web::Path<i64>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let input = LeaderboardInput::from_body(payload.into_inner())?;
    update(&store, *id, input, Mode::Partial).await
}

async fn update(
    store: &Store,
    id: i64,
    input: LeaderboardInput,
    mode: Mode,
) -> Result<HttpResponse, AppError> {
    let current = store.get_leaderboard_entry(id).await?;
    let changes = input.resolve(Some(&current), mode)?;
    let entry = store.update_leaderboard_entry(id, changes).await?;
    Ok(HttpResponse::Ok().json(LeaderboardOut::from(&entry)))
}

// DELETE /api/leaderboard/{id}
pub async fn delete_entry(
    store: web::Data<Store>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    store.delete_leaderboard_entry(*id).await?;
    Ok(HttpResponse::NoContent().finish())
}

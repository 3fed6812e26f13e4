use crate::db::Store;
use crate::errors::AppError;
use crate::handlers::PageQuery;
use crate::serializers::{LinkInput, Mode, TeamInput, TeamOut, UserOut, Writable};
use actix_web::{web, HttpResponse};
use serde_json::Value;

// GET /api/teams
pub async fn list_teams(
    store: web::Data<Store>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let teams = store.list_teams(query.page()?).await?;
    let body: Vec<TeamOut> = teams.iter().map(TeamOut::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

// POST /api/teams
pub async fn create_team(
    store: web::Data<Store>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let new = TeamInput::from_body(payload.into_inner())?.resolve(None, Mode::Create)?;
    let team = store.create_team(new).await?;
    Ok(HttpResponse::Created().json(TeamOut::from(&team)))
}

// GET /api/teams/{id}
pub async fn get_team(
    store: web::Data<Store>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let team = store.get_team(*id).await?;
    Ok(HttpResponse::Ok().json(TeamOut::from(&team)))
}

// PUT /api/teams/{id}
pub async fn replace_team(
    store: web::Data<Store>,
    id: web::Path<i64>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let input = TeamInput::from_body(payload.into_inner())?;
    update(&store, *id, input, Mode::Replace).await
}

// PATCH /api/teams/{id}
pub async fn partial_update_team(
    store: web::Data<Store>,
    id: web::Path<i64>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let input = TeamInput::from_body(payload.into_inner())?;
    update(&store, *id, input, Mode::Partial).await
}

async fn update(store: &Store, id: i64, input: TeamInput, mode: Mode) -> Result<HttpResponse, AppError> {
    let current = store.get_team(id).await?;
    let changes = input.resolve(Some(&current), mode)?;
    let team = store.update_team(id, changes).await?;
    Ok(HttpResponse::Ok().json(TeamOut::from(&team)))
}

// DELETE /api/teams/{id}
pub async fn delete_team(
    store: web::Data<Store>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    store.delete_team(*id).await?;
    Ok(HttpResponse::NoContent().finish())
}

// GET /api/teams/{id}/members
pub async fn list_members(
    store: web::Data<Store>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let members = store.team_members(*id).await?;
    let body: Vec<UserOut> = members.iter().map(UserOut::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

// POST /api/teams/{id}/members
pub async fn add_member(
    store: web::Data<Store>,
    id: web::Path<i64>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let user_id = LinkInput::from_body(payload.into_inner())?.user_id()?;
    let team = store.add_team_member(*id, user_id).await?;
    Ok(HttpResponse::Ok().json(TeamOut::from(&team)))
}

// DELETE /api/teams/{id}/members/{user_id}
pub async fn remove_member(
    store: web::Data<Store>,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, AppError> {
    let (team_id, user_id) = path.into_inner();
    store.remove_team_member(team_id, user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

use crate::db::Store;
use crate::errors::AppError;
use crate::handlers::PageQuery;
use crate::serializers::{Mode, UserInput, UserOut, Writable};
use actix_web::{web, HttpResponse};
use serde_json::Value;

// GET /api/users
pub async fn list_users(
    store: web::Data<Store>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let users = store.list_users(query.page()?).await?;
    let body: Vec<UserOut> = users.iter().map(UserOut::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

// POST /api/users
pub async fn create_user(
    store: web::Data<Store>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let new = UserInput::from_body(payload.into_inner())?.resolve(None, Mode::Create)?;
    let user = store.create_user(new).await?;
    Ok(HttpResponse::Created().json(UserOut::from(&user)))
}

// GET /api/users/{id}
pub async fn get_user(
    store: web::Data<Store>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let user = store.get_user(*id).await?;
    Ok(HttpResponse::Ok().json(UserOut::from(&user)))
}

// PUT /api/users/{id}
pub async fn replace_user(
    store: web::Data<Store>,
    id: web::Path<i64>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let input = UserInput::from_body(payload.into_inner())?;
    update(&store, *id, input, Mode::Replace).await
}

// PATCH /api/users/{id}
pub async fn partial_update_user(
    store: web::Data<Store>,
    id: web::Path<i64>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let input = UserInput::from_body(payload.into_inner())?;
    update(&store, *id, input, Mode::Partial).await
}

async fn update(store: &Store, id: i64, input: UserInput, mode: Mode) -> Result<HttpResponse, AppError> {
    let current = store.get_user(id).await?;
    let changes = input.resolve(Some(&current), mode)?;
    let user = store.update_user(id, changes).await?;
    Ok(HttpResponse::Ok().json(UserOut::from(&user)))
}

// DELETE /api/users/{id}
pub async fn delete_user(
    store: web::Data<Store>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    store.delete_user(*id).await?;
    Ok(HttpResponse::NoContent().finish())
}

use crate::db::Store;
use crate::errors::AppError;
use crate::handlers::PageQuery;
use crate::serializers::{LinkInput, Mode, UserOut, WorkoutInput, WorkoutOut, Writable};
use actix_web::{web, HttpResponse};
use serde_json::Value;

// GET /api/workouts
pub async fn list_workouts(
    store: web::Data<Store>,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse, AppError> {
    let workouts = store.list_workouts(query.page()?).await?;
    let body: Vec<WorkoutOut> = workouts.iter().map(WorkoutOut::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

// POST /api/workouts
pub async fn create_workout(
    store: web::Data<Store>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let new = WorkoutInput::from_body(payload.into_inner())?.resolve(None, Mode::Create)?;
    let workout = store.create_workout(new).await?;
    Ok(HttpResponse::Created().json(WorkoutOut::from(&workout)))
}

// GET /api/workouts/{id}
pub async fn get_workout(
    store: web::Data<Store>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let workout = store.get_workout(*id).await?;
    Ok(HttpResponse::Ok().json(WorkoutOut::from(&workout)))
}

// PUT /api/workouts/{id}
pub async fn replace_workout(
    store: web::Data<Store>,
    id: web::Path<i64>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let input = WorkoutInput::from_body(payload.into_inner())?;
    update(&store, *id, input, Mode::Replace).await
}

// PATCH /api/workouts/{id}
pub async fn partial_update_workout(
    store: web::Data<Store>,
    id: web::Path<i64>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let input = WorkoutInput::from_body(payload.into_inner())?;
    update(&store, *id, input, Mode::Partial).await
}

async fn update(store: &Store, id: i64, input: WorkoutInput, mode: Mode) -> Result<HttpResponse, AppError> {
    let current = store.get_workout(id).await?;
    let changes = input.resolve(Some(&current), mode)?;
    let workout = store.update_workout(id, changes).await?;
    Ok(HttpResponse::Ok().json(WorkoutOut::from(&workout)))
}

// DELETE /api/workouts/{id}
pub async fn delete_workout(
    store: web::Data<Store>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    store.delete_workout(*id).await?;
    Ok(HttpResponse::NoContent().finish())
}

// GET /api/workouts/{id}/suggested_for
pub async fn list_suggested_users(
    store: web::Data<Store>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let users = store.workout_suggested_users(*id).await?;
    let body: Vec<UserOut> = users.iter().map(UserOut::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

// POST /api/workouts/{id}/suggested_for
pub async fn suggest_to_user(
    store: web::Data<Store>,
    id: web::Path<i64>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let user_id = LinkInput::from_body(payload.into_inner())?.user_id()?;
    let workout = store.add_workout_suggestion(*id, user_id).await?;
    Ok(HttpResponse::Ok().json(WorkoutOut::from(&workout)))
}

// DELETE /api/workouts/{id}/suggested_for/{user_id}
pub async fn withdraw_suggestion(
    store: web::Data<Store>,
    path: web::Path<(i64, i64)>,
) -> Result<HttpResponse, AppError> {
    let (workout_id, user_id) = path.into_inner();
    store.remove_workout_suggestion(workout_id, user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
